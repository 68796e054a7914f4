use winnow::combinator::opt;
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::types::Token;

use super::ParseError;

// -- Whitespace -------------------------------------------------------------

pub(crate) fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace).void().parse_next(input)
}

// -- Alternative splitting --------------------------------------------------

// Stands in for the turnstile while splitting on '|'; restored afterwards.
const TURNSTILE_SENTINEL: &str = "\u{1}";

/// Split a rule definition into its `|`-separated alternatives, protecting
/// the `|-` turnstile from the split. Alternatives are trimmed; empties are
/// kept so the compiler can reject them with a precise error.
pub(crate) fn split_alternatives(definition: &str) -> Vec<String> {
    definition
        .replace("|-", TURNSTILE_SENTINEL)
        .split('|')
        .map(|alt| alt.replace(TURNSTILE_SENTINEL, "|-").trim().to_owned())
        .collect()
}

// -- The grammar-of-grammars ------------------------------------------------

/// Multi-character terminals, recognized before single characters.
const WIDE_TERMINALS: [&str; 3] = ["|-", "->", "→"];

/// A backslash followed by letters is one command terminal (`\varnothing`).
fn command<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    ('\\', take_while(1.., |c: char| c.is_ascii_alphabetic()))
        .take()
        .parse_next(input)
}

/// `placeholders` must be sorted longest name first so a short placeholder
/// cannot shadow a longer one sharing a prefix.
fn token(input: &mut &str, placeholders: &[(&str, usize)]) -> ModalResult<Token> {
    if opt('{').parse_next(input)?.is_some() {
        let inner = sequence(input, placeholders)?;
        ws(input)?;
        '}'.parse_next(input)?;
        return Ok(Token::Multiset(inner));
    }
    if let Some(cmd) = opt(command).parse_next(input)? {
        return Ok(Token::Terminal(cmd.to_owned()));
    }
    for wide in WIDE_TERMINALS {
        if opt(wide).parse_next(input)?.is_some() {
            return Ok(Token::Terminal(wide.to_owned()));
        }
    }
    for &(name, rule) in placeholders {
        if opt(name).parse_next(input)?.is_some() {
            return Ok(Token::NonTerminal(rule));
        }
    }
    let c = any.parse_next(input)?;
    Ok(Token::Terminal(c.to_string()))
}

/// Tokens up to end of input or a closing brace; whitespace between tokens
/// is insignificant.
fn sequence(input: &mut &str, placeholders: &[(&str, usize)]) -> ModalResult<Vec<Token>> {
    let mut tokens = Vec::new();
    loop {
        ws(input)?;
        if input.is_empty() || input.starts_with('}') {
            return Ok(tokens);
        }
        tokens.push(token(input, placeholders)?);
    }
}

/// Tokenize one alternative of a rule definition.
pub(crate) fn tokenize(
    text: &str,
    placeholders: &[(&str, usize)],
) -> Result<Vec<Token>, ParseError> {
    (|input: &mut &str| sequence(input, placeholders))
        .parse(text)
        .map_err(|e| ParseError::new(e.to_string()))
}
