//! Parsing of concrete statements against a compiled grammar.
//!
//! The compiled rule table is interpreted directly, indexed by rule number,
//! so mutually recursive and self-referential rules need no forward
//! declarations. Rule 0 is the top-level statement rule and must consume
//! the entire input.

use winnow::combinator::opt;
use winnow::error::{ErrMode, ModalResult};
use winnow::prelude::*;

use crate::compile::EMPTY_MARKER;
use crate::parse::{ws, ParseError};
use crate::types::{Ast, Grammar, Token};

/// Parse one concrete statement with the grammar's rule-0 parser.
pub(crate) fn parse(grammar: &Grammar, text: &str) -> Result<Ast, ParseError> {
    let parser = StatementParser { grammar };
    (|input: &mut &str| -> ModalResult<Ast> {
        let ast = parser.rule(0, input)?;
        ws(input)?;
        Ok(ast)
    })
    .parse(text)
    .map_err(|e| ParseError::new(e.to_string()))
}

struct StatementParser<'g> {
    grammar: &'g Grammar,
}

impl StatementParser<'_> {
    /// Try the rule's alternatives in order; the first that matches wins.
    /// A failed alternative consumes nothing.
    fn rule(&self, idx: usize, input: &mut &str) -> ModalResult<Ast> {
        let rule = &self.grammar.rules()[idx];
        let start = input.checkpoint();
        for alt in &rule.alternatives {
            match self.sequence(alt, input) {
                Ok(items) => return Ok(Ast::NonTerminal { rule: idx, items }),
                Err(ErrMode::Backtrack(_)) => input.reset(&start),
                Err(e) => return Err(e),
            }
        }
        Err(ErrMode::from_input(input))
    }

    fn sequence(&self, tokens: &[Token], input: &mut &str) -> ModalResult<Vec<Ast>> {
        let mut items = Vec::new();
        for token in tokens {
            self.token(token, input, &mut items)?;
        }
        Ok(items)
    }

    fn token(&self, token: &Token, input: &mut &str, items: &mut Vec<Ast>) -> ModalResult<()> {
        match token {
            Token::Terminal(text) => {
                ws(input)?;
                text.as_str().parse_next(input)?;
                items.push(Ast::Terminal(text.clone()));
            }
            Token::NonTerminal(rule) => items.push(self.rule(*rule, input)?),
            Token::Multiset(inner) => items.push(self.multiset(inner, input)?),
            Token::Or(alts) => {
                let start = input.checkpoint();
                for alt in alts {
                    match self.sequence(alt, input) {
                        Ok(nested) => {
                            items.extend(nested);
                            return Ok(());
                        }
                        Err(ErrMode::Backtrack(_)) => input.reset(&start),
                        Err(e) => return Err(e),
                    }
                }
                return Err(ErrMode::from_input(input));
            }
            Token::Maybe(alts) => {
                let start = input.checkpoint();
                for alt in alts {
                    match self.sequence(alt, input) {
                        Ok(nested) => {
                            items.extend(nested);
                            return Ok(());
                        }
                        Err(ErrMode::Backtrack(_)) => input.reset(&start),
                        Err(e) => return Err(e),
                    }
                }
                // No alternative matched: zero tokens consumed.
            }
        }
        Ok(())
    }

    /// `\varnothing` is the empty multiset; otherwise one or more
    /// comma-separated matches of the inner sequence, each attempted as a
    /// whole. A trailing comma that no further element follows is left
    /// unconsumed.
    fn multiset(&self, inner: &[Token], input: &mut &str) -> ModalResult<Ast> {
        ws(input)?;
        if opt(EMPTY_MARKER).parse_next(input)?.is_some() {
            return Ok(Ast::Multiset(Vec::new()));
        }
        let mut elements = vec![self.sequence(inner, input)?];
        loop {
            let before_comma = input.checkpoint();
            ws(input)?;
            if opt(',').parse_next(input)?.is_none() {
                input.reset(&before_comma);
                break;
            }
            match self.sequence(inner, input) {
                Ok(element) => elements.push(element),
                Err(ErrMode::Backtrack(_)) => {
                    input.reset(&before_comma);
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Ast::Multiset(elements))
    }
}
