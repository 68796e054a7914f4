//! Compilation of premise/conclusion templates into bindable patterns.
//!
//! The walk mirrors the statement parser, with two differences. Where the
//! grammar expects a nonterminal and the referenced rule's alternatives do
//! not parse the text, one of the rule's own placeholders may stand in,
//! compiling to a [`Matchable::Name`] binding site. Inside a multiset, an
//! element equal to the owning rule's placeholder becomes a
//! [`PatternElement::Rest`] that binds the residual sub-multiset. Template
//! text is short, so the walker backtracks freely across these choices
//! instead of committing on one token of lookahead.

use winnow::combinator::opt;
use winnow::error::{ErrMode, ModalResult};
use winnow::prelude::*;

use crate::compile::EMPTY_MARKER;
use crate::parse::ws;
use crate::types::{Grammar, Matchable, PatternElement, TemplateError, Token};

/// Compile one template against the grammar's statement rule. The whole
/// template must be consumed.
pub(crate) fn compile(grammar: &Grammar, template: &str) -> Result<Matchable, TemplateError> {
    let compiler = TemplateCompiler { grammar };
    let root = [Token::NonTerminal(0)];
    let mut input = template;
    match compiler.seq(&root, 0, &mut input) {
        Ok(mut items) => {
            let _ = ws(&mut input);
            if !input.is_empty() {
                return Err(TemplateError::TrailingInput {
                    template: template.to_owned(),
                    rest: input.trim_end().to_owned(),
                });
            }
            Ok(items.pop().expect("root walk yields one pattern"))
        }
        Err(_) => Err(TemplateError::Parse {
            template: template.to_owned(),
            message: "no derivation of the statement rule matches".to_owned(),
        }),
    }
}

struct TemplateCompiler<'g> {
    grammar: &'g Grammar,
}

impl TemplateCompiler<'_> {
    /// Match a token sequence against the input, backtracking across
    /// nonterminal and `Or`/`Maybe` choices when a later token fails.
    /// `owner` is the rule whose alternative is being walked; multisets use
    /// it to recognize their residual placeholder.
    fn seq(&self, tokens: &[Token], owner: usize, input: &mut &str) -> ModalResult<Vec<Matchable>> {
        let Some((head, rest)) = tokens.split_first() else {
            return Ok(Vec::new());
        };
        let start = input.checkpoint();
        match head {
            Token::Terminal(text) => {
                ws(input)?;
                text.as_str().parse_next(input)?;
                let mut items = vec![Matchable::Terminal(text.clone())];
                items.extend(self.seq(rest, owner, input)?);
                Ok(items)
            }
            Token::NonTerminal(rule) => {
                for alt in &self.grammar.rules()[*rule].alternatives {
                    match self.seq(alt, *rule, input) {
                        Ok(sub) => {
                            let node = Matchable::NonTerminal {
                                rule: *rule,
                                items: sub,
                            };
                            match self.seq(rest, owner, input) {
                                Ok(more) => {
                                    let mut items = vec![node];
                                    items.extend(more);
                                    return Ok(items);
                                }
                                Err(ErrMode::Backtrack(_)) => input.reset(&start),
                                Err(e) => return Err(e),
                            }
                        }
                        Err(ErrMode::Backtrack(_)) => input.reset(&start),
                        Err(e) => return Err(e),
                    }
                }
                for name in self.placeholders(*rule) {
                    ws(input)?;
                    if opt(name.as_str()).parse_next(input)?.is_some() {
                        let node = Matchable::Name {
                            rule: *rule,
                            name: name.clone(),
                        };
                        match self.seq(rest, owner, input) {
                            Ok(more) => {
                                let mut items = vec![node];
                                items.extend(more);
                                return Ok(items);
                            }
                            Err(ErrMode::Backtrack(_)) => input.reset(&start),
                            Err(e) => return Err(e),
                        }
                    } else {
                        input.reset(&start);
                    }
                }
                Err(ErrMode::from_input(input))
            }
            Token::Multiset(inner) => {
                let node = self.multiset(inner, owner, input)?;
                let mut items = vec![node];
                items.extend(self.seq(rest, owner, input)?);
                Ok(items)
            }
            Token::Or(alts) => self.alternation(alts, rest, owner, input, false),
            Token::Maybe(alts) => self.alternation(alts, rest, owner, input, true),
        }
    }

    fn alternation(
        &self,
        alts: &[Vec<Token>],
        rest: &[Token],
        owner: usize,
        input: &mut &str,
        optional: bool,
    ) -> ModalResult<Vec<Matchable>> {
        let start = input.checkpoint();
        for alt in alts {
            match self.seq(alt, owner, input) {
                Ok(mut items) => match self.seq(rest, owner, input) {
                    Ok(more) => {
                        items.extend(more);
                        return Ok(items);
                    }
                    Err(ErrMode::Backtrack(_)) => input.reset(&start),
                    Err(e) => return Err(e),
                },
                Err(ErrMode::Backtrack(_)) => input.reset(&start),
                Err(e) => return Err(e),
            }
        }
        if optional {
            return self.seq(rest, owner, input);
        }
        Err(ErrMode::from_input(input))
    }

    fn multiset(
        &self,
        inner: &[Token],
        owner: usize,
        input: &mut &str,
    ) -> ModalResult<Matchable> {
        ws(input)?;
        if opt(EMPTY_MARKER).parse_next(input)?.is_some() {
            return Ok(Matchable::Multiset {
                rule: owner,
                elements: Vec::new(),
            });
        }
        let mut elements = vec![self.element(inner, owner, input)?];
        loop {
            let before_comma = input.checkpoint();
            ws(input)?;
            if opt(',').parse_next(input)?.is_none() {
                input.reset(&before_comma);
                break;
            }
            match self.element(inner, owner, input) {
                Ok(element) => elements.push(element),
                Err(ErrMode::Backtrack(_)) => {
                    input.reset(&before_comma);
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Matchable::Multiset {
            rule: owner,
            elements,
        })
    }

    /// One comma-separated element: the owning rule's placeholder binds the
    /// residual sub-multiset; anything else is a fixed-shape member.
    fn element(
        &self,
        inner: &[Token],
        owner: usize,
        input: &mut &str,
    ) -> ModalResult<PatternElement> {
        ws(input)?;
        for name in self.placeholders(owner) {
            if opt(name.as_str()).parse_next(input)?.is_some() {
                return Ok(PatternElement::Rest {
                    rule: owner,
                    name: name.clone(),
                });
            }
        }
        let items = self.seq(inner, owner, input)?;
        Ok(PatternElement::Fixed(items))
    }

    /// A rule's declared placeholders, longest first.
    fn placeholders(&self, rule: usize) -> Vec<String> {
        let mut names = self.grammar.rules()[rule].placeholders.clone();
        names.sort_by(|a, b| b.len().cmp(&a.len()));
        names
    }
}
