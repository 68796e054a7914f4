use std::fmt;

/// One token of a compiled grammar alternative.
///
/// `Or` and `Maybe` are introduced by left-factoring during compilation;
/// they never appear in a freshly tokenized alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A fixed literal, matched verbatim (surrounding whitespace ignored).
    Terminal(String),
    /// A reference to another rule, by its index in the grammar.
    NonTerminal(usize),
    /// A brace-delimited, comma-separated repetition of one inner sequence.
    Multiset(Vec<Token>),
    /// Alternative continuations; the first that matches wins.
    Or(Vec<Vec<Token>>),
    /// Like [`Token::Or`], but matching nothing is allowed.
    Maybe(Vec<Vec<Token>>),
}

impl Token {
    /// The index of the rule this token refers to, if it is a reference.
    #[must_use]
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            Token::NonTerminal(idx) => Some(*idx),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Terminal(text) => write!(f, "{text}"),
            Token::NonTerminal(idx) => write!(f, "<{idx}>"),
            Token::Multiset(inner) => {
                write!(f, "{{")?;
                fmt_sequence(f, inner)?;
                write!(f, "}}")
            }
            Token::Or(alts) => fmt_alternatives(f, alts, ""),
            Token::Maybe(alts) => fmt_alternatives(f, alts, "?"),
        }
    }
}

fn fmt_sequence(f: &mut fmt::Formatter<'_>, tokens: &[Token]) -> fmt::Result {
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{token}")?;
    }
    Ok(())
}

fn fmt_alternatives(f: &mut fmt::Formatter<'_>, alts: &[Vec<Token>], suffix: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, alt) in alts.iter().enumerate() {
        if i > 0 {
            write!(f, " | ")?;
        }
        fmt_sequence(f, alt)?;
    }
    write!(f, "){suffix}")
}
