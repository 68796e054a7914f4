mod grammar;

use std::fmt;

pub(crate) use grammar::{split_alternatives, tokenize, ws};

/// Internal soft parse failure, produced by the tokenizer and the statement
/// parser. Callers map it into the public error taxonomy
/// ([`GrammarError`](crate::GrammarError), [`TemplateError`](crate::TemplateError),
/// or a malformed-statement verification error).
#[derive(Debug, Clone)]
pub(crate) struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}
