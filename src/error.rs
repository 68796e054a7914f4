use thiserror::Error;

use crate::{GrammarError, TemplateError};

/// Unified error type covering grammar and template compilation.
///
/// Returned by facade entry points like [`System::compile()`](crate::System::compile)
/// and, with the `document` feature, [`Document`](crate::Document) loading.
#[derive(Debug, Error)]
pub enum SequentError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[cfg(feature = "document")]
    #[error("invalid document: {0}")]
    Document(#[from] serde_json::Error),
}
