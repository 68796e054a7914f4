mod compile;
mod error;
mod parse;
mod statement;
mod template;
mod types;
mod unify;
mod verify;

#[cfg(feature = "document")]
mod document;

pub use error::SequentError;
pub use types::{
    Ast, Grammar, GrammarError, GrammarWarning, InferenceRule, InferenceRuleDef, Matchable,
    PatternElement, SyntaxDef, SyntaxRule, System, TemplateError, Token, VerifyError, VerifyReport,
};
pub use unify::Bindings;
pub use verify::verify;

#[cfg(feature = "document")]
pub use document::{Document, InferenceRuleRecord, SyntaxRecord};
