mod ast;
mod error;
mod inference;
mod matchable;
mod report;
mod syntax;
mod system;
mod token;

pub use ast::Ast;
pub use error::{GrammarError, TemplateError, VerifyError};
pub use inference::{InferenceRule, InferenceRuleDef};
pub use matchable::{Matchable, PatternElement};
pub use report::VerifyReport;
pub use syntax::{Grammar, GrammarWarning, SyntaxDef, SyntaxRule};
pub use system::System;
pub use token::Token;

pub(crate) use matchable::render_items;
pub(crate) use syntax::placeholder_table;
