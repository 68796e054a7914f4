use std::fmt;

use super::error::GrammarError;
use super::token::Token;

/// A raw syntax-rule record as supplied by an editor or import layer.
///
/// `placeholders` is a comma-separated list of names standing for "some
/// instance of this rule" inside templates; `definition` is the rule text
/// with `|`-separated alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDef {
    pub placeholders: String,
    pub definition: String,
}

impl SyntaxDef {
    pub fn new(placeholders: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            placeholders: placeholders.into(),
            definition: definition.into(),
        }
    }
}

/// One compiled syntax rule: its sanitized placeholder names, the trimmed
/// definition source, and the left-factored token alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxRule {
    pub placeholders: Vec<String>,
    pub source: String,
    pub alternatives: Vec<Vec<Token>>,
}

/// A compiled grammar: the ordered rule list (index 0 is the distinguished
/// top-level statement rule) plus any non-fatal warnings collected during
/// compilation.
///
/// Compilation is a pure function of the raw definitions; a `Grammar` is
/// immutable once built and is replaced wholesale on recompilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub(crate) rules: Vec<SyntaxRule>,
    pub(crate) warnings: Vec<GrammarWarning>,
}

impl Grammar {
    /// Compile raw syntax definitions into a grammar.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] if the definitions are malformed or
    /// ambiguous.
    pub fn compile(defs: &[SyntaxDef]) -> Result<Self, GrammarError> {
        crate::compile::compile(defs)
    }

    #[must_use]
    pub fn rules(&self) -> &[SyntaxRule] {
        &self.rules
    }

    #[must_use]
    pub fn rule(&self, index: usize) -> Option<&SyntaxRule> {
        self.rules.get(index)
    }

    /// Warnings collected during compilation, in rule order.
    #[must_use]
    pub fn warnings(&self) -> &[GrammarWarning] {
        &self.warnings
    }
}

/// Sort `(placeholder, rule)` pairs longest placeholder first, ties in
/// declaration order.
pub(crate) fn placeholder_table<'a>(
    pairs: impl Iterator<Item = (&'a str, usize)>,
) -> Vec<(&'a str, usize)> {
    let mut table: Vec<(&str, usize)> = pairs.collect();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
}

/// A non-fatal observation about a compiled grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarWarning {
    /// A multiset whose inner sequence consists of terminals only; it can
    /// never carry matchable structure.
    TerminalOnlyMultiset { rule: usize },
}

impl fmt::Display for GrammarWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarWarning::TerminalOnlyMultiset { rule } => write!(
                f,
                "rule {rule} contains a multiset of terminals only; it can never bind a name"
            ),
        }
    }
}
