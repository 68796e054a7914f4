use std::collections::BTreeSet;

use super::error::TemplateError;
use super::matchable::Matchable;
use super::syntax::Grammar;

/// A raw inference-rule record: a name plus premise and conclusion template
/// texts, as supplied by an editor or import layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRuleDef {
    pub name: String,
    pub premises: Vec<String>,
    pub conclusion: String,
}

impl InferenceRuleDef {
    pub fn new(
        name: impl Into<String>,
        premises: impl IntoIterator<Item = impl Into<String>>,
        conclusion: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            premises: premises.into_iter().map(Into::into).collect(),
            conclusion: conclusion.into(),
        }
    }
}

/// An inference rule compiled against a grammar: bindable patterns for each
/// premise and for the conclusion, plus the set of placeholder names the
/// templates mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRule {
    pub(crate) name: String,
    pub(crate) premises: Vec<Matchable>,
    pub(crate) conclusion: Matchable,
    pub(crate) names: BTreeSet<String>,
}

impl InferenceRule {
    /// Compile a raw rule record against a compiled grammar.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if any template fails to parse against the
    /// grammar extended with its placeholder names.
    pub fn compile(def: &InferenceRuleDef, grammar: &Grammar) -> Result<Self, TemplateError> {
        let conclusion = crate::template::compile(grammar, &def.conclusion)?;
        let premises = def
            .premises
            .iter()
            .map(|text| crate::template::compile(grammar, text))
            .collect::<Result<Vec<_>, _>>()?;

        let mut names = BTreeSet::new();
        conclusion.collect_names(&mut names);
        for premise in &premises {
            premise.collect_names(&mut names);
        }

        Ok(Self {
            name: def.name.clone(),
            premises,
            conclusion,
            names,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn premises(&self) -> &[Matchable] {
        &self.premises
    }

    #[must_use]
    pub fn conclusion(&self) -> &Matchable {
        &self.conclusion
    }

    /// The distinct placeholder names occurring across all templates.
    #[must_use]
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
