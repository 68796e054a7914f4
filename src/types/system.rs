use std::fmt;

use super::error::VerifyError;
use super::inference::{InferenceRule, InferenceRuleDef};
use super::report::VerifyReport;
use super::syntax::{Grammar, SyntaxDef};

/// A compiled formal system: one grammar plus the inference rules defined
/// over it. Immutable once compiled and safe to share across threads;
/// independent [`verify`](crate::verify) calls need no coordination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct System {
    pub(crate) grammar: Grammar,
    pub(crate) rules: Vec<InferenceRule>,
}

impl System {
    /// Compile raw syntax and inference-rule records into a system.
    ///
    /// # Errors
    ///
    /// Returns [`SequentError`](crate::SequentError) on the first grammar or
    /// template failure; the grammar must be valid before any rule template
    /// can be compiled.
    pub fn compile(
        syntax: &[SyntaxDef],
        rules: &[InferenceRuleDef],
    ) -> Result<Self, crate::SequentError> {
        let grammar = Grammar::compile(syntax)?;
        let rules = rules
            .iter()
            .map(|def| InferenceRule::compile(def, &grammar))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { grammar, rules })
    }

    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    #[must_use]
    pub fn rules(&self) -> &[InferenceRule] {
        &self.rules
    }

    /// Look up a compiled inference rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&InferenceRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Verify one rule application, addressing the rule by name.
    ///
    /// An unknown rule name is reported as a rule error rather than a
    /// failure of the call: the caller is typically annotating a
    /// user-authored derivation tree where a bad rule name is ordinary
    /// input.
    pub fn verify(&self, rule_name: &str, conclusion: &str, premises: &[&str]) -> VerifyReport {
        match self.rule(rule_name) {
            Some(rule) => crate::verify::verify(conclusion, premises, rule, &self.grammar),
            None => {
                let mut report = VerifyReport::new(premises.len());
                report.rule_errors.push(VerifyError::UnknownRule {
                    name: rule_name.to_owned(),
                });
                report
            }
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "System({} syntax rules, {} inference rules)",
            self.grammar.rules().len(),
            self.rules.len(),
        )
    }
}
