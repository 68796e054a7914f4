//! The JSON exchange document shared with editor and import/export layers.
//!
//! The core only ever consumes the raw texts inside it; this module is the
//! serde view of the shape those collaborators persist:
//!
//! ```json
//! { "syntax": [ { "placeholders": ["A", "B"], "definition": "x|y" } ],
//!   "inferenceRules": [ { "name": "Ax", "premises": [], "conclusion": "Γ, A |- A" } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::{InferenceRuleDef, SequentError, SyntaxDef, System};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub syntax: Vec<SyntaxRecord>,
    pub inference_rules: Vec<InferenceRuleRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxRecord {
    pub placeholders: Vec<String>,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceRuleRecord {
    pub name: String,
    pub premises: Vec<String>,
    pub conclusion: String,
}

impl Document {
    /// # Errors
    ///
    /// Returns [`SequentError::Document`] if the text is not a valid
    /// document.
    pub fn from_json(text: &str) -> Result<Self, SequentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns [`SequentError::Document`] if encoding fails.
    pub fn to_json(&self) -> Result<String, SequentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compile the document's raw texts into a [`System`].
    ///
    /// # Errors
    ///
    /// Returns [`SequentError`] on grammar or template failure.
    pub fn compile(&self) -> Result<System, SequentError> {
        let syntax: Vec<SyntaxDef> = self
            .syntax
            .iter()
            .map(|record| SyntaxDef::new(record.placeholders.join(", "), &record.definition))
            .collect();
        let rules: Vec<InferenceRuleDef> = self
            .inference_rules
            .iter()
            .map(|record| {
                InferenceRuleDef::new(&record.name, record.premises.clone(), &record.conclusion)
            })
            .collect();
        System::compile(&syntax, &rules)
    }
}
