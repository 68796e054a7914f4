use thiserror::Error;

/// Fatal grammar-compilation failures. Any of these blocks downstream
/// template compilation and verification until the grammar is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("a grammar needs at least the top-level statement rule")]
    NoRules,

    #[error("rule {rule} declares an empty placeholder")]
    EmptyPlaceholder { rule: usize },

    #[error("rule {rule} must declare at least one placeholder")]
    MissingPlaceholders { rule: usize },

    #[error("placeholder '{name}' is declared more than once")]
    DuplicatePlaceholder { name: String },

    #[error("rule {rule} contains an empty alternative")]
    EmptyAlternative { rule: usize },

    #[error("rule {rule} is malformed: {message}")]
    Malformed { rule: usize, message: String },

    #[error("duplicate alternatives in rule {rule}")]
    DuplicateAlternatives { rule: usize },

    #[error("different non-terminals have the same first set in rule {rule}")]
    FirstSetClash { rule: usize },
}

/// A premise or conclusion template that fails to compile against an
/// already-valid grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template '{template}' does not parse against the grammar: {message}")]
    Parse { template: String, message: String },

    #[error("template '{template}' has unexpected trailing input '{rest}'")]
    TrailingInput { template: String, rest: String },
}

/// A single verification finding. These are collected into a
/// [`VerifyReport`](super::VerifyReport) and rendered through `Display`;
/// they are never thrown past the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("malformed statement '{statement}'")]
    MalformedStatement { statement: String },

    #[error("rule expects {expected} premises, found {found}")]
    PremiseCountMismatch { expected: usize, found: usize },

    #[error("incompatible names: '{name}' is already bound to a different value")]
    IncompatibleNames { name: String },

    #[error("expected '{expected}', found '{found}'")]
    TerminalMismatch { expected: String, found: String },

    #[error("statement structure does not match the pattern")]
    StructureMismatch,

    #[error("an element bound to '{name}' is missing from the multiset")]
    MissingElement { name: String },

    #[error("no multiset element matches '{pattern}'")]
    UnmatchedElement { pattern: String },

    #[error("unmatched elements remain in the multiset")]
    LeftoverElements,

    #[error("placeholder '{name}' was never bound")]
    UnboundPlaceholder { name: String },

    #[error("name '{name}' does not appear in the rule's templates")]
    UnexpectedBinding { name: String },

    #[error("unable to unify names")]
    UnableToUnify,

    #[error("no rule named '{name}'")]
    UnknownRule { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_alternatives_message() {
        let err = GrammarError::DuplicateAlternatives { rule: 2 };
        assert_eq!(err.to_string(), "duplicate alternatives in rule 2");
    }

    #[test]
    fn first_set_clash_message() {
        let err = GrammarError::FirstSetClash { rule: 0 };
        assert_eq!(
            err.to_string(),
            "different non-terminals have the same first set in rule 0"
        );
    }

    #[test]
    fn duplicate_placeholder_message() {
        let err = GrammarError::DuplicatePlaceholder { name: "A".into() };
        assert_eq!(err.to_string(), "placeholder 'A' is declared more than once");
    }

    #[test]
    fn template_parse_message() {
        let err = TemplateError::Parse {
            template: "Γ |-".into(),
            message: "expected statement".into(),
        };
        assert_eq!(
            err.to_string(),
            "template 'Γ |-' does not parse against the grammar: expected statement"
        );
    }

    #[test]
    fn unify_message_mentions_unify() {
        assert!(VerifyError::UnableToUnify.to_string().contains("unify"));
    }

    #[test]
    fn premise_count_message() {
        let err = VerifyError::PremiseCountMismatch {
            expected: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "rule expects 2 premises, found 1");
    }
}
