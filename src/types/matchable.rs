use std::collections::BTreeSet;
use std::fmt;

/// The pattern-side counterpart of [`Ast`](super::Ast), compiled from a
/// premise or conclusion template. Patterns are used for binding, never for
/// parsing concrete text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matchable {
    Terminal(String),
    /// A binding site: a placeholder standing for one instance of `rule`.
    Name { rule: usize, name: String },
    NonTerminal { rule: usize, items: Vec<Matchable> },
    Multiset { rule: usize, elements: Vec<PatternElement> },
}

/// One element of a multiset pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    /// The multiset rule's own placeholder: binds the entire residual
    /// sub-multiset left over once the other elements are accounted for.
    Rest { rule: usize, name: String },
    /// A single member of fixed shape; its items may contain further
    /// binding sites.
    Fixed(Vec<Matchable>),
}

impl Matchable {
    /// Collect every placeholder name occurring in this pattern.
    pub fn collect_names(&self, out: &mut BTreeSet<String>) {
        match self {
            Matchable::Terminal(_) => {}
            Matchable::Name { name, .. } => {
                out.insert(name.clone());
            }
            Matchable::NonTerminal { items, .. } => {
                for item in items {
                    item.collect_names(out);
                }
            }
            Matchable::Multiset { elements, .. } => {
                for element in elements {
                    match element {
                        PatternElement::Rest { name, .. } => {
                            out.insert(name.clone());
                        }
                        PatternElement::Fixed(items) => {
                            for item in items {
                                item.collect_names(out);
                            }
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Display for Matchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matchable::Terminal(text) => write!(f, "{text}"),
            Matchable::Name { name, .. } => write!(f, "{name}"),
            Matchable::NonTerminal { items, .. } => fmt_items(f, items),
            Matchable::Multiset { elements, .. } => {
                if elements.is_empty() {
                    return write!(f, "\\varnothing");
                }
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match element {
                        PatternElement::Rest { name, .. } => write!(f, "{name}")?,
                        PatternElement::Fixed(items) => fmt_items(f, items)?,
                    }
                }
                Ok(())
            }
        }
    }
}

pub(crate) fn fmt_items(f: &mut fmt::Formatter<'_>, items: &[Matchable]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Render a pattern-element sequence for error messages.
pub(crate) fn render_items(items: &[Matchable]) -> String {
    struct Items<'a>(&'a [Matchable]);
    impl fmt::Display for Items<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt_items(f, self.0)
        }
    }
    Items(items).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_names_walks_multisets() {
        let pattern = Matchable::Multiset {
            rule: 1,
            elements: vec![
                PatternElement::Rest {
                    rule: 1,
                    name: "Γ".into(),
                },
                PatternElement::Fixed(vec![Matchable::Name {
                    rule: 2,
                    name: "A".into(),
                }]),
            ],
        };
        let mut names = BTreeSet::new();
        pattern.collect_names(&mut names);
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["A".to_owned(), "Γ".to_owned()]
        );
    }

    #[test]
    fn display_multiset_pattern() {
        let pattern = Matchable::Multiset {
            rule: 1,
            elements: vec![
                PatternElement::Rest {
                    rule: 1,
                    name: "Γ".into(),
                },
                PatternElement::Fixed(vec![Matchable::Name {
                    rule: 2,
                    name: "A".into(),
                }]),
            ],
        };
        assert_eq!(pattern.to_string(), "Γ, A");
    }
}
