use std::fmt;

/// The concrete-parse result of one statement, mirroring [`Token`] shape.
///
/// Equality is structural, and order-insensitive across the elements of a
/// multiset: `x, y` and `y, x` are the same multiset instance. This is the
/// equality used everywhere a name binding is compared against a prior
/// binding.
///
/// [`Token`]: super::Token
#[derive(Debug, Clone, Eq)]
pub enum Ast {
    Terminal(String),
    NonTerminal { rule: usize, items: Vec<Ast> },
    /// Each element is one match of the multiset's inner sequence.
    Multiset(Vec<Vec<Ast>>),
}

impl PartialEq for Ast {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ast::Terminal(a), Ast::Terminal(b)) => a == b,
            (
                Ast::NonTerminal { rule: ra, items: ia },
                Ast::NonTerminal { rule: rb, items: ib },
            ) => ra == rb && ia == ib,
            (Ast::Multiset(a), Ast::Multiset(b)) => multiset_eq(a, b),
            _ => false,
        }
    }
}

/// Unordered element-wise equality. Greedy pairing is sound here because
/// structural equality is transitive.
fn multiset_eq(a: &[Vec<Ast>], b: &[Vec<Ast>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    'outer: for element in a {
        for (i, candidate) in b.iter().enumerate() {
            if !used[i] && element == candidate {
                used[i] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Terminal(text) => write!(f, "{text}"),
            Ast::NonTerminal { items, .. } => fmt_items(f, items),
            Ast::Multiset(elements) => {
                if elements.is_empty() {
                    return write!(f, "\\varnothing");
                }
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt_items(f, element)?;
                }
                Ok(())
            }
        }
    }
}

fn fmt_items(f: &mut fmt::Formatter<'_>, items: &[Ast]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(text: &str) -> Vec<Ast> {
        vec![Ast::NonTerminal {
            rule: 2,
            items: vec![Ast::Terminal(text.into())],
        }]
    }

    #[test]
    fn terminal_equality() {
        assert_eq!(Ast::Terminal("x".into()), Ast::Terminal("x".into()));
        assert_ne!(Ast::Terminal("x".into()), Ast::Terminal("y".into()));
    }

    #[test]
    fn multiset_equality_ignores_order() {
        let a = Ast::Multiset(vec![term("x"), term("y")]);
        let b = Ast::Multiset(vec![term("y"), term("x")]);
        assert_eq!(a, b);
    }

    #[test]
    fn multiset_equality_respects_multiplicity() {
        let a = Ast::Multiset(vec![term("x"), term("x"), term("y")]);
        let b = Ast::Multiset(vec![term("x"), term("y"), term("y")]);
        assert_ne!(a, b);
    }

    #[test]
    fn multiset_length_mismatch() {
        let a = Ast::Multiset(vec![term("x")]);
        let b = Ast::Multiset(vec![term("x"), term("x")]);
        assert_ne!(a, b);
    }

    #[test]
    fn display_statement() {
        let ast = Ast::NonTerminal {
            rule: 0,
            items: vec![
                Ast::Multiset(vec![term("x"), term("y")]),
                Ast::Terminal("|-".into()),
                Ast::Terminal("z".into()),
            ],
        };
        assert_eq!(ast.to_string(), "x, y |- z");
    }

    #[test]
    fn display_empty_multiset() {
        assert_eq!(Ast::Multiset(vec![]).to_string(), "\\varnothing");
    }
}
