//! Structural matching of concrete ASTs against compiled patterns.
//!
//! A [`Unifier`] carries the committed name bindings and, for multiset
//! matches that cannot yet be decided, a table of candidate values per
//! still-ambiguous name. The verifier re-runs matching to a fixed point and
//! resolves the remaining ambiguity by backtracking search.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{render_items, Ast, Matchable, PatternElement, VerifyError};

/// Committed name bindings for one verification call. The sorted keys give
/// the deterministic branch order of the backtracking search.
pub type Bindings = BTreeMap<String, Ast>;

/// Why a match attempt did not succeed.
#[derive(Debug)]
pub(crate) enum Refusal {
    /// A new binding was required while probing a speculative multiset
    /// decomposition. Never surfaced to the caller.
    Conservative,
    Error(VerifyError),
}

type MResult = Result<(), Refusal>;

#[derive(Debug, Clone, Default)]
pub(crate) struct Unifier {
    pub(crate) names: Bindings,
    /// Candidate values per name that a multiset match left ambiguous.
    pub(crate) possibilities: BTreeMap<String, Vec<Ast>>,
}

impl Unifier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_names(names: Bindings) -> Self {
        Self {
            names,
            possibilities: BTreeMap::new(),
        }
    }

    /// Match one parsed statement against one pattern, committing whatever
    /// bindings the match determines. An underdetermined multiset records
    /// its candidates and reports success; the caller resolves the
    /// ambiguity once the fixed point settles.
    pub(crate) fn match_statement(
        &mut self,
        ast: &Ast,
        pattern: &Matchable,
    ) -> Result<(), VerifyError> {
        match self.matches(ast, pattern, false) {
            Ok(()) => Ok(()),
            Err(Refusal::Error(e)) => Err(e),
            // A conservative refusal cannot escape a non-conservative call.
            Err(Refusal::Conservative) => Err(VerifyError::StructureMismatch),
        }
    }

    fn matches(&mut self, ast: &Ast, pattern: &Matchable, conservative: bool) -> MResult {
        match (ast, pattern) {
            (Ast::Terminal(found), Matchable::Terminal(expected)) => {
                if found == expected {
                    Ok(())
                } else {
                    Err(Refusal::Error(VerifyError::TerminalMismatch {
                        expected: expected.clone(),
                        found: found.clone(),
                    }))
                }
            }
            (_, Matchable::Name { name, .. }) => self.bind(name, ast, conservative),
            (
                Ast::NonTerminal { rule: ra, items: ia },
                Matchable::NonTerminal { rule: rp, items: ip },
            ) => {
                if ra != rp || ia.len() != ip.len() {
                    return Err(Refusal::Error(VerifyError::StructureMismatch));
                }
                for (ast, pattern) in ia.iter().zip(ip) {
                    self.matches(ast, pattern, conservative)?;
                }
                Ok(())
            }
            (Ast::Multiset(elements), Matchable::Multiset { elements: pattern, .. }) => {
                self.match_multiset(elements, pattern, conservative)
            }
            _ => Err(Refusal::Error(VerifyError::StructureMismatch)),
        }
    }

    fn bind(&mut self, name: &str, value: &Ast, conservative: bool) -> MResult {
        if let Some(prev) = self.names.get(name) {
            if prev == value {
                Ok(())
            } else {
                Err(Refusal::Error(VerifyError::IncompatibleNames {
                    name: name.to_owned(),
                }))
            }
        } else if conservative {
            Err(Refusal::Conservative)
        } else {
            self.names.insert(name.to_owned(), value.clone());
            self.possibilities.remove(name);
            Ok(())
        }
    }

    /// Restricted associative-commutative matching over a matched-flag per
    /// concrete element.
    fn match_multiset(
        &mut self,
        concrete: &[Vec<Ast>],
        pattern: &[PatternElement],
        conservative: bool,
    ) -> MResult {
        let mut matched = vec![false; concrete.len()];
        let mut unbound_rest: Vec<&str> = Vec::new();

        // Every element recorded under an already-bound residual name must
        // be present; unbound residual names are deferred.
        for element in pattern {
            let PatternElement::Rest { name, .. } = element else {
                continue;
            };
            match self.names.get(name) {
                None => unbound_rest.push(name.as_str()),
                Some(Ast::Multiset(recorded)) => {
                    for rec in recorded {
                        let slot = concrete
                            .iter()
                            .enumerate()
                            .find(|(i, el)| !matched[*i] && *el == rec);
                        match slot {
                            Some((i, _)) => matched[i] = true,
                            None => {
                                return Err(Refusal::Error(VerifyError::MissingElement {
                                    name: name.clone(),
                                }))
                            }
                        }
                    }
                }
                Some(_) => {
                    return Err(Refusal::Error(VerifyError::IncompatibleNames {
                        name: name.clone(),
                    }))
                }
            }
        }

        // Fixed-shape members claim concrete elements in order, matching
        // conservatively while any name of this multiset pattern is still
        // unbound so a speculative claim cannot commit a binding.
        let has_unbound = !unbound_rest.is_empty()
            || pattern.iter().any(|el| match el {
                PatternElement::Fixed(items) => self.has_unbound_names(items),
                PatternElement::Rest { .. } => false,
            });
        let mut failed: Vec<&Vec<Matchable>> = Vec::new();
        for element in pattern {
            let PatternElement::Fixed(items) = element else {
                continue;
            };
            let probe_conservative = conservative || has_unbound;
            let mut hit = false;
            for i in 0..concrete.len() {
                if !matched[i] && self.try_element(&concrete[i], items, probe_conservative) {
                    matched[i] = true;
                    hit = true;
                    break;
                }
            }
            if hit {
                continue;
            }
            if conservative {
                return Err(Refusal::Conservative);
            }
            if !self.has_unbound_names(items) {
                // Nothing left to bind: the member is definitively absent.
                return Err(Refusal::Error(VerifyError::UnmatchedElement {
                    pattern: render_items(items),
                }));
            }
            failed.push(items);
        }

        let leftovers: Vec<usize> = (0..concrete.len()).filter(|&i| !matched[i]).collect();

        if conservative {
            return if unbound_rest.is_empty() && leftovers.is_empty() {
                Ok(())
            } else {
                Err(Refusal::Conservative)
            };
        }

        // The only unambiguous case: exactly one residual name left, every
        // fixed member accounted for. It takes the remainder.
        if failed.is_empty() && unbound_rest.len() == 1 {
            let remainder = leftovers.iter().map(|&i| concrete[i].clone()).collect();
            return self.bind(unbound_rest[0], &Ast::Multiset(remainder), false);
        }
        if failed.is_empty() && unbound_rest.is_empty() {
            return if leftovers.is_empty() {
                Ok(())
            } else {
                Err(Refusal::Error(VerifyError::LeftoverElements))
            };
        }

        // Underdetermined: record candidates instead of failing. Unmatched
        // fixed members are probe-matched against each leftover element on
        // scratch bindings; whatever a successful probe binds becomes a
        // candidate. A member no probe can place is definitively absent.
        for &items in &failed {
            let mut any_probe = false;
            for &i in &leftovers {
                let mut probe = Unifier::with_names(self.names.clone());
                if probe.try_element(&concrete[i], items, false) {
                    any_probe = true;
                    for (name, value) in probe.names {
                        if !self.names.contains_key(&name) {
                            push_candidate(&mut self.possibilities, name, value);
                        }
                    }
                    for (name, candidates) in probe.possibilities {
                        for value in candidates {
                            push_candidate(&mut self.possibilities, name.clone(), value);
                        }
                    }
                }
            }
            if !any_probe {
                return Err(Refusal::Error(VerifyError::UnmatchedElement {
                    pattern: render_items(items),
                }));
            }
        }

        // Two or more residual names cannot be split deterministically;
        // enumerate sub-multisets of the leftovers as candidates. This is
        // the exponential corner the backtracking search is allowed to pay
        // for. Leftover counts past the mask width are not enumerated; a
        // 2^64-candidate search would never finish anyway, so those cases
        // surface as a unification failure instead.
        if unbound_rest.len() >= 2 && leftovers.len() < 64 {
            for name in &unbound_rest {
                for mask in 0_u64..(1_u64 << leftovers.len()) {
                    let subset = leftovers
                        .iter()
                        .enumerate()
                        .filter(|(bit, _)| mask & (1 << *bit) != 0)
                        .map(|(_, &i)| concrete[i].clone())
                        .collect();
                    push_candidate(
                        &mut self.possibilities,
                        (*name).to_owned(),
                        Ast::Multiset(subset),
                    );
                }
            }
        }
        Ok(())
    }

    /// Match one concrete element against a fixed-shape member, pairwise.
    /// Bindings made along the way are rolled back if a later item fails.
    fn try_element(&mut self, element: &[Ast], items: &[Matchable], conservative: bool) -> bool {
        if element.len() != items.len() {
            return false;
        }
        let snapshot = self.names.clone();
        for (ast, pattern) in element.iter().zip(items) {
            if self.matches(ast, pattern, conservative).is_err() {
                self.names = snapshot;
                return false;
            }
        }
        true
    }

    fn has_unbound_names(&self, items: &[Matchable]) -> bool {
        let mut names = BTreeSet::new();
        for item in items {
            item.collect_names(&mut names);
        }
        names.iter().any(|name| !self.names.contains_key(name))
    }
}

fn push_candidate(possibilities: &mut BTreeMap<String, Vec<Ast>>, name: String, value: Ast) {
    let list = possibilities.entry(name).or_default();
    if !list.contains(&value) {
        list.push(value);
    }
}
