//! Verification of one inference-rule application.

use log::trace;

use crate::statement;
use crate::types::{Ast, Grammar, InferenceRule, Matchable, VerifyError, VerifyReport};
use crate::unify::Unifier;

/// One parsed statement paired with its pattern. `premise` is `None` for
/// the conclusion.
struct Target<'a> {
    ast: &'a Ast,
    pattern: &'a Matchable,
    premise: Option<usize>,
}

/// Verify that `conclusion` follows from `premises` by `rule`.
///
/// Errors are collected per statement rather than short-circuited: a
/// malformed or mismatched premise never hides findings in the other
/// premises or the conclusion. Only a premise-count mismatch skips
/// matching entirely, since the pairing of statements to patterns is then
/// undefined.
pub fn verify(
    conclusion: &str,
    premises: &[&str],
    rule: &InferenceRule,
    grammar: &Grammar,
) -> VerifyReport {
    let mut report = VerifyReport::new(premises.len());

    if premises.len() != rule.premises().len() {
        report.rule_errors.push(VerifyError::PremiseCountMismatch {
            expected: rule.premises().len(),
            found: premises.len(),
        });
        return report;
    }

    let conclusion_ast = parse_into(grammar, conclusion, &mut report.conclusion_errors);
    let premise_asts: Vec<Option<Ast>> = premises
        .iter()
        .enumerate()
        .map(|(i, text)| parse_into(grammar, text, &mut report.premise_errors[i]))
        .collect();

    let mut targets = Vec::with_capacity(1 + premises.len());
    if let Some(ast) = &conclusion_ast {
        targets.push(Target {
            ast,
            pattern: rule.conclusion(),
            premise: None,
        });
    }
    for (i, ast) in premise_asts.iter().enumerate() {
        if let Some(ast) = ast {
            targets.push(Target {
                ast,
                pattern: &rule.premises()[i],
                premise: Some(i),
            });
        }
    }

    let mut unifier = Unifier::new();
    run_fixed_point(&mut unifier, &targets, &mut report);

    if !unifier.possibilities.is_empty() {
        match explore(&unifier, &targets, premises.len()) {
            Some(resolved) => unifier = resolved,
            None => report.rule_errors.push(VerifyError::UnableToUnify),
        }
    }

    if report.is_valid() {
        check_placeholder_coverage(rule, &unifier, &mut report);
    }
    report
}

fn parse_into(grammar: &Grammar, text: &str, bucket: &mut Vec<VerifyError>) -> Option<Ast> {
    match statement::parse(grammar, text) {
        Ok(ast) => Some(ast),
        Err(_) => {
            bucket.push(VerifyError::MalformedStatement {
                statement: text.trim().to_owned(),
            });
            None
        }
    }
}

/// Re-match every statement until the committed-name count stops growing;
/// binding a name through one statement can unlock another. Errors repeat
/// across iterations, so each bucket is deduplicated as it fills.
fn run_fixed_point(unifier: &mut Unifier, targets: &[Target], report: &mut VerifyReport) {
    loop {
        let before = unifier.names.len();
        for target in targets {
            if let Err(e) = unifier.match_statement(target.ast, target.pattern) {
                let bucket = match target.premise {
                    None => &mut report.conclusion_errors,
                    Some(i) => &mut report.premise_errors[i],
                };
                if !bucket.contains(&e) {
                    bucket.push(e);
                }
            }
        }
        if unifier.names.len() == before {
            break;
        }
    }
    trace!(
        "fixed point settled: {} names bound, {} ambiguous",
        unifier.names.len(),
        unifier.possibilities.len()
    );
}

/// Depth-first search over the recorded candidates. At each level the
/// lexicographically smallest unresolved name chooses; its candidates are
/// popped from the end of the list. A branch wins iff a fresh fixed point
/// under the tentative binding yields no errors and no leftover ambiguity.
fn explore(base: &Unifier, targets: &[Target], premise_count: usize) -> Option<Unifier> {
    let (name, candidates) = base.possibilities.iter().next()?;
    trace!("exploring '{name}' across {} candidates", candidates.len());
    let mut remaining = candidates.clone();
    while let Some(candidate) = remaining.pop() {
        let mut branch = Unifier::with_names(base.names.clone());
        branch.names.insert(name.clone(), candidate);
        let mut scratch = VerifyReport::new(premise_count);
        run_fixed_point(&mut branch, targets, &mut scratch);
        if !scratch.is_valid() {
            continue;
        }
        if branch.possibilities.is_empty() {
            return Some(branch);
        }
        if let Some(resolved) = explore(&branch, targets, premise_count) {
            return Some(resolved);
        }
    }
    None
}

/// The names the rule's templates mention must be exactly the names the
/// match bound. Checked only on otherwise-clean verifications; a coverage
/// gap alongside unrelated match errors would double-report most failures.
fn check_placeholder_coverage(rule: &InferenceRule, unifier: &Unifier, report: &mut VerifyReport) {
    for name in rule.placeholder_names() {
        if !unifier.names.contains_key(name) {
            report.rule_errors.push(VerifyError::UnboundPlaceholder {
                name: name.to_owned(),
            });
        }
    }
    for name in unifier.names.keys() {
        if !rule.names.contains(name) {
            report.rule_errors.push(VerifyError::UnexpectedBinding { name: name.clone() });
        }
    }
}
