use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::parse;
use crate::types::{
    placeholder_table, Grammar, GrammarError, GrammarWarning, SyntaxDef, SyntaxRule, Token,
};

/// The synthetic FIRST-set marker contributed by a multiset-first
/// alternative, doubling as the literal spelling of the empty multiset.
pub(crate) const EMPTY_MARKER: &str = "\\varnothing";

pub(crate) fn compile(defs: &[SyntaxDef]) -> Result<Grammar, GrammarError> {
    if defs.is_empty() {
        return Err(GrammarError::NoRules);
    }

    let placeholders = sanitize_placeholders(defs)?;
    let table = placeholder_table(
        placeholders
            .iter()
            .enumerate()
            .flat_map(|(idx, names)| names.iter().map(move |name| (name.as_str(), idx))),
    );

    let mut rules = Vec::with_capacity(defs.len());
    for (idx, def) in defs.iter().enumerate() {
        let source = def.definition.trim().to_owned();
        let mut alternatives = Vec::new();
        for alt in parse::split_alternatives(&source) {
            if alt.is_empty() {
                return Err(GrammarError::EmptyAlternative { rule: idx });
            }
            let tokens = parse::tokenize(&alt, &table).map_err(|e| GrammarError::Malformed {
                rule: idx,
                message: e.to_string(),
            })?;
            alternatives.push(tokens);
        }
        let alternatives =
            factor(alternatives).map_err(|_| GrammarError::DuplicateAlternatives { rule: idx })?;
        rules.push(SyntaxRule {
            placeholders: placeholders[idx].clone(),
            source,
            alternatives,
        });
    }

    check_first_conflicts(&rules)?;
    let warnings = collect_warnings(&rules);
    debug!(
        "compiled grammar: {} rules, {} warnings",
        rules.len(),
        warnings.len()
    );
    Ok(Grammar { rules, warnings })
}

fn sanitize_placeholders(defs: &[SyntaxDef]) -> Result<Vec<Vec<String>>, GrammarError> {
    let mut seen = HashSet::new();
    let mut all = Vec::with_capacity(defs.len());
    for (idx, def) in defs.iter().enumerate() {
        let mut names = Vec::new();
        if !def.placeholders.trim().is_empty() {
            for raw in def.placeholders.split(',') {
                let name = raw.trim();
                if name.is_empty() {
                    return Err(GrammarError::EmptyPlaceholder { rule: idx });
                }
                if !seen.insert(name.to_owned()) {
                    return Err(GrammarError::DuplicatePlaceholder {
                        name: name.to_owned(),
                    });
                }
                names.push(name.to_owned());
            }
        }
        // The statement rule is referenced by position, not by placeholder,
        // so only the other rules are required to declare one.
        if idx > 0 && names.is_empty() {
            return Err(GrammarError::MissingPlaceholders { rule: idx });
        }
        all.push(names);
    }
    Ok(all)
}

// -- Left-factoring ---------------------------------------------------------

/// Identity of an alternative's first token, for grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FirstKey {
    Terminal(String),
    Rule(usize),
}

struct DuplicateAlternatives;

/// Rewrite alternatives sharing a first token into one alternative with an
/// `Or`/`Maybe` continuation, recursively. Multiset-first alternatives pass
/// through unfactored. Two alternatives reducing to the same empty
/// continuation are a fatal duplicate.
fn factor(alternatives: Vec<Vec<Token>>) -> Result<Vec<Vec<Token>>, DuplicateAlternatives> {
    let mut groups: Vec<(Option<FirstKey>, Vec<Vec<Token>>)> = Vec::new();
    for alt in alternatives {
        let key = match alt.first() {
            Some(Token::Terminal(text)) => Some(FirstKey::Terminal(text.clone())),
            Some(Token::NonTerminal(rule)) => Some(FirstKey::Rule(*rule)),
            _ => None,
        };
        match key {
            None => groups.push((None, vec![alt])),
            Some(key) => {
                if let Some((_, members)) = groups
                    .iter_mut()
                    .find(|(existing, _)| existing.as_ref() == Some(&key))
                {
                    members.push(alt);
                } else {
                    groups.push((Some(key), vec![alt]));
                }
            }
        }
    }

    let mut result = Vec::new();
    for (_, mut members) in groups {
        if members.len() == 1 {
            result.push(members.pop().expect("group has one member"));
            continue;
        }
        let first = members[0][0].clone();
        let mut empty = 0usize;
        let mut tails: Vec<Vec<Token>> = Vec::new();
        for mut member in members {
            member.remove(0);
            if member.is_empty() {
                empty += 1;
            } else {
                tails.push(member);
            }
        }
        if empty >= 2 {
            return Err(DuplicateAlternatives);
        }
        let alternative = if empty == 1 {
            vec![first, Token::Maybe(factor(tails)?)]
        } else if tails.len() == 1 {
            let mut spliced = vec![first];
            spliced.extend(tails.pop().expect("single tail"));
            spliced
        } else {
            vec![first, Token::Or(factor(tails)?)]
        };
        result.push(alternative);
    }
    Ok(result)
}

// -- FIRST sets -------------------------------------------------------------

/// Terminal strings that can begin a derivation of `idx`. Cyclic references
/// contribute nothing beyond their first pass; the `visiting` stack keeps
/// the recursion finite.
fn first_set(rules: &[SyntaxRule], idx: usize, visiting: &mut Vec<usize>) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    if visiting.contains(&idx) {
        return set;
    }
    visiting.push(idx);
    for alt in &rules[idx].alternatives {
        first_of_sequence(rules, alt, visiting, &mut set);
    }
    visiting.pop();
    set
}

fn first_of_sequence(
    rules: &[SyntaxRule],
    alt: &[Token],
    visiting: &mut Vec<usize>,
    set: &mut BTreeSet<String>,
) {
    match alt.first() {
        Some(Token::Terminal(text)) => {
            set.insert(text.clone());
        }
        Some(Token::NonTerminal(rule)) => {
            set.extend(first_set(rules, *rule, visiting));
        }
        Some(Token::Multiset(_)) => {
            set.insert(EMPTY_MARKER.to_owned());
        }
        Some(Token::Or(alts) | Token::Maybe(alts)) => {
            for alt in alts {
                first_of_sequence(rules, alt, visiting, set);
            }
        }
        None => {}
    }
}

/// After factoring, two top-level alternatives of one rule that start with
/// different nonterminals must have disjoint FIRST sets, or one token of
/// lookahead cannot choose between them.
fn check_first_conflicts(rules: &[SyntaxRule]) -> Result<(), GrammarError> {
    for (idx, rule) in rules.iter().enumerate() {
        let starts: Vec<usize> = rule
            .alternatives
            .iter()
            .filter_map(|alt| alt.first().and_then(Token::rule_index))
            .collect();
        for (i, &a) in starts.iter().enumerate() {
            for &b in &starts[i + 1..] {
                if a == b {
                    continue;
                }
                let first_a = first_set(rules, a, &mut Vec::new());
                let first_b = first_set(rules, b, &mut Vec::new());
                if !first_a.is_disjoint(&first_b) {
                    return Err(GrammarError::FirstSetClash { rule: idx });
                }
            }
        }
    }
    Ok(())
}

// -- Warnings ---------------------------------------------------------------

fn collect_warnings(rules: &[SyntaxRule]) -> Vec<GrammarWarning> {
    let mut warnings = Vec::new();
    for (idx, rule) in rules.iter().enumerate() {
        for alt in &rule.alternatives {
            for token in alt {
                scan_multisets(idx, token, &mut warnings);
            }
        }
    }
    warnings
}

fn scan_multisets(rule: usize, token: &Token, warnings: &mut Vec<GrammarWarning>) {
    match token {
        Token::Multiset(inner) => {
            if inner.iter().all(|t| matches!(t, Token::Terminal(_))) {
                warnings.push(GrammarWarning::TerminalOnlyMultiset { rule });
            }
            for t in inner {
                scan_multisets(rule, t, warnings);
            }
        }
        Token::Or(alts) | Token::Maybe(alts) => {
            for alt in alts {
                for t in alt {
                    scan_multisets(rule, t, warnings);
                }
            }
        }
        Token::Terminal(_) | Token::NonTerminal(_) => {}
    }
}
