use sequent::{GrammarError, InferenceRuleDef, SyntaxDef, System, VerifyError};

fn def(placeholders: &str, definition: &str) -> SyntaxDef {
    SyntaxDef::new(placeholders, definition)
}

fn rule(name: &str, premises: &[&str], conclusion: &str) -> InferenceRuleDef {
    InferenceRuleDef::new(name, premises.to_vec(), conclusion)
}

/// Γ |- A over a multiset context, atoms x, y, z.
fn sequent_system() -> System {
    System::compile(
        &[
            def("", "Γ |- A"),
            def("Γ", "{A}"),
            def("A, B", "x|y|z|( A -> B )"),
        ],
        &[
            rule("Ax", &[], "Γ, A |- A"),
            rule("→I", &["Γ, A |- B"], "Γ |- ( A -> B )"),
        ],
    )
    .unwrap()
}

// -- Scenario 1: axiom over a multiset context ------------------------------

#[test]
fn axiom_accepts_when_conclusion_is_in_context() {
    let system = sequent_system();
    let report = system.verify("Ax", "x, y, z |- y", &[]);
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

#[test]
fn axiom_rejects_when_conclusion_is_not_in_context() {
    let system = sequent_system();
    let report = system.verify("Ax", "x, y |- z", &[]);
    assert!(!report.conclusion_errors().is_empty());
}

#[test]
fn axiom_accepts_any_element_order() {
    let system = sequent_system();
    for statement in ["x, y, z |- y", "z, y, x |- y", "y, x, z |- y"] {
        let report = system.verify("Ax", statement, &[]);
        assert!(report.is_valid(), "failed for {statement}: {report:?}");
    }
}

// -- Scenario 2: implication introduction -----------------------------------

#[test]
fn implication_introduction_discharges_assumption() {
    let system = sequent_system();
    let report = system.verify("→I", "\\varnothing |- ( x -> y )", &["x |- y"]);
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

#[test]
fn implication_introduction_with_remaining_context() {
    let system = sequent_system();
    let report = system.verify("→I", "z |- ( x -> y )", &["z, x |- y"]);
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

#[test]
fn implication_introduction_rejects_wrong_antecedent() {
    let system = sequent_system();
    let report = system.verify("→I", "\\varnothing |- ( x -> y )", &["z |- y"]);
    assert!(!report.is_valid());
}

// -- Scenario 3: ambiguous multiset names need backtracking -----------------

/// A bare multiset statement with three placeholder names for its rule.
fn multiset_system() -> System {
    System::compile(
        &[def("", "Γ"), def("Γ", "{A}"), def("A, B, C", "x|y|z")],
        &[rule("Same", &["A, B, C"], "A, B, C")],
    )
    .unwrap()
}

#[test]
fn three_ambiguous_names_resolve_by_backtracking() {
    let system = multiset_system();
    let report = system.verify("Same", "x, x, y", &["x, x, y"]);
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

#[test]
fn three_ambiguous_names_resolve_across_orderings() {
    let system = multiset_system();
    let report = system.verify("Same", "x, x, y", &["y, x, x"]);
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

#[test]
fn irreconcilable_names_report_unification_failure() {
    let system = multiset_system();
    let report = system.verify("Same", "x, y, y", &["x, x, y"]);
    assert!(!report.is_valid());
    assert!(
        report
            .rule_errors()
            .iter()
            .any(|e| e.to_string().contains("unify")),
        "expected a unification failure, got: {report:?}"
    );
}

// -- Scenario 4: duplicate alternatives are a compile error -----------------

#[test]
fn duplicate_alternatives_rejected_at_compile_time() {
    let result = System::compile(&[def("", "A"), def("A", "x|x")], &[]);
    match result {
        Err(sequent::SequentError::Grammar(e)) => {
            assert!(matches!(e, GrammarError::DuplicateAlternatives { rule: 1 }));
            assert!(e.to_string().contains("duplicate"));
        }
        other => panic!("expected a grammar error, got {other:?}"),
    }
}

// -- FIRST-set conflict detection -------------------------------------------

#[test]
fn overlapping_first_sets_rejected() {
    let result = System::compile(
        &[def("", "B | C"), def("B", "x|y"), def("C", "y|z")],
        &[],
    );
    assert!(matches!(
        result,
        Err(sequent::SequentError::Grammar(
            GrammarError::FirstSetClash { rule: 0 }
        ))
    ));
}

#[test]
fn disjoint_first_sets_accepted() {
    let result = System::compile(&[def("", "B | C"), def("B", "x"), def("C", "y")], &[]);
    assert!(result.is_ok());
}

// -- Nested multisets under conservative matching ---------------------------

/// A multiset of parenthesized inner contexts, themselves multisets.
fn nested_system() -> System {
    System::compile(
        &[
            def("", "Δ"),
            def("Δ", "{S}"),
            def("S", "( Γ )"),
            def("Γ", "{A}"),
            def("A, B", "x|y|z"),
        ],
        &[
            rule("Pick", &[], "( Γ ), S"),
            rule("Twice", &[], "( Γ ), ( Γ )"),
        ],
    )
    .unwrap()
}

#[test]
fn nested_multiset_resolves_inner_residual() {
    let system = nested_system();
    let report = system.verify("Pick", "( x, y ), ( z )", &[]);
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

#[test]
fn nested_multiset_rejects_forced_identical_contexts() {
    let system = nested_system();
    let report = system.verify("Twice", "( x, y ), ( z )", &[]);
    assert!(!report.is_valid());
}

#[test]
fn nested_multiset_accepts_identical_contexts() {
    let system = nested_system();
    let report = system.verify("Twice", "( x, y ), ( y, x )", &[]);
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

// -- Placeholder coverage ----------------------------------------------------

#[test]
fn verification_binds_every_template_name() {
    let system = sequent_system();
    let report = system.verify("Ax", "x, y, z |- y", &[]);
    assert!(report.is_valid());
    let report = system.verify("→I", "z |- ( x -> y )", &["z, x |- y"]);
    assert!(report.is_valid());
}

#[test]
fn unknown_rule_name_is_a_rule_error() {
    let system = sequent_system();
    let report = system.verify("Cut", "x |- x", &[]);
    assert_eq!(
        report.rule_errors(),
        &[VerifyError::UnknownRule { name: "Cut".into() }]
    );
}
