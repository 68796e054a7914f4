use sequent::{
    Grammar, GrammarWarning, InferenceRule, InferenceRuleDef, SyntaxDef, System, VerifyError,
};

fn def(placeholders: &str, definition: &str) -> SyntaxDef {
    SyntaxDef::new(placeholders, definition)
}

fn sequent_system() -> System {
    System::compile(
        &[
            def("", "Γ |- A"),
            def("Γ", "{A}"),
            def("A, B", "x|y|z|( A -> B )"),
        ],
        &[
            InferenceRuleDef::new("Ax", Vec::<String>::new(), "Γ, A |- A"),
            InferenceRuleDef::new("→I", vec!["Γ, A |- B"], "Γ |- ( A -> B )"),
        ],
    )
    .unwrap()
}

#[test]
fn single_element_context() {
    let system = sequent_system();
    assert!(system.verify("Ax", "x |- x", &[]).is_valid());
    assert!(!system.verify("Ax", "x |- y", &[]).is_valid());
}

#[test]
fn large_context_with_duplicates() {
    let system = sequent_system();
    let report = system.verify("Ax", "x, x, y, y, z, z, x |- z", &[]);
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

#[test]
fn malformed_conclusion_is_reported_not_thrown() {
    let system = sequent_system();
    let report = system.verify("Ax", "x y z", &[]);
    assert!(matches!(
        report.conclusion_errors(),
        [VerifyError::MalformedStatement { .. }]
    ));
}

#[test]
fn all_statements_checked_despite_one_failing() {
    let system = sequent_system();
    // Both the malformed premise and the mismatched conclusion are
    // reported in the same pass.
    let report = system.verify("→I", "x |- y", &["???"]);
    assert!(!report.conclusion_errors().is_empty());
    assert!(!report.premise_errors()[0].is_empty());
}

#[test]
fn premise_count_mismatch_skips_matching() {
    let system = sequent_system();
    let report = system.verify("→I", "\\varnothing |- ( x -> y )", &[]);
    assert_eq!(
        report.rule_errors(),
        &[VerifyError::PremiseCountMismatch {
            expected: 1,
            found: 0,
        }]
    );
    assert!(report.conclusion_errors().is_empty());
}

#[test]
fn name_shared_across_premises_must_agree() {
    let system = System::compile(
        &[
            def("", "Γ |- A"),
            def("Γ", "{A}"),
            def("A, B", "x|y|z"),
        ],
        &[InferenceRuleDef::new(
            "Both",
            vec!["Γ |- A", "Γ |- A"],
            "Γ |- A",
        )],
    )
    .unwrap();
    assert!(system
        .verify("Both", "x |- y", &["x |- y", "x |- y"])
        .is_valid());
    let report = system.verify("Both", "x |- y", &["x |- y", "x |- z"]);
    assert!(report.premise_errors()[1]
        .iter()
        .any(|e| matches!(e, VerifyError::IncompatibleNames { name } if name == "A")));
}

#[test]
fn deep_implication_nesting() {
    let system = sequent_system();
    let report = system.verify(
        "Ax",
        "( x -> ( y -> z ) ), y |- ( x -> ( y -> z ) )",
        &[],
    );
    assert!(report.is_valid(), "unexpected errors: {report:?}");
}

#[test]
fn empty_context_statement() {
    let system = sequent_system();
    // Ax needs at least the distinguished element in the context.
    let report = system.verify("Ax", "\\varnothing |- x", &[]);
    assert!(!report.is_valid());
}

#[test]
fn terminal_only_multiset_warning_is_exposed() {
    let grammar = Grammar::compile(&[def("", "{x y}")]).unwrap();
    assert_eq!(
        grammar.warnings(),
        &[GrammarWarning::TerminalOnlyMultiset { rule: 0 }]
    );
}

#[test]
fn grammar_is_shareable_across_threads() {
    let system = std::sync::Arc::new(sequent_system());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let system = std::sync::Arc::clone(&system);
            std::thread::spawn(move || system.verify("Ax", "x, y |- x", &[]).is_valid())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn recompilation_replaces_wholesale() {
    let defs = [def("", "Γ |- A"), def("Γ", "{A}"), def("A, B", "x|y")];
    let first = Grammar::compile(&defs).unwrap();
    let second = Grammar::compile(&defs).unwrap();
    assert_eq!(first, second);

    let extended = [def("", "Γ |- A"), def("Γ", "{A}"), def("A, B", "x|y|z")];
    let third = Grammar::compile(&extended).unwrap();
    assert_ne!(first, third);
}

#[test]
fn inference_rule_reports_its_shape() {
    let system = sequent_system();
    let rule: &InferenceRule = system.rule("→I").unwrap();
    assert_eq!(rule.name(), "→I");
    assert_eq!(rule.premises().len(), 1);
    assert_eq!(
        rule.placeholder_names().collect::<Vec<_>>(),
        vec!["A", "B", "Γ"]
    );
}

#[test]
fn whitespace_is_insignificant_everywhere() {
    let system = sequent_system();
    assert!(system.verify("Ax", "x,y,z|-y", &[]).is_valid());
    assert!(system.verify("Ax", "  x , y , z  |-  y  ", &[]).is_valid());
}
