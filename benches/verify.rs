use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sequent::{InferenceRuleDef, SyntaxDef, System};

fn sequent_system() -> System {
    System::compile(
        &[
            SyntaxDef::new("", "Γ |- A"),
            SyntaxDef::new("Γ", "{A}"),
            SyntaxDef::new("A, B", "x|y|z|( A -> B )"),
        ],
        &[InferenceRuleDef::new(
            "Ax",
            Vec::<String>::new(),
            "Γ, A |- A",
        )],
    )
    .unwrap()
}

fn multiset_system() -> System {
    System::compile(
        &[
            SyntaxDef::new("", "Γ"),
            SyntaxDef::new("Γ", "{A}"),
            SyntaxDef::new("A, B, C", "x|y|z"),
        ],
        &[InferenceRuleDef::new("Same", vec!["A, B, C"], "A, B, C")],
    )
    .unwrap()
}

fn bench_axiom(c: &mut Criterion) {
    let system = sequent_system();
    for n in [2, 8, 32] {
        let context: Vec<String> = (0..n).map(|i| ["x", "y", "z"][i % 3].to_owned()).collect();
        let statement = format!("{} |- y", context.join(", "));
        c.bench_function(&format!("verify_axiom_context_{n}"), |b| {
            b.iter(|| system.verify("Ax", black_box(&statement), &[]));
        });
    }
}

fn bench_backtracking(c: &mut Criterion) {
    let system = multiset_system();
    c.bench_function("verify_ambiguous_names_backtracking", |b| {
        b.iter(|| system.verify("Same", black_box("x, x, y"), &[black_box("y, x, x")]));
    });
}

criterion_group!(benches, bench_axiom, bench_backtracking);
criterion_main!(benches);
