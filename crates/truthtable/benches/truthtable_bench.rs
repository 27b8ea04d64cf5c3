use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use truthtable::{parse, validate, validate_formulas, Params};

pub fn prop_parser(c: &mut Criterion) {
    let small = "(P -> Q) & P -> Q";
    let medium = "((Rain & !Umbrella) -> Wet) & (Wet -> Cold) & (Cold | Sun) <-> !(Sun & Rain) | Umbrella";
    let large = "((A1 -> A2) & (A2 -> A3) & (A3 -> A4) & (A4 -> A5) & (A5 -> A6)) -> (A1 -> A6) <->
!(B1 | B2 | B3) & (B1 <-> !B2) & (B2 <-> !B3) -> ((C1 & C2) | (C3 & C4) | (C5 & C6)) &
(((A1 -> A2) & (A2 -> A3) & (A3 -> A4) & (A4 -> A5) & (A5 -> A6)) -> (A1 -> A6)) | !(A1 & B1 & C1)";

    let mut g = c.benchmark_group("Prop Parser");
    for (name, f) in [("small", small), ("medium", medium), ("large", large)] {
        g.bench_with_input(BenchmarkId::new("Prop Parser", name), &f, |b, &f| {
            b.iter(|| {
                let n = parse(f).unwrap();
                black_box(n)
            })
        });
    }
    g.finish();
}

pub fn truth_table(c: &mut Criterion) {
    let mut g = c.benchmark_group("Truth Table");

    g.bench_function("modus ponens", |b| {
        b.iter(|| black_box(validate(&["P -> Q", "P"], Some("Q"))))
    });

    for n in [8usize, 12, 16] {
        // A chain of implications X0 -> X1 -> ... -> Xn-1, concluding X0 -> Xn-1
        let premises: Vec<String> = (1..n).map(|i| format!("X{} -> X{}", i - 1, i)).collect();
        let conclusion = format!("X0 -> X{}", n - 1);
        let premises: Vec<_> = premises.iter().map(|p| parse(p).unwrap()).collect();
        let conclusion = parse(&conclusion).unwrap();

        g.bench_with_input(BenchmarkId::new("Chain", n), &n, |b, _| {
            b.iter(|| {
                let res = validate_formulas(&premises, Some(&conclusion), &Params::default());
                black_box(res)
            })
        });
    }
    g.finish();
}

criterion_group!(benches, prop_parser, truth_table);
criterion_main!(benches);
