use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tablesift::*;

fn sample_dataset(records: usize) -> Dataset {
    let mut builder = DatasetBuilder::new()
        .column("pt code", ColumnKind::Text)
        .column("gender", ColumnKind::Text)
        .column("age", ColumnKind::Numeric)
        .column("rest EF", ColumnKind::Numeric);
    for i in 0..records {
        builder = builder.record(vec![
            format!("n{i:04}").into(),
            if i % 2 == 0 { "M" } else { "F" }.into(),
            ((30 + i % 50) as i64).into(),
            ((50 + i % 25) as i64).into(),
        ]);
    }
    builder.build().expect("valid dataset")
}

fn bench_parse_compile_execute(c: &mut Criterion) {
    let dataset = sample_dataset(1000);
    let rows = vec![
        FilterRow::new("gender", "=M"),
        FilterRow::new("age", ">=55"),
        FilterRow::new("rest_EF", "<70"),
    ];

    c.bench_function("parse", |b| {
        b.iter(|| {
            let _ = parse_criterion(black_box(">=55"));
        })
    });
    c.bench_function("compile", |b| {
        b.iter(|| {
            let _ = compile(black_box(&rows), &dataset);
        })
    });
    let compiled = compile(&rows, &dataset).expect("compile");
    c.bench_function("execute", |b| {
        b.iter(|| {
            let _ = execute(&dataset, black_box(&compiled.expression));
        })
    });
    c.bench_function("compile_and_apply", |b| {
        let mut view = DataView::new(dataset.clone());
        b.iter(|| {
            let _ = view.compile_and_apply(black_box(&rows));
        })
    });
}

criterion_group!(benches, bench_parse_compile_execute);
criterion_main!(benches);
