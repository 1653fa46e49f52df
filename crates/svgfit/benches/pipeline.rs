use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::fmt::Write as _;
use svgfit::{Normalizer, TransformOptions};

fn icon() -> String {
    let mut out = String::from(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="32" viewBox="0 0 48 32">"#,
    );
    for i in 0..64 {
        let x = (i % 8) as f64 * 6.0;
        let y = (i / 8) as f64 * 4.0;
        let _ = write!(
            out,
            r##"<path stroke="#000" d="M{x} {y}c1.5 0 3 1.25 3 2.5s-1.5 1.5-3 1.5z"/><circle cx="{x}" cy="{y}" r="1.25"/><polygon points="{x},{y} {x},4 6,{y}"/>"##
        );
    }
    out.push_str("</svg>");
    out
}

fn bench_transform(c: &mut Criterion) {
    let text = icon();
    let mut group = c.benchmark_group("transform_sync");
    for (name, options) in [
        ("scale", TransformOptions::default().with_scale(2.0)),
        ("square", TransformOptions::default().with_width(Some(24.0))),
    ] {
        let normalizer = Normalizer::new(options).unwrap();
        group.bench_function(name, |b| {
            b.iter_batched(
                || text.as_str(),
                |text| normalizer.transform_sync(text).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
