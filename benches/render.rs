use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mandelbrot::{BandRenderer, RenderConfig};

fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("render 480x270");
    for &workers in &[1usize, 2, 4, 8] {
        let config = RenderConfig {
            width: 480,
            height: 270,
            workers,
            ..RenderConfig::default()
        };
        let renderer = BandRenderer::new(&config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(workers), &renderer, |b, r| {
            b.iter(|| r.render().unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_workers);
criterion_main!(benches);
