use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depth_engine::DepthMap;
use obstacle_analyzer::ObstacleAnalyzer;

fn bench_analyze(c: &mut Criterion) {
    let map = DepthMap::from_fn(252, 252, |r, c| 0.2 + ((r * 31 + c * 17) % 580) as f32 / 100.0);
    let mut analyzer = ObstacleAnalyzer::default();

    c.bench_function("analyze_depth_map_252", |b| {
        b.iter(|| analyzer.analyze_depth_map(black_box(&map)))
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
