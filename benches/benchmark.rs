// This file contains benchmarks for the purpose of guarding against
// performance regressions. To run them, use `cargo bench`.

use criterion::{criterion_group, criterion_main, Criterion};
use render_core::testing::{AnalyticScene, PinholeCamera};
use render_core::tile_renderer::render_tile_pass;
use shared_structs::{RenderBuffer, RenderTile, RendererState};

const IMAGE_WIDTH: u32 = 256;
const TILE_SIZE: u32 = 32;

fn render_one_tile(samples: u32) {
    let scene = AnalyticScene::lambertian_floor_under_emissive_quad();
    let camera = PinholeCamera::looking_down_from((0.0, 1.0, 0.0));
    let mut buffer = RenderBuffer::new(TILE_SIZE, TILE_SIZE);
    let tile = RenderTile::new((0, 0), (TILE_SIZE, TILE_SIZE), 0);
    let state = RendererState::new();
    for pass in 1..=samples {
        render_tile_pass(&tile, &scene, &camera, &mut buffer, IMAGE_WIDTH, &state, pass, samples, 8);
    }
}

fn render_one_tile_deep_bounces() {
    let scene = AnalyticScene::glass_sphere(1.5, 1.0);
    let camera = PinholeCamera::looking_down_from((0.0, 3.0, 0.0));
    let mut buffer = RenderBuffer::new(TILE_SIZE, TILE_SIZE);
    let tile = RenderTile::new((0, 0), (TILE_SIZE, TILE_SIZE), 0);
    let state = RendererState::new();
    render_tile_pass(&tile, &scene, &camera, &mut buffer, IMAGE_WIDTH, &state, 1, 1, 64);
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Performance regression tests");
    group.sample_size(10);
    group.bench_function("one 32x32 tile, 1 sample", |b| b.iter(|| render_one_tile(1)));
    group.bench_function("one 32x32 tile, 16 samples", |b| b.iter(|| render_one_tile(16)));
    group.bench_function("one 32x32 tile, 64-bounce dielectric", |b| {
        b.iter(render_one_tile_deep_bounces)
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
