use shared_structs::{CameraRaySource, RenderBuffer, RenderTile, RendererState, Scene};

use crate::integrator::path_trace;
use crate::sampler::{RandomSampler, SamplingStrategy};

/// Renders one tile's pixels for one additional sample pass, folding each
/// pixel's new sample into `buffer`'s running mean. `sample_pass` is
/// 1-indexed: the caller is responsible for calling this once per pass,
/// in order, so the progressive mean stays correct.
///
/// `buffer` is addressed in tile-local coordinates (`(0,0)` at
/// `tile.begin`) so a worker can give each render thread a small
/// tile-sized buffer instead of one sized to the whole image; `image_width`
/// is only used to compute the *global* pixel index the sampler seeds
/// from, so determinism doesn't depend on how the image is tiled.
///
/// Scan order is bottom-to-top rows, left-to-right columns within a row,
/// per the fixed intra-tile scan order. Checks `state.render_aborted()`
/// between every pixel so cancellation lands within a pixel's worth of
/// work; returns early (without finishing the pass) if aborted.
pub fn render_tile_pass(
    tile: &RenderTile,
    scene: &dyn Scene,
    camera: &dyn CameraRaySource,
    buffer: &mut RenderBuffer,
    image_width: u32,
    state: &RendererState,
    sample_pass: u32,
    total_samples: u32,
    max_depth: u32,
) -> bool {
    for y in (tile.begin.1..tile.end.1).rev() {
        for x in tile.begin.0..tile.end.0 {
            if state.render_aborted() {
                return false;
            }
            let pixel_index = y * image_width + x;
            let mut sampler = RandomSampler::init(
                SamplingStrategy::Independent,
                sample_pass,
                total_samples,
                pixel_index,
            );
            let ray = camera.generate(x, y, &mut sampler);
            let sample = path_trace(scene, ray, &mut sampler, max_depth);
            let (local_x, local_y) = (x - tile.begin.0, y - tile.begin.1);
            buffer.accumulate(local_x, local_y, sample_pass, sample);
        }
    }
    true
}
