/// Produces uniform scalars in `[0,1)` for a given (pixel, sample-index)
/// seed. The trait lives here, rather than in `render_core`, so that the
/// `Scene`/`CameraRaySource` contracts below can depend on it without
/// creating a cycle between crates.
pub trait Sampler {
    fn next(&mut self) -> f32;

    fn next2(&mut self) -> (f32, f32) {
        (self.next(), self.next())
    }
}
