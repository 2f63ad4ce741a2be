use crate::material::{Material, Polygon};
use crate::ray::LightRay;
use crate::vector::Vector;

/// Produced by ray/scene intersection. Stack/frame-local per bounce; never
/// stored across bounces.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    pub point: Vector,
    pub normal: Vector,
    pub incident: LightRay,
    pub uv: (f32, f32),
    pub polygon: Polygon,
    pub material: Material,
}
