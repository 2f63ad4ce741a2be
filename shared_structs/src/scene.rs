use crate::color::Color;
use crate::hit::HitRecord;
use crate::material::TextureRef;
use crate::ray::LightRay;
use crate::sampler::Sampler;
use crate::texture::Texture;

/// Opaque contract for the scene-intersection collaborator: owns
/// materials, textures, the polygon table and the acceleration structure,
/// shared read-only across render threads. Scene parsing, mesh/texture
/// decoding and BVH traversal live elsewhere; this crate only depends on
/// the contract below, never a concrete scene representation.
pub trait Scene: Send + Sync {
    fn intersect(&self, ray: &LightRay) -> Option<HitRecord>;

    /// Background/environment color for a ray that missed everything.
    fn background(&self, ray: &LightRay) -> Color;

    /// Resolves a material's texture reference to its backing pixels.
    /// Default `None` lets analytic/test scenes that never populate a
    /// texture table skip implementing this.
    fn texture(&self, _reference: TextureRef) -> Option<&Texture> {
        None
    }

    /// Shared vertex-UV table. A polygon's `texture_index` entries are
    /// indices into this table. Default empty for scenes with no
    /// texture-mapped geometry.
    fn uv_table(&self) -> &[(f32, f32)] {
        &[]
    }
}

/// Contract for the camera-ray-generation collaborator, specified only by
/// its behavior and not by its math.
pub trait CameraRaySource: Send + Sync {
    fn generate(&self, x: u32, y: u32, sampler: &mut dyn Sampler) -> LightRay;
}
