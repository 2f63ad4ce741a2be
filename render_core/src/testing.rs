//! Minimal fixtures for the `Scene`/`CameraRaySource` contracts, used
//! by this crate's own tests, the workspace benches, and the worker's
//! scene-loading shim. Scene parsing, mesh decoding and BVH traversal are
//! out of scope; this is not a production scene representation, only
//! enough analytic geometry to make the literal end-to-end scenarios in
//! the testable-properties section expressible as tests.

use shared_structs::{
    CameraRaySource, Color, HitRecord, LightRay, Material, Polygon, RayTag, Sampler, Scene, Vector,
};

/// A Lambertian (or otherwise tagged) floor plane at z=0 lit by an
/// emissive quad above it, or a mirror reflecting a colored wall, or a
/// glass sphere, just enough shapes to drive the end-to-end scenarios.
pub enum AnalyticScene {
    /// Infinite floor plane at z=0 (Lambertian) under an infinite emissive
    /// "sky" at z>0. Every ray either hits the floor (if heading toward
    /// -z) or the emissive background (otherwise).
    FloorUnderEmissiveSky { floor: Material, sky_emission: Color },
    /// A single infinite mirror plane at z=0 reflecting into a uniform
    /// emissive background in the +z half-space.
    MirrorReflectingEmissiveBackground { mirror: Material, background: Color },
    /// A single sphere of the given material centered at the origin,
    /// against a black background. Used for the dielectric TIR scenario,
    /// which only cares about which branch the BSDF takes, not shading.
    Sphere { material: Material, radius: f32 },
}

impl AnalyticScene {
    pub fn lambertian_floor_under_emissive_quad() -> Self {
        AnalyticScene::FloorUnderEmissiveSky {
            floor: Material::lambertian(Color::splat3(0.5, 0.5, 0.5)),
            sky_emission: Color::splat3(1.0, 1.0, 1.0),
        }
    }

    pub fn mirror_wall(mirror_roughness: f32, wall_emission: Color) -> Self {
        AnalyticScene::MirrorReflectingEmissiveBackground {
            mirror: Material::metal(Color::WHITE, mirror_roughness),
            background: wall_emission,
        }
    }

    pub fn glass_sphere(ior: f32, radius: f32) -> Self {
        AnalyticScene::Sphere {
            material: Material::dielectric(ior, 0.0),
            radius,
        }
    }

    fn flat_hit(&self, incident: LightRay, normal: Vector, point: Vector, material: Material) -> HitRecord {
        HitRecord {
            point,
            normal,
            incident,
            uv: (0.0, 0.0),
            polygon: Polygon {
                vertex_index: [0, 1, 2],
                texture_index: None,
                material: 0,
            },
            material,
        }
    }
}

impl Scene for AnalyticScene {
    fn intersect(&self, ray: &LightRay) -> Option<HitRecord> {
        match self {
            AnalyticScene::FloorUnderEmissiveSky { floor, .. } => {
                if ray.direction.y() < 0.0 {
                    let t = -ray.origin.y() / ray.direction.y();
                    let point = ray.at(t.max(0.0));
                    Some(self.flat_hit(*ray, Vector::new(0.0, 1.0, 0.0), point, *floor))
                } else {
                    None
                }
            }
            AnalyticScene::MirrorReflectingEmissiveBackground { mirror, .. } => {
                if ray.direction.y() < 0.0 {
                    let t = -ray.origin.y() / ray.direction.y();
                    let point = ray.at(t.max(0.0));
                    Some(self.flat_hit(*ray, Vector::new(0.0, 1.0, 0.0), point, *mirror))
                } else {
                    None
                }
            }
            AnalyticScene::Sphere { material, radius } => {
                let oc = ray.origin;
                let a = ray.direction.dot(ray.direction);
                let b = 2.0 * oc.dot(ray.direction);
                let c = oc.dot(oc) - radius * radius;
                let disc = b * b - 4.0 * a * c;
                if disc < 0.0 {
                    return None;
                }
                let t = (-b - disc.sqrt()) / (2.0 * a);
                let t = if t > 1e-4 { t } else { (-b + disc.sqrt()) / (2.0 * a) };
                if t <= 1e-4 {
                    return None;
                }
                let point = ray.at(t);
                let normal = point.normalize();
                Some(self.flat_hit(*ray, normal, point, *material))
            }
        }
    }

    fn background(&self, _ray: &LightRay) -> Color {
        match self {
            AnalyticScene::FloorUnderEmissiveSky { sky_emission, .. } => *sky_emission,
            AnalyticScene::MirrorReflectingEmissiveBackground { background, .. } => *background,
            AnalyticScene::Sphere { .. } => Color::BLACK,
        }
    }
}

/// A trivial fixture camera: every pixel's ray originates at `eye` and
/// points straight down -y. Enough to drive the single-pixel end-to-end
/// scenarios, which only specify a camera contract, not its math.
pub struct PinholeCamera {
    eye: Vector,
}

impl PinholeCamera {
    pub fn looking_down_from(eye: (f32, f32, f32)) -> Self {
        Self {
            eye: Vector::new(eye.0, eye.1, eye.2),
        }
    }
}

impl CameraRaySource for PinholeCamera {
    fn generate(&self, _x: u32, _y: u32, _sampler: &mut dyn Sampler) -> LightRay {
        LightRay::new(self.eye, Vector::new(0.0, -1.0, 0.0), RayTag::Camera)
    }
}
