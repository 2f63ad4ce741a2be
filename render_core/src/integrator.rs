use shared_structs::{Color, LightRay, Sampler, Scene};

use crate::bsdf;

/// Offset applied to a scattered ray's origin along its own direction
/// before the next bounce, so a bounce doesn't immediately re-intersect
/// the surface it just left.
const SELF_HIT_EPSILON: f32 = 1e-4;

/// Path-traced radiance estimate along `ray`, up to `max_depth` bounces.
/// Terminates early on a miss (background contribution), on hitting an
/// emissive surface (contributes emission and stops), or when a BSDF
/// declines to scatter (a grazing metal fuzz sample, say).
///
/// No Russian roulette: depth is the only termination budget, kept simple
/// and deterministic for a given (pixel, sample) seed.
pub fn path_trace(
    scene: &dyn Scene,
    mut ray: LightRay,
    sampler: &mut dyn Sampler,
    max_depth: u32,
) -> Color {
    let mut radiance = Color::BLACK;
    let mut throughput = Color::WHITE;

    for _ in 0..max_depth {
        let hit = match scene.intersect(&ray) {
            Some(hit) => hit,
            None => {
                radiance += throughput.attenuate(scene.background(&ray));
                break;
            }
        };

        radiance += throughput.attenuate(hit.material.emission);

        let scatter = match bsdf::scatter(&hit, scene, sampler) {
            Some(s) => s,
            None => break,
        };

        throughput = throughput.attenuate(scatter.attenuation);
        let offset_origin = scatter.scattered.origin + scatter.scattered.direction * SELF_HIT_EPSILON;
        ray = LightRay::new(offset_origin, scatter.scattered.direction, scatter.scattered.tag);

        if !throughput.is_finite() {
            throughput = Color::BLACK;
            break;
        }
    }

    radiance.mask_nan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_structs::{HitRecord, Material, Polygon, RayTag, Vector};

    struct FixedSampler(f32);
    impl Sampler for FixedSampler {
        fn next(&mut self) -> f32 {
            self.0
        }
    }

    struct SingleEmitterScene {
        emission: Color,
    }
    impl Scene for SingleEmitterScene {
        fn intersect(&self, ray: &LightRay) -> Option<HitRecord> {
            Some(HitRecord {
                point: ray.origin,
                normal: Vector::new(0.0, 1.0, 0.0),
                incident: *ray,
                uv: (0.0, 0.0),
                polygon: Polygon {
                    vertex_index: [0, 1, 2],
                    texture_index: None,
                    material: 0,
                },
                material: Material::emission(self.emission),
            })
        }
        fn background(&self, _ray: &LightRay) -> Color {
            Color::BLACK
        }
    }

    struct MissScene;
    impl Scene for MissScene {
        fn intersect(&self, _ray: &LightRay) -> Option<HitRecord> {
            None
        }
        fn background(&self, _ray: &LightRay) -> Color {
            Color::splat3(0.1, 0.2, 0.3)
        }
    }

    #[test]
    fn hitting_an_emitter_returns_its_emission() {
        let scene = SingleEmitterScene {
            emission: Color::splat3(2.0, 1.0, 0.5),
        };
        let ray = LightRay::new(Vector::ZERO, Vector::new(0.0, 1.0, 0.0), RayTag::Camera);
        let mut sampler = FixedSampler(0.5);
        let color = path_trace(&scene, ray, &mut sampler, 4);
        assert_eq!(color, Color::splat3(2.0, 1.0, 0.5));
    }

    #[test]
    fn missing_everything_returns_background() {
        let scene = MissScene;
        let ray = LightRay::new(Vector::ZERO, Vector::new(0.0, 1.0, 0.0), RayTag::Camera);
        let mut sampler = FixedSampler(0.5);
        let color = path_trace(&scene, ray, &mut sampler, 4);
        assert_eq!(color, Color::splat3(0.1, 0.2, 0.3));
    }
}
