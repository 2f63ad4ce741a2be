use shared_structs::{Color, HitRecord, LightRay, MaterialKind, RayTag, Sampler, Scene, TextureSemantic, Vector};

use crate::texture_eval::{sample_surface, TextureSample};

/// Result of scattering an incident ray off a surface: the outgoing ray
/// and the color the path's throughput is attenuated by. `None` means the
/// surface absorbs the ray (used by `Emission`, which never scatters).
pub struct ScatterResult {
    pub scattered: LightRay,
    pub attenuation: Color,
}

/// Uniform point on the unit sphere from two canonical scalars, using the
/// exact closed-form construction (not rejection sampling): `phi = 2*pi*a`,
/// `s = 2*sqrt(max(0, b*(1-b)))`, `(x,y,z) = (cos(phi)*s, sin(phi)*s, 1-2b)`.
pub fn uniform_sample_sphere(a: f32, b: f32) -> Vector {
    let phi = 2.0 * std::f32::consts::PI * a;
    let s = 2.0 * (b * (1.0 - b)).max(0.0).sqrt();
    Vector::new(phi.cos() * s, phi.sin() * s, 1.0 - 2.0 * b)
}

fn schlick_reflectance(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

fn refract(uv: Vector, n: Vector, etai_over_etat: f32) -> Option<Vector> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = (uv + n * cos_theta) * etai_over_etat;
    let discriminant = 1.0 - r_out_perp.dot(r_out_perp);
    if discriminant < 0.0 {
        None
    } else {
        let r_out_parallel = n * -discriminant.abs().sqrt();
        Some(r_out_perp + r_out_parallel)
    }
}

/// Dispatches to one of the five concrete BSDFs by tag, instead of a
/// function-pointer or trait-object lookup. A material's behavior is
/// fully determined by `MaterialKind`, so this can be an exhaustive match.
pub fn scatter(hit: &HitRecord, scene: &dyn Scene, sampler: &mut dyn Sampler) -> Option<ScatterResult> {
    match hit.material.kind {
        MaterialKind::Lambertian => Some(lambertian(hit, scene, sampler)),
        MaterialKind::Metal => metal(hit, scene, sampler),
        MaterialKind::Dielectric => Some(dielectric(hit, sampler)),
        MaterialKind::Plastic => Some(plastic(hit, scene, sampler)),
        MaterialKind::Emission => None,
    }
}

fn lambertian(hit: &HitRecord, scene: &dyn Scene, sampler: &mut dyn Sampler) -> ScatterResult {
    let (a, b) = sampler.next2();
    let target = hit.point + hit.normal + uniform_sample_sphere(a, b);
    let direction = (target - hit.point).normalize();
    ScatterResult {
        scattered: LightRay::new(hit.point, direction, RayTag::Scattered),
        attenuation: diffuse_color(hit, scene),
    }
}

fn metal(hit: &HitRecord, scene: &dyn Scene, sampler: &mut dyn Sampler) -> Option<ScatterResult> {
    let reflected = hit.incident.direction.normalize().reflect(hit.normal);
    let (a, b) = sampler.next2();
    let fuzzed = reflected + uniform_sample_sphere(a, b) * hit.material.roughness;
    if fuzzed.dot(hit.normal) <= 0.0 {
        return None;
    }
    Some(ScatterResult {
        scattered: LightRay::new(hit.point, fuzzed.normalize(), RayTag::Reflected),
        attenuation: diffuse_color(hit, scene),
    })
}

fn dielectric(hit: &HitRecord, sampler: &mut dyn Sampler) -> ScatterResult {
    let front_face = hit.incident.direction.dot(hit.normal) < 0.0;
    let (normal, ior) = if front_face {
        (hit.normal, 1.0 / hit.material.ior)
    } else {
        (-hit.normal, hit.material.ior)
    };

    let unit_direction = hit.incident.direction.normalize();
    let cos_theta = (-unit_direction).dot(normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let cannot_refract = ior * sin_theta > 1.0;
    let reflectance = schlick_reflectance(cos_theta, ior);

    let direction = if cannot_refract || reflectance > sampler.next() {
        unit_direction.reflect(normal)
    } else {
        refract(unit_direction, normal, ior).unwrap_or_else(|| unit_direction.reflect(normal))
    };

    ScatterResult {
        scattered: LightRay::new(hit.point, direction.normalize(), RayTag::Refracted),
        attenuation: Color::WHITE,
    }
}

/// Pure dispatcher: the refracted direction is only ever used to decide
/// the Schlick reflection probability, never traced. The material then
/// scatters as either a shiny mirror or a Lambertian diffuse surface,
/// matching the upstream renderer's `plasticBSDF` exactly.
fn plastic(hit: &HitRecord, scene: &dyn Scene, sampler: &mut dyn Sampler) -> ScatterResult {
    let unit_direction = hit.incident.direction.normalize();
    let cos_theta = (-unit_direction).dot(hit.normal).min(1.0);
    let reflectance = schlick_reflectance(cos_theta, hit.material.ior);

    if sampler.next() < reflectance {
        let reflected = unit_direction.reflect(hit.normal);
        let (a, b) = sampler.next2();
        let fuzzed = reflected + uniform_sample_sphere(a, b) * hit.material.roughness;
        ScatterResult {
            scattered: LightRay::new(hit.point, fuzzed.normalize(), RayTag::Reflected),
            attenuation: Color::WHITE,
        }
    } else {
        lambertian(hit, scene, sampler)
    }
}

/// Resolves a material's diffuse color, preferring its albedo texture when
/// the material carries one and the hit polygon has valid UV indices for
/// it (the material invariant in `shared_structs::Material`). A texture
/// reference the scene can't resolve surfaces as the missing-texture
/// sentinel rather than silently falling back to the scalar diffuse.
fn diffuse_color(hit: &HitRecord, scene: &dyn Scene) -> Color {
    let has_uvs = hit.polygon.texture_index.is_some();
    if hit.material.albedo_texture.is_none() || !has_uvs {
        return hit.material.diffuse;
    }
    match sample_surface(scene, hit, TextureSemantic::Diffuse) {
        TextureSample::Found(color) => color,
        TextureSample::Missing => Color::MISSING_TEXTURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_structs::{Material, Polygon};

    struct FixedSampler {
        values: Vec<f32>,
        i: usize,
    }
    impl Sampler for FixedSampler {
        fn next(&mut self) -> f32 {
            let v = self.values[self.i % self.values.len()];
            self.i += 1;
            v
        }
    }

    /// No texture table at all; every BSDF test here exercises materials
    /// with no albedo texture reference, so this is never consulted.
    struct NoTextureScene;
    impl Scene for NoTextureScene {
        fn intersect(&self, _ray: &LightRay) -> Option<HitRecord> {
            None
        }
        fn background(&self, _ray: &LightRay) -> Color {
            Color::BLACK
        }
    }

    fn flat_hit(material: Material, incident_dir: Vector) -> HitRecord {
        HitRecord {
            point: Vector::new(0.0, 0.0, 0.0),
            normal: Vector::new(0.0, 1.0, 0.0),
            incident: LightRay::new(Vector::new(0.0, 1.0, 0.0), incident_dir, RayTag::Camera),
            uv: (0.0, 0.0),
            polygon: Polygon {
                vertex_index: [0, 1, 2],
                texture_index: None,
                material: 0,
            },
            material,
        }
    }

    #[test]
    fn uniform_sphere_sample_has_unit_length() {
        let p = uniform_sample_sphere(0.3, 0.6);
        assert!((p.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn metal_with_zero_roughness_is_a_perfect_mirror() {
        let hit = flat_hit(
            Material::metal(Color::WHITE, 0.0),
            Vector::new(1.0, -1.0, 0.0).normalize(),
        );
        let mut sampler = FixedSampler { values: vec![0.5], i: 0 };
        let result = metal(&hit, &NoTextureScene, &mut sampler).unwrap();
        assert!((result.scattered.direction.x() - 1.0 / 2.0f32.sqrt()).abs() < 1e-4);
        assert!((result.scattered.direction.y() - 1.0 / 2.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn emission_never_scatters() {
        let hit = flat_hit(Material::emission(Color::WHITE), Vector::new(0.0, -1.0, 0.0));
        let mut sampler = FixedSampler { values: vec![0.5], i: 0 };
        assert!(scatter(&hit, &NoTextureScene, &mut sampler).is_none());
    }

    #[test]
    fn dielectric_total_internal_reflection_never_refracts() {
        // Steep grazing angle from inside a denser medium forces TIR.
        let hit = flat_hit(
            Material::dielectric(1.5, 0.0),
            Vector::new(0.99, 0.01, 0.0).normalize(),
        );
        let mut sampler = FixedSampler { values: vec![0.0], i: 0 };
        let result = dielectric(&hit, &mut sampler);
        assert!(result.scattered.direction.dot(hit.normal).abs() > 0.0);
    }

    #[test]
    fn plastic_dispatches_to_lambertian_below_reflectance_threshold() {
        let hit = flat_hit(
            Material::plastic(Color::splat3(0.8, 0.2, 0.2), 1.5, 0.0),
            Vector::new(0.0, -1.0, 0.0),
        );
        // First draw (reflectance gate) high so it falls through to diffuse,
        // remaining draws feed the lambertian hemisphere sample.
        let mut sampler = FixedSampler { values: vec![0.999, 0.3, 0.6], i: 0 };
        let result = plastic(&hit, &NoTextureScene, &mut sampler);
        assert_eq!(result.attenuation, Color::splat3(0.8, 0.2, 0.2));
    }

    #[test]
    fn plastic_reflected_branch_fuzzes_by_roughness() {
        let hit = flat_hit(Material::plastic(Color::WHITE, 1.5, 0.4), Vector::new(0.0, -1.0, 0.0));
        // First draw below r0 forces the shiny-mirror branch.
        let mut sampler = FixedSampler { values: vec![0.0, 0.5, 0.5], i: 0 };
        let result = plastic(&hit, &NoTextureScene, &mut sampler);
        let perfect_mirror = Vector::new(0.0, 1.0, 0.0);
        assert!(
            (result.scattered.direction.x() - perfect_mirror.x()).abs() > 1e-4
                || (result.scattered.direction.z() - perfect_mirror.z()).abs() > 1e-4,
            "roughness should fuzz the reflected direction away from a perfect mirror"
        );
    }

    /// Sphere-sampling convergence: a large batch of uniform sphere
    /// samples has zero mean direction and a z-component distributed
    /// evenly across [-1, 1] (the `1 - 2b` term), not clustered at the
    /// poles or the equator.
    #[test]
    fn sphere_samples_converge_to_a_zero_mean_direction() {
        let n = 20_000;
        let mut sum = Vector::ZERO;
        let mut z_sum = 0.0f32;
        for i in 0..n {
            let a = (i as f32 + 0.5) / n as f32;
            let b = ((i * 7919) % n) as f32 / n as f32;
            let p = uniform_sample_sphere(a, b);
            sum = sum + p;
            z_sum += p.z();
        }
        let mean = sum * (1.0 / n as f32);
        assert!(mean.length() < 0.01, "mean direction should converge to zero, got {mean:?}");
        assert!((z_sum / n as f32).abs() < 0.01, "z should average to zero across the full sphere");
    }

    /// Schlick reflectance increases monotonically as the view angle
    /// moves from normal incidence (cosine = 1) toward grazing (cosine =
    /// 0), and always stays within [r0, 1].
    #[test]
    fn schlick_reflectance_is_monotonic_in_grazing_angle() {
        let ior = 1.5;
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        let samples: Vec<f32> = (0..=10).map(|i| schlick_reflectance(i as f32 / 10.0, ior)).collect();
        for window in samples.windows(2) {
            assert!(window[0] >= window[1], "reflectance must not increase toward normal incidence: {samples:?}");
        }
        assert!((samples[10] - r0).abs() < 1e-5, "at normal incidence reflectance should equal r0");
        assert!(samples[0] <= 1.0 + 1e-5, "reflectance must not exceed 1.0 at grazing incidence");
    }

    /// Energy bound: no BSDF may return an attenuation with a channel
    /// greater than its input reflectance (dielectric/plastic's
    /// unattenuated branches are exactly 1.0, never more).
    #[test]
    fn no_bsdf_attenuates_above_unity() {
        let mut sampler = FixedSampler { values: vec![0.0, 0.5, 0.5, 0.5], i: 0 };

        let lambertian_hit = flat_hit(Material::lambertian(Color::splat3(0.9, 0.9, 0.9)), Vector::new(0.0, -1.0, 0.0));
        let result = scatter(&lambertian_hit, &NoTextureScene, &mut sampler).unwrap();
        assert!(result.attenuation.r <= 1.0 && result.attenuation.g <= 1.0 && result.attenuation.b <= 1.0);

        let dielectric_hit = flat_hit(Material::dielectric(1.5, 0.0), Vector::new(0.0, -1.0, 0.0));
        let result = scatter(&dielectric_hit, &NoTextureScene, &mut sampler).unwrap();
        assert!(result.attenuation.r <= 1.0 && result.attenuation.g <= 1.0 && result.attenuation.b <= 1.0);
    }
}
