use crate::color::Color;

/// Which slot a texture reference occupies on a material; also doubles as
/// the `semantic` argument to the texture evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSemantic {
    Diffuse,
    Normal,
    Specular,
}

/// Index into a scene-owned texture table. The texture table itself is out
/// of scope (scene construction); this is the contract a `Scene` exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRef(pub u32);

/// Tagged-variant material. Replaces function-pointer BSDF dispatch with
/// an enum a renderer can exhaustively match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Lambertian,
    Metal,
    Dielectric,
    Plastic,
    Emission,
}

#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub kind: MaterialKind,
    pub diffuse: Color,
    pub emission: Color,
    pub roughness: f32,
    pub ior: f32,
    pub albedo_texture: Option<TextureRef>,
    pub normal_texture: Option<TextureRef>,
    pub specular_texture: Option<TextureRef>,
}

impl Material {
    pub fn lambertian(diffuse: Color) -> Self {
        Self {
            kind: MaterialKind::Lambertian,
            diffuse,
            emission: Color::BLACK,
            roughness: 1.0,
            ior: 1.0,
            albedo_texture: None,
            normal_texture: None,
            specular_texture: None,
        }
    }

    pub fn metal(diffuse: Color, roughness: f32) -> Self {
        Self {
            kind: MaterialKind::Metal,
            diffuse,
            emission: Color::BLACK,
            roughness,
            ior: 1.0,
            albedo_texture: None,
            normal_texture: None,
            specular_texture: None,
        }
    }

    pub fn dielectric(ior: f32, roughness: f32) -> Self {
        Self {
            kind: MaterialKind::Dielectric,
            diffuse: Color::WHITE,
            emission: Color::BLACK,
            roughness,
            ior,
            albedo_texture: None,
            normal_texture: None,
            specular_texture: None,
        }
    }

    pub fn plastic(diffuse: Color, ior: f32, roughness: f32) -> Self {
        Self {
            kind: MaterialKind::Plastic,
            diffuse,
            emission: Color::BLACK,
            roughness,
            ior,
            albedo_texture: None,
            normal_texture: None,
            specular_texture: None,
        }
    }

    pub fn emission(emission: Color) -> Self {
        Self {
            kind: MaterialKind::Emission,
            diffuse: Color::BLACK,
            emission,
            roughness: 0.0,
            ior: 1.0,
            albedo_texture: None,
            normal_texture: None,
            specular_texture: None,
        }
    }
}

/// Invariant: if a texture reference is present, the hit's polygon must
/// carry valid UV indices, otherwise the material falls back to its
/// scalar fields. Enforced by callers checking `Polygon::texture_index`
/// before dereferencing an `Option<TextureRef>`.
#[derive(Debug, Clone, Copy)]
pub struct Polygon {
    pub vertex_index: [u32; 3],
    pub texture_index: Option<[u32; 3]>,
    pub material: u32,
}
