use shared_structs::{Color, HitRecord, Scene, Texture, TextureSemantic, TextureSpace};

/// Result of a texture lookup. Replaces an implicit sentinel-color leak
/// with an explicit variant the caller must handle; callers that need a
/// concrete color for a missing texture substitute `Color::MISSING_TEXTURE`
/// themselves, at the one call site that requires it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextureSample {
    Found(Color),
    Missing,
}

/// Bilinear fetch in UV space, `(0,0)` at the top-left, wrapping at the
/// edges. Diffuse textures are sRGB-encoded on disk and are linearized
/// here; normal/specular maps are already linear and pass through.
pub fn sample(texture: &Texture, u: f32, v: f32) -> Color {
    let u = u.rem_euclid(1.0);
    let v = v.rem_euclid(1.0);

    let fx = u * texture.width as f32 - 0.5;
    let fy = v * texture.height as f32 - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let wrap = |v: f32, dim: u32| -> u32 {
        let d = dim as i64;
        (((v as i64) % d + d) % d) as u32
    };

    let x0 = wrap(x0, texture.width);
    let x1 = wrap(x0 as f32 + 1.0, texture.width);
    let y0 = wrap(y0, texture.height);
    let y1 = wrap(y0 as f32 + 1.0, texture.height);

    let lerp4 = |a: [f32; 4], b: [f32; 4], t: f32| -> [f32; 4] {
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]
    };

    let c00 = texture.texel(x0, y0);
    let c10 = texture.texel(x1, y0);
    let c01 = texture.texel(x0, y1);
    let c11 = texture.texel(x1, y1);
    let top = lerp4(c00, c10, tx);
    let bottom = lerp4(c01, c11, tx);
    let [r, g, b, a] = lerp4(top, bottom, ty);

    let raw = Color::new(r, g, b, a);
    match texture.space {
        TextureSpace::Srgb => raw.from_srgb(),
        TextureSpace::Linear => raw,
    }
}

/// Resolves a hit's texture coordinate and samples the material's
/// `semantic` texture there. Weights the polygon's three texture-index
/// entries by the hit's barycentric coordinates (`uv = u*UV1 + v*UV2 +
/// (1-u-v)*UV0`) to get the actual texture-space uv, rather than treating
/// the barycentric coordinate as a texture coordinate directly. Missing
/// at any step (no texture reference on the material, no texture indices
/// on the polygon, or the scene can't resolve the texture) reports
/// `Missing` instead of guessing.
pub fn sample_surface(scene: &dyn Scene, hit: &HitRecord, semantic: TextureSemantic) -> TextureSample {
    let texture_ref = match semantic {
        TextureSemantic::Diffuse => hit.material.albedo_texture,
        TextureSemantic::Normal => hit.material.normal_texture,
        TextureSemantic::Specular => hit.material.specular_texture,
    };
    let Some(texture_ref) = texture_ref else {
        return TextureSample::Missing;
    };
    let Some(texture_index) = hit.polygon.texture_index else {
        return TextureSample::Missing;
    };
    let Some(texture) = scene.texture(texture_ref) else {
        return TextureSample::Missing;
    };

    let uv_table = scene.uv_table();
    let uv0 = uv_table.get(texture_index[0] as usize).copied().unwrap_or((0.0, 0.0));
    let uv1 = uv_table.get(texture_index[1] as usize).copied().unwrap_or((0.0, 0.0));
    let uv2 = uv_table.get(texture_index[2] as usize).copied().unwrap_or((0.0, 0.0));

    let (u, v) = hit.uv;
    let w = 1.0 - u - v;
    let tex_u = u * uv1.0 + v * uv2.0 + w * uv0.0;
    let tex_v = u * uv1.1 + v * uv2.1 + w * uv0.1;

    TextureSample::Found(sample(texture, tex_u, tex_v))
}
