//! The `loadScene`/`loadAssets` collaborators: turning the coordinator's
//! scene JSON and asset blob into something `render_core` can trace.
//! Scene parsing, mesh/texture decoding and BVH construction are out of
//! scope; this module only defines the contract a real scene builder
//! would implement (`SceneSource`) and
//! ships a `DemoSceneSource` default that recognizes the handful of
//! analytic fixtures `render_core::testing` already has, just enough to
//! drive a job end-to-end without a production scene format to parse.

use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use render_core::testing::{AnalyticScene, PinholeCamera};
use shared_structs::{CameraRaySource, Color, Material, Scene};

use crate::error::SceneError;

/// Decoded asset blob from `loadAssets`' `files` field: a map of asset
/// name to raw bytes. Out-of-scope collaborators (texture/mesh decoders)
/// would consume this; the demo scene source never does, since its
/// fixtures carry no textures.
#[derive(Debug, Default)]
pub struct AssetCache {
    files: HashMap<String, Vec<u8>>,
}

impl AssetCache {
    /// Decodes the `{"files": {name: base64}}` shape `loadAssets` carries.
    pub fn decode(files: &serde_json::Value) -> Result<Self, SceneError> {
        let object = files
            .as_object()
            .ok_or_else(|| SceneError::Parse("\"files\" is not a JSON object".into()))?;
        let mut map = HashMap::with_capacity(object.len());
        for (name, value) in object {
            let encoded = value
                .as_str()
                .ok_or_else(|| SceneError::Parse(format!("asset \"{name}\" is not a base64 string")))?;
            let bytes = STANDARD
                .decode(encoded)
                .map_err(|e| SceneError::Parse(format!("asset \"{name}\" has invalid base64: {e}")))?;
            map.insert(name.clone(), bytes);
        }
        Ok(Self { files: map })
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// The render settings a job's scene JSON carries alongside its geometry:
/// image dimensions, sample count, bounce depth, preferred tile size.
/// Mirrors `renderer.prefs` in the original: out of scope as "scene
/// parsing" the same way geometry is, but a worker needs these numbers to
/// drive `render_core::tile_renderer`, so the contract surfaces them
/// rather than hand-waving them away.
#[derive(Debug, Clone, Copy)]
pub struct RenderJobConfig {
    pub image_width: u32,
    pub image_height: u32,
    pub sample_count: u32,
    pub bounces: u32,
    pub tile_size: u32,
}

/// A fully materialized job: the opaque scene, the camera contract, and
/// the render settings to drive it with.
pub struct RenderJob {
    pub scene: Arc<dyn Scene>,
    pub camera: Arc<dyn CameraRaySource>,
    pub config: RenderJobConfig,
}

/// Contract for the scene-construction collaborator: scene parsing is out
/// of scope here and `SceneHandle` stays opaque. A production worker
/// would plug in a format-specific implementation (OBJ/glTF + BVH, say);
/// this crate ships only [`DemoSceneSource`].
pub trait SceneSource: Send + Sync {
    fn build(&self, data: &serde_json::Value, assets: &AssetCache) -> Result<RenderJob, SceneError>;
}

/// Recognizes the small JSON vocabulary the `render_core::testing`
/// analytic fixtures use, so the worker protocol is exercisable
/// end-to-end without a production scene format. Any `data` outside this
/// vocabulary is a `SceneError::Parse`, exactly as a malformed scene file
/// would be for a production loader.
pub struct DemoSceneSource;

fn field_f32(data: &serde_json::Value, name: &str, default: f32) -> f32 {
    data.get(name).and_then(|v| v.as_f64()).map(|v| v as f32).unwrap_or(default)
}

fn field_u32(data: &serde_json::Value, name: &str, default: u32) -> u32 {
    data.get(name).and_then(|v| v.as_u64()).map(|v| v as u32).unwrap_or(default)
}

fn field_color(data: &serde_json::Value, name: &str, default: Color) -> Color {
    match data.get(name).and_then(|v| v.as_array()) {
        Some(arr) if arr.len() >= 3 => {
            let c = |i: usize| arr.get(i).and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
            Color::splat3(c(0), c(1), c(2))
        }
        _ => default,
    }
}

impl SceneSource for DemoSceneSource {
    fn build(&self, data: &serde_json::Value, _assets: &AssetCache) -> Result<RenderJob, SceneError> {
        let kind = data
            .get("kind")
            .and_then(|v| v.as_str())
            .ok_or_else(|| SceneError::Parse("scene JSON is missing a \"kind\" field".into()))?;

        let config = RenderJobConfig {
            image_width: field_u32(data, "width", 1),
            image_height: field_u32(data, "height", 1),
            sample_count: field_u32(data, "samples", 16),
            bounces: field_u32(data, "bounces", 8),
            tile_size: field_u32(data, "tileSize", 32),
        };

        let scene: Arc<dyn Scene> = match kind {
            "lambertianFloor" => {
                let albedo = field_color(data, "floorAlbedo", Color::splat3(0.5, 0.5, 0.5));
                let sky = field_color(data, "skyEmission", Color::WHITE);
                Arc::new(AnalyticScene::FloorUnderEmissiveSky {
                    floor: Material::lambertian(albedo),
                    sky_emission: sky,
                })
            }
            "mirrorWall" => {
                let roughness = field_f32(data, "roughness", 0.0);
                let wall = field_color(data, "wallEmission", Color::splat3(1.0, 0.0, 0.0));
                Arc::new(AnalyticScene::mirror_wall(roughness, wall))
            }
            "glassSphere" => {
                let ior = field_f32(data, "ior", 1.5);
                let radius = field_f32(data, "radius", 1.0);
                Arc::new(AnalyticScene::glass_sphere(ior, radius))
            }
            other => return Err(SceneError::Parse(format!("unrecognized scene kind: {other}"))),
        };

        let eye = match data.get("cameraEye").and_then(|v| v.as_array()) {
            Some(arr) if arr.len() >= 3 => {
                let c = |i: usize| arr.get(i).and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
                (c(0), c(1), c(2))
            }
            _ => (0.0, 1.0, 0.0),
        };
        let camera: Arc<dyn CameraRaySource> = Arc::new(PinholeCamera::looking_down_from(eye));

        Ok(RenderJob { scene, camera, config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_base64_asset_map() {
        let json = serde_json::json!({ "texture.png": STANDARD.encode(b"hello") });
        let cache = AssetCache::decode(&json).unwrap();
        assert_eq!(cache.get("texture.png"), Some(b"hello".as_slice()));
    }

    #[test]
    fn rejects_non_object_files_field() {
        let json = serde_json::json!("not an object");
        assert!(AssetCache::decode(&json).is_err());
    }

    #[test]
    fn builds_the_lambertian_floor_fixture() {
        let data = serde_json::json!({
            "kind": "lambertianFloor",
            "width": 4, "height": 4, "samples": 8, "bounces": 4,
        });
        let job = DemoSceneSource.build(&data, &AssetCache::default()).unwrap();
        assert_eq!(job.config.image_width, 4);
        assert_eq!(job.config.sample_count, 8);
    }

    #[test]
    fn unknown_kind_is_a_scene_error() {
        let data = serde_json::json!({ "kind": "nonsense" });
        assert!(DemoSceneSource.build(&data, &AssetCache::default()).is_err());
    }

    #[test]
    fn missing_kind_is_a_scene_error() {
        let data = serde_json::json!({ "width": 4 });
        assert!(DemoSceneSource.build(&data, &AssetCache::default()).is_err());
    }
}
