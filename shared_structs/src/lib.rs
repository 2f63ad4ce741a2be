pub mod buffer;
pub mod color;
pub mod hit;
pub mod material;
pub mod ray;
pub mod sampler;
pub mod scene;
pub mod state;
pub mod texture;
pub mod tile;
pub mod vector;

pub use buffer::RenderBuffer;
pub use color::Color;
pub use hit::HitRecord;
pub use material::{Material, MaterialKind, Polygon, TextureRef, TextureSemantic};
pub use ray::{LightRay, RayTag};
pub use sampler::Sampler;
pub use scene::{CameraRaySource, Scene};
pub use state::{RenderPhase, RendererState};
pub use texture::{Texture, TextureSpace};
pub use tile::{RenderTile, TileState};
pub use vector::Vector;
