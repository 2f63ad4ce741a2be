//! Wire message types for the coordinator <-> worker exchange. Every
//! message carries a mandatory `action` discriminator; `Message` models
//! that as an internally-tagged `serde` enum so (de)serialization and
//! exhaustive `match`ing stay in lockstep with the action name.

use serde::{Deserialize, Serialize};

/// The known worker-side actions. Anything else is
/// `ProtocolError::UnknownAction`.
pub const KNOWN_ACTIONS: &[&str] = &[
    "handshake",
    "startSync",
    "loadScene",
    "ready",
    "loadAssets",
    "ok",
    "startRender",
    "getWork",
    "tile",
    "renderComplete",
    "submitWork",
    "stats",
    "goodbye",
    "shutdown",
    "error",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointWire {
    pub x: u32,
    pub y: u32,
}

/// Wire shape of a `RenderTile`: `{tileNum, begin:{x,y}, end:{x,y}}`.
/// Deliberately omits `TileState`: tile lifecycle state belongs to the
/// worker that is rendering it, not the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileWire {
    #[serde(rename = "tileNum")]
    pub tile_num: i64,
    pub begin: PointWire,
    pub end: PointWire,
}

impl From<shared_structs::RenderTile> for TileWire {
    fn from(tile: shared_structs::RenderTile) -> Self {
        TileWire {
            tile_num: tile.tile_num,
            begin: PointWire { x: tile.begin.0, y: tile.begin.1 },
            end: PointWire { x: tile.end.0, y: tile.end.1 },
        }
    }
}

impl From<TileWire> for shared_structs::RenderTile {
    fn from(wire: TileWire) -> Self {
        shared_structs::RenderTile::new(
            (wire.begin.x, wire.begin.y),
            (wire.end.x, wire.end.y),
            wire.tile_num,
        )
    }
}

/// Base64-encoded RGB texture: encoded as base64-encoded
/// RGB bytes plus width, height, channels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncodedTexture {
    pub data: String,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action")]
pub enum Message {
    #[serde(rename = "handshake")]
    Handshake { version: String, githash: String },

    #[serde(rename = "startSync")]
    StartSync,

    #[serde(rename = "loadScene")]
    LoadScene {
        data: serde_json::Value,
        #[serde(rename = "assetPath")]
        asset_path: String,
    },

    #[serde(rename = "ready")]
    Ready {
        #[serde(rename = "threadCount")]
        thread_count: u32,
    },

    #[serde(rename = "loadAssets")]
    LoadAssets { files: serde_json::Value },

    #[serde(rename = "ok")]
    Ok,

    #[serde(rename = "startRender")]
    StartRender,

    #[serde(rename = "getWork")]
    GetWork,

    /// Coordinator's reply to `getWork` when there is more work: carries
    /// the next tile assignment.
    #[serde(rename = "tile")]
    Tile { tile: TileWire },

    /// Coordinator's reply to `getWork` when there is no more work.
    #[serde(rename = "renderComplete")]
    RenderComplete,

    #[serde(rename = "submitWork")]
    SubmitWork {
        tile: TileWire,
        result: EncodedTexture,
    },

    #[serde(rename = "stats")]
    Stats { completed: u64, #[serde(rename = "avgPerPass")] avg_per_pass: f64 },

    #[serde(rename = "goodbye")]
    Goodbye,

    #[serde(rename = "shutdown")]
    Shutdown,

    #[serde(rename = "error")]
    Error { message: String },
}

impl Message {
    pub fn action(&self) -> &'static str {
        match self {
            Message::Handshake { .. } => "handshake",
            Message::StartSync => "startSync",
            Message::LoadScene { .. } => "loadScene",
            Message::Ready { .. } => "ready",
            Message::LoadAssets { .. } => "loadAssets",
            Message::Ok => "ok",
            Message::StartRender => "startRender",
            Message::GetWork => "getWork",
            Message::Tile { .. } => "tile",
            Message::RenderComplete => "renderComplete",
            Message::SubmitWork { .. } => "submitWork",
            Message::Stats { .. } => "stats",
            Message::Goodbye => "goodbye",
            Message::Shutdown => "shutdown",
            Message::Error { .. } => "error",
        }
    }

    pub fn error(message: impl Into<String>) -> Message {
        Message::Error { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_structs::RenderTile;

    #[test]
    fn tile_round_trips_through_the_wire_type() {
        let tile = RenderTile::new((4, 8), (20, 24), 7);
        let wire: TileWire = tile.into();
        let back: RenderTile = wire.into();
        assert_eq!(tile.begin, back.begin);
        assert_eq!(tile.end, back.end);
        assert_eq!(tile.tile_num, back.tile_num);
    }

    #[test]
    fn handshake_serializes_with_action_discriminator() {
        let msg = Message::Handshake {
            version: "0.1.0".into(),
            githash: "abc123".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["action"], "handshake");
        assert_eq!(json["version"], "0.1.0");
    }

    #[test]
    fn stats_field_names_match_the_wire_table() {
        let msg = Message::Stats { completed: 42, avg_per_pass: 3.5 };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["completed"], 42);
        assert_eq!(json["avgPerPass"], 3.5);
    }
}
