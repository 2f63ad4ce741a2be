//! The coordinator<->worker wire protocol: framed JSON
//! messages with a mandatory `action` discriminator, the chunked-transfer
//! framing underneath, and tile/texture encoding. Deliberately
//! transport-agnostic: every function here takes a `Read`/`Write` rather
//! than a concrete socket type, so the worker crate can drive it over a
//! `TcpStream` while tests drive it over an in-memory pipe.

pub mod error;
pub mod framing;
pub mod messages;
pub mod tile_codec;
pub mod version;

pub use error::ProtocolError;
pub use messages::{EncodedTexture, Message, PointWire, TileWire, KNOWN_ACTIONS};
pub use tile_codec::{decode_texture, encode_texture};
pub use version::{BUILD_ID, DEFAULT_PORT, PROTOCOL_VERSION};

use std::io::{Read, Write};

/// Serializes `message` to JSON and writes it through the chunked framer.
pub fn send_message<W: Write>(writer: &mut W, message: &Message) -> Result<(), ProtocolError> {
    let bytes = serde_json::to_vec(message).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    framing::write_chunked(writer, &bytes)?;
    Ok(())
}

/// Reads one framed chunk stream and decodes it as a `Message`. An action
/// outside [`KNOWN_ACTIONS`] is reported as `UnknownAction` rather than a
/// generic parse failure, so callers can respond with an `error` message
/// instead of tearing down the connection on any malformed field.
pub fn receive_message<R: Read>(reader: &mut R) -> Result<Message, ProtocolError> {
    let bytes = framing::read_chunked(reader)?;
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    let action = value
        .get("action")
        .and_then(|a| a.as_str())
        .ok_or_else(|| ProtocolError::Malformed("missing \"action\" field".into()))?
        .to_string();
    if !KNOWN_ACTIONS.contains(&action.as_str()) {
        return Err(ProtocolError::UnknownAction(action));
    }
    serde_json::from_value(value).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

/// Checks both halves of the handshake: exact string equality on both
/// `version` and `githash`, confirmed as a two-field check against the
/// original's `validateHandshake`.
pub fn validate_handshake(version: &str, githash: &str) -> Result<(), ProtocolError> {
    if version != PROTOCOL_VERSION || githash != BUILD_ID {
        return Err(ProtocolError::VersionMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn send_then_receive_round_trips_a_message() {
        let msg = Message::Ready { thread_count: 8 };
        let mut buf = Vec::new();
        send_message(&mut buf, &msg).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = receive_message(&mut cursor).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn unknown_action_is_reported_distinctly() {
        let mut buf = Vec::new();
        framing::write_chunked(&mut buf, br#"{"action":"danceParty"}"#).unwrap();
        let mut cursor = Cursor::new(buf);
        match receive_message(&mut cursor) {
            Err(ProtocolError::UnknownAction(action)) => assert_eq!(action, "danceParty"),
            other => panic!("expected UnknownAction, got {other:?}"),
        }
    }

    #[test]
    fn matching_handshake_fields_validate() {
        assert!(validate_handshake(PROTOCOL_VERSION, BUILD_ID).is_ok());
    }

    #[test]
    fn mismatched_version_fails_handshake() {
        assert!(matches!(
            validate_handshake("not-a-real-version", BUILD_ID),
            Err(ProtocolError::VersionMismatch)
        ));
    }
}
