//! Encodes/decodes the raw RGB bytes carried in `submitWork`'s `result`
//! field. Kept separate from `messages` so the base64 dependency is
//! only pulled in by the one thing that actually needs it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::messages::EncodedTexture;

pub fn encode_texture(pixels: &[u8], width: u32, height: u32, channels: u32) -> EncodedTexture {
    EncodedTexture {
        data: STANDARD.encode(pixels),
        width,
        height,
        channels,
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid base64 in encoded texture: {0}")]
pub struct DecodeError(#[from] base64::DecodeError);

pub fn decode_texture(encoded: &EncodedTexture) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD.decode(&encoded.data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_the_inverse_of_encode() {
        let pixels: Vec<u8> = (0..48u8).collect();
        let encoded = encode_texture(&pixels, 4, 4, 3);
        let decoded = decode_texture(&encoded).unwrap();
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn malformed_base64_is_rejected() {
        let bogus = EncodedTexture {
            data: "not valid base64 !!!".into(),
            width: 1,
            height: 1,
            channels: 3,
        };
        assert!(decode_texture(&bogus).is_err());
    }
}
