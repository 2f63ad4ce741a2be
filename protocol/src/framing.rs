//! Chunked-transfer framing: `<hex-length>\r\n<bytes>\r\n` chunks
//! terminated by a `0\r\n\r\n` chunk, confirmed against the original's
//! HTTP/1.1-chunked-style
//! `chunkedSend`/`chunkedReceive`. One protocol message is sent as a
//! single data chunk followed immediately by the terminator, rather than
//! splitting large payloads across many chunks: nothing here needs
//! streaming mid-message.

use std::io::{self, Read, Write};

pub fn write_chunked<W: Write>(writer: &mut W, payload: &[u8]) -> io::Result<()> {
    if !payload.is_empty() {
        write!(writer, "{:x}\r\n", payload.len())?;
        writer.write_all(payload)?;
        writer.write_all(b"\r\n")?;
    }
    writer.write_all(b"0\r\n\r\n")?;
    writer.flush()
}

/// Reads chunks until the terminator, reassembling the payload. A
/// zero-length read on the very first chunk-length line (peer closed the
/// connection cleanly) is reported as `UnexpectedEof` so callers can treat
/// it the same as any other transport error.
pub fn read_chunked<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        let len = read_chunk_length(reader)?;
        if len == 0 {
            consume_crlf(reader)?;
            break;
        }
        let mut chunk = vec![0u8; len];
        reader.read_exact(&mut chunk)?;
        consume_crlf(reader)?;
        out.extend_from_slice(&chunk);
    }
    Ok(out)
}

fn read_chunk_length<R: Read>(reader: &mut R) -> io::Result<usize> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        reader.read_exact(&mut byte)?;
        if byte[0] == b'\n' {
            break;
        }
        if byte[0] != b'\r' {
            line.push(byte[0]);
        }
    }
    let text = std::str::from_utf8(&line)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "chunk length is not valid utf-8"))?;
    usize::from_str_radix(text.trim(), 16)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "chunk length is not valid hex"))
}

fn consume_crlf<R: Read>(reader: &mut R) -> io::Result<()> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    if &buf != b"\r\n" {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "expected CRLF after chunk"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_an_arbitrary_payload() {
        let payload = b"{\"action\":\"handshake\",\"version\":\"0.1.0\"}".to_vec();
        let mut buf = Vec::new();
        write_chunked(&mut buf, &payload).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = read_chunked(&mut cursor).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn empty_payload_round_trips_to_empty() {
        let mut buf = Vec::new();
        write_chunked(&mut buf, &[]).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = read_chunked(&mut cursor).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn multiple_messages_can_be_read_back_to_back_on_one_stream() {
        let mut buf = Vec::new();
        write_chunked(&mut buf, b"first").unwrap();
        write_chunked(&mut buf, b"second").unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_chunked(&mut cursor).unwrap(), b"first");
        assert_eq!(read_chunked(&mut cursor).unwrap(), b"second");
    }

    #[test]
    fn garbage_length_line_is_a_framing_error() {
        let mut cursor = Cursor::new(b"not-hex\r\n".to_vec());
        assert!(read_chunked(&mut cursor).is_err());
    }
}
