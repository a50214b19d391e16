//! Percent-decoding of request targets.

use thiserror::Error;
use wms_common::WmsError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` at `offset` was not followed by two hex digits.
    #[error("Invalid percent-escape at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("Decoded request target is not valid UTF-8")]
    NotUtf8,
}

impl DecodeError {
    /// Byte offset of the failure, when it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::InvalidEscape { offset } => Some(*offset),
            DecodeError::NotUtf8 => None,
        }
    }
}

impl From<DecodeError> for WmsError {
    fn from(err: DecodeError) -> Self {
        WmsError::BadEncoding(err.to_string())
    }
}

/// Reverse URL percent-encoding.
///
/// `%XY` becomes the byte `0xXY`, `+` becomes a space, and everything else
/// is copied through. Decoding runs left to right in one pass; a `%` that is
/// not followed by two hex digits fails the whole input.
pub fn percent_decode(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            b'%' => {
                let hi = input.get(i + 1).copied().and_then(hex_value);
                let lo = input.get(i + 2).copied().and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                    _ => return Err(DecodeError::InvalidEscape { offset: i }),
                }
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    Ok(out)
}

/// Decode a raw request target into text.
pub fn decode_target(raw: &str) -> Result<String, DecodeError> {
    let bytes = percent_decode(raw.as_bytes())?;
    String::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
