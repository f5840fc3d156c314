//! Length-prefixed byte strings and UTF-8 strings.
//!
//! Prefix `0` is the absent/empty value, `1..=254` is the literal length,
//! and `0xFF` announces a 4-byte big-endian length.

use serde::{Deserialize, Serialize};

use super::integer::{decode_length, encode_length};
use super::{take, CodecResult, Decode, Encode};
use crate::error::CodecError;

/// An opaque byte string.
///
/// `Vec<u8>` is the array combinator over `u8` integers; this newtype
/// selects the compact length-prefixed form instead.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpaqueBytes(pub Vec<u8>);

impl OpaqueBytes {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl std::fmt::Debug for OpaqueBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OpaqueBytes({})", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for OpaqueBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for OpaqueBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for OpaqueBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

pub(crate) fn encode_slice(bytes: &[u8], out: &mut Vec<u8>) -> CodecResult<()> {
    encode_length(bytes.len(), out)?;
    out.extend_from_slice(bytes);
    Ok(())
}

pub(crate) fn decode_slice(input: &[u8]) -> CodecResult<(&[u8], &[u8])> {
    let (len, rest) = decode_length(input)?;
    take(rest, len)
}

impl Encode for OpaqueBytes {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        encode_slice(&self.0, out)
    }
}

impl Decode for OpaqueBytes {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (body, rest) = decode_slice(input)?;
        Ok((Self(body.to_vec()), rest))
    }
}

impl Encode for str {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        encode_slice(self.as_bytes(), out)
    }
}

impl Encode for String {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.as_str().encode_to(out)
    }
}

impl Decode for String {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (body, rest) = decode_slice(input)?;
        let s = std::str::from_utf8(body).map_err(|_| CodecError::InvalidUtf8)?;
        Ok((s.to_owned(), rest))
    }
}
