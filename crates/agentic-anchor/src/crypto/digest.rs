//! Tagged digests used as session-binding values.
//!
//! The session transport supplies these; the core only embeds and
//! compares them. Equality is the only meaningful relation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec::defined::impl_defined_width_codec;
use crate::codec::{CodecResult, DefinedWidth};
use crate::error::CodecError;

const SHA256_TAG: u8 = 1;
const SHA256_LEN: usize = 32;

/// A defined-width digest: `[algTag:1][digest:N(alg)]`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedDigest {
    tag: u8,
    bytes: Vec<u8>,
}

impl TypedDigest {
    /// SHA-256 of `data`.
    pub fn sha256(data: &[u8]) -> Self {
        Self::from_sha256_bytes(Sha256::digest(data).into())
    }

    /// Wrap an already computed SHA-256 value.
    pub fn from_sha256_bytes(bytes: [u8; SHA256_LEN]) -> Self {
        Self {
            tag: SHA256_TAG,
            bytes: bytes.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl DefinedWidth for TypedDigest {
    const TYPE_NAME: &'static str = "digest";

    fn width_for_tag(tag: u8) -> Option<usize> {
        match tag {
            SHA256_TAG => Some(SHA256_LEN),
            _ => None,
        }
    }

    fn tag(&self) -> u8 {
        self.tag
    }

    fn body(&self) -> &[u8] {
        &self.bytes
    }

    fn from_parts(tag: u8, body: &[u8]) -> CodecResult<Self> {
        match Self::width_for_tag(tag) {
            Some(len) if len == body.len() => Ok(Self {
                tag,
                bytes: body.to_vec(),
            }),
            Some(len) => Err(CodecError::IncorrectDataLength {
                type_name: Self::TYPE_NAME,
                expected: len,
                found: body.len(),
            }),
            None => Err(CodecError::InvalidPrefix {
                type_name: Self::TYPE_NAME,
                prefix: tag,
            }),
        }
    }
}

impl_defined_width_codec!(TypedDigest);

impl std::fmt::Debug for TypedDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypedDigest(sha256:{})", self.to_hex())
    }
}

impl std::fmt::Display for TypedDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}
