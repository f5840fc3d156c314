//! Algorithm-tagged public keys and signatures.
//!
//! Wire layouts:
//! - `TypedKeyMaterial = [algTag:1][keyBytes:N(alg)]`
//! - `TypedSignature   = [algTag:1][sigBytes:N(alg)]`

use serde::{Deserialize, Serialize};

use crate::codec::defined::impl_defined_width_codec;
use crate::codec::{CodecResult, DefinedWidth};
use crate::crypto::signing::SignatureAlgorithm;
use crate::error::{CodecError, IdentityError, Result};

fn algorithm_for(tag: u8, type_name: &'static str) -> CodecResult<SignatureAlgorithm> {
    SignatureAlgorithm::from_tag(tag).ok_or(CodecError::InvalidPrefix {
        type_name,
        prefix: tag,
    })
}

fn check_len(type_name: &'static str, expected: usize, found: usize) -> CodecResult<()> {
    if expected != found {
        return Err(CodecError::IncorrectDataLength {
            type_name,
            expected,
            found,
        });
    }
    Ok(())
}

/// A public key with its algorithm tag.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedKeyMaterial {
    algorithm: SignatureAlgorithm,
    bytes: Vec<u8>,
}

impl TypedKeyMaterial {
    pub(crate) fn from_ed25519(bytes: [u8; 32]) -> Self {
        Self {
            algorithm: SignatureAlgorithm::Ed25519,
            bytes: bytes.to_vec(),
        }
    }

    /// Build from raw bytes, which must form a usable key for the algorithm.
    pub fn new(algorithm: SignatureAlgorithm, bytes: Vec<u8>) -> Result<Self> {
        check_len("key material", algorithm.public_key_len(), bytes.len())?;
        let material = Self { algorithm, bytes };
        material.validate()?;
        Ok(material)
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn validate(&self) -> Result<()> {
        match self.algorithm {
            SignatureAlgorithm::Ed25519 => crate::crypto::keys::validate_public_key(&self.bytes),
        }
    }

    /// Verify `signature` over `message`.
    ///
    /// A signature tagged with another algorithm is rejected before any
    /// cryptographic work.
    pub fn verify(&self, signature: &TypedSignature, message: &[u8]) -> Result<()> {
        if signature.algorithm != self.algorithm {
            log::debug!(
                "rejecting {} signature for {} key",
                signature.algorithm.as_str(),
                self.algorithm.as_str()
            );
            return Err(IdentityError::AuthenticationFailed);
        }
        self.algorithm
            .verify_raw(&self.bytes, message, &signature.bytes)
    }

    /// Short hex fingerprint for display.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.bytes[..self.bytes.len().min(8)])
    }
}

impl DefinedWidth for TypedKeyMaterial {
    const TYPE_NAME: &'static str = "key material";

    fn width_for_tag(tag: u8) -> Option<usize> {
        SignatureAlgorithm::from_tag(tag).map(SignatureAlgorithm::public_key_len)
    }

    fn tag(&self) -> u8 {
        self.algorithm.tag()
    }

    fn body(&self) -> &[u8] {
        &self.bytes
    }

    fn from_parts(tag: u8, body: &[u8]) -> CodecResult<Self> {
        let algorithm = algorithm_for(tag, Self::TYPE_NAME)?;
        check_len(Self::TYPE_NAME, algorithm.public_key_len(), body.len())?;
        Ok(Self {
            algorithm,
            bytes: body.to_vec(),
        })
    }
}

impl_defined_width_codec!(TypedKeyMaterial);

impl std::fmt::Debug for TypedKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm.as_str(), hex::encode(&self.bytes))
    }
}

/// A signature with its algorithm tag.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedSignature {
    algorithm: SignatureAlgorithm,
    bytes: Vec<u8>,
}

impl TypedSignature {
    pub(crate) fn from_ed25519(bytes: [u8; 64]) -> Self {
        Self {
            algorithm: SignatureAlgorithm::Ed25519,
            bytes: bytes.to_vec(),
        }
    }

    /// Build from raw bytes; the length must match the algorithm.
    pub fn new(algorithm: SignatureAlgorithm, bytes: Vec<u8>) -> Result<Self> {
        check_len("signature", algorithm.signature_len(), bytes.len())?;
        Ok(Self { algorithm, bytes })
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl DefinedWidth for TypedSignature {
    const TYPE_NAME: &'static str = "signature";

    fn width_for_tag(tag: u8) -> Option<usize> {
        SignatureAlgorithm::from_tag(tag).map(SignatureAlgorithm::signature_len)
    }

    fn tag(&self) -> u8 {
        self.algorithm.tag()
    }

    fn body(&self) -> &[u8] {
        &self.bytes
    }

    fn from_parts(tag: u8, body: &[u8]) -> CodecResult<Self> {
        let algorithm = algorithm_for(tag, Self::TYPE_NAME)?;
        check_len(Self::TYPE_NAME, algorithm.signature_len(), body.len())?;
        Ok(Self {
            algorithm,
            bytes: body.to_vec(),
        })
    }
}

impl_defined_width_codec!(TypedSignature);

impl std::fmt::Debug for TypedSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-sig:{}", self.algorithm.as_str(), hex::encode(&self.bytes))
    }
}
