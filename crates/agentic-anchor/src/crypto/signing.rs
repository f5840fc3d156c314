//! Signature algorithms and the signing capability.
//!
//! Calling code never names a concrete key type. It holds a
//! `Box<dyn SigningCapability>` and picks implementations through the
//! [`SignatureAlgorithm`] tag carried on every wire key and signature.
//! Adding an algorithm means adding a variant and an implementer of
//! [`SignatureScheme`].

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::keys::Ed25519Signer;
use crate::error::{IdentityError, Result};
use crate::keys::archive::KeyArchive;
use crate::keys::material::{TypedKeyMaterial, TypedSignature};

/// Algorithms with a wire tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    #[default]
    Ed25519,
}

impl SignatureAlgorithm {
    /// Wire tag. `0` is reserved as the absent marker.
    pub const fn tag(self) -> u8 {
        match self {
            Self::Ed25519 => 1,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Ed25519),
            _ => None,
        }
    }

    pub const fn public_key_len(self) -> usize {
        match self {
            Self::Ed25519 => 32,
        }
    }

    pub const fn private_key_len(self) -> usize {
        match self {
            Self::Ed25519 => 32,
        }
    }

    pub const fn signature_len(self) -> usize {
        match self {
            Self::Ed25519 => 64,
        }
    }

    /// Stable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
        }
    }

    /// Generate a fresh signer.
    pub fn generate(self) -> Box<dyn SigningCapability> {
        match self {
            Self::Ed25519 => Box::new(Ed25519Signer::generate()),
        }
    }

    /// Rebuild a signer from an archive carrying this algorithm's tag.
    pub fn restore(self, archive: &KeyArchive) -> Result<Box<dyn SigningCapability>> {
        match self {
            Self::Ed25519 => Ok(Box::new(Ed25519Signer::restore(archive)?)),
        }
    }

    /// Primitive verification over raw key and signature bytes.
    pub fn verify_raw(self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
        match self {
            Self::Ed25519 => Ed25519Signer::verify_raw(public_key, message, signature),
        }
    }
}

/// A private signing key of some algorithm.
pub trait SigningCapability: Send + Sync {
    fn algorithm(&self) -> SignatureAlgorithm;

    fn sign(&self, message: &[u8]) -> TypedSignature;

    fn public_key(&self) -> TypedKeyMaterial;

    /// Raw private key bytes, wiped when dropped.
    fn secret_bytes(&self) -> Zeroizing<Vec<u8>>;
}

/// The static half of an algorithm implementation.
pub trait SignatureScheme: SigningCapability + Sized {
    const ALGORITHM: SignatureAlgorithm;

    fn generate() -> Self;

    /// Rebuild from raw private key bytes of exactly the algorithm's length.
    fn from_secret(secret: &[u8]) -> Result<Self>;

    fn verify_raw(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()>;

    /// Rebuild from an archive, refusing archives of another algorithm.
    fn restore(archive: &KeyArchive) -> Result<Self> {
        if archive.algorithm() != Self::ALGORITHM {
            return Err(IdentityError::AlgorithmMismatch {
                expected: Self::ALGORITHM.tag(),
                found: archive.algorithm().tag(),
            });
        }
        Self::from_secret(archive.secret())
    }
}
