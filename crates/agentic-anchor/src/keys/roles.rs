//! Role-separated key pairs.
//!
//! Identity, Agent and Anchor keys share one signing capability but are
//! distinct types: a `PublicKey<AgentRole>` cannot be passed where a
//! `PublicKey<AnchorRole>` is expected even though the bytes are alike.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::codec::enumeration::impl_enum_codec;
use crate::codec::{CodecResult, Decode, Discriminant, Encode};
use crate::crypto::signing::{SignatureAlgorithm, SigningCapability};
use crate::error::{IdentityError, Result};
use crate::keys::archive::KeyArchive;
use crate::keys::material::{TypedKeyMaterial, TypedSignature};

/// Runtime tag for a key role, carried in archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyRole {
    Identity,
    Agent,
    Anchor,
}

impl KeyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Agent => "agent",
            Self::Anchor => "anchor",
        }
    }
}

impl Discriminant for KeyRole {
    const TYPE_NAME: &'static str = "key role";

    fn discriminant(&self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::Agent => 2,
            Self::Anchor => 3,
        }
    }

    fn from_discriminant(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Identity),
            2 => Some(Self::Agent),
            3 => Some(Self::Anchor),
            _ => None,
        }
    }
}

impl_enum_codec!(KeyRole);

/// Compile-time key role.
pub trait Role: Send + Sync + 'static {
    const ROLE: KeyRole;
}

/// Marker for long-lived personal identity keys.
#[derive(Debug)]
pub enum IdentityRole {}

/// Marker for per-device agent keys.
#[derive(Debug)]
pub enum AgentRole {}

/// Marker for anchor keys.
#[derive(Debug)]
pub enum AnchorRole {}

impl Role for IdentityRole {
    const ROLE: KeyRole = KeyRole::Identity;
}

impl Role for AgentRole {
    const ROLE: KeyRole = KeyRole::Agent;
}

impl Role for AnchorRole {
    const ROLE: KeyRole = KeyRole::Anchor;
}

/// A public key bound to a role.
pub struct PublicKey<R: Role> {
    material: TypedKeyMaterial,
    _role: PhantomData<fn() -> R>,
}

impl<R: Role> PublicKey<R> {
    /// Interpret raw key material as a key of role `R`.
    pub fn from_material(material: TypedKeyMaterial) -> Self {
        Self {
            material,
            _role: PhantomData,
        }
    }

    pub fn material(&self) -> &TypedKeyMaterial {
        &self.material
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.material.algorithm()
    }

    pub fn verify(&self, signature: &TypedSignature, message: &[u8]) -> Result<()> {
        self.material.verify(signature, message)
    }
}

impl<R: Role> Clone for PublicKey<R> {
    fn clone(&self) -> Self {
        Self::from_material(self.material.clone())
    }
}

impl<R: Role> PartialEq for PublicKey<R> {
    fn eq(&self, other: &Self) -> bool {
        self.material == other.material
    }
}

impl<R: Role> Eq for PublicKey<R> {}

impl<R: Role> Hash for PublicKey<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.material.hash(state);
    }
}

impl<R: Role> fmt::Debug for PublicKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", R::ROLE.as_str(), self.material)
    }
}

impl<R: Role> fmt::Display for PublicKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", R::ROLE.as_str(), self.material.fingerprint())
    }
}

impl<R: Role> Encode for PublicKey<R> {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.material.encode_to(out)
    }
}

impl<R: Role> Decode for PublicKey<R> {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (material, rest) = TypedKeyMaterial::decode_continuing(input)?;
        Ok((Self::from_material(material), rest))
    }
}

/// A private key bound to a role, with its derived public key.
pub struct KeyPair<R: Role> {
    signer: Box<dyn SigningCapability>,
    public: PublicKey<R>,
}

impl<R: Role> KeyPair<R> {
    /// Generate a key with the default algorithm.
    pub fn generate() -> Self {
        Self::generate_with(SignatureAlgorithm::default())
    }

    pub fn generate_with(algorithm: SignatureAlgorithm) -> Self {
        Self::from_signer(algorithm.generate())
    }

    fn from_signer(signer: Box<dyn SigningCapability>) -> Self {
        let public = PublicKey::from_material(signer.public_key());
        Self { signer, public }
    }

    pub fn public_key(&self) -> &PublicKey<R> {
        &self.public
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.signer.algorithm()
    }

    pub fn sign(&self, message: &[u8]) -> TypedSignature {
        self.signer.sign(message)
    }

    /// Export the private key for local storage.
    pub fn archive(&self) -> KeyArchive {
        KeyArchive::new(R::ROLE, self.signer.algorithm(), self.signer.secret_bytes())
    }

    /// Rebuild a key pair from an archive of the same role.
    pub fn restore(archive: &KeyArchive) -> Result<Self> {
        if archive.role() != R::ROLE {
            return Err(IdentityError::RoleMismatch {
                expected: R::ROLE.as_str(),
                found: archive.role().as_str(),
            });
        }
        let signer = archive.algorithm().restore(archive)?;
        Ok(Self::from_signer(signer))
    }

    /// Rebuild a key pair from archive bytes stored under a known algorithm.
    pub fn restore_encoded(encoded: &[u8], expected: SignatureAlgorithm) -> Result<Self> {
        Self::restore(&KeyArchive::decode_expecting(encoded, expected)?)
    }
}

impl<R: Role> fmt::Debug for KeyPair<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

pub type IdentityKeyPair = KeyPair<IdentityRole>;
pub type AgentKeyPair = KeyPair<AgentRole>;
pub type AnchorKeyPair = KeyPair<AnchorRole>;

pub type IdentityPublicKey = PublicKey<IdentityRole>;
pub type AgentPublicKey = PublicKey<AgentRole>;
pub type AnchorPublicKey = PublicKey<AnchorRole>;
