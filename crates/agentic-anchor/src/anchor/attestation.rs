//! Attestations bind an anchor key to an external destination.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec::{CodecResult, Decode, Encode};
use crate::envelope::{signed_bytes, SignedEnvelope};
use crate::error::{IdentityError, Result};
use crate::keys::roles::{AnchorKeyPair, AnchorPublicKey};
use crate::limits::ATTESTATION_DISCRIMINATOR;

use super::destination::Destination;

/// Display identifier for an anchor key.
///
/// Format: `anc_` + base58 of the first 16 bytes of SHA-256 over the
/// key's wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(pub String);

impl AnchorId {
    pub fn from_public_key(key: &AnchorPublicKey) -> Result<Self> {
        let hash = Sha256::digest(key.encode()?);
        let encoded = bs58::encode(&hash[..16]).into_string();
        Ok(Self(format!("anc_{encoded}")))
    }
}

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `{anchorPublicKey, destination}`. A new one is made for every anchor
/// key; the destination carries over unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attestation {
    anchor_key: AnchorPublicKey,
    destination: Destination,
}

impl Attestation {
    pub fn new(anchor_key: AnchorPublicKey, destination: Destination) -> Self {
        Self {
            anchor_key,
            destination,
        }
    }

    pub fn anchor_key(&self) -> &AnchorPublicKey {
        &self.anchor_key
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Self-sign with the attested anchor key, for publication through a
    /// name resolver.
    pub fn sign(self, key: &AnchorKeyPair) -> Result<SignedAttestation> {
        SignedEnvelope::create_with_key(self, key, attestation_bytes)
    }
}

impl Encode for Attestation {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (&self.anchor_key, &self.destination).encode_to(out)
    }
}

impl Decode for Attestation {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((anchor_key, destination), rest) =
            <(AnchorPublicKey, Destination)>::decode_continuing(input)?;
        Ok((Self::new(anchor_key, destination), rest))
    }
}

fn attestation_bytes(attestation: &Attestation) -> CodecResult<Vec<u8>> {
    signed_bytes(ATTESTATION_DISCRIMINATOR, &[attestation])
}

/// An attestation signed by the key it attests.
pub type SignedAttestation = SignedEnvelope<Attestation>;

impl SignedEnvelope<Attestation> {
    /// Check the self-signature and that it names `destination`.
    pub fn verify_for(&self, destination: &Destination) -> Result<&AnchorPublicKey> {
        let attestation = self.content();
        if attestation.destination() != destination {
            log::debug!(
                "attestation names {}, expected {}",
                attestation.destination(),
                destination
            );
            return Err(IdentityError::AuthenticationFailed);
        }
        self.verify_with_key(attestation.anchor_key(), attestation_bytes)?;
        Ok(attestation.anchor_key())
    }
}
