//! Succession proofs: verifiable anchor key rotation.
//!
//! Each proof is signed by the retiring anchor key over
//! `{predecessor, successor}`. Trust flows backward: starting from a
//! known-good current key, each proof names and authenticates the key
//! before it.

use crate::codec::{CodecResult, Decode, Encode};
use crate::envelope::{signed_bytes, SignedEnvelope};
use crate::error::{IdentityError, Result};
use crate::keys::roles::{AnchorKeyPair, AnchorPublicKey};
use crate::limits::{MAX_SUCCESSION_DEPTH, SUCCESSION_DISCRIMINATOR};

/// `{predecessorPublicKey, signature}`; the successor is supplied by the
/// verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessionProof(SignedEnvelope<AnchorPublicKey>);

impl SuccessionProof {
    /// Have `predecessor` vouch for `successor`.
    pub fn create(predecessor: &AnchorKeyPair, successor: &AnchorPublicKey) -> Result<Self> {
        let envelope =
            SignedEnvelope::create_with_key(predecessor.public_key().clone(), predecessor, |pred| {
                succession_bytes(pred, successor)
            })?;
        Ok(Self(envelope))
    }

    pub fn predecessor(&self) -> &AnchorPublicKey {
        self.0.content()
    }

    /// Check that the embedded predecessor signed for `successor`.
    pub fn verify(&self, successor: &AnchorPublicKey) -> Result<()> {
        self.0
            .verify_with_key(self.predecessor(), |pred| succession_bytes(pred, successor))
    }
}

fn succession_bytes(
    predecessor: &AnchorPublicKey,
    successor: &AnchorPublicKey,
) -> CodecResult<Vec<u8>> {
    signed_bytes(SUCCESSION_DISCRIMINATOR, &[predecessor, successor])
}

impl Encode for SuccessionProof {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.0.encode_to(out)
    }
}

impl Decode for SuccessionProof {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (envelope, rest) = SignedEnvelope::decode_continuing(input)?;
        Ok((Self(envelope), rest))
    }
}

/// Walk a succession chain back from `tail`.
///
/// `proofs` is ordered newest-first: `proofs[0]` links `tail` to its
/// predecessor, `proofs[1]` links that predecessor to the one before, and
/// so on. Returns every predecessor, oldest first. A single failing link
/// rejects the whole chain.
pub fn verify_succession(
    tail: &AnchorPublicKey,
    proofs: &[SuccessionProof],
) -> Result<Vec<AnchorPublicKey>> {
    if proofs.len() > MAX_SUCCESSION_DEPTH {
        log::debug!(
            "succession chain of {} exceeds limit {}",
            proofs.len(),
            MAX_SUCCESSION_DEPTH
        );
        return Err(IdentityError::AuthenticationFailed);
    }

    let mut predecessors = Vec::with_capacity(proofs.len());
    let mut current = tail;

    for (depth, proof) in proofs.iter().enumerate() {
        if let Err(e) = proof.verify(current) {
            log::debug!("succession link {depth} rejected for {current}");
            return Err(e);
        }
        predecessors.push(proof.predecessor().clone());
        current = proof.predecessor();
    }

    predecessors.reverse();
    Ok(predecessors)
}
