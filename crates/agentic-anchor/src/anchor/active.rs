//! The private side of an anchor.
//!
//! A [`PrivateActiveAnchor`] owns the current anchor key. Rotation via
//! [`PrivateActiveAnchor::hand_off`] consumes the old value and returns
//! its sole successor, so a stale predecessor cannot be used again
//! through the same binding. A rotation must be delivered to peers and
//! [`settle`](PrivateActiveAnchor::settle)d before the next one. Callers
//! that persist anchors must persist the successor before discarding the
//! predecessor's archive, or the succession chain forks.

use zeroize::Zeroizing;

use crate::codec::{CodecResult, Decode, Encode};
use crate::crypto::encryption::KdfParams;
use crate::error::{IdentityError, Result};
use crate::keys::archive::{ArchiveContents, KeyArchive, ProtectedArchive};
use crate::keys::material::TypedSignature;
use crate::keys::roles::{AnchorKeyPair, AnchorPublicKey, KeyRole};
use crate::limits::MAX_SUCCESSION_DEPTH;

use super::attestation::{AnchorId, Attestation, SignedAttestation};
use super::destination::Destination;
use super::succession::SuccessionProof;

/// Rotation state not yet delivered to peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuity {
    previous_anchor: AnchorPublicKey,
    proof: SuccessionProof,
}

impl Continuity {
    pub fn previous_anchor(&self) -> &AnchorPublicKey {
        &self.previous_anchor
    }

    /// The proof linking the previous anchor to the current one.
    pub fn proof(&self) -> &SuccessionProof {
        &self.proof
    }
}

impl Encode for Continuity {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (&self.previous_anchor, &self.proof).encode_to(out)
    }
}

impl Decode for Continuity {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((previous_anchor, proof), rest) =
            <(AnchorPublicKey, SuccessionProof)>::decode_continuing(input)?;
        Ok((
            Self {
                previous_anchor,
                proof,
            },
            rest,
        ))
    }
}

/// The current anchor key with its attestation and rotation state.
pub struct PrivateActiveAnchor {
    key_pair: AnchorKeyPair,
    attestation: Attestation,
    continuity: Option<Continuity>,
    /// Every proof back to the root, newest first. Never longer than
    /// `MAX_SUCCESSION_DEPTH`.
    succession: Vec<SuccessionProof>,
}

impl PrivateActiveAnchor {
    /// Create a root anchor for `destination`. It has no continuity.
    pub fn create(destination: Destination) -> Self {
        let key_pair = AnchorKeyPair::generate();
        let attestation = Attestation::new(key_pair.public_key().clone(), destination);
        Self {
            key_pair,
            attestation,
            continuity: None,
            succession: Vec::new(),
        }
    }

    /// Rotate to a fresh anchor key attesting the same destination.
    ///
    /// The retiring key signs a [`SuccessionProof`] for the new key; the
    /// proof becomes the successor's continuity and heads its succession
    /// list.
    ///
    /// Refused, handing the anchor back unchanged, while an earlier
    /// rotation is unsettled (`PendingContinuity`) or once the history
    /// holds `MAX_SUCCESSION_DEPTH` proofs (`SuccessionLimit`).
    pub fn hand_off(self) -> std::result::Result<Self, HandOffRefused> {
        if self.continuity.is_some() {
            return Err(HandOffRefused::new(self, IdentityError::PendingContinuity));
        }
        if self.succession.len() >= MAX_SUCCESSION_DEPTH {
            return Err(HandOffRefused::new(
                self,
                IdentityError::SuccessionLimit(MAX_SUCCESSION_DEPTH),
            ));
        }

        let next = AnchorKeyPair::generate();
        let proof = match SuccessionProof::create(&self.key_pair, next.public_key()) {
            Ok(proof) => proof,
            Err(reason) => return Err(HandOffRefused::new(self, reason)),
        };

        let mut succession = Vec::with_capacity(self.succession.len() + 1);
        succession.push(proof.clone());
        succession.extend(self.succession);

        log::trace!(
            "anchor rotated {} -> {} (depth {})",
            self.key_pair.public_key(),
            next.public_key(),
            succession.len()
        );

        let attestation = Attestation::new(
            next.public_key().clone(),
            self.attestation.destination().clone(),
        );
        Ok(Self {
            key_pair: next,
            attestation,
            continuity: Some(Continuity {
                previous_anchor: self.key_pair.public_key().clone(),
                proof,
            }),
            succession,
        })
    }

    /// Mark the pending rotation as delivered, returning it.
    pub fn settle(&mut self) -> Option<Continuity> {
        self.continuity.take()
    }

    pub fn public_key(&self) -> &AnchorPublicKey {
        self.key_pair.public_key()
    }

    pub fn id(&self) -> Result<AnchorId> {
        AnchorId::from_public_key(self.public_key())
    }

    pub fn attestation(&self) -> &Attestation {
        &self.attestation
    }

    pub fn destination(&self) -> &Destination {
        self.attestation.destination()
    }

    /// The self-signed attestation, for publication.
    pub fn signed_attestation(&self) -> Result<SignedAttestation> {
        self.attestation.clone().sign(&self.key_pair)
    }

    pub fn continuity(&self) -> Option<&Continuity> {
        self.continuity.as_ref()
    }

    /// Succession proofs back towards the root, newest first.
    pub fn succession(&self) -> &[SuccessionProof] {
        &self.succession
    }

    pub(crate) fn sign(&self, message: &[u8]) -> TypedSignature {
        self.key_pair.sign(message)
    }

    /// Local-only archive: `keyArchive ++ destination ++ continuity? ++
    /// [succession]`. Contains the private key.
    pub fn archive(&self) -> Result<Zeroizing<Vec<u8>>> {
        let mut out = Zeroizing::new(Vec::new());
        self.key_pair.archive().encode_to(&mut out)?;
        self.attestation.destination().encode_to(&mut out)?;
        self.continuity.encode_to(&mut out)?;
        self.succession.encode_to(&mut out)?;
        Ok(out)
    }

    /// Rebuild from [`archive`](Self::archive) output.
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        let (key_archive, rest) = KeyArchive::decode_continuing(bytes)?;
        let key_pair = AnchorKeyPair::restore(&key_archive)?;
        let (destination, rest) = Destination::decode_continuing(rest)?;
        let (continuity, rest) = Option::<Continuity>::decode_continuing(rest)?;
        let succession = Vec::<SuccessionProof>::decode_final(rest)?;
        if succession.len() > MAX_SUCCESSION_DEPTH {
            return Err(IdentityError::SuccessionLimit(MAX_SUCCESSION_DEPTH));
        }

        if let Some(c) = &continuity {
            if c.proof.predecessor() != &c.previous_anchor
                || c.proof.verify(key_pair.public_key()).is_err()
            {
                return Err(IdentityError::KeyMismatch("continuity"));
            }
        }

        let attestation = Attestation::new(key_pair.public_key().clone(), destination);
        Ok(Self {
            key_pair,
            attestation,
            continuity,
            succession,
        })
    }

    /// Encrypt the archive under a passphrase.
    pub fn protect(&self, passphrase: &str, params: &KdfParams) -> Result<ProtectedArchive> {
        let plaintext = self.archive()?;
        ProtectedArchive::seal(
            KeyRole::Anchor,
            ArchiveContents::ActiveAnchor,
            &plaintext,
            passphrase,
            params,
        )
    }

    /// Decrypt and restore a protected anchor archive.
    pub fn unlock(protected: &ProtectedArchive, passphrase: &str) -> Result<Self> {
        let plaintext = protected.open(passphrase, ArchiveContents::ActiveAnchor)?;
        Self::restore(&plaintext)
    }
}

/// A rotation [`PrivateActiveAnchor::hand_off`] declined to perform.
#[derive(Debug, thiserror::Error)]
#[error("anchor rotation refused: {reason}")]
pub struct HandOffRefused {
    anchor: Box<PrivateActiveAnchor>,
    #[source]
    reason: IdentityError,
}

impl HandOffRefused {
    fn new(anchor: PrivateActiveAnchor, reason: IdentityError) -> Self {
        log::debug!("hand_off refused for {}: {reason}", anchor.public_key());
        Self {
            anchor: Box::new(anchor),
            reason,
        }
    }

    pub fn reason(&self) -> &IdentityError {
        &self.reason
    }

    /// The anchor, unchanged.
    pub fn into_anchor(self) -> PrivateActiveAnchor {
        *self.anchor
    }
}

impl From<HandOffRefused> for IdentityError {
    fn from(refused: HandOffRefused) -> Self {
        refused.reason
    }
}

impl std::fmt::Debug for PrivateActiveAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateActiveAnchor")
            .field("public_key", self.public_key())
            .field("destination", self.destination())
            .field("continuity", &self.continuity.is_some())
            .field("succession", &self.succession.len())
            .finish_non_exhaustive()
    }
}
