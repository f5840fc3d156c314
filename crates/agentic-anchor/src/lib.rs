//! AgenticAnchor: anchor identities and delegated agent keys.
//!
//! Provides a self-describing binary codec, role-separated typed keys,
//! signing envelopes, anchor attestation with verifiable succession,
//! agent delegation (Hello, Reply, Welcome) and handoff of agent and
//! anchor authority.

pub mod anchor;
pub mod codec;
pub mod crypto;
pub mod delegation;
pub mod envelope;
pub mod error;
pub mod handoff;
pub mod keys;
pub mod limits;
pub mod time;

#[cfg(test)]
mod proptests;

// Re-export primary types
pub use error::{CodecError, IdentityError, Result};

pub use anchor::{
    verify_succession, AnchorId, Attestation, Continuity, Destination, HandOffRefused,
    PrivateActiveAnchor, SignedAttestation, SuccessionProof,
};
pub use codec::{Decode, Encode, OpaqueBytes};
pub use crypto::{KdfParams, SignatureAlgorithm, TypedDigest};
pub use envelope::{SignedEnvelope, SignedPayload};
pub use keys::{
    AgentKeyPair, AgentPublicKey, AnchorKeyPair, AnchorPublicKey, IdentityKeyPair,
    IdentityPublicKey, KeyArchive, ProtectedArchive, TypedKeyMaterial, TypedSignature,
};

// Re-export delegation types
pub use delegation::{
    Delegation, DelegationBody, DelegationType, Hello, HelloDelegation, HelloPolicy, KnownAgent,
    Reply, ReplyDelegation, VerifiedDelegation, Welcome, WelcomeDelegation,
};

// Re-export handoff types
pub use handoff::{
    AgentUpdate, AnchorHandoff, HandoffBuilder, HandoffContent, HandoffPackage, NewAgent,
    NewAnchor, VerifiedHandoff,
};
