//! Handoff: moving agent (and optionally anchor) authority to new keys.
//!
//! Up to four keys cooperate: the retiring agent, the active anchor, the
//! new agent, and, when the anchor has rotated, the retiring anchor
//! through its succession proof. The outer signature by the retiring
//! agent is bound to a session digest supplied by the transport, so a
//! handoff cannot be replayed into another session.
//!
//! Wire form: `retiredAgentSignature ++ package`, where
//! `package = content ++ activeAnchorSignature ++ newAgentSignature` and
//! `content = newAgent ++ newAnchor?`.

mod build;
mod verify;

use serde::{Deserialize, Serialize};

use crate::anchor::SuccessionProof;
use crate::codec::{CodecResult, Decode, Encode};
use crate::crypto::digest::TypedDigest;
use crate::envelope::{signed_bytes, SignedBytes, SignedPayload};
use crate::keys::material::TypedSignature;
use crate::keys::roles::{AgentPublicKey, AnchorPublicKey};
use crate::limits::{HANDOFF_CONTENT_DISCRIMINATOR, HANDOFF_RETIRED_DISCRIMINATOR};

pub use crate::delegation::KnownAgent;
pub use build::HandoffBuilder;

/// Properties of the device taking over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentUpdate {
    /// The new agent runs in a restricted, ephemeral app context.
    pub is_app_clip: bool,
}

impl Encode for AgentUpdate {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.is_app_clip.encode_to(out)
    }
}

impl Decode for AgentUpdate {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (is_app_clip, rest) = bool::decode_continuing(input)?;
        Ok((Self { is_app_clip }, rest))
    }
}

/// `{newAgentPublicKey, update}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub public_key: AgentPublicKey,
    pub update: AgentUpdate,
}

impl Encode for NewAgent {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (&self.public_key, &self.update).encode_to(out)
    }
}

impl Decode for NewAgent {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((public_key, update), rest) = <(AgentPublicKey, AgentUpdate)>::decode_continuing(input)?;
        Ok((Self { public_key, update }, rest))
    }
}

/// `{newAnchorPublicKey, successionProof}`; the proof is signed by the
/// anchor key the verifier already knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnchor {
    pub public_key: AnchorPublicKey,
    pub succession_proof: SuccessionProof,
}

impl Encode for NewAnchor {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (&self.public_key, &self.succession_proof).encode_to(out)
    }
}

impl Decode for NewAnchor {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((public_key, succession_proof), rest) =
            <(AnchorPublicKey, SuccessionProof)>::decode_continuing(input)?;
        Ok((
            Self {
                public_key,
                succession_proof,
            },
            rest,
        ))
    }
}

/// `{newAgent, newAnchor?}`: what the active anchor and the new agent
/// both sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffContent {
    pub new_agent: NewAgent,
    pub new_anchor: Option<NewAnchor>,
}

impl Encode for HandoffContent {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (&self.new_agent, &self.new_anchor).encode_to(out)
    }
}

impl Decode for HandoffContent {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((new_agent, new_anchor), rest) =
            <(NewAgent, Option<NewAnchor>)>::decode_continuing(input)?;
        Ok((
            Self {
                new_agent,
                new_anchor,
            },
            rest,
        ))
    }
}

/// `{content, activeAnchorSignature, newAgentSignature}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffPackage {
    pub content: HandoffContent,
    pub active_anchor_signature: TypedSignature,
    pub new_agent_signature: TypedSignature,
}

impl Encode for HandoffPackage {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (
            &self.content,
            &self.active_anchor_signature,
            &self.new_agent_signature,
        )
            .encode_to(out)
    }
}

impl Decode for HandoffPackage {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((content, active_anchor_signature, new_agent_signature), rest) =
            <(HandoffContent, TypedSignature, TypedSignature)>::decode_continuing(input)?;
        Ok((
            Self {
                content,
                active_anchor_signature,
                new_agent_signature,
            },
            rest,
        ))
    }
}

/// A transmitted handoff: the retiring agent's signature over the
/// encoded package. The package is parsed only after that signature
/// verifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorHandoff(SignedPayload);

impl AnchorHandoff {
    pub fn retired_agent_signature(&self) -> &TypedSignature {
        self.0.signature()
    }

    /// The encoded, not yet authenticated, package.
    pub fn encoded_package(&self) -> &[u8] {
        self.0.payload()
    }
}

impl Encode for AnchorHandoff {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.0.encode_to(out)
    }
}

impl Decode for AnchorHandoff {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (payload, rest) = SignedPayload::decode_continuing(input)?;
        Ok((Self(payload), rest))
    }
}

/// The result of a fully verified handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedHandoff {
    pub anchor_rotated: bool,
    /// The peer as it should be known from now on.
    pub new_agent: KnownAgent,
    pub new_agent_update: AgentUpdate,
}

fn content_bytes(content: &HandoffContent) -> CodecResult<Vec<u8>> {
    signed_bytes(HANDOFF_CONTENT_DISCRIMINATOR, &[content])
}

fn retired_bytes(
    package: &[u8],
    binding: &TypedDigest,
    retiring_agent: &AgentPublicKey,
) -> CodecResult<Vec<u8>> {
    Ok(SignedBytes::new(HANDOFF_RETIRED_DISCRIMINATOR)?
        .opaque(package)?
        .part(binding)?
        .part(retiring_agent)?
        .finish())
}
