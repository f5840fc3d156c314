//! Agent delegation: Hello, Reply and Welcome.
//!
//! Every flow introduces a new agent key under an anchor with two
//! signatures:
//!
//! 1. The new agent signs `agentDiscriminator ++ body ++ context`.
//! 2. The body and that inner signature form the package.
//! 3. The anchor signs `anchorDiscriminator ++ opaque(package) ++
//!    attestation ++ context`.
//!
//! Wire form: `anchorKey ++ [successionProof] ++ outerSignature ++
//! package`. Verification checks the outer signature before parsing the
//! package, then the inner signature against the agent key the package
//! carries, then the succession chain back to a key the verifier trusts.

pub mod hello;
pub mod reply;
pub mod welcome;

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::anchor::{verify_succession, Attestation, Destination, PrivateActiveAnchor, SuccessionProof};
use crate::codec::{CodecResult, Decode, Encode};
use crate::envelope::{SignedBytes, SignedPayload};
use crate::error::{IdentityError, Result};
use crate::keys::material::TypedSignature;
use crate::keys::roles::{AgentKeyPair, AgentPublicKey, AnchorPublicKey};
use crate::limits::{
    HELLO_AGENT_DISCRIMINATOR, HELLO_ANCHOR_DISCRIMINATOR, REPLY_AGENT_DISCRIMINATOR,
    REPLY_ANCHOR_DISCRIMINATOR, STEADY_AGENT_DISCRIMINATOR, STEADY_ANCHOR_DISCRIMINATOR,
};

pub use hello::{Hello, HelloDelegation, HelloPolicy};
pub use reply::{Reply, ReplyDelegation};
pub use welcome::{Welcome, WelcomeDelegation};

/// Which flow a delegation belongs to. Selects the discriminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelegationType {
    Hello,
    Reply,
    Steady,
}

impl DelegationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Reply => "reply",
            Self::Steady => "steady",
        }
    }

    /// Discriminator for the new agent's inner signature.
    pub fn agent_discriminator(&self) -> &'static str {
        match self {
            Self::Hello => HELLO_AGENT_DISCRIMINATOR,
            Self::Reply => REPLY_AGENT_DISCRIMINATOR,
            Self::Steady => STEADY_AGENT_DISCRIMINATOR,
        }
    }

    /// Discriminator for the anchor's outer signature.
    pub fn anchor_discriminator(&self) -> &'static str {
        match self {
            Self::Hello => HELLO_ANCHOR_DISCRIMINATOR,
            Self::Reply => REPLY_ANCHOR_DISCRIMINATOR,
            Self::Steady => STEADY_ANCHOR_DISCRIMINATOR,
        }
    }
}

/// The flow-specific content of a delegation.
pub trait DelegationBody: Encode + Decode {
    const KIND: DelegationType;

    /// Out-of-band context both signatures cover, such as the recipient's
    /// agent key. It is never transmitted.
    type Context: Encode + ?Sized;

    /// The agent key being introduced.
    fn agent_key(&self) -> &AgentPublicKey;
}

/// A peer as a verifier knows it: an anchor and its current agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownAgent {
    pub anchor: AnchorPublicKey,
    pub agent_key: AgentPublicKey,
}

/// A delegation whose signatures and succession chain checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedDelegation<B> {
    /// The anchor key that signed, possibly newer than the trusted one.
    pub anchor: AnchorPublicKey,
    pub agent: AgentPublicKey,
    pub body: B,
    /// Earlier anchor keys, oldest first.
    pub succession: Vec<AnchorPublicKey>,
}

impl<B> VerifiedDelegation<B> {
    pub fn known_agent(&self) -> KnownAgent {
        KnownAgent {
            anchor: self.anchor.clone(),
            agent_key: self.agent.clone(),
        }
    }
}

/// An anchor-signed introduction of an agent key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation<B> {
    anchor_key: AnchorPublicKey,
    succession: Vec<SuccessionProof>,
    signed: SignedPayload,
    _body: PhantomData<fn() -> B>,
}

impl<B: DelegationBody> Delegation<B> {
    /// Sign `body` with the new agent and then with the anchor.
    ///
    /// `body` must carry `agent`'s public key.
    pub fn issue(
        anchor: &PrivateActiveAnchor,
        agent: &AgentKeyPair,
        body: B,
        context: &B::Context,
    ) -> Result<Self> {
        if body.agent_key() != agent.public_key() {
            return Err(IdentityError::KeyMismatch("delegated agent"));
        }

        let inner_signature = agent.sign(&inner_bytes(&body, context)?);
        let package = (&body, &inner_signature).encode()?;
        let outer_signature = anchor.sign(&outer_bytes::<B>(&package, anchor.attestation(), context)?);

        Ok(Self {
            anchor_key: anchor.public_key().clone(),
            succession: anchor.succession().to_vec(),
            signed: SignedPayload::new(outer_signature, package),
            _body: PhantomData,
        })
    }

    /// Verify for a peer who trusts `trusted` as an anchor for
    /// `destination`.
    ///
    /// `trusted` may be the signing anchor key itself or any key the
    /// carried succession chain links it back to.
    pub fn verify(
        &self,
        trusted: &AnchorPublicKey,
        destination: &Destination,
        context: &B::Context,
    ) -> Result<VerifiedDelegation<B>> {
        // 1. Outer signature, before touching the package
        let attestation = Attestation::new(self.anchor_key.clone(), destination.clone());
        let outer = outer_bytes::<B>(self.signed.payload(), &attestation, context)?;
        if let Err(e) = self.anchor_key.verify(self.signed.signature(), &outer) {
            log::debug!("{} delegation: anchor signature rejected", B::KIND.as_str());
            return Err(e);
        }

        // 2. Package
        let (body, inner_signature) = <(B, TypedSignature)>::decode_final(self.signed.payload())?;

        // 3. Inner signature by the introduced agent
        if let Err(e) = body.agent_key().verify(&inner_signature, &inner_bytes(&body, context)?) {
            log::debug!("{} delegation: agent signature rejected", B::KIND.as_str());
            return Err(e);
        }

        // 4. Succession back to the trusted key
        let succession = verify_succession(&self.anchor_key, &self.succession)?;
        if trusted != &self.anchor_key && !succession.contains(trusted) {
            log::debug!(
                "{} delegation: {} is not linked to trusted {}",
                B::KIND.as_str(),
                self.anchor_key,
                trusted
            );
            return Err(IdentityError::AuthenticationFailed);
        }

        Ok(VerifiedDelegation {
            anchor: self.anchor_key.clone(),
            agent: body.agent_key().clone(),
            body,
            succession,
        })
    }

    /// The anchor key that claims to have signed.
    pub fn anchor_key(&self) -> &AnchorPublicKey {
        &self.anchor_key
    }

    pub fn succession(&self) -> &[SuccessionProof] {
        &self.succession
    }
}

fn inner_bytes<B: DelegationBody>(body: &B, context: &B::Context) -> CodecResult<Vec<u8>> {
    Ok(SignedBytes::new(B::KIND.agent_discriminator())?
        .part(body)?
        .part(context)?
        .finish())
}

fn outer_bytes<B: DelegationBody>(
    package: &[u8],
    attestation: &Attestation,
    context: &B::Context,
) -> CodecResult<Vec<u8>> {
    Ok(SignedBytes::new(B::KIND.anchor_discriminator())?
        .opaque(package)?
        .part(attestation)?
        .part(context)?
        .finish())
}

impl<B> Encode for Delegation<B> {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.anchor_key.encode_to(out)?;
        self.succession.encode_to(out)?;
        self.signed.encode_to(out)
    }
}

impl<B> Decode for Delegation<B> {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (anchor_key, rest) = AnchorPublicKey::decode_continuing(input)?;
        let (succession, rest) = Vec::<SuccessionProof>::decode_continuing(rest)?;
        let (signed, rest) = SignedPayload::decode_continuing(rest)?;
        Ok((
            Self {
                anchor_key,
                succession,
                signed,
                _body: PhantomData,
            },
            rest,
        ))
    }
}
