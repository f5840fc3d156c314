//! Welcome: introducing an agent into an established group session.
//!
//! Uses the `steady` discriminators. The body embeds the session-binding
//! digest supplied by the group transport.

use crate::codec::{CodecResult, Decode, Encode, OpaqueBytes};
use crate::crypto::digest::TypedDigest;
use crate::keys::roles::AgentPublicKey;

use super::{Delegation, DelegationBody, DelegationType};

/// `{agentKey, groupId, welcome, sessionBinding}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    agent_key: AgentPublicKey,
    group_id: OpaqueBytes,
    welcome: OpaqueBytes,
    session_binding: TypedDigest,
}

impl Welcome {
    pub fn new(
        agent_key: AgentPublicKey,
        group_id: OpaqueBytes,
        welcome: OpaqueBytes,
        session_binding: TypedDigest,
    ) -> Self {
        Self {
            agent_key,
            group_id,
            welcome,
            session_binding,
        }
    }

    pub fn group_id(&self) -> &OpaqueBytes {
        &self.group_id
    }

    /// The transport's welcome message, opaque here.
    pub fn welcome(&self) -> &OpaqueBytes {
        &self.welcome
    }

    pub fn session_binding(&self) -> &TypedDigest {
        &self.session_binding
    }
}

impl Encode for Welcome {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (
            &self.agent_key,
            &self.group_id,
            &self.welcome,
            &self.session_binding,
        )
            .encode_to(out)
    }
}

impl Decode for Welcome {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((agent_key, group_id, welcome, session_binding), rest) =
            <(AgentPublicKey, OpaqueBytes, OpaqueBytes, TypedDigest)>::decode_continuing(input)?;
        Ok((Self::new(agent_key, group_id, welcome, session_binding), rest))
    }
}

impl DelegationBody for Welcome {
    const KIND: DelegationType = DelegationType::Steady;
    /// The recipient's agent key.
    type Context = AgentPublicKey;

    fn agent_key(&self) -> &AgentPublicKey {
        &self.agent_key
    }
}

pub type WelcomeDelegation = Delegation<Welcome>;
