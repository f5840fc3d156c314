//! Hello: an unsolicited introduction to a peer.

use serde::{Deserialize, Serialize};

use crate::codec::enumeration::impl_enum_codec;
use crate::codec::{CodecResult, Decode, Discriminant, Encode, OpaqueBytes};
use crate::keys::roles::AgentPublicKey;

use super::{Delegation, DelegationBody, DelegationType};

/// How the anchor treats unsolicited Hellos. Advertised, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelloPolicy {
    /// Only peers the anchor already follows may start a conversation.
    Closed,
    /// Anyone may send a Hello.
    Follows,
}

impl Discriminant for HelloPolicy {
    const TYPE_NAME: &'static str = "hello policy";

    fn discriminant(&self) -> u8 {
        match self {
            Self::Closed => 1,
            Self::Follows => 2,
        }
    }

    fn from_discriminant(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Closed),
            2 => Some(Self::Follows),
            _ => None,
        }
    }
}

impl_enum_codec!(HelloPolicy);

/// `{agentKey, keyPackages, policy}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hello {
    agent_key: AgentPublicKey,
    key_packages: Vec<OpaqueBytes>,
    policy: HelloPolicy,
}

impl Hello {
    pub fn new(agent_key: AgentPublicKey, key_packages: Vec<OpaqueBytes>, policy: HelloPolicy) -> Self {
        Self {
            agent_key,
            key_packages,
            policy,
        }
    }

    /// Group-messaging key packages the recipient may use to add the agent.
    pub fn key_packages(&self) -> &[OpaqueBytes] {
        &self.key_packages
    }

    pub fn policy(&self) -> HelloPolicy {
        self.policy
    }
}

impl Encode for Hello {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (&self.agent_key, &self.key_packages, &self.policy).encode_to(out)
    }
}

impl Decode for Hello {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((agent_key, key_packages, policy), rest) =
            <(AgentPublicKey, Vec<OpaqueBytes>, HelloPolicy)>::decode_continuing(input)?;
        Ok((Self::new(agent_key, key_packages, policy), rest))
    }
}

impl DelegationBody for Hello {
    const KIND: DelegationType = DelegationType::Hello;
    type Context = ();

    fn agent_key(&self) -> &AgentPublicKey {
        &self.agent_key
    }
}

pub type HelloDelegation = Delegation<Hello>;
