//! Reply: an agent answering a peer agent.
//!
//! Both signatures also cover the recipient's agent key, so a Reply
//! addressed to one agent cannot be presented to another.

use crate::codec::{CodecResult, Decode, Encode};
use crate::crypto::random::random_sequence;
use crate::keys::roles::AgentPublicKey;

use super::{Delegation, DelegationBody, DelegationType};

/// `{agentKey, sequence, timestamp}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    agent_key: AgentPublicKey,
    sequence: u32,
    /// Microseconds since the Unix epoch.
    timestamp: u64,
}

impl Reply {
    /// A reply stamped with the current time.
    pub fn new(agent_key: AgentPublicKey, sequence: u32) -> Self {
        Self::at(agent_key, sequence, crate::time::now_micros())
    }

    /// A reply starting a fresh conversation at a random sequence number.
    pub fn first(agent_key: AgentPublicKey) -> Self {
        Self::new(agent_key, random_sequence())
    }

    pub fn at(agent_key: AgentPublicKey, sequence: u32, timestamp: u64) -> Self {
        Self {
            agent_key,
            sequence,
            timestamp,
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn timestamp_rfc3339(&self) -> String {
        crate::time::micros_to_rfc3339(self.timestamp)
    }
}

impl Encode for Reply {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (&self.agent_key, &self.sequence, &self.timestamp).encode_to(out)
    }
}

impl Decode for Reply {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let ((agent_key, sequence, timestamp), rest) =
            <(AgentPublicKey, u32, u64)>::decode_continuing(input)?;
        Ok((Self::at(agent_key, sequence, timestamp), rest))
    }
}

impl DelegationBody for Reply {
    const KIND: DelegationType = DelegationType::Reply;
    /// The recipient's agent key.
    type Context = AgentPublicKey;

    fn agent_key(&self) -> &AgentPublicKey {
        &self.agent_key
    }
}

pub type ReplyDelegation = Delegation<Reply>;
