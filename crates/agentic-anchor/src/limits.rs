//! Protocol constants.
//!
//! Every signature the protocol produces is prefixed with one of the
//! discriminators below, so a signature made for one flow or layer never
//! verifies as another.

/// Longest succession chain a verifier will walk, and the most proofs an
/// active anchor carries forward.
pub const MAX_SUCCESSION_DEPTH: usize = 64;

/// Common prefix of every discriminator.
pub const DISCRIMINATOR_PREFIX: &str = "agentic-anchor/v1";

pub const ATTESTATION_DISCRIMINATOR: &str = "agentic-anchor/v1/attestation";
pub const SUCCESSION_DISCRIMINATOR: &str = "agentic-anchor/v1/succession";

pub const HELLO_AGENT_DISCRIMINATOR: &str = "agentic-anchor/v1/hello/agent";
pub const HELLO_ANCHOR_DISCRIMINATOR: &str = "agentic-anchor/v1/hello/anchor";
pub const REPLY_AGENT_DISCRIMINATOR: &str = "agentic-anchor/v1/reply/agent";
pub const REPLY_ANCHOR_DISCRIMINATOR: &str = "agentic-anchor/v1/reply/anchor";
pub const STEADY_AGENT_DISCRIMINATOR: &str = "agentic-anchor/v1/steady/agent";
pub const STEADY_ANCHOR_DISCRIMINATOR: &str = "agentic-anchor/v1/steady/anchor";

pub const HANDOFF_CONTENT_DISCRIMINATOR: &str = "agentic-anchor/v1/handoff/content";
pub const HANDOFF_RETIRED_DISCRIMINATOR: &str = "agentic-anchor/v1/handoff/retired";
