//! Verifying a handoff.
//!
//! Every check must pass; any failure rejects the whole handoff with
//! `AuthenticationFailed` and yields nothing.

use crate::anchor::verify_succession;
use crate::codec::Decode;
use crate::crypto::digest::TypedDigest;
use crate::error::{IdentityError, Result};

use super::{content_bytes, retired_bytes, AnchorHandoff, HandoffPackage, KnownAgent, VerifiedHandoff};

impl AnchorHandoff {
    /// Verify for a holder of `known`, against the caller's own view of the
    /// session `binding`.
    pub fn verify(&self, known: &KnownAgent, binding: &TypedDigest) -> Result<VerifiedHandoff> {
        self.verify_steps(known, binding).map_err(|e| {
            log::debug!("handoff from {} rejected: {e}", known.agent_key);
            IdentityError::AuthenticationFailed
        })
    }

    fn verify_steps(&self, known: &KnownAgent, binding: &TypedDigest) -> Result<VerifiedHandoff> {
        // a. Retiring agent over the package and our binding, before parsing
        let retired = retired_bytes(self.encoded_package(), binding, &known.agent_key)?;
        known
            .agent_key
            .verify(self.retired_agent_signature(), &retired)?;

        let package = HandoffPackage::decode_final(self.encoded_package())?;
        let content = &package.content;

        // b. Follow the anchor rotation, if any, from the known anchor
        let active_anchor = match &content.new_anchor {
            Some(new_anchor) => {
                let predecessors = verify_succession(
                    &new_anchor.public_key,
                    std::slice::from_ref(&new_anchor.succession_proof),
                )?;
                if predecessors.first() != Some(&known.anchor) {
                    return Err(IdentityError::KeyMismatch("succession predecessor"));
                }
                &new_anchor.public_key
            }
            None => &known.anchor,
        };

        let signed = content_bytes(content)?;

        // c. Active anchor over the content
        active_anchor.verify(&package.active_anchor_signature, &signed)?;

        // d. New agent over the same content
        content
            .new_agent
            .public_key
            .verify(&package.new_agent_signature, &signed)?;

        // e. All checks passed
        Ok(VerifiedHandoff {
            anchor_rotated: content.new_anchor.is_some(),
            new_agent: KnownAgent {
                anchor: active_anchor.clone(),
                agent_key: content.new_agent.public_key.clone(),
            },
            new_agent_update: content.new_agent.update,
        })
    }
}
