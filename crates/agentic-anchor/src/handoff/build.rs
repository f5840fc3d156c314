//! Building a handoff.

use crate::anchor::PrivateActiveAnchor;
use crate::codec::Encode;
use crate::crypto::digest::TypedDigest;
use crate::envelope::SignedPayload;
use crate::error::{IdentityError, Result};
use crate::keys::roles::AgentKeyPair;

use super::{
    content_bytes, retired_bytes, AgentUpdate, AnchorHandoff, HandoffContent, HandoffPackage,
    NewAgent, NewAnchor,
};

/// Builder for an [`AnchorHandoff`].
///
/// The anchor is rotated in the handoff exactly when the active anchor
/// still carries continuity from a [`hand_off`](PrivateActiveAnchor::hand_off).
pub struct HandoffBuilder<'a> {
    active_anchor: &'a PrivateActiveAnchor,
    retiring_agent: &'a AgentKeyPair,
    new_agent: &'a AgentKeyPair,
    update: AgentUpdate,
    require_rotation: bool,
}

impl<'a> HandoffBuilder<'a> {
    pub fn new(
        active_anchor: &'a PrivateActiveAnchor,
        retiring_agent: &'a AgentKeyPair,
        new_agent: &'a AgentKeyPair,
    ) -> Self {
        Self {
            active_anchor,
            retiring_agent,
            new_agent,
            update: AgentUpdate::default(),
            require_rotation: false,
        }
    }

    pub fn update(mut self, update: AgentUpdate) -> Self {
        self.update = update;
        self
    }

    /// Fail with `MissingContinuity` unless the anchor rotation goes out
    /// with this handoff.
    pub fn require_anchor_rotation(mut self) -> Self {
        self.require_rotation = true;
        self
    }

    /// Sign the handoff, bound to the transport's `binding` digest.
    pub fn build(self, binding: &TypedDigest) -> Result<AnchorHandoff> {
        if self.new_agent.public_key() == self.retiring_agent.public_key() {
            return Err(IdentityError::KeyMismatch("new agent equals retiring agent"));
        }

        // 1. New agent, and the new anchor if one is pending
        let new_agent = NewAgent {
            public_key: self.new_agent.public_key().clone(),
            update: self.update,
        };
        let new_anchor = match self.active_anchor.continuity() {
            Some(continuity) => Some(NewAnchor {
                public_key: self.active_anchor.public_key().clone(),
                succession_proof: continuity.proof().clone(),
            }),
            None if self.require_rotation => return Err(IdentityError::MissingContinuity),
            None => None,
        };

        // 2. Content
        let content = HandoffContent {
            new_agent,
            new_anchor,
        };
        let signed = content_bytes(&content)?;

        // 3. Active anchor signs the content
        let active_anchor_signature = self.active_anchor.sign(&signed);

        // 4. New agent signs the same content
        let new_agent_signature = self.new_agent.sign(&signed);

        // 5. Package
        let package = HandoffPackage {
            content,
            active_anchor_signature,
            new_agent_signature,
        }
        .encode()?;

        // 6. Retiring agent binds the package to the session
        let retired = retired_bytes(&package, binding, self.retiring_agent.public_key())?;
        let retired_agent_signature = self.retiring_agent.sign(&retired);

        // 7. Transmit
        Ok(AnchorHandoff(SignedPayload::new(retired_agent_signature, package)))
    }
}
