//! Agent Handoff: move a conversation to a new device, rotating the anchor
//! along the way.
//!
//! Run with:
//!   cargo run --example agent_handoff -p agentic-anchor

use agentic_anchor::{
    AgentKeyPair, AgentUpdate, Destination, HandoffBuilder, KnownAgent, PrivateActiveAnchor,
    TypedDigest,
};

fn main() {
    let destination = Destination::did("did:web:bob.example").expect("valid DID");
    let anchor = PrivateActiveAnchor::create(destination);
    let old_device = AgentKeyPair::generate();

    // What the peer remembers about us.
    let known = KnownAgent {
        anchor: anchor.public_key().clone(),
        agent_key: old_device.public_key().clone(),
    };

    // ── 1. Rotate the anchor and enrol a new device ─────────────────────────
    let mut anchor = anchor.hand_off().expect("rotation should succeed");
    let new_device = AgentKeyPair::generate();

    // ── 2. Build the handoff, bound to the current session state ────────────
    //
    // Both sides derive the same binding digest from the session; a
    // handoff bound to one session state does not verify under another.
    let binding = TypedDigest::sha256(b"session epoch 7");
    let handoff = HandoffBuilder::new(&anchor, &old_device, &new_device)
        .update(AgentUpdate { is_app_clip: false })
        .require_anchor_rotation()
        .build(&binding)
        .expect("handoff should build");
    anchor.settle();

    // ── 3. The peer verifies and updates its view ───────────────────────────
    let result = handoff
        .verify(&known, &binding)
        .expect("handoff should verify");
    println!("Handoff verified");
    println!("  Anchor rotated: {}", result.anchor_rotated);
    println!("  Anchor:         {}", result.new_agent.anchor);
    println!("  Agent:          {}", result.new_agent.agent_key);

    let replayed = handoff.verify(&known, &TypedDigest::sha256(b"session epoch 8"));
    println!("  Under another binding: {}", if replayed.is_err() { "rejected" } else { "accepted" });
}
