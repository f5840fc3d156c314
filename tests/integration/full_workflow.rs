//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Create an anchor for a destination
//! 2. Introduce a first agent with a Hello
//! 3. Verify the Hello as a peer
//! 4. Rotate the anchor
//! 5. Hand off to a new agent, bound to a session digest
//! 6. Verify the handoff, and reject it under another digest
//! 7. Continue the conversation with a Reply from the new agent

use agentic_anchor::codec::{Decode, Encode, OpaqueBytes};
use agentic_anchor::crypto::TypedDigest;
use agentic_anchor::{
    AgentKeyPair, AgentUpdate, AnchorHandoff, Destination, HandoffBuilder, Hello,
    HelloDelegation, HelloPolicy, IdentityError, KnownAgent, PrivateActiveAnchor, Reply,
    ReplyDelegation,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn full_workflow_hello_to_handoff() {
    init_logging();

    // ── Step 1: Create anchor A for destination D ───────────────────────
    let destination = Destination::domain("alice.example").expect("valid domain");
    let anchor = PrivateActiveAnchor::create(destination.clone());
    let a_key = anchor.public_key().clone();
    assert!(anchor.id().unwrap().0.starts_with("anc_"));

    // ── Step 2: A issues a Hello introducing agent G1 ───────────────────
    let g1 = AgentKeyPair::generate();
    let body = Hello::new(
        g1.public_key().clone(),
        vec![OpaqueBytes::new(b"pkg".to_vec())],
        HelloPolicy::Closed,
    );
    let hello = HelloDelegation::issue(&anchor, &g1, body, &()).expect("Hello should sign");
    let hello_wire = hello.encode().unwrap();

    // ── Step 3: A verifier holding A and D accepts the Hello ────────────
    let received = HelloDelegation::decode_final(&hello_wire).expect("Hello should parse");
    let verified = received
        .verify(&a_key, &destination, &())
        .expect("Hello should verify");
    assert_eq!(&verified.agent, g1.public_key());
    assert!(verified.succession.is_empty());
    assert_eq!(verified.body.key_packages()[0].as_bytes(), b"pkg");
    assert_eq!(verified.body.policy(), HelloPolicy::Closed);

    let known = verified.known_agent();
    assert_eq!(known.anchor, a_key);

    // ── Step 4: A hands off to A2 ───────────────────────────────────────
    let a2 = anchor.hand_off().expect("rotation should succeed");
    let continuity = a2.continuity().expect("A2 should carry continuity");
    assert_eq!(continuity.previous_anchor(), &a_key);

    // ── Step 5: A2 and G1 build a Handoff introducing G2 ────────────────
    let g2 = AgentKeyPair::generate();
    let d1 = TypedDigest::sha256(b"session commit d1");
    let handoff = HandoffBuilder::new(&a2, &g1, &g2)
        .update(AgentUpdate { is_app_clip: false })
        .require_anchor_rotation()
        .build(&d1)
        .expect("handoff should build");
    let handoff_wire = handoff.encode().unwrap();

    // ── Step 6: The verifier follows the rotation under d1 only ─────────
    let received = AnchorHandoff::decode_final(&handoff_wire).expect("handoff should parse");
    let result = received.verify(&known, &d1).expect("handoff should verify");
    assert!(result.anchor_rotated);
    assert_eq!(&result.new_agent.anchor, a2.public_key());
    assert_eq!(&result.new_agent.agent_key, g2.public_key());
    assert!(!result.new_agent_update.is_app_clip);

    let d2 = TypedDigest::sha256(b"session commit d2");
    assert!(matches!(
        received.verify(&known, &d2),
        Err(IdentityError::AuthenticationFailed)
    ));

    // ── Step 7: G2 replies under A2; the peer still trusts only A ───────
    let mut a2 = a2;
    a2.settle();
    let peer_agent = AgentKeyPair::generate();
    let reply = ReplyDelegation::issue(
        &a2,
        &g2,
        Reply::first(g2.public_key().clone()),
        peer_agent.public_key(),
    )
    .expect("Reply should sign");

    let verified = reply
        .verify(&a_key, &destination, peer_agent.public_key())
        .expect("Reply should verify through succession");
    assert_eq!(&verified.anchor, a2.public_key());
    assert_eq!(verified.succession, vec![a_key.clone()]);
    assert_eq!(
        verified.known_agent(),
        KnownAgent {
            anchor: a2.public_key().clone(),
            agent_key: g2.public_key().clone(),
        }
    );
}

#[test]
fn full_workflow_agent_only_handoff_then_archive() {
    init_logging();

    let destination = Destination::did("did:web:bob.example").unwrap();
    let anchor = PrivateActiveAnchor::create(destination.clone());
    let g1 = AgentKeyPair::generate();
    let known = KnownAgent {
        anchor: anchor.public_key().clone(),
        agent_key: g1.public_key().clone(),
    };

    // Persist and restore the anchor before using it again.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anchor.json");
    let params = agentic_anchor::KdfParams::insecure_fast();
    anchor
        .protect("hunter2", &params)
        .unwrap()
        .write_to(&path)
        .unwrap();
    drop(anchor);

    let stored = agentic_anchor::ProtectedArchive::read_from(&path).unwrap();
    let anchor = PrivateActiveAnchor::unlock(&stored, "hunter2").expect("unlock");
    assert_eq!(anchor.public_key(), &known.anchor);

    // Agent-only handoff: the anchor has no continuity.
    let g2 = AgentKeyPair::generate();
    let binding = TypedDigest::sha256(b"epoch 2");
    let handoff = HandoffBuilder::new(&anchor, &g1, &g2)
        .update(AgentUpdate { is_app_clip: true })
        .build(&binding)
        .unwrap();
    let result = handoff.verify(&known, &binding).unwrap();
    assert!(!result.anchor_rotated);
    assert_eq!(result.new_agent.anchor, known.anchor);
    assert!(result.new_agent_update.is_app_clip);

    // Handing off again from the new state chains naturally.
    let g3 = AgentKeyPair::generate();
    let binding2 = TypedDigest::sha256(b"epoch 3");
    let handoff2 = HandoffBuilder::new(&anchor, &g2, &g3).build(&binding2).unwrap();
    let result2 = handoff2.verify(&result.new_agent, &binding2).unwrap();
    assert_eq!(&result2.new_agent.agent_key, g3.public_key());

    // The old agent can no longer hand off for the peer's current view.
    let rogue = AgentKeyPair::generate();
    let stale = HandoffBuilder::new(&anchor, &g1, &rogue).build(&binding2).unwrap();
    assert!(stale.verify(&result2.new_agent, &binding2).is_err());
}
