//! Stress test: long anchor succession chains.

use agentic_anchor::codec::{Decode, Encode};
use agentic_anchor::limits::MAX_SUCCESSION_DEPTH;
use agentic_anchor::{
    verify_succession, AgentKeyPair, Destination, Hello, HelloDelegation, HelloPolicy,
    IdentityError, PrivateActiveAnchor, SuccessionProof,
};

fn destination() -> Destination {
    Destination::domain("depth.example").unwrap()
}

#[test]
fn stress_32_rotations_verify_oldest_first() {
    let mut anchor = PrivateActiveAnchor::create(destination());
    let mut keys = vec![anchor.public_key().clone()];

    for _ in 0..32 {
        anchor = anchor.hand_off().expect("rotation should succeed");
        anchor.settle();
        keys.push(anchor.public_key().clone());
    }

    let preds = verify_succession(anchor.public_key(), anchor.succession())
        .expect("chain should verify");
    assert_eq!(preds.len(), 32);
    assert_eq!(preds, keys[..32].to_vec());
}

#[test]
fn stress_every_link_corruption_detected() {
    let mut anchor = PrivateActiveAnchor::create(destination());
    for _ in 0..8 {
        anchor = anchor.hand_off().unwrap();
        anchor.settle();
    }
    let proofs = anchor.succession().to_vec();

    for i in 0..proofs.len() {
        let mut enc = proofs[i].encode().unwrap();
        let last = enc.len() - 1;
        enc[last] ^= 0x40;
        let mut tampered = proofs.clone();
        tampered[i] = SuccessionProof::decode_final(&enc).unwrap();
        assert!(
            matches!(
                verify_succession(anchor.public_key(), &tampered),
                Err(IdentityError::AuthenticationFailed)
            ),
            "corrupted link {i} must fail the whole chain"
        );
    }
}

#[test]
fn stress_history_full_keeps_root_provable() {
    let mut anchor = PrivateActiveAnchor::create(destination());
    let root = anchor.public_key().clone();
    for _ in 0..MAX_SUCCESSION_DEPTH {
        anchor = anchor.hand_off().unwrap();
        anchor.settle();
    }
    assert_eq!(anchor.succession().len(), MAX_SUCCESSION_DEPTH);

    // Further rotations are refused rather than forgetting the root.
    let current = anchor.public_key().clone();
    for _ in 0..6 {
        let refused = anchor.hand_off().unwrap_err();
        assert!(matches!(
            refused.reason(),
            IdentityError::SuccessionLimit(MAX_SUCCESSION_DEPTH)
        ));
        anchor = refused.into_anchor();
    }
    assert_eq!(anchor.public_key(), &current);

    let preds = verify_succession(anchor.public_key(), anchor.succession()).unwrap();
    assert_eq!(preds.len(), MAX_SUCCESSION_DEPTH);
    assert_eq!(preds[0], root);

    // A peer still trusting the root can follow all the way.
    let agent = AgentKeyPair::generate();
    let hello = HelloDelegation::issue(
        &anchor,
        &agent,
        Hello::new(agent.public_key().clone(), vec![], HelloPolicy::Follows),
        &(),
    )
    .unwrap();
    assert!(hello.verify(&root, &destination(), &()).is_ok());
}

#[test]
fn stress_unsettled_rotation_never_chains() {
    let mut anchor = PrivateActiveAnchor::create(destination()).hand_off().unwrap();
    let pending = anchor.continuity().cloned().unwrap();
    for _ in 0..16 {
        let refused = anchor.hand_off().unwrap_err();
        assert!(matches!(refused.reason(), IdentityError::PendingContinuity));
        anchor = refused.into_anchor();
    }
    assert_eq!(anchor.continuity(), Some(&pending));
    assert_eq!(anchor.succession().len(), 1);
}

#[test]
fn stress_delegation_from_every_ancestor() {
    let mut anchor = PrivateActiveAnchor::create(destination());
    let mut keys = vec![anchor.public_key().clone()];
    for _ in 0..10 {
        anchor = anchor.hand_off().unwrap();
        anchor.settle();
        keys.push(anchor.public_key().clone());
    }

    let agent = AgentKeyPair::generate();
    let hello = HelloDelegation::issue(
        &anchor,
        &agent,
        Hello::new(agent.public_key().clone(), vec![], HelloPolicy::Closed),
        &(),
    )
    .unwrap();

    for (i, trusted) in keys.iter().enumerate() {
        let verified = hello
            .verify(trusted, &destination(), &())
            .unwrap_or_else(|e| panic!("ancestor {i} should be accepted: {e}"));
        assert_eq!(verified.succession.len(), 10);
    }
}
