//! Stress test: independent anchors and agents used from many threads.

use std::sync::Arc;
use std::thread;

use agentic_anchor::crypto::TypedDigest;
use agentic_anchor::{
    AgentKeyPair, Destination, HandoffBuilder, Hello, HelloDelegation, HelloPolicy, KnownAgent,
    PrivateActiveAnchor,
};

#[test]
fn stress_shared_anchor_many_threads() {
    let destination = Destination::domain("threads.example").unwrap();
    let anchor = Arc::new(PrivateActiveAnchor::create(destination.clone()));
    let trusted = anchor.public_key().clone();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let anchor = Arc::clone(&anchor);
            let destination = destination.clone();
            let trusted = trusted.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    let agent = AgentKeyPair::generate();
                    let hello = HelloDelegation::issue(
                        &anchor,
                        &agent,
                        Hello::new(agent.public_key().clone(), vec![], HelloPolicy::Follows),
                        &(),
                    )
                    .expect("signing should succeed");
                    let verified = hello
                        .verify(&trusted, &destination, &())
                        .expect("verification should succeed");
                    assert_eq!(&verified.agent, agent.public_key());
                }
            })
        })
        .collect();

    for h in handles {
        h.join().expect("thread should not panic");
    }
}

#[test]
fn stress_parallel_handoffs_independent_sessions() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let destination = Destination::domain(&format!("peer{i}.example")).unwrap();
                let anchor = PrivateActiveAnchor::create(destination).hand_off().unwrap();
                let retiring = AgentKeyPair::generate();
                let known = KnownAgent {
                    anchor: anchor.continuity().unwrap().previous_anchor().clone(),
                    agent_key: retiring.public_key().clone(),
                };
                let new_agent = AgentKeyPair::generate();
                let binding = TypedDigest::sha256(format!("session {i}").as_bytes());
                let handoff = HandoffBuilder::new(&anchor, &retiring, &new_agent)
                    .build(&binding)
                    .unwrap();
                let verified = handoff.verify(&known, &binding).unwrap();
                assert!(verified.anchor_rotated);
                (binding, handoff, known)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // A handoff never verifies under another session's binding.
    for (i, (_, handoff, known)) in results.iter().enumerate() {
        for (j, (binding, _, _)) in results.iter().enumerate() {
            let outcome = handoff.verify(known, binding);
            assert_eq!(outcome.is_ok(), i == j, "handoff {i} under binding {j}");
        }
    }
}
