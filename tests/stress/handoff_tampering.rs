//! Stress test: every single-bit change to a handoff is rejected whole.

use agentic_anchor::codec::{Decode, Encode};
use agentic_anchor::crypto::TypedDigest;
use agentic_anchor::{
    AgentKeyPair, AgentUpdate, AnchorHandoff, Destination, HandoffBuilder, IdentityError,
    KnownAgent, PrivateActiveAnchor,
};

const SIG_WIRE_LEN: usize = 65;

struct Scenario {
    wire: Vec<u8>,
    known: KnownAgent,
    binding: TypedDigest,
}

fn scenario(rotate: bool) -> Scenario {
    let anchor = PrivateActiveAnchor::create(Destination::domain("tamper.example").unwrap());
    let retiring = AgentKeyPair::generate();
    let known = KnownAgent {
        anchor: anchor.public_key().clone(),
        agent_key: retiring.public_key().clone(),
    };
    let anchor = if rotate {
        anchor.hand_off().unwrap()
    } else {
        anchor
    };
    let new_agent = AgentKeyPair::generate();
    let binding = TypedDigest::sha256(b"update event 42");
    let handoff = HandoffBuilder::new(&anchor, &retiring, &new_agent)
        .update(AgentUpdate { is_app_clip: false })
        .build(&binding)
        .unwrap();
    Scenario {
        wire: handoff.encode().unwrap(),
        known,
        binding,
    }
}

/// Flip `bit` of `wire[index]` and report whether the handoff was rejected.
fn rejected_after_flip(s: &Scenario, index: usize, bit: u8) -> bool {
    let mut wire = s.wire.clone();
    wire[index] ^= 1 << bit;
    match AnchorHandoff::decode_final(&wire) {
        Err(_) => true,
        Ok(handoff) => matches!(
            handoff.verify(&s.known, &s.binding),
            Err(IdentityError::AuthenticationFailed)
        ),
    }
}

#[test]
fn stress_untampered_scenarios_verify() {
    for rotate in [false, true] {
        let s = scenario(rotate);
        let handoff = AnchorHandoff::decode_final(&s.wire).unwrap();
        let verified = handoff.verify(&s.known, &s.binding).unwrap();
        assert_eq!(verified.anchor_rotated, rotate);
    }
}

#[test]
fn stress_flip_every_signature_bit() {
    let s = scenario(true);
    let len = s.wire.len();
    let regions = [
        ("retired agent", 0..SIG_WIRE_LEN),
        ("active anchor", len - 2 * SIG_WIRE_LEN..len - SIG_WIRE_LEN),
        ("new agent", len - SIG_WIRE_LEN..len),
    ];

    for (name, range) in regions {
        for index in range {
            for bit in 0..8 {
                assert!(
                    rejected_after_flip(&s, index, bit),
                    "{name} signature byte {index} bit {bit} was accepted"
                );
            }
        }
    }
}

#[test]
fn stress_flip_every_content_byte() {
    for rotate in [false, true] {
        let s = scenario(rotate);
        let len = s.wire.len();
        for index in SIG_WIRE_LEN..len - 2 * SIG_WIRE_LEN {
            assert!(
                rejected_after_flip(&s, index, (index % 8) as u8),
                "content byte {index} change was accepted (rotate={rotate})"
            );
        }
    }
}

#[test]
fn stress_other_bindings_rejected() {
    let s = scenario(true);
    let handoff = AnchorHandoff::decode_final(&s.wire).unwrap();
    for i in 0..200u32 {
        let other = TypedDigest::sha256(format!("other event {i}").as_bytes());
        assert!(
            handoff.verify(&s.known, &other).is_err(),
            "binding {i} should not verify"
        );
    }
}

#[test]
fn stress_truncation_and_extension_rejected() {
    let s = scenario(false);
    for cut in 1..s.wire.len() {
        let truncated = &s.wire[..s.wire.len() - cut];
        let ok = AnchorHandoff::decode_final(truncated)
            .map(|h| h.verify(&s.known, &s.binding).is_ok())
            .unwrap_or(false);
        assert!(!ok, "truncation by {cut} was accepted");
    }

    let mut extended = s.wire.clone();
    extended.push(0);
    let handoff = AnchorHandoff::decode_final(&extended).unwrap();
    assert!(handoff.verify(&s.known, &s.binding).is_err());
}
