//! Basic Anchor: create an anchor, publish its attestation, introduce an
//! agent with a Hello and rotate the anchor key.
//!
//! Run with:
//!   cargo run --example basic_anchor -p agentic-anchor

use agentic_anchor::codec::{Decode, Encode, OpaqueBytes};
use agentic_anchor::{
    AgentKeyPair, Destination, Hello, HelloDelegation, HelloPolicy, PrivateActiveAnchor,
    SignedAttestation,
};

fn main() {
    // ── 1. Create an anchor for a domain ────────────────────────────────────
    //
    // The anchor key is long-lived and attests the destination. It never
    // signs messages itself; it vouches for short-lived agent keys.
    let destination = Destination::domain("alice.example").expect("valid domain");
    let anchor = PrivateActiveAnchor::create(destination.clone());

    println!("Anchor created");
    println!("  ID:          {}", anchor.id().expect("anchor id"));
    println!("  Public key:  {}", anchor.public_key());
    println!("  Destination: {}", anchor.destination());
    println!();

    // ── 2. Publish the self-signed attestation ──────────────────────────────
    //
    // A name resolver serves these bytes; peers check them against the
    // destination they looked up.
    let published = anchor
        .signed_attestation()
        .expect("attestation should sign")
        .encode()
        .expect("attestation should encode");
    let fetched = SignedAttestation::decode_final(&published).expect("attestation should parse");
    let trusted = fetched
        .verify_for(&destination)
        .expect("attestation should verify")
        .clone();
    println!("Attestation: {} bytes, verified for {destination}", published.len());
    println!();

    // ── 3. Introduce an agent with a Hello ──────────────────────────────────
    let agent = AgentKeyPair::generate();
    let hello = HelloDelegation::issue(
        &anchor,
        &agent,
        Hello::new(
            agent.public_key().clone(),
            vec![OpaqueBytes::new(b"key package".to_vec())],
            HelloPolicy::Follows,
        ),
        &(),
    )
    .expect("Hello should sign");

    let verified = hello
        .verify(&trusted, &destination, &())
        .expect("Hello should verify");
    println!("Hello verified");
    println!("  Agent:   {}", verified.agent);
    println!("  Policy:  {:?}", verified.body.policy());
    println!();

    // ── 4. Rotate the anchor ────────────────────────────────────────────────
    //
    // The old anchor is consumed. Its successor carries a succession proof
    // so peers that trust the old key can follow.
    let rotated = anchor.hand_off().expect("rotation should succeed");
    let agent2 = AgentKeyPair::generate();
    let hello2 = HelloDelegation::issue(
        &rotated,
        &agent2,
        Hello::new(agent2.public_key().clone(), Vec::new(), HelloPolicy::Closed),
        &(),
    )
    .expect("Hello should sign");

    let verified2 = hello2
        .verify(&trusted, &destination, &())
        .expect("Hello from the rotated anchor should verify");
    println!("Rotated anchor");
    println!("  New key:     {}", verified2.anchor);
    println!("  Predecessor: {}", verified2.succession[0]);
}
