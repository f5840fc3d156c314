//! Edge cases for the linear codec at its boundaries, driven through the
//! public wire types.

use agentic_anchor::codec::array::MAX_ARRAY_LEN;
use agentic_anchor::codec::{Decode, Encode, OpaqueBytes};
use agentic_anchor::{
    AgentKeyPair, AgentPublicKey, CodecError, Destination, Hello, HelloDelegation, HelloPolicy,
    PrivateActiveAnchor, TypedDigest, TypedSignature,
};

#[test]
fn stress_integer_boundaries() {
    for v in 0u32..255 {
        let enc = v.encode().unwrap();
        assert_eq!(enc, vec![v as u8]);
        assert_eq!(u32::decode_final(&enc).unwrap(), v);
    }

    for v in [255u32, 256, 65_535, 65_536, u32::MAX - 1, u32::MAX] {
        let enc = v.encode().unwrap();
        assert_eq!(enc.len(), 5);
        assert_eq!(enc[0], 0xFF);
        assert_eq!(u32::decode_final(&enc).unwrap(), v);
    }

    let enc = (u64::from(u32::MAX) + 1).encode().unwrap();
    assert_eq!(enc.len(), 9);
    assert_eq!(u64::decode_final(&enc).unwrap(), u64::from(u32::MAX) + 1);
}

#[test]
fn stress_non_minimal_integers_rejected() {
    for v in 0u8..255 {
        let wire = [0xFF, 0, 0, 0, v];
        assert!(
            matches!(u32::decode_final(&wire), Err(CodecError::InvalidPrefix { .. })),
            "sentinel-wrapped {v} must be rejected"
        );
    }
    let wire = [0xFF, 0, 0, 0, 0, 0, 0, 0, 12];
    assert!(u64::decode_final(&wire).is_err());
}

#[test]
fn stress_opaque_length_boundaries() {
    for len in [0usize, 1, 253, 254, 255, 256, 4096] {
        let body = vec![0xA5u8; len];
        let enc = OpaqueBytes::new(body.clone()).encode().unwrap();
        let prefix = if len < 255 { 1 } else { 5 };
        assert_eq!(enc.len(), prefix + len, "length {len}");
        assert_eq!(OpaqueBytes::decode_final(&enc).unwrap().as_bytes(), &body[..]);
    }

    // Declared length larger than the remaining input.
    assert!(matches!(
        OpaqueBytes::decode_final(&[5, 1, 2]),
        Err(CodecError::UnexpectedEof { needed: 3 })
    ));
    // Non-minimal declared length.
    assert!(OpaqueBytes::decode_final(&[0xFF, 0, 0, 0, 1, 9]).is_err());
}

#[test]
fn stress_array_count_boundaries() {
    let items: Vec<u8> = vec![1; MAX_ARRAY_LEN];
    let enc = items.encode().unwrap();
    assert_eq!(enc[0] as usize, MAX_ARRAY_LEN);
    assert_eq!(Vec::<u8>::decode_final(&enc).unwrap(), items);

    let too_many: Vec<u8> = vec![1; MAX_ARRAY_LEN + 1];
    assert_eq!(
        too_many.encode().unwrap_err(),
        CodecError::ArrayTooLong(MAX_ARRAY_LEN + 1)
    );

    let mut reserved = vec![0xFFu8];
    reserved.extend(std::iter::repeat(1).take(255));
    assert!(matches!(
        Vec::<u8>::decode_final(&reserved),
        Err(CodecError::InvalidPrefix { .. })
    ));
}

#[test]
fn stress_trailing_bytes_on_every_wire_type() {
    let anchor = PrivateActiveAnchor::create(Destination::domain("codec.example").unwrap());
    let agent = AgentKeyPair::generate();
    let hello = HelloDelegation::issue(
        &anchor,
        &agent,
        Hello::new(agent.public_key().clone(), Vec::new(), HelloPolicy::Follows),
        &(),
    )
    .unwrap();

    let mut key = agent.public_key().encode().unwrap();
    key.push(0);
    assert_eq!(
        AgentPublicKey::decode_final(&key).unwrap_err(),
        CodecError::UnexpectedData { remaining: 1 }
    );

    let mut digest = TypedDigest::sha256(b"x").encode().unwrap();
    digest.extend_from_slice(&[1, 2]);
    assert_eq!(
        TypedDigest::decode_final(&digest).unwrap_err(),
        CodecError::UnexpectedData { remaining: 2 }
    );

    // The delegation's package runs to the end, so extra bytes land in
    // the signed payload and break the anchor signature instead.
    let mut wire = hello.encode().unwrap();
    wire.push(0);
    let padded = HelloDelegation::decode_final(&wire).unwrap();
    assert!(padded
        .verify(anchor.public_key(), anchor.destination(), &())
        .is_err());
}

#[test]
fn stress_truncated_defined_width() {
    let agent = AgentKeyPair::generate();
    let enc = agent.public_key().encode().unwrap();
    for cut in 1..enc.len() {
        let err = AgentPublicKey::decode_final(&enc[..enc.len() - cut]).unwrap_err();
        assert!(
            matches!(
                err,
                CodecError::IncorrectDataLength { .. } | CodecError::UnexpectedEof { .. }
            ),
            "cut {cut}: {err:?}"
        );
    }

    let sig = agent.sign(b"m").encode().unwrap();
    assert!(matches!(
        TypedSignature::decode_final(&sig[..40]),
        Err(CodecError::IncorrectDataLength { expected: 64, found: 39, .. })
    ));
}

#[test]
fn stress_absent_and_unknown_tags() {
    let mut absent = vec![0u8];
    absent.extend_from_slice(&[0x11; 32]);
    assert!(matches!(
        AgentPublicKey::decode_continuing(&absent),
        Err(CodecError::RequiredValueMissing(_))
    ));

    for tag in 2u8..=255 {
        let mut wire = vec![tag];
        wire.extend_from_slice(&[0x11; 64]);
        assert!(
            matches!(
                TypedDigest::decode_continuing(&wire),
                Err(CodecError::InvalidPrefix { .. })
            ),
            "tag {tag}"
        );
    }
}

#[test]
fn stress_empty_input_everywhere() {
    assert_eq!(u32::decode_final(&[]).unwrap_err(), CodecError::UnexpectedEof { needed: 1 });
    assert!(OpaqueBytes::decode_final(&[]).is_err());
    assert!(Vec::<u8>::decode_final(&[]).is_err());
    assert!(AgentPublicKey::decode_final(&[]).is_err());
    assert!(HelloDelegation::decode_final(&[]).is_err());
    assert!(Destination::decode_final(&[]).is_err());
}
