//! Property-based tests for the wire codec and signing layers.
//!
//! These tests check invariants over arbitrary inputs:
//!
//! - Every integer has exactly one encoding, and it decodes back
//! - Continuing decodes hand back exactly the bytes that follow
//! - Arbitrary input never panics a decoder
//! - Signatures fail under any single-bit change to the message

use proptest::prelude::*;

use crate::anchor::{Destination, PrivateActiveAnchor};
use crate::codec::{Decode, Encode, OpaqueBytes};
use crate::crypto::TypedDigest;
use crate::delegation::{Hello, HelloDelegation, HelloPolicy};
use crate::handoff::AnchorHandoff;
use crate::keys::{AgentKeyPair, AgentPublicKey};

// ==================== Integer Property Tests ====================

proptest! {
    /// u32 values survive an encode/decode pass and use the short form
    /// exactly when below 255.
    #[test]
    fn u32_canonical_width(value in any::<u32>()) {
        let enc = value.encode().unwrap();
        prop_assert_eq!(enc.len(), if value < 255 { 1 } else { 5 });
        prop_assert_eq!(u32::decode_final(&enc).unwrap(), value);
    }

    /// u64 values take 1 or 9 bytes.
    #[test]
    fn u64_canonical_width(value in any::<u64>()) {
        let enc = value.encode().unwrap();
        prop_assert_eq!(enc.len(), if value < 255 { 1 } else { 9 });
        prop_assert_eq!(u64::decode_final(&enc).unwrap(), value);
    }

    /// Only one byte string decodes to a given u32.
    #[test]
    fn u32_decode_is_injective(bytes in prop::collection::vec(any::<u8>(), 1..6)) {
        if let Ok(value) = u32::decode_final(&bytes) {
            prop_assert_eq!(value.encode().unwrap(), bytes);
        }
    }
}

// ==================== Continuing Decode Property Tests ====================

proptest! {
    /// A continuing decode returns the suffix untouched.
    #[test]
    fn opaque_continuing_returns_suffix(
        body in prop::collection::vec(any::<u8>(), 0..600),
        suffix in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut wire = OpaqueBytes::new(body.clone()).encode().unwrap();
        wire.extend_from_slice(&suffix);
        let (decoded, rest) = OpaqueBytes::decode_continuing(&wire).unwrap();
        prop_assert_eq!(decoded.as_bytes(), &body[..]);
        prop_assert_eq!(rest, &suffix[..]);
    }

    /// Product encodings are field concatenations.
    #[test]
    fn triple_is_concatenation(a in any::<u32>(), b in ".{0,40}", c in any::<bool>()) {
        let whole = (a, b.clone(), c).encode().unwrap();
        let mut parts = a.encode().unwrap();
        parts.extend(b.encode().unwrap());
        parts.extend(c.encode().unwrap());
        prop_assert_eq!(&whole, &parts);
        prop_assert_eq!(<(u32, String, bool)>::decode_final(&whole).unwrap(), (a, b, c));
    }

    /// Final decodes count every trailing byte.
    #[test]
    fn final_rejects_trailing(value in any::<u16>(), extra in 1usize..16) {
        let mut wire = value.encode().unwrap();
        wire.extend(std::iter::repeat(0).take(extra));
        prop_assert_eq!(
            u16::decode_final(&wire).unwrap_err(),
            crate::error::CodecError::UnexpectedData { remaining: extra }
        );
    }
}

// ==================== Robustness Property Tests ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Decoders return errors rather than panicking on garbage.
    #[test]
    fn decoders_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = AgentPublicKey::decode_final(&bytes);
        let _ = TypedDigest::decode_final(&bytes);
        let _ = Destination::decode_final(&bytes);
        let _ = Vec::<OpaqueBytes>::decode_final(&bytes);
        let _ = HelloDelegation::decode_final(&bytes);
        let _ = AnchorHandoff::decode_final(&bytes);
    }

    /// Lower-case labels form domains that survive the wire.
    #[test]
    fn domain_destination_wire(name in "[a-z0-9]{1,20}(\\.[a-z0-9]{1,20}){0,3}") {
        let dest = Destination::domain(&name).unwrap();
        prop_assert_eq!(dest.canonical(), name.as_str());
        let enc = dest.encode().unwrap();
        prop_assert_eq!(Destination::decode_final(&enc).unwrap(), dest);
    }
}

// ==================== Signature Property Tests ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A signature never verifies after one bit of the message flips.
    #[test]
    fn signature_bound_to_every_bit(
        message in prop::collection::vec(any::<u8>(), 1..128),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let agent = AgentKeyPair::generate();
        let signature = agent.sign(&message);
        prop_assert!(agent.public_key().verify(&signature, &message).is_ok());

        let mut tampered = message.clone();
        tampered[index.index(message.len())] ^= 1 << bit;
        prop_assert!(agent.public_key().verify(&signature, &tampered).is_err());
    }

    /// Hellos verify for any key-package set, and only for their destination.
    #[test]
    fn hello_bound_to_destination(
        packages in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..4),
        closed in any::<bool>(),
    ) {
        let destination = Destination::domain("prop.example").unwrap();
        let anchor = PrivateActiveAnchor::create(destination.clone());
        let agent = AgentKeyPair::generate();
        let policy = if closed { HelloPolicy::Closed } else { HelloPolicy::Follows };
        let body = Hello::new(
            agent.public_key().clone(),
            packages.into_iter().map(OpaqueBytes::new).collect(),
            policy,
        );
        let hello = HelloDelegation::issue(&anchor, &agent, body.clone(), &()).unwrap();

        let verified = hello.verify(anchor.public_key(), &destination, &()).unwrap();
        prop_assert_eq!(verified.body, body);

        let elsewhere = Destination::domain("other.example").unwrap();
        prop_assert!(hello.verify(anchor.public_key(), &elsewhere, &()).is_err());
    }
}
