//! Cryptographic primitives for AgenticAnchor.
//!
//! This module provides:
//! - The [`SigningCapability`] abstraction and its algorithm tag
//! - Ed25519 signing and verification
//! - SHA-256 binding digests
//! - HKDF-SHA256 key derivation
//! - Argon2id passphrase-based key derivation
//! - ChaCha20-Poly1305 authenticated encryption
//! - Cryptographically secure random number generation

pub mod derivation;
pub mod digest;
pub mod encryption;
pub mod keys;
pub mod random;
pub mod signing;

pub use digest::TypedDigest;
pub use encryption::KdfParams;
pub use keys::Ed25519Signer;
pub use signing::{SignatureAlgorithm, SignatureScheme, SigningCapability};
