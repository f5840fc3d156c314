//! Typed key material.
//!
//! The key module provides algorithm-tagged public keys and signatures,
//! role-separated key pairs, and local archives of private keys.

pub mod archive;
pub mod material;
pub mod roles;

pub use archive::{ArchiveContents, KeyArchive, ProtectedArchive};
pub use material::{TypedKeyMaterial, TypedSignature};
pub use roles::{
    AgentKeyPair, AgentPublicKey, AgentRole, AnchorKeyPair, AnchorPublicKey, AnchorRole,
    IdentityKeyPair, IdentityPublicKey, IdentityRole, KeyPair, KeyRole, PublicKey, Role,
};
