//! Anchor identity: attestation, succession, and the active anchor.
//!
//! An anchor is a long-lived key bound to an externally resolved
//! destination. Rotating it produces a succession proof signed by the
//! retiring key, so peers can follow the anchor from any key they
//! already trust.

pub mod active;
pub mod attestation;
pub mod destination;
pub mod succession;

pub use active::{Continuity, HandOffRefused, PrivateActiveAnchor};
pub use attestation::{AnchorId, Attestation, SignedAttestation};
pub use destination::Destination;
pub use succession::{verify_succession, SuccessionProof};
