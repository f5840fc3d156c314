//! Key derivation using HKDF-SHA256.
//!
//! Every derived key is bound to a context string under the
//! `agentic-anchor/` namespace so keys for one purpose never collide with
//! keys for another.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{IdentityError, Result};
use crate::keys::roles::KeyRole;

/// Derive a 32-byte key from input keying material, a salt and a context.
pub fn derive_key(ikm: &[u8], salt: &[u8], context: &str) -> Result<Zeroizing<[u8; 32]>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut output = Zeroizing::new([0u8; 32]);
    hk.expand(context.as_bytes(), &mut output[..])
        .map_err(|e| IdentityError::DerivationFailed(format!("HKDF expand failed: {e}")))?;
    Ok(output)
}

/// Context for the key that encrypts an archived private key of `role`.
pub fn archive_context(role: KeyRole) -> String {
    format!("agentic-anchor/archive/v1/{}", role.as_str())
}
