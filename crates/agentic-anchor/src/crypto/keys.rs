//! Ed25519 implementation of the signing capability.
//!
//! The signing key zeroizes itself on drop (`ed25519-dalek` `zeroize`
//! feature), so no manual wipe is needed here.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::crypto::signing::{SignatureAlgorithm, SignatureScheme, SigningCapability};
use crate::error::{IdentityError, Result};
use crate::keys::material::{TypedKeyMaterial, TypedSignature};

/// An Ed25519 key pair.
pub struct Ed25519Signer {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Ed25519Signer {
    /// Return the verifying key bytes.
    pub fn verifying_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }
}

impl SigningCapability for Ed25519Signer {
    fn algorithm(&self) -> SignatureAlgorithm {
        Self::ALGORITHM
    }

    fn sign(&self, message: &[u8]) -> TypedSignature {
        let sig = self.signing_key.sign(message);
        TypedSignature::from_ed25519(sig.to_bytes())
    }

    fn public_key(&self) -> TypedKeyMaterial {
        TypedKeyMaterial::from_ed25519(self.verifying_key_bytes())
    }

    fn secret_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.signing_key.to_bytes().to_vec())
    }
}

impl SignatureScheme for Ed25519Signer {
    const ALGORITHM: SignatureAlgorithm = SignatureAlgorithm::Ed25519;

    fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    fn from_secret(secret: &[u8]) -> Result<Self> {
        let bytes: Zeroizing<[u8; 32]> = Zeroizing::new(
            secret
                .try_into()
                .map_err(|_| IdentityError::InvalidKey("ed25519 secret must be 32 bytes".into()))?,
        );
        let signing_key = SigningKey::from_bytes(&bytes);
        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    fn verify_raw(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
        let key_bytes: [u8; 32] = public_key
            .try_into()
            .map_err(|_| IdentityError::AuthenticationFailed)?;
        let sig_bytes: [u8; 64] = signature
            .try_into()
            .map_err(|_| IdentityError::AuthenticationFailed)?;
        let verifying_key =
            VerifyingKey::from_bytes(&key_bytes).map_err(|_| IdentityError::AuthenticationFailed)?;
        let signature = Signature::from_bytes(&sig_bytes);
        verifying_key
            .verify_strict(message, &signature)
            .map_err(|_| IdentityError::AuthenticationFailed)
    }
}

/// Check that `bytes` decode to a usable Ed25519 public key.
pub fn validate_public_key(bytes: &[u8]) -> Result<()> {
    let key_bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| IdentityError::InvalidKey("ed25519 public key must be 32 bytes".into()))?;
    VerifyingKey::from_bytes(&key_bytes)
        .map(|_| ())
        .map_err(|e| IdentityError::InvalidKey(format!("invalid verifying key: {e}")))
}
