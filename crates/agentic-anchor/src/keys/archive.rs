//! Archives of private key material.
//!
//! A [`KeyArchive`] is the unsigned, local-only representation of a
//! private key: `[role:1][algTag:1][secret:opaque]` in linear encoding.
//! It is never sent on the wire.
//!
//! A [`ProtectedArchive`] wraps any archive blob for storage at rest:
//!
//! ```json
//! {
//!     "version": 1,
//!     "format": "anchor-archive-v1",
//!     "role": "Anchor",
//!     "contents": "ActiveAnchor",
//!     "kdf": { "m_cost": 65536, "t_cost": 3, "p_cost": 4 },
//!     "salt": "<base64-16-bytes>",
//!     "nonce": "<base64-12-bytes>",
//!     "ciphertext": "<base64>"
//! }
//! ```
//!
//! passphrase → Argon2id(salt) → HKDF-SHA256(role context) →
//! ChaCha20-Poly1305 with the header fields as associated data.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::codec::enumeration::{decode_discriminant, encode_discriminant};
use crate::codec::opaque::{decode_slice, encode_slice};
use crate::codec::{take_byte, CodecResult, Decode, Encode};
use crate::crypto::encryption::{self, KdfParams};
use crate::crypto::random::random_bytes;
use crate::crypto::{derivation, SignatureAlgorithm};
use crate::error::{CodecError, IdentityError, Result};
use crate::keys::roles::KeyRole;

const ARCHIVE_VERSION: u32 = 1;
const ARCHIVE_FORMAT: &str = "anchor-archive-v1";

/// A private key with its role and algorithm. Wiped on drop.
pub struct KeyArchive {
    role: KeyRole,
    algorithm: SignatureAlgorithm,
    secret: Zeroizing<Vec<u8>>,
}

impl KeyArchive {
    pub fn new(role: KeyRole, algorithm: SignatureAlgorithm, secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            role,
            algorithm,
            secret,
        }
    }

    pub fn role(&self) -> KeyRole {
        self.role
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Decode an archive that must hold a key of the `expected` algorithm.
    ///
    /// The stored tag is compared before the secret is read, so an archive
    /// written by another algorithm fails with `AlgorithmMismatch` even
    /// when this build does not know that algorithm.
    pub fn decode_expecting(input: &[u8], expected: SignatureAlgorithm) -> Result<Self> {
        let (_, rest) = decode_discriminant::<KeyRole>(input)?;
        let (tag, _) = take_byte(rest)?;
        if tag != expected.tag() {
            return Err(IdentityError::AlgorithmMismatch {
                expected: expected.tag(),
                found: tag,
            });
        }
        Ok(Self::decode_final(input)?)
    }

    /// Encrypt this archive under a passphrase.
    pub fn protect(&self, passphrase: &str, params: &KdfParams) -> Result<ProtectedArchive> {
        let plaintext = Zeroizing::new(self.encode()?);
        ProtectedArchive::seal(self.role, ArchiveContents::KeyPair, &plaintext, passphrase, params)
    }
}

impl std::fmt::Debug for KeyArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyArchive")
            .field("role", &self.role)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl Encode for KeyArchive {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        encode_discriminant(&self.role, out)?;
        out.push(self.algorithm.tag());
        encode_slice(&self.secret, out)
    }
}

impl Decode for KeyArchive {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (role, rest) = decode_discriminant::<KeyRole>(input)?;
        let (tag, rest) = take_byte(rest)?;
        let algorithm = SignatureAlgorithm::from_tag(tag).ok_or(CodecError::InvalidPrefix {
            type_name: "key archive",
            prefix: tag,
        })?;
        let (secret, rest) = decode_slice(rest)?;
        if secret.len() != algorithm.private_key_len() {
            return Err(CodecError::IncorrectDataLength {
                type_name: "key archive",
                expected: algorithm.private_key_len(),
                found: secret.len(),
            });
        }
        Ok((
            Self::new(role, algorithm, Zeroizing::new(secret.to_vec())),
            rest,
        ))
    }
}

/// What a protected archive holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveContents {
    KeyPair,
    ActiveAnchor,
}

/// An encrypted archive, serialized as JSON for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectedArchive {
    pub version: u32,
    pub format: String,
    pub role: KeyRole,
    pub contents: ArchiveContents,
    pub kdf: KdfParams,
    pub salt: String,
    pub nonce: String,
    pub ciphertext: String,
}

impl ProtectedArchive {
    /// Encrypt an archive blob.
    pub fn seal(
        role: KeyRole,
        contents: ArchiveContents,
        plaintext: &[u8],
        passphrase: &str,
        params: &KdfParams,
    ) -> Result<Self> {
        let salt: [u8; 16] = random_bytes();
        let key = archive_key(passphrase, &salt, role, params)?;
        let aad = associated_data(ARCHIVE_VERSION, role, contents);
        let (nonce, ciphertext) = encryption::seal(&key, plaintext, &aad)?;

        Ok(Self {
            version: ARCHIVE_VERSION,
            format: ARCHIVE_FORMAT.to_string(),
            role,
            contents,
            kdf: *params,
            salt: STANDARD.encode(salt),
            nonce: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(ciphertext),
        })
    }

    /// Decrypt the archive blob, checking it holds `expected` contents.
    pub fn open(&self, passphrase: &str, expected: ArchiveContents) -> Result<Zeroizing<Vec<u8>>> {
        if self.version != ARCHIVE_VERSION || self.format != ARCHIVE_FORMAT {
            return Err(IdentityError::SerializationError(format!(
                "unsupported archive version={} format={}",
                self.version, self.format
            )));
        }
        if self.contents != expected {
            return Err(IdentityError::SerializationError(format!(
                "archive holds {:?}, expected {:?}",
                self.contents, expected
            )));
        }

        let salt = decode_b64(&self.salt, "salt")?;
        let nonce = decode_b64(&self.nonce, "nonce")?;
        let ciphertext = decode_b64(&self.ciphertext, "ciphertext")?;

        let key = archive_key(passphrase, &salt, self.role, &self.kdf)?;
        let aad = associated_data(self.version, self.role, self.contents);
        encryption::open(&key, &nonce, &ciphertext, &aad)
    }

    /// Decrypt a key-pair archive.
    pub fn open_key(&self, passphrase: &str) -> Result<KeyArchive> {
        let plaintext = self.open(passphrase, ArchiveContents::KeyPair)?;
        let archive = KeyArchive::decode_final(&plaintext)?;
        if archive.role() != self.role {
            return Err(IdentityError::RoleMismatch {
                expected: self.role.as_str(),
                found: archive.role().as_str(),
            });
        }
        Ok(archive)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| IdentityError::SerializationError(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| IdentityError::SerializationError(format!("failed to parse archive: {e}")))
    }

    /// Write to `path` atomically via a sibling temporary file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, self.to_json()?)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn archive_key(
    passphrase: &str,
    salt: &[u8],
    role: KeyRole,
    params: &KdfParams,
) -> Result<Zeroizing<[u8; 32]>> {
    let master = encryption::derive_passphrase_key(passphrase.as_bytes(), salt, params)?;
    derivation::derive_key(&master[..], salt, &derivation::archive_context(role))
}

fn associated_data(version: u32, role: KeyRole, contents: ArchiveContents) -> Vec<u8> {
    format!("{ARCHIVE_FORMAT}:{version}:{}:{contents:?}", role.as_str()).into_bytes()
}

fn decode_b64(value: &str, field: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| IdentityError::SerializationError(format!("invalid {field} base64: {e}")))
}
