//! Error types for AgenticAnchor.
//!
//! All errors are strongly typed and propagated without panicking.
//! Private key material is never included in error messages.

/// Linear-encoding failures. Always recoverable by rejecting the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Unexpected end of input: needed {needed} more byte(s)")]
    UnexpectedEof { needed: usize },

    #[error("Invalid prefix 0x{prefix:02x} for {type_name}")]
    InvalidPrefix { type_name: &'static str, prefix: u8 },

    #[error("Incorrect data length for {type_name}: expected {expected}, found {found}")]
    IncorrectDataLength {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Unexpected trailing data: {remaining} byte(s)")]
    UnexpectedData { remaining: usize },

    #[error("Required value missing: {0}")]
    RequiredValueMissing(&'static str),

    #[error("Invalid UTF-8 string")]
    InvalidUtf8,

    #[error("Array too long to encode: {0} elements")]
    ArrayTooLong(usize),
}

/// Error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch { expected: u8, found: u8 },

    #[error("Role mismatch: expected {expected}, found {found}")]
    RoleMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Anchor has no pending succession")]
    MissingContinuity,

    #[error("Anchor rotation not yet settled")]
    PendingContinuity,

    #[error("Succession history full: {0} proofs")]
    SuccessionLimit(usize),

    #[error("Unknown destination type: {0}")]
    UnknownDestinationType(u8),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Key mismatch: {0}")]
    KeyMismatch(&'static str),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Invalid passphrase")]
    InvalidPassphrase,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IdentityError {
    /// True for failures of the authentication category.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, IdentityError>;
