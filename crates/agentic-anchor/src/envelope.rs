//! Signing envelopes.
//!
//! A [`SignedEnvelope`] pairs content with a signature over
//! `formatter(content)`. The formatter may mix in context that is not
//! part of the content (a discriminator, a peer's key, a session digest),
//! so the same formatter and context must be supplied again at verify
//! time. Wire form: `contentWire ++ signatureWire`.
//!
//! A [`SignedPayload`] is the reverse arrangement used by the outer
//! layer of delegations and handoffs: `signatureWire ++ payload`, where
//! the payload runs to the end of the input and is parsed only after the
//! signature checks out.

use crate::codec::opaque::encode_slice;
use crate::codec::{CodecResult, Decode, Encode};
use crate::error::Result;
use crate::keys::material::TypedSignature;
use crate::keys::roles::{KeyPair, PublicKey, Role};

/// Accumulates the exact bytes a signature covers.
///
/// The discriminator always comes first, as a linear-encoded string.
#[derive(Debug, Clone)]
pub struct SignedBytes {
    buf: Vec<u8>,
}

impl SignedBytes {
    pub fn new(discriminator: &str) -> CodecResult<Self> {
        let mut buf = Vec::new();
        discriminator.encode_to(&mut buf)?;
        Ok(Self { buf })
    }

    /// Append the encoding of `value`.
    pub fn part<T: Encode + ?Sized>(mut self, value: &T) -> CodecResult<Self> {
        value.encode_to(&mut self.buf)?;
        Ok(self)
    }

    /// Append raw bytes with a length prefix.
    pub fn opaque(mut self, bytes: &[u8]) -> CodecResult<Self> {
        encode_slice(bytes, &mut self.buf)?;
        Ok(self)
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// `discriminator ++ encode(parts[0]) ++ encode(parts[1]) ...`
pub fn signed_bytes(discriminator: &str, parts: &[&dyn Encode]) -> CodecResult<Vec<u8>> {
    let mut bytes = SignedBytes::new(discriminator)?;
    for part in parts {
        part.encode_to(&mut bytes.buf)?;
    }
    Ok(bytes.finish())
}

/// Content with a signature over some formatting of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope<T> {
    content: T,
    signature: TypedSignature,
}

impl<T> SignedEnvelope<T> {
    /// Sign `formatter(&content)` with `signer`.
    ///
    /// The signed bytes are not retained; only `content` and the
    /// signature are stored.
    pub fn create<F, S>(content: T, signer: S, formatter: F) -> Result<Self>
    where
        F: FnOnce(&T) -> CodecResult<Vec<u8>>,
        S: FnOnce(&[u8]) -> TypedSignature,
    {
        let bytes = formatter(&content)?;
        let signature = signer(&bytes);
        Ok(Self { content, signature })
    }

    /// Sign with a role-typed key pair.
    pub fn create_with_key<R, F>(content: T, key: &KeyPair<R>, formatter: F) -> Result<Self>
    where
        R: Role,
        F: FnOnce(&T) -> CodecResult<Vec<u8>>,
    {
        Self::create(content, |bytes| key.sign(bytes), formatter)
    }

    /// Recompute `formatter(&content)` and hand it to `verifier`.
    pub fn verify<F, V>(&self, formatter: F, verifier: V) -> Result<()>
    where
        F: FnOnce(&T) -> CodecResult<Vec<u8>>,
        V: FnOnce(&TypedSignature, &[u8]) -> Result<()>,
    {
        let bytes = formatter(&self.content)?;
        verifier(&self.signature, &bytes)
    }

    /// Verify against a role-typed public key.
    pub fn verify_with_key<R, F>(&self, key: &PublicKey<R>, formatter: F) -> Result<()>
    where
        R: Role,
        F: FnOnce(&T) -> CodecResult<Vec<u8>>,
    {
        self.verify(formatter, |signature, bytes| key.verify(signature, bytes))
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn signature(&self) -> &TypedSignature {
        &self.signature
    }

    pub fn into_parts(self) -> (T, TypedSignature) {
        (self.content, self.signature)
    }
}

impl<T: Encode> Encode for SignedEnvelope<T> {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.content.encode_to(out)?;
        self.signature.encode_to(out)
    }
}

impl<T: Decode> Decode for SignedEnvelope<T> {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (content, rest) = T::decode_continuing(input)?;
        let (signature, rest) = TypedSignature::decode_continuing(rest)?;
        Ok((Self { content, signature }, rest))
    }
}

/// A signature followed by the raw bytes it covers (in part).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    signature: TypedSignature,
    payload: Vec<u8>,
}

impl SignedPayload {
    pub fn new(signature: TypedSignature, payload: Vec<u8>) -> Self {
        Self { signature, payload }
    }

    pub fn signature(&self) -> &TypedSignature {
        &self.signature
    }

    /// The unparsed payload. Callers verify the signature before parsing.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl Encode for SignedPayload {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.signature.encode_to(out)?;
        out.extend_from_slice(&self.payload);
        Ok(())
    }
}

impl Decode for SignedPayload {
    /// Consumes the whole remainder of `input`.
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (signature, rest) = TypedSignature::decode_continuing(input)?;
        Ok((
            Self {
                signature,
                payload: rest.to_vec(),
            },
            &[],
        ))
    }
}
