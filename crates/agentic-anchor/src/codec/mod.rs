//! Linear encoding: the self-describing binary format used for every
//! wire object.
//!
//! Every wire type implements [`Encode`] and [`Decode`]. Decoding threads
//! the unconsumed remainder forward so product types can be parsed field
//! by field, left to right:
//!
//! - [`Decode::decode_continuing`] returns `(value, rest)` and is used when
//!   sibling fields follow.
//! - [`Decode::decode_final`] requires the whole input to be consumed and
//!   fails with [`CodecError::UnexpectedData`] otherwise.
//!
//! Building blocks:
//! - [`integer`]: one byte below 255, otherwise `0xFF` + fixed width.
//! - [`opaque`]: length-prefixed byte strings and UTF-8 strings.
//! - [`array`]: one count byte then elements.
//! - [`option`]: presence byte then value.
//! - [`defined`]: tag byte selects interpretation and exact width.
//! - [`enumeration`]: one discriminant byte.
//! - [`product`]: tuples of two to five fields.

pub mod array;
pub mod defined;
pub mod enumeration;
pub mod integer;
pub mod opaque;
pub mod option;
pub mod product;

pub use defined::DefinedWidth;
pub use enumeration::Discriminant;
pub use opaque::OpaqueBytes;

use crate::error::CodecError;

/// Prefix byte announcing a wide integer or length.
pub const SENTINEL: u8 = 0xFF;

/// Result alias for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// A value with a linear wire encoding.
pub trait Encode {
    /// Append the encoding of `self` to `out`.
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()>;

    /// Encode `self` into a fresh buffer.
    fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_to(&mut out)?;
        Ok(out)
    }
}

/// A value that can be parsed from its linear wire encoding.
pub trait Decode: Sized {
    /// Parse one value from the front of `input`, returning the remainder.
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])>;

    /// Parse one value that must span the whole of `input`.
    fn decode_final(input: &[u8]) -> CodecResult<Self> {
        let (value, rest) = Self::decode_continuing(input)?;
        if !rest.is_empty() {
            return Err(CodecError::UnexpectedData {
                remaining: rest.len(),
            });
        }
        Ok(value)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (**self).encode_to(out)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        (**self).encode_to(out)
    }
}

/// The empty context: encodes to nothing, decodes from nothing.
impl Encode for () {
    fn encode_to(&self, _out: &mut Vec<u8>) -> CodecResult<()> {
        Ok(())
    }
}

impl Decode for () {
    fn decode_continuing(input: &[u8]) -> CodecResult<((), &[u8])> {
        Ok(((), input))
    }
}

/// Split `n` bytes off the front of `input`.
pub(crate) fn take(input: &[u8], n: usize) -> CodecResult<(&[u8], &[u8])> {
    if input.len() < n {
        return Err(CodecError::UnexpectedEof {
            needed: n - input.len(),
        });
    }
    Ok(input.split_at(n))
}

/// Split the first byte off `input`.
pub(crate) fn take_byte(input: &[u8]) -> CodecResult<(u8, &[u8])> {
    match input.split_first() {
        Some((first, rest)) => Ok((*first, rest)),
        None => Err(CodecError::UnexpectedEof { needed: 1 }),
    }
}
