//! Defined-width binary values (keys, signatures, digests).
//!
//! One tag byte selects both the interpretation and the exact number of
//! body bytes that follow. Tag `0` is the absent marker and is never a
//! valid interpretation.

use super::{take_byte, CodecResult};
use crate::error::CodecError;

/// Tag byte reserved for "no value".
pub const ABSENT_TAG: u8 = 0;

/// A tag-selected fixed-width binary value.
pub trait DefinedWidth: Sized {
    /// Name used in codec errors.
    const TYPE_NAME: &'static str;

    /// Exact body width for `tag`, or `None` if the tag is unassigned.
    fn width_for_tag(tag: u8) -> Option<usize>;

    fn tag(&self) -> u8;

    fn body(&self) -> &[u8];

    /// Build a value from a tag and a body of exactly the tag's width.
    fn from_parts(tag: u8, body: &[u8]) -> CodecResult<Self>;
}

pub fn encode_defined<T: DefinedWidth>(value: &T, out: &mut Vec<u8>) -> CodecResult<()> {
    let tag = value.tag();
    let expected = T::width_for_tag(tag).ok_or(CodecError::InvalidPrefix {
        type_name: T::TYPE_NAME,
        prefix: tag,
    })?;
    let body = value.body();
    if body.len() != expected {
        return Err(CodecError::IncorrectDataLength {
            type_name: T::TYPE_NAME,
            expected,
            found: body.len(),
        });
    }
    out.push(tag);
    out.extend_from_slice(body);
    Ok(())
}

pub fn decode_defined<T: DefinedWidth>(input: &[u8]) -> CodecResult<(T, &[u8])> {
    let (tag, rest) = take_byte(input)?;
    if tag == ABSENT_TAG {
        return Err(CodecError::RequiredValueMissing(T::TYPE_NAME));
    }
    let width = T::width_for_tag(tag).ok_or(CodecError::InvalidPrefix {
        type_name: T::TYPE_NAME,
        prefix: tag,
    })?;
    if rest.len() < width {
        return Err(CodecError::IncorrectDataLength {
            type_name: T::TYPE_NAME,
            expected: width,
            found: rest.len(),
        });
    }
    let (body, rest) = rest.split_at(width);
    Ok((T::from_parts(tag, body)?, rest))
}

/// Implement [`Encode`](super::Encode) and [`Decode`](super::Decode) for a
/// [`DefinedWidth`] type.
macro_rules! impl_defined_width_codec {
    ($ty:ty) => {
        impl $crate::codec::Encode for $ty {
            fn encode_to(&self, out: &mut Vec<u8>) -> $crate::codec::CodecResult<()> {
                $crate::codec::defined::encode_defined(self, out)
            }
        }

        impl $crate::codec::Decode for $ty {
            fn decode_continuing(input: &[u8]) -> $crate::codec::CodecResult<(Self, &[u8])> {
                $crate::codec::defined::decode_defined(input)
            }
        }
    };
}

pub(crate) use impl_defined_width_codec;
