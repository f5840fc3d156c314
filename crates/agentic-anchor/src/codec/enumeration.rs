//! Enumerations with at most 255 variants: one raw discriminant byte.

use super::{take_byte, CodecResult};
use crate::error::CodecError;

/// A field-less enumeration with a stable one-byte discriminant.
pub trait Discriminant: Sized {
    const TYPE_NAME: &'static str;

    fn discriminant(&self) -> u8;

    fn from_discriminant(byte: u8) -> Option<Self>;
}

pub fn encode_discriminant<T: Discriminant>(value: &T, out: &mut Vec<u8>) -> CodecResult<()> {
    out.push(value.discriminant());
    Ok(())
}

pub fn decode_discriminant<T: Discriminant>(input: &[u8]) -> CodecResult<(T, &[u8])> {
    let (byte, rest) = take_byte(input)?;
    let value = T::from_discriminant(byte).ok_or(CodecError::InvalidPrefix {
        type_name: T::TYPE_NAME,
        prefix: byte,
    })?;
    Ok((value, rest))
}

/// Implement [`Encode`](super::Encode) and [`Decode`](super::Decode) for a
/// [`Discriminant`] type.
macro_rules! impl_enum_codec {
    ($ty:ty) => {
        impl $crate::codec::Encode for $ty {
            fn encode_to(&self, out: &mut Vec<u8>) -> $crate::codec::CodecResult<()> {
                $crate::codec::enumeration::encode_discriminant(self, out)
            }
        }

        impl $crate::codec::Decode for $ty {
            fn decode_continuing(input: &[u8]) -> $crate::codec::CodecResult<(Self, &[u8])> {
                $crate::codec::enumeration::decode_discriminant(input)
            }
        }
    };
}

pub(crate) use impl_enum_codec;
