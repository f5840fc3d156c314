//! Variable-width unsigned integers.
//!
//! Values below 255 occupy one byte. Anything larger is written as the
//! `0xFF` sentinel followed by a fixed-width big-endian body: 4 bytes for
//! `u32` and narrower, 8 bytes for `u64`. Each value has exactly one
//! encoding; a sentinel followed by a value below 255 is rejected.

use super::{take, take_byte, CodecResult, Decode, Encode, SENTINEL};
use crate::error::CodecError;

const NARROW_WIDTH: usize = 4;
const WIDE_WIDTH: usize = 8;

pub(crate) fn encode_uint(value: u64, width: usize, out: &mut Vec<u8>) {
    if value < u64::from(SENTINEL) {
        out.push(value as u8);
    } else {
        out.push(SENTINEL);
        out.extend_from_slice(&value.to_be_bytes()[8 - width..]);
    }
}

pub(crate) fn decode_uint<'a>(
    input: &'a [u8],
    width: usize,
    max: u64,
    type_name: &'static str,
) -> CodecResult<(u64, &'a [u8])> {
    let (first, rest) = take_byte(input)?;
    if first != SENTINEL {
        return Ok((u64::from(first), rest));
    }
    let (body, rest) = take(rest, width)?;
    let mut buf = [0u8; 8];
    buf[8 - width..].copy_from_slice(body);
    let value = u64::from_be_bytes(buf);
    if value < u64::from(SENTINEL) || value > max {
        return Err(CodecError::InvalidPrefix {
            type_name,
            prefix: SENTINEL,
        });
    }
    Ok((value, rest))
}

/// Encode a byte-string or collection length.
pub(crate) fn encode_length(len: usize, out: &mut Vec<u8>) -> CodecResult<()> {
    let len = u32::try_from(len).map_err(|_| CodecError::IncorrectDataLength {
        type_name: "length",
        expected: u32::MAX as usize,
        found: len,
    })?;
    encode_uint(u64::from(len), NARROW_WIDTH, out);
    Ok(())
}

/// Decode a byte-string or collection length.
pub(crate) fn decode_length(input: &[u8]) -> CodecResult<(usize, &[u8])> {
    let (len, rest) = decode_uint(input, NARROW_WIDTH, u64::from(u32::MAX), "length")?;
    Ok((len as usize, rest))
}

macro_rules! impl_uint_codec {
    ($ty:ty, $width:expr) => {
        impl Encode for $ty {
            fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
                encode_uint(u64::from(*self), $width, out);
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
                let (value, rest) =
                    decode_uint(input, $width, u64::from(<$ty>::MAX), stringify!($ty))?;
                Ok((value as $ty, rest))
            }
        }
    };
}

impl_uint_codec!(u8, NARROW_WIDTH);
impl_uint_codec!(u16, NARROW_WIDTH);
impl_uint_codec!(u32, NARROW_WIDTH);
impl_uint_codec!(u64, WIDE_WIDTH);

impl Encode for bool {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        out.push(u8::from(*self));
        Ok(())
    }
}

impl Decode for bool {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (byte, rest) = take_byte(input)?;
        match byte {
            0 => Ok((false, rest)),
            1 => Ok((true, rest)),
            other => Err(CodecError::InvalidPrefix {
                type_name: "bool",
                prefix: other,
            }),
        }
    }
}
