//! Arrays: one count byte followed by the concatenated elements.
//!
//! A count of 255 is reserved and never produced.

use super::{take_byte, CodecResult, Decode, Encode};
use crate::error::CodecError;

/// Largest element count an array may carry.
pub const MAX_ARRAY_LEN: usize = 254;

const RESERVED_COUNT: u8 = 0xFF;

impl<T: Encode> Encode for Vec<T> {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        self.as_slice().encode_to(out)
    }
}

impl<T: Encode> Encode for [T] {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        if self.len() > MAX_ARRAY_LEN {
            return Err(CodecError::ArrayTooLong(self.len()));
        }
        out.push(self.len() as u8);
        for item in self {
            item.encode_to(out)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (count, mut rest) = take_byte(input)?;
        if count == RESERVED_COUNT {
            return Err(CodecError::InvalidPrefix {
                type_name: "array",
                prefix: count,
            });
        }
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let (item, next) = T::decode_continuing(rest)?;
            items.push(item);
            rest = next;
        }
        Ok((items, rest))
    }
}
