//! Optional values: a presence byte (`0` absent, `1` present) followed by
//! the value when present.

use super::{take_byte, CodecResult, Decode, Encode};
use crate::error::CodecError;

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

impl<T: Encode> Encode for Option<T> {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        match self {
            None => {
                out.push(ABSENT);
                Ok(())
            }
            Some(value) => {
                out.push(PRESENT);
                value.encode_to(out)
            }
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (marker, rest) = take_byte(input)?;
        match marker {
            ABSENT => Ok((None, rest)),
            PRESENT => {
                let (value, rest) = T::decode_continuing(rest)?;
                Ok((Some(value), rest))
            }
            other => Err(CodecError::InvalidPrefix {
                type_name: "option",
                prefix: other,
            }),
        }
    }
}

/// Unwrap an optional field that the enclosing type requires.
pub fn required<T>(value: Option<T>, field: &'static str) -> CodecResult<T> {
    value.ok_or(CodecError::RequiredValueMissing(field))
}
