//! Product types: pairs through quintuples.
//!
//! Fields are written in declared order and parsed strictly left to
//! right, each field consuming from the remainder left by the previous
//! one. Structs encode themselves by borrowing their fields into a tuple
//! and decode by destructuring the tuple, so every wire struct shares the
//! same consume-and-thread contract.

use super::{CodecResult, Decode, Encode};

macro_rules! impl_product_codec {
    ($($name:ident $field:ident),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
                let ($($field,)+) = self;
                $($field.encode_to(out)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
                let rest = input;
                $(let ($field, rest) = $name::decode_continuing(rest)?;)+
                Ok((($($field,)+), rest))
            }
        }
    };
}

impl_product_codec!(A a, B b);
impl_product_codec!(A a, B b, C c);
impl_product_codec!(A a, B b, C c, D d);
impl_product_codec!(A a, B b, C c, D d, E e);
