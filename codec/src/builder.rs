//! Factories for codecs bound to one byte order.
//!
//! A [Builder] hands out the leaf codecs of a composition: primitives, big integers, and
//! strings. Composite codecs ([crate::Array], [crate::Slice], [crate::Record],
//! [crate::NotNil]) do not depend on byte order and accept leaves from either builder.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use oracle_codec::{Builder, Codec, Value};
//!
//! let b = Builder::BIG_ENDIAN;
//! let encoded = b.int16().encode(&Value::I16(-1), BytesMut::new()).unwrap();
//! assert_eq!(&encoded[..], &[0xFF, 0xFF]);
//!
//! let (value, rest) = b.int16().decode(&[0xFF, 0xFF, 0x09]).unwrap();
//! assert_eq!(value, Value::I16(-1));
//! assert_eq!(rest, &[0x09]);
//! ```

use crate::{
    types::{
        bigint::{BigIntCodec, NativeInt},
        primitives::Numeric,
        string::StringCodec,
    },
    util::min_width,
    Codec, EncodingType, Error, OracleId, SharedCodec, Type,
};
use paste::paste;

/// Creates leaf codecs in a fixed byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Builder {
    order: EncodingType,
}

impl From<EncodingType> for Builder {
    fn from(order: EncodingType) -> Self {
        Self { order }
    }
}

macro_rules! impl_builder_primitive {
    ($name:ident, $type:ident) => {
        paste! {
            #[doc = "Codec for `" $type "` values."]
            pub fn $name(&self) -> SharedCodec {
                Numeric::<$type>::new(self.order).shared()
            }
        }
    };
}

impl Builder {
    pub const BIG_ENDIAN: Self = Self {
        order: EncodingType::BigEndian,
    };

    pub const LITTLE_ENDIAN: Self = Self {
        order: EncodingType::LittleEndian,
    };

    pub fn order(&self) -> EncodingType {
        self.order
    }

    impl_builder_primitive!(bool, bool);
    impl_builder_primitive!(int8, i8);
    impl_builder_primitive!(int16, i16);
    impl_builder_primitive!(int32, i32);
    impl_builder_primitive!(int64, i64);
    impl_builder_primitive!(uint8, u8);
    impl_builder_primitive!(uint16, u16);
    impl_builder_primitive!(uint32, u32);
    impl_builder_primitive!(uint64, u64);
    impl_builder_primitive!(float32, f32);
    impl_builder_primitive!(float64, f64);
    impl_builder_primitive!(oracle_id, OracleId);

    /// Codec for a [num_bigint::BigInt] of exactly `bytes` bytes.
    pub fn big_int(&self, bytes: usize, signed: bool) -> Result<SharedCodec, Error> {
        Ok(BigIntCodec::new(bytes, signed, self.order)?.shared())
    }

    /// Codec for a signed integer of `bytes` bytes.
    ///
    /// Widths of 1, 2, 4, and 8 use the native codecs. Other widths up to 8 are presented as
    /// the next larger native integer; wider integers are presented as big integers.
    pub fn int(&self, bytes: usize) -> Result<SharedCodec, Error> {
        match bytes {
            1 => Ok(self.int8()),
            2 => Ok(self.int16()),
            4 => Ok(self.int32()),
            8 => Ok(self.int64()),
            3 => self.native_int(bytes, true, Type::I32),
            5..=7 => self.native_int(bytes, true, Type::I64),
            _ => self.big_int(bytes, true),
        }
    }

    /// Codec for an unsigned integer of `bytes` bytes.
    ///
    /// See [Builder::int] for how widths map to value types.
    pub fn uint(&self, bytes: usize) -> Result<SharedCodec, Error> {
        match bytes {
            1 => Ok(self.uint8()),
            2 => Ok(self.uint16()),
            4 => Ok(self.uint32()),
            8 => Ok(self.uint64()),
            3 => self.native_int(bytes, false, Type::U32),
            5..=7 => self.native_int(bytes, false, Type::U64),
            _ => self.big_int(bytes, false),
        }
    }

    fn native_int(&self, bytes: usize, signed: bool, native: Type) -> Result<SharedCodec, Error> {
        let inner = BigIntCodec::new(bytes, signed, self.order)?;
        Ok(NativeInt::new(inner, native)?.shared())
    }

    /// Codec for text of at most `max_len` bytes, with the narrowest length prefix that can
    /// hold `max_len`.
    pub fn string(&self, max_len: usize) -> Result<SharedCodec, Error> {
        let length = self.uint(min_width(max_len))?;
        Ok(StringCodec::new(max_len, length)?.shared())
    }
}
