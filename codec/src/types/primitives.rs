//! Codecs for fixed-width primitive values.
//!
//! Every primitive has a compile-time constant size and is written in the byte order of the
//! [crate::Builder] that produced its codec:
//! * integers use their native width (1, 2, 4, or 8 bytes)
//! * floats are written as the raw IEEE-754 bit pattern of the same-width unsigned integer
//! * `bool` is one byte, any nonzero byte decodes to `true`
//! * [OracleId] is one byte

use crate::{util::at_least, Codec, EncodingType, Error, OracleId, Type, Value};
use bytes::{Buf, BufMut, BytesMut};
use paste::paste;
use std::{fmt::Debug, marker::PhantomData};

/// A value with a fixed-width binary representation in either byte order.
pub trait Primitive: Copy + Debug + Send + Sync + 'static {
    /// Encoded length in bytes.
    const SIZE: usize;

    fn value_type() -> Type;

    fn put(self, buf: &mut BytesMut, order: EncodingType);

    /// Reads the value. The caller must ensure `SIZE` bytes remain.
    fn get(buf: &mut &[u8], order: EncodingType) -> Self;

    /// Extracts the primitive from a value of exactly the matching kind.
    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

// Multi-byte integers.
macro_rules! impl_integer {
    ($type:ty, $variant:ident) => {
        paste! {
            impl Primitive for $type {
                const SIZE: usize = std::mem::size_of::<$type>();

                #[inline]
                fn value_type() -> Type {
                    Type::$variant
                }

                #[inline]
                fn put(self, buf: &mut BytesMut, order: EncodingType) {
                    match order {
                        EncodingType::BigEndian => buf.[<put_ $type>](self),
                        EncodingType::LittleEndian => buf.[<put_ $type _le>](self),
                    }
                }

                #[inline]
                fn get(buf: &mut &[u8], order: EncodingType) -> Self {
                    match order {
                        EncodingType::BigEndian => buf.[<get_ $type>](),
                        EncodingType::LittleEndian => buf.[<get_ $type _le>](),
                    }
                }

                #[inline]
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }

                #[inline]
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        }
    };
}

impl_integer!(i16, I16);
impl_integer!(i32, I32);
impl_integer!(i64, I64);
impl_integer!(u16, U16);
impl_integer!(u32, U32);
impl_integer!(u64, U64);

// Single bytes have no byte order.
macro_rules! impl_byte {
    ($type:ty, $variant:ident, $get:ident, $put:ident) => {
        impl Primitive for $type {
            const SIZE: usize = 1;

            #[inline]
            fn value_type() -> Type {
                Type::$variant
            }

            #[inline]
            fn put(self, buf: &mut BytesMut, _: EncodingType) {
                buf.$put(self);
            }

            #[inline]
            fn get(buf: &mut &[u8], _: EncodingType) -> Self {
                buf.$get()
            }

            #[inline]
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }

            #[inline]
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

impl_byte!(i8, I8, get_i8, put_i8);
impl_byte!(u8, U8, get_u8, put_u8);

// Floats travel as the bit pattern of the same-width unsigned integer.
macro_rules! impl_float {
    ($type:ty, $variant:ident, $bits:ty) => {
        impl Primitive for $type {
            const SIZE: usize = <$bits as Primitive>::SIZE;

            #[inline]
            fn value_type() -> Type {
                Type::$variant
            }

            #[inline]
            fn put(self, buf: &mut BytesMut, order: EncodingType) {
                self.to_bits().put(buf, order);
            }

            #[inline]
            fn get(buf: &mut &[u8], order: EncodingType) -> Self {
                <$type>::from_bits(<$bits>::get(buf, order))
            }

            #[inline]
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }

            #[inline]
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

impl_float!(f32, F32, u32);
impl_float!(f64, F64, u64);

impl Primitive for bool {
    const SIZE: usize = 1;

    #[inline]
    fn value_type() -> Type {
        Type::Bool
    }

    #[inline]
    fn put(self, buf: &mut BytesMut, _: EncodingType) {
        buf.put_u8(u8::from(self));
    }

    #[inline]
    fn get(buf: &mut &[u8], _: EncodingType) -> Self {
        buf.get_u8() != 0
    }

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl Primitive for OracleId {
    const SIZE: usize = 1;

    #[inline]
    fn value_type() -> Type {
        Type::OracleId
    }

    #[inline]
    fn put(self, buf: &mut BytesMut, _: EncodingType) {
        buf.put_u8(self.0);
    }

    #[inline]
    fn get(buf: &mut &[u8], _: EncodingType) -> Self {
        OracleId(buf.get_u8())
    }

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::OracleId(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    fn into_value(self) -> Value {
        Value::OracleId(self)
    }
}

/// Codec for a [Primitive] in a fixed byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Numeric<T: Primitive> {
    order: EncodingType,
    _marker: PhantomData<T>,
}

impl<T: Primitive> Numeric<T> {
    pub fn new(order: EncodingType) -> Self {
        Self {
            order,
            _marker: PhantomData,
        }
    }

    pub fn order(&self) -> EncodingType {
        self.order
    }
}

impl<T: Primitive> Codec for Numeric<T> {
    fn value_type(&self) -> Type {
        T::value_type()
    }

    #[inline]
    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error> {
        let v = T::from_value(value).ok_or_else(|| {
            Error::InvalidType(format!("expected {:?}, found {}", T::value_type(), value.kind()))
        })?;
        v.put(buf, self.order);
        Ok(())
    }

    #[inline]
    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error> {
        at_least(buf, T::SIZE)?;
        Ok(T::get(buf, self.order).into_value())
    }

    fn size(&self, _: usize) -> Result<usize, Error> {
        Ok(T::SIZE)
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        Ok(T::SIZE)
    }
}
