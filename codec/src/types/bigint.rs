//! Codecs for integers of arbitrary byte width.
//!
//! [BigIntCodec] writes a [BigInt] as exactly `bytes` bytes: two's complement when signed,
//! magnitude when unsigned. Both byte orders share one representation; little-endian codecs
//! reverse the big-endian bytes before writing and after reading.
//!
//! [NativeInt] presents a [BigIntCodec] of width 3, 5, 6, or 7 as the next larger native
//! integer, so callers never see a [BigInt] for widths that fit in 64 bits.

use crate::{util::at_least, Codec, EncodingType, Error, Type, Value};
use bytes::{Buf, BufMut, BytesMut};
use num_bigint::{BigInt, Sign};

/// Largest supported width of a [BigIntCodec].
pub const MAX_BIG_INT_BYTES: usize = 32;

impl EncodingType {
    /// Reorders big-endian bytes into this byte order (and back).
    fn reorder(&self, raw: &mut [u8]) {
        if *self == EncodingType::LittleEndian {
            raw.reverse();
        }
    }
}

/// Codec for a signed or unsigned integer of `bytes` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigIntCodec {
    bytes: usize,
    signed: bool,
    order: EncodingType,
}

impl BigIntCodec {
    pub fn new(bytes: usize, signed: bool, order: EncodingType) -> Result<Self, Error> {
        if bytes == 0 || bytes > MAX_BIG_INT_BYTES {
            return Err(Error::InvalidConfig(format!(
                "big int width must be in 1..={MAX_BIG_INT_BYTES}, got {bytes}"
            )));
        }
        Ok(Self {
            bytes,
            signed,
            order,
        })
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    /// Serializes `value` to exactly `self.bytes` bytes in this codec's byte order.
    fn serialize(&self, value: &BigInt) -> Result<Vec<u8>, Error> {
        let (fill, raw) = if self.signed {
            let fill = if value.sign() == Sign::Minus { 0xFF } else { 0x00 };
            (fill, value.to_signed_bytes_be())
        } else {
            if value.sign() == Sign::Minus {
                return Err(Error::InvalidType(format!(
                    "{value} is negative but the codec is unsigned"
                )));
            }
            if value.bits() > (self.bytes as u64) * 8 {
                return Err(Error::InvalidType(format!(
                    "{value} does not fit in {} bytes",
                    self.bytes
                )));
            }
            (0x00, value.magnitude().to_bytes_be())
        };
        if raw.len() > self.bytes {
            return Err(Error::InvalidType(format!(
                "{value} does not fit in {} bytes",
                self.bytes
            )));
        }

        let mut out = vec![fill; self.bytes - raw.len()];
        out.extend_from_slice(&raw);
        self.order.reorder(&mut out);
        Ok(out)
    }

    /// Deserializes exactly `self.bytes` bytes in this codec's byte order.
    fn deserialize(&self, wire: &[u8]) -> BigInt {
        let mut raw = wire.to_vec();
        self.order.reorder(&mut raw);
        if self.signed {
            BigInt::from_signed_bytes_be(&raw)
        } else {
            BigInt::from_bytes_be(Sign::Plus, &raw)
        }
    }

    pub(crate) fn write_big(&self, value: &BigInt, buf: &mut BytesMut) -> Result<(), Error> {
        let out = self.serialize(value)?;
        buf.put_slice(&out);
        Ok(())
    }

    pub(crate) fn read_big(&self, buf: &mut &[u8]) -> Result<BigInt, Error> {
        at_least(buf, self.bytes)?;
        let value = self.deserialize(&buf[..self.bytes]);
        buf.advance(self.bytes);
        Ok(value)
    }
}

impl Codec for BigIntCodec {
    fn value_type(&self) -> Type {
        Type::BigInt
    }

    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error> {
        match value {
            Value::BigInt(v) => self.write_big(v, buf),
            other => Err(Error::InvalidType(format!(
                "expected big int, found {}",
                other.kind()
            ))),
        }
    }

    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error> {
        self.read_big(buf).map(Value::BigInt)
    }

    fn size(&self, _: usize) -> Result<usize, Error> {
        Ok(self.bytes)
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        Ok(self.bytes)
    }
}

/// A [BigIntCodec] that presents its values as a native integer type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeInt {
    inner: BigIntCodec,
    native: Type,
}

impl NativeInt {
    /// Wraps `inner`, presenting values as `native` (which must be an integer type).
    pub fn new(inner: BigIntCodec, native: Type) -> Result<Self, Error> {
        if !native.is_integer() {
            return Err(Error::InvalidConfig(format!(
                "{native:?} is not an integer type"
            )));
        }
        Ok(Self { inner, native })
    }
}

impl Codec for NativeInt {
    fn value_type(&self) -> Type {
        self.native.clone()
    }

    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error> {
        if Value::integer(&self.native, 0).map(|zero| zero.kind()) != Some(value.kind()) {
            return Err(Error::InvalidType(format!(
                "expected {:?}, found {}",
                self.native,
                value.kind()
            )));
        }
        let v = value
            .as_i128()
            .ok_or_else(|| Error::Internal(format!("{} is not an integer", value.kind())))?;
        self.inner.write_big(&BigInt::from(v), buf)
    }

    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error> {
        let big = self.inner.read_big(buf)?;
        i128::try_from(&big)
            .ok()
            .and_then(|v| Value::integer(&self.native, v))
            .ok_or_else(|| {
                Error::InvalidType(format!("{big} does not fit in {:?}", self.native))
            })
    }

    fn size(&self, num_items: usize) -> Result<usize, Error> {
        self.inner.size(num_items)
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        self.inner.fixed_size()
    }
}
