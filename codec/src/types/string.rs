//! Codec for length-prefixed UTF-8 text.

use crate::{
    util::{at_least, read_length, write_length},
    Codec, Error, SharedCodec, Type, Value,
};
use bytes::{Buf, BufMut, BytesMut};

/// A byte slice presented as a [String] of at most `max_len` bytes.
#[derive(Clone, Debug)]
pub struct StringCodec {
    max_len: usize,
    length: SharedCodec,
}

impl StringCodec {
    /// Creates a string codec over an integer `length` prefix codec.
    ///
    /// The prefix may be wider than needed for `max_len`; decoded lengths are still checked
    /// against `max_len`.
    pub fn new(max_len: usize, length: SharedCodec) -> Result<Self, Error> {
        let prefix = length.value_type();
        if !prefix.is_integer() {
            return Err(Error::InvalidConfig(format!(
                "length prefix must be an integer, found {prefix:?}"
            )));
        }
        Ok(Self { max_len, length })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Codec for StringCodec {
    fn value_type(&self) -> Type {
        Type::String
    }

    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error> {
        let Value::String(text) = value else {
            return Err(Error::InvalidType(format!(
                "expected string, found {}",
                value.kind()
            )));
        };
        if text.len() > self.max_len {
            return Err(Error::InvalidType(format!(
                "string of {} bytes exceeds maximum of {}",
                text.len(),
                self.max_len
            )));
        }
        write_length(self.length.as_ref(), text.len(), buf)?;
        buf.put_slice(text.as_bytes());
        Ok(())
    }

    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error> {
        let len = read_length(self.length.as_ref(), buf)?;
        if len > self.max_len {
            return Err(Error::InvalidEncoding(format!(
                "string of {len} bytes exceeds maximum of {}",
                self.max_len
            )));
        }
        at_least(buf, len)?;
        let text = std::str::from_utf8(&buf[..len])
            .map_err(|err| Error::InvalidEncoding(format!("string is not UTF-8: {err}")))?
            .to_owned();
        buf.advance(len);
        Ok(Value::String(text))
    }

    fn size(&self, _: usize) -> Result<usize, Error> {
        Err(Error::InvalidType("strings do not have a size".into()))
    }

    fn min_size(&self) -> usize {
        self.length.min_size()
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        Err(Error::InvalidType("strings do not have a fixed size".into()))
    }
}
