//! Codec for a value with no encoding.

use crate::{Codec, Error, Type, Value};
use bytes::BytesMut;

/// Writes nothing and reads [Value::Empty] without consuming input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Empty;

impl Codec for Empty {
    fn value_type(&self) -> Type {
        Type::Empty
    }

    fn write(&self, _: &Value, _: &mut BytesMut) -> Result<(), Error> {
        Ok(())
    }

    fn read(&self, _: &mut &[u8]) -> Result<Value, Error> {
        Ok(Value::Empty)
    }

    fn size(&self, _: usize) -> Result<usize, Error> {
        Ok(0)
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let encoded = Empty
            .encode(&Value::Empty, BytesMut::from(&[1u8, 2][..]))
            .unwrap();
        assert_eq!(&encoded[..], &[1, 2]);
        assert_eq!(Empty.decode(&[3, 4]).unwrap(), (Value::Empty, &[3u8, 4][..]));
        assert_eq!(Empty.size(100).unwrap(), 0);
        assert_eq!(Empty.fixed_size().unwrap(), 0);
        assert_eq!(Empty.value_type().zero(), Value::Empty);
    }
}
