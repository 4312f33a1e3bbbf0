//! Codec for non-null owned references.

use crate::{Codec, Error, SharedCodec, Type, Value};
use bytes::BytesMut;

/// Encodes the referenced value with `element`. Null references cannot be encoded.
#[derive(Clone, Debug)]
pub struct NotNil {
    element: SharedCodec,
}

impl NotNil {
    pub fn new(element: SharedCodec) -> Self {
        Self { element }
    }
}

impl Codec for NotNil {
    fn value_type(&self) -> Type {
        Type::Pointer(Box::new(self.element.value_type()))
    }

    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error> {
        match value {
            Value::Pointer(Some(inner)) => self.element.write(inner, buf),
            Value::Pointer(None) => Err(Error::InvalidType("nil pointer".into())),
            other => Err(Error::InvalidType(format!(
                "expected pointer, found {}",
                other.kind()
            ))),
        }
    }

    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error> {
        let inner = self.element.read(buf)?;
        Ok(Value::Pointer(Some(Box::new(inner))))
    }

    fn size(&self, num_items: usize) -> Result<usize, Error> {
        self.element.size(num_items)
    }

    fn min_size(&self) -> usize {
        self.element.min_size()
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        self.element.fixed_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, IntoValue, Slice};

    #[test]
    fn test_not_nil() {
        let codec = NotNil::new(Builder::BIG_ENDIAN.int64());
        assert_eq!(codec.value_type(), Type::Pointer(Box::new(Type::I64)));
        assert_eq!(codec.fixed_size().unwrap(), 8);
        assert_eq!(codec.size(3).unwrap(), 8);

        let value = Box::new(-5i64).into_value();
        let encoded = codec.encode(&value, BytesMut::new()).unwrap();
        assert_eq!(&encoded[..], &(-5i64).to_be_bytes()[..]);
        assert_eq!(codec.decode(&encoded).unwrap().0, value);
    }

    #[test]
    fn test_rejects_nil_and_non_pointers() {
        let codec = NotNil::new(Builder::BIG_ENDIAN.int64());
        assert!(matches!(
            codec.encode(&Value::Pointer(None), BytesMut::new()),
            Err(Error::InvalidType(_))
        ));
        assert!(matches!(
            codec.encode(&Value::I64(1), BytesMut::new()),
            Err(Error::InvalidType(_))
        ));
    }

    #[test]
    fn test_delegates_sizes() {
        let b = Builder::LITTLE_ENDIAN;
        let codec = NotNil::new(Slice::new(b.uint32(), b.uint8()).unwrap().shared());
        assert_eq!(codec.size(2).unwrap(), 9);
        assert!(matches!(codec.fixed_size(), Err(Error::InvalidType(_))));
        assert!(matches!(codec.decode(&[1, 0]), Err(Error::InvalidEncoding(_))));
    }
}
