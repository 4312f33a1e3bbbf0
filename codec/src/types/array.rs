//! Codec for sequences whose length is part of the type.

use crate::{util::read_items, Codec, Error, SharedCodec, Type, Value};
use bytes::BytesMut;

/// Encodes exactly `count` elements back to back, without a length prefix.
#[derive(Clone, Debug)]
pub struct Array {
    count: usize,
    element: SharedCodec,
}

impl Array {
    pub fn new(count: usize, element: SharedCodec) -> Self {
        Self { count, element }
    }
}

impl Codec for Array {
    fn value_type(&self) -> Type {
        Type::Array(self.count, Box::new(self.element.value_type()))
    }

    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error> {
        let Value::List(items) = value else {
            return Err(Error::NotASlice(format!("found {}", value.kind())));
        };
        if items.len() != self.count {
            return Err(Error::SliceWrongLen(format!(
                "expected {} elements, found {}",
                self.count,
                items.len()
            )));
        }
        for item in items {
            self.element.write(item, buf)?;
        }
        Ok(())
    }

    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error> {
        read_items(self.element.as_ref(), buf, self.count).map(Value::List)
    }

    fn size(&self, _: usize) -> Result<usize, Error> {
        self.fixed_size()
    }

    fn min_size(&self) -> usize {
        self.count.saturating_mul(self.element.min_size())
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        let element = self.element.fixed_size()?;
        self.count
            .checked_mul(element)
            .ok_or_else(|| Error::InvalidType("array size overflows usize".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, IntoValue};

    #[test]
    fn test_array() {
        let codec = Array::new(3, Builder::LITTLE_ENDIAN.uint16());
        assert_eq!(
            codec.value_type(),
            Type::Array(3, Box::new(Type::U16))
        );
        assert_eq!(codec.fixed_size().unwrap(), 6);
        assert_eq!(codec.size(42).unwrap(), 6);

        let value = vec![1u16, 2, 0x0304].into_value();
        let encoded = codec.encode(&value, BytesMut::new()).unwrap();
        assert_eq!(&encoded[..], &[0x01, 0x00, 0x02, 0x00, 0x04, 0x03]);

        let mut input = encoded.to_vec();
        input.push(0xAA);
        let (decoded, rest) = codec.decode(&input).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(rest, &[0xAA]);
    }

    #[test]
    fn test_wrong_length() {
        let codec = Array::new(3, Builder::BIG_ENDIAN.uint8());
        assert!(matches!(
            codec.encode(&vec![1u8, 2].into_value(), BytesMut::new()),
            Err(Error::SliceWrongLen(_))
        ));
        assert!(matches!(
            codec.encode(&vec![1u8, 2, 3, 4].into_value(), BytesMut::new()),
            Err(Error::SliceWrongLen(_))
        ));
        assert!(matches!(
            codec.encode(&Value::U8(1), BytesMut::new()),
            Err(Error::NotASlice(_))
        ));
    }

    #[test]
    fn test_element_errors_propagate() {
        let codec = Array::new(2, Builder::BIG_ENDIAN.int32());
        assert!(matches!(
            codec.encode(&Value::List(vec![Value::I32(1), Value::U32(2)]), BytesMut::new()),
            Err(Error::InvalidType(_))
        ));
        assert!(matches!(
            codec.decode(&[0, 0, 0, 1, 0, 0]),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_empty_array() {
        let codec = Array::new(0, Builder::BIG_ENDIAN.int64());
        assert_eq!(codec.fixed_size().unwrap(), 0);
        let encoded = codec
            .encode(&Value::List(vec![]), BytesMut::from(&[9u8][..]))
            .unwrap();
        assert_eq!(&encoded[..], &[9]);
        assert_eq!(codec.decode(&[7]).unwrap(), (Value::List(vec![]), &[7u8][..]));

        // The element's error is reported even when no element is ever written.
        let codec = Array::new(0, Builder::BIG_ENDIAN.string(10).unwrap());
        assert!(matches!(codec.fixed_size(), Err(Error::InvalidType(_))));
        assert_eq!(codec.min_size(), 0);
        assert_eq!(codec.decode(&[7]).unwrap(), (Value::List(vec![]), &[7u8][..]));
    }

    #[test]
    fn test_variable_element_has_no_fixed_size() {
        let codec = Array::new(2, Builder::BIG_ENDIAN.string(10).unwrap());
        assert!(matches!(codec.fixed_size(), Err(Error::InvalidType(_))));
        assert!(matches!(codec.size(2), Err(Error::InvalidType(_))));

        let value = vec!["ab", ""].into_value();
        let encoded = codec.encode(&value, BytesMut::new()).unwrap();
        assert_eq!(&encoded[..], &[2, b'a', b'b', 0]);
        assert_eq!(codec.decode(&encoded).unwrap().0, value);
    }
}
