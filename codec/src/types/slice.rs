//! Codec for sequences whose length is part of the value.

use crate::{
    util::{read_items, read_length, write_length},
    Codec, Error, SharedCodec, Type, Value,
};
use bytes::BytesMut;

/// Encodes the element count with an integer codec, followed by each element.
#[derive(Clone, Debug)]
pub struct Slice {
    element: SharedCodec,
    length: SharedCodec,
}

impl Slice {
    /// Creates a slice codec. The `length` codec must produce a native integer type, and
    /// every `element` must encode to at least one byte.
    pub fn new(element: SharedCodec, length: SharedCodec) -> Result<Self, Error> {
        let prefix = length.value_type();
        if !prefix.is_integer() {
            return Err(Error::InvalidConfig(format!(
                "length prefix must be an integer, found {prefix:?}"
            )));
        }
        // A decoded count is only bounded by the input if each element consumes input.
        if element.min_size() == 0 {
            return Err(Error::InvalidConfig(format!(
                "{:?} elements may encode to zero bytes",
                element.value_type()
            )));
        }
        Ok(Self { element, length })
    }
}

impl Codec for Slice {
    fn value_type(&self) -> Type {
        Type::Slice(Box::new(self.element.value_type()))
    }

    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error> {
        let Value::List(items) = value else {
            return Err(Error::NotASlice(format!("found {}", value.kind())));
        };
        write_length(self.length.as_ref(), items.len(), buf)?;
        for item in items {
            self.element.write(item, buf)?;
        }
        Ok(())
    }

    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error> {
        let count = read_length(self.length.as_ref(), buf)?;
        read_items(self.element.as_ref(), buf, count).map(Value::List)
    }

    fn size(&self, num_items: usize) -> Result<usize, Error> {
        let prefix = self.length.fixed_size()?;
        let element = self.element.fixed_size()?;
        num_items
            .checked_mul(element)
            .and_then(|items| items.checked_add(prefix))
            .ok_or_else(|| Error::InvalidType("slice size overflows usize".into()))
    }

    fn min_size(&self) -> usize {
        self.length.min_size()
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        Err(Error::InvalidType("slices do not have a fixed size".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, Builder, Empty, IntoValue, NotNil, Record};

    #[test]
    fn test_slice() {
        let b = Builder::BIG_ENDIAN;
        let codec = Slice::new(b.int16(), b.uint8()).unwrap();
        assert_eq!(codec.value_type(), Type::Slice(Box::new(Type::I16)));

        for value in [vec![], vec![-1i16], vec![1i16, 2, 3]] {
            let value = value.into_value();
            let encoded = codec.encode(&value, BytesMut::new()).unwrap();
            let (decoded, rest) = codec.decode(&encoded).unwrap();
            assert_eq!(decoded, value);
            assert!(rest.is_empty());
        }

        let encoded = codec
            .encode(&vec![-1i16, 2].into_value(), BytesMut::new())
            .unwrap();
        assert_eq!(&encoded[..], &[0x02, 0xFF, 0xFF, 0x00, 0x02]);
    }

    #[test]
    fn test_overflowing_length_prefix() {
        let b = Builder::BIG_ENDIAN;
        let codec = Slice::new(b.uint8(), b.uint8()).unwrap();
        assert!(codec
            .encode(&vec![0u8; 255].into_value(), BytesMut::new())
            .is_ok());
        assert!(matches!(
            codec.encode(&vec![0u8; 256].into_value(), BytesMut::new()),
            Err(Error::SliceWrongLen(_))
        ));
    }

    #[test]
    fn test_non_integer_length_prefix() {
        let b = Builder::LITTLE_ENDIAN;
        for length in [b.bool(), b.float32(), b.oracle_id(), b.big_int(16, false).unwrap()] {
            assert!(matches!(
                Slice::new(b.uint8(), length),
                Err(Error::InvalidConfig(_))
            ));
        }
        assert!(Slice::new(b.uint8(), b.uint(3).unwrap()).is_ok());
    }

    #[test]
    fn test_zero_size_elements() {
        let b = Builder::BIG_ENDIAN;
        let zero_size = [
            Empty.shared(),
            Array::new(0, b.string(10).unwrap()).shared(),
            Record::new([("a", Empty.shared())]).unwrap().shared(),
            NotNil::new(Empty.shared()).shared(),
        ];
        for element in zero_size {
            assert!(matches!(
                Slice::new(element, b.uint32()),
                Err(Error::InvalidConfig(_))
            ));
        }

        // A maximal count with no element bytes behind it is rejected before allocating.
        let codec = Slice::new(Array::new(1, b.uint8()).shared(), b.uint32()).unwrap();
        assert!(matches!(
            codec.decode(&[0xFF, 0xFF, 0xFF, 0xFF]),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_decode_errors() {
        let b = Builder::LITTLE_ENDIAN;

        // Length prefix claims more elements than remain.
        let codec = Slice::new(b.uint32(), b.uint16()).unwrap();
        assert!(matches!(
            codec.decode(&[0x02, 0x00, 0x01, 0x00, 0x00, 0x00]),
            Err(Error::InvalidEncoding(_))
        ));

        // Truncated length prefix.
        assert!(matches!(codec.decode(&[0x02]), Err(Error::InvalidEncoding(_))));

        // Negative length prefix.
        let codec = Slice::new(b.uint8(), b.int8()).unwrap();
        assert!(matches!(
            codec.decode(&[0x80, 0x00]),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_not_a_slice() {
        let b = Builder::BIG_ENDIAN;
        let codec = Slice::new(b.uint8(), b.uint8()).unwrap();
        assert!(matches!(
            codec.encode(&Value::String("abc".into()), BytesMut::new()),
            Err(Error::NotASlice(_))
        ));
    }

    #[test]
    fn test_sizes() {
        let b = Builder::BIG_ENDIAN;
        let codec = Slice::new(b.uint64(), b.uint16()).unwrap();
        assert_eq!(codec.size(0).unwrap(), 2);
        assert_eq!(codec.size(10).unwrap(), 82);
        assert!(matches!(codec.fixed_size(), Err(Error::InvalidType(_))));

        // Nested slices have no meaningful size for a single count.
        let nested = Slice::new(codec.shared(), b.uint8()).unwrap();
        assert!(matches!(nested.size(3), Err(Error::InvalidType(_))));

        let value = vec![vec![1u64], vec![], vec![2u64, 3]].into_value();
        let encoded = nested.encode(&value, BytesMut::new()).unwrap();
        assert_eq!(encoded.len(), 1 + (2 + 8) + 2 + (2 + 16));
        assert_eq!(nested.decode(&encoded).unwrap().0, value);
    }

    #[test]
    fn test_wide_native_prefix() {
        let b = Builder::LITTLE_ENDIAN;
        let codec = Slice::new(b.uint8(), b.uint(3).unwrap()).unwrap();
        assert_eq!(codec.size(4).unwrap(), 7);
        let value = vec![7u8; 4].into_value();
        let encoded = codec.encode(&value, BytesMut::new()).unwrap();
        assert_eq!(&encoded[..], &[4, 0, 0, 7, 7, 7, 7]);
        assert_eq!(codec.decode(&encoded).unwrap().0, value);
    }
}
