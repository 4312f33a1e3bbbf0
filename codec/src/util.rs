//! Helpers shared by the codec implementations.

use crate::{Codec, Error, Value};
use bytes::BytesMut;

/// Ensures that `buf` has at least `len` bytes remaining.
#[inline]
pub fn at_least(buf: &[u8], len: usize) -> Result<(), Error> {
    let remaining = buf.len();
    if remaining < len {
        return Err(Error::InvalidEncoding(format!(
            "need {len} bytes, {remaining} remaining"
        )));
    }
    Ok(())
}

/// Returns the number of bytes needed to represent `max` as an unsigned integer (at least 1).
pub fn min_width(max: usize) -> usize {
    let bits = usize::BITS - max.leading_zeros();
    usize::max(1, bits.div_ceil(8) as usize)
}

/// Largest count representable by a length prefix of `width` bytes.
fn max_count(width: usize) -> u128 {
    match u32::try_from(width * 8) {
        Ok(bits) if bits < u128::BITS => (1u128 << bits) - 1,
        _ => u128::MAX,
    }
}

/// Writes `count` with the length prefix codec `length`.
pub fn write_length(length: &dyn Codec, count: usize, buf: &mut BytesMut) -> Result<(), Error> {
    let width = length.fixed_size()?;
    if count as u128 > max_count(width) {
        return Err(Error::SliceWrongLen(format!(
            "{count} elements do not fit in a {width} byte length prefix"
        )));
    }
    let prefix = i128::try_from(count)
        .ok()
        .and_then(|count| Value::integer(&length.value_type(), count))
        .ok_or_else(|| {
            Error::SliceWrongLen(format!(
                "{count} elements do not fit in a {:?} length prefix",
                length.value_type()
            ))
        })?;
    length.write(&prefix, buf)
}

/// Reads a count with the length prefix codec `length`.
pub fn read_length(length: &dyn Codec, buf: &mut &[u8]) -> Result<usize, Error> {
    let value = length.read(buf)?;
    let count = value.as_i128().ok_or_else(|| {
        Error::Internal(format!("length prefix decoded to {}", value.kind()))
    })?;
    if count < 0 {
        return Err(Error::InvalidEncoding(format!("negative length {count}")));
    }
    usize::try_from(count)
        .map_err(|_| Error::InvalidEncoding(format!("length {count} does not fit in usize")))
}

/// Returns the fewest bytes `count` values of `element` can occupy, if it fits in a `usize`.
pub fn min_footprint(element: &dyn Codec, count: usize) -> Option<usize> {
    count.checked_mul(element.min_size())
}

/// Reads exactly `count` values with `element`.
///
/// Fails before allocating if the remaining bytes cannot possibly hold `count` values.
pub fn read_items(element: &dyn Codec, buf: &mut &[u8], count: usize) -> Result<Vec<Value>, Error> {
    match min_footprint(element, count) {
        Some(required) => at_least(buf, required)?,
        None => {
            return Err(Error::InvalidEncoding(format!(
                "{count} elements exceed the remaining {} bytes",
                buf.len()
            )))
        }
    }

    let mut items = Vec::with_capacity(count.min(buf.len().max(1)));
    for _ in 0..count {
        items.push(element.read(buf)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, Builder, Empty, Slice};
    use test_case::test_case;

    #[test_case(0, 1; "zero")]
    #[test_case(1, 1; "one")]
    #[test_case(255, 1; "u8 max")]
    #[test_case(256, 2; "u8 max plus one")]
    #[test_case(65_535, 2; "u16 max")]
    #[test_case(65_536, 3; "u16 max plus one")]
    #[test_case(u32::MAX as usize, 4; "u32 max")]
    fn test_min_width(max: usize, expected: usize) {
        assert_eq!(min_width(max), expected);
    }

    #[test]
    fn test_at_least() {
        let buf: &[u8] = &[1, 2, 3];
        assert!(at_least(buf, 3).is_ok());
        assert!(matches!(at_least(buf, 4), Err(Error::InvalidEncoding(_))));
    }

    #[test]
    fn test_max_count() {
        assert_eq!(max_count(1), 255);
        assert_eq!(max_count(2), 65_535);
        assert_eq!(max_count(8), u64::MAX as u128);
        assert_eq!(max_count(16), u128::MAX);
    }

    #[test]
    fn test_length_round_trip() {
        let length = Builder::BIG_ENDIAN.uint16();
        let mut buf = BytesMut::new();
        write_length(length.as_ref(), 513, &mut buf).unwrap();
        assert_eq!(&buf[..], &[0x02, 0x01]);
        let mut read = &buf[..];
        assert_eq!(read_length(length.as_ref(), &mut read).unwrap(), 513);
        assert!(read.is_empty());
    }

    #[test]
    fn test_signed_length_prefix() {
        let length = Builder::BIG_ENDIAN.int8();
        let mut buf = BytesMut::new();

        // Representable in 8 bits, but not by an i8.
        assert!(matches!(
            write_length(length.as_ref(), 200, &mut buf),
            Err(Error::SliceWrongLen(_))
        ));

        let mut read: &[u8] = &[0xFF];
        assert!(matches!(
            read_length(length.as_ref(), &mut read),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_read_items_rejects_implausible_count() {
        let element = Builder::BIG_ENDIAN.uint32();
        let mut buf: &[u8] = &[0; 7];
        assert!(matches!(
            read_items(element.as_ref(), &mut buf, 2),
            Err(Error::InvalidEncoding(_))
        ));
        assert!(matches!(
            read_items(element.as_ref(), &mut buf, usize::MAX),
            Err(Error::InvalidEncoding(_))
        ));
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn test_min_footprint() {
        let b = Builder::BIG_ENDIAN;
        assert_eq!(min_footprint(b.uint32().as_ref(), 3), Some(12));
        assert_eq!(min_footprint(b.uint32().as_ref(), usize::MAX), None);

        // Variable-length shapes count their length prefix.
        let text = b.string(300).unwrap();
        assert_eq!(min_footprint(text.as_ref(), 3), Some(6));
        let slice = Slice::new(b.uint64(), b.uint8()).unwrap();
        assert_eq!(min_footprint(&slice, 4), Some(4));
        let array = Array::new(2, text.clone());
        assert_eq!(min_footprint(&array, 3), Some(12));
        assert_eq!(min_footprint(&Array::new(0, text), 3), Some(0));
        assert_eq!(min_footprint(&Empty, 3), Some(0));
    }

    #[test]
    fn test_read_items_counts_variable_prefixes() {
        // Two strings need at least two bytes of length prefix each.
        let text = Builder::LITTLE_ENDIAN.string(1000).unwrap();
        let mut buf: &[u8] = &[0, 0, 0];
        assert!(matches!(
            read_items(text.as_ref(), &mut buf, 2),
            Err(Error::InvalidEncoding(_))
        ));
        let mut buf: &[u8] = &[0, 0, 0, 0];
        assert_eq!(
            read_items(text.as_ref(), &mut buf, 2).unwrap(),
            vec![Value::String(String::new()), Value::String(String::new())]
        );
    }
}
