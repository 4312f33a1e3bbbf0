//! Core codec trait

use crate::{Error, Type, Value};
use bytes::BytesMut;
use std::{fmt::Debug, sync::Arc};

/// A codec shared between composite codecs, builders, and the bridge.
pub type SharedCodec = Arc<dyn Codec>;

/// Converts between [Value]s of one [Type] and their binary representation.
///
/// Codecs hold no mutable state after construction and may be used concurrently.
pub trait Codec: Debug + Send + Sync {
    /// The type of value produced by [Codec::read] and accepted by [Codec::write].
    fn value_type(&self) -> Type;

    /// Appends the encoding of `value` to `buf`.
    ///
    /// On error, the contents of `buf` are unspecified.
    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error>;

    /// Reads one value from the front of `buf`, advancing it past the consumed bytes.
    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error>;

    /// Returns the encoded length of a value whose outermost sequence holds `num_items`
    /// elements.
    ///
    /// Codecs without a sequence ignore `num_items` and return their fixed size. Shapes whose
    /// length depends on more than one count (such as nested slices) return
    /// [Error::InvalidType].
    fn size(&self, num_items: usize) -> Result<usize, Error>;

    /// Returns the encoded length of any value of this codec's type, if it never depends on
    /// the data.
    fn fixed_size(&self) -> Result<usize, Error>;

    /// Returns a lower bound on the encoded length of any value of this codec's type.
    ///
    /// Used to reject element counts that the remaining input cannot hold before decoding.
    fn min_size(&self) -> usize {
        self.fixed_size().unwrap_or(0)
    }

    /// Returns the encoded length of `num_items` values laid out back to back at the top
    /// level of a payload.
    fn size_at_top_level(&self, num_items: usize) -> Result<usize, Error> {
        self.size(num_items)
    }

    /// Encodes `value` after `prefix`, returning the extended buffer.
    ///
    /// (Provided method).
    fn encode(&self, value: &Value, prefix: BytesMut) -> Result<BytesMut, Error> {
        let mut buf = prefix;
        self.write(value, &mut buf)?;
        Ok(buf)
    }

    /// Decodes one value from the front of `bytes`, returning it with the unconsumed suffix.
    ///
    /// (Provided method).
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<(Value, &'a [u8]), Error> {
        let mut buf = bytes;
        let value = self.read(&mut buf)?;
        Ok((value, buf))
    }

    /// Moves this codec behind a [SharedCodec].
    fn shared(self) -> SharedCodec
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}
