//! Encode and decode values by the name of their logical type.
//!
//! A [Registry] collects named codecs at setup. It is then frozen into a [Bridge], which
//! callers use without knowing the shape behind each name.
//!
//! # Example
//!
//! ```
//! use oracle_codec::{Array, Bridge, Builder, Codec, Config, Fields, Record, Registry, Value};
//!
//! let cfg = Config::default();
//! let b = Builder::from(cfg.encoding);
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         "report",
//!         Record::new([
//!             ("round", b.uint32()),
//!             ("observers", Array::new(4, b.oracle_id()).shared()),
//!         ])
//!         .unwrap()
//!         .shared(),
//!     )
//!     .unwrap();
//! let bridge = Bridge::new(registry, &cfg);
//!
//! let value = bridge.create_value("report").unwrap();
//! let encoded = bridge.encode(&value, "report").unwrap();
//! assert_eq!(encoded.len(), 8);
//! assert_eq!(bridge.decode(&encoded, "report").unwrap(), value);
//! assert_eq!(bridge.max_encoding_size(10, "report").unwrap(), 80);
//! ```

use crate::{Config, Error, FromValue, SharedCodec, Type, Value};
use bytes::{Bytes, BytesMut};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, trace};

/// Adapts a caller's value to a target [Type].
///
/// [Bridge::encode] converts values to the codec's type before encoding, and
/// [Bridge::decode_as] converts decoded values to the caller's type.
pub trait Converter: Send + Sync {
    fn convert(&self, value: Value, target: &Type) -> Result<Value, Error>;
}

/// Returns values unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl Converter for Identity {
    fn convert(&self, value: Value, _: &Type) -> Result<Value, Error> {
        Ok(value)
    }
}

/// Converts native integers between widths and signedness, failing if a value does not fit.
///
/// Lists, records, and pointers are converted element by element. Values of any other kind
/// are returned unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Widening;

impl Converter for Widening {
    fn convert(&self, value: Value, target: &Type) -> Result<Value, Error> {
        match (value, target) {
            (Value::List(items), Type::Array(_, elem) | Type::Slice(elem)) => items
                .into_iter()
                .map(|item| self.convert(item, elem))
                .collect::<Result<_, _>>()
                .map(Value::List),
            (Value::Record(mut fields), Type::Record(members)) => {
                let mut output = crate::Fields::with_capacity(members.len());
                for (name, ty) in members {
                    if let Some(field) = fields.take(name) {
                        output.insert(name.as_str(), self.convert(field, ty)?);
                    }
                }
                // Leave unknown fields in place so the codec reports them.
                for (name, field) in fields {
                    output.insert(name, field);
                }
                Ok(Value::Record(output))
            }
            (Value::Pointer(Some(inner)), Type::Pointer(elem)) => Ok(Value::Pointer(Some(
                Box::new(self.convert(*inner, elem)?),
            ))),
            (value, target) if target.is_integer() => match value.as_i128() {
                Some(v) => Value::integer(target, v).ok_or_else(|| {
                    Error::InvalidType(format!("{v} does not fit in {target:?}"))
                }),
                None => Ok(value),
            },
            (value, _) => Ok(value),
        }
    }
}

/// Named codecs collected at setup.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    codecs: BTreeMap<String, SharedCodec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `codec` under `name`. Names must be non-empty and unique.
    pub fn register(&mut self, name: impl Into<String>, codec: SharedCodec) -> Result<(), Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidConfig("type name is empty".into()));
        }
        if self.codecs.contains_key(&name) {
            return Err(Error::InvalidConfig(format!("duplicate type {name}")));
        }
        debug!(name = %name, ty = ?codec.value_type(), "registered codec");
        self.codecs.insert(name, codec);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

/// Name-keyed access to a frozen [Registry].
#[derive(Clone)]
pub struct Bridge {
    codecs: BTreeMap<String, SharedCodec>,
    allow_trailing_bytes: bool,
    converter: Arc<dyn Converter>,
}

impl Bridge {
    /// Creates a bridge with the trailing byte policy from `cfg`.
    pub fn new(registry: Registry, cfg: &Config) -> Self {
        debug!(
            types = registry.len(),
            encoding = %cfg.encoding,
            allow_trailing_bytes = cfg.allow_trailing_bytes,
            "created bridge"
        );
        Self {
            codecs: registry.codecs,
            allow_trailing_bytes: cfg.allow_trailing_bytes,
            converter: Arc::new(Identity),
        }
    }

    /// Creates a bridge that rejects bytes left over after decoding.
    pub fn strict(registry: Registry) -> Self {
        Self::new(
            registry,
            &Config {
                allow_trailing_bytes: false,
                ..Default::default()
            },
        )
    }

    /// Creates a bridge that ignores bytes left over after decoding.
    pub fn lenient(registry: Registry) -> Self {
        Self::new(
            registry,
            &Config {
                allow_trailing_bytes: true,
                ..Default::default()
            },
        )
    }

    /// Replaces the [Converter] (by default [Identity]).
    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    /// Returns the codec registered under `name`.
    pub fn codec(&self, name: &str) -> Result<&SharedCodec, Error> {
        self.codecs
            .get(name)
            .ok_or_else(|| Error::InvalidType(format!("unknown type {name}")))
    }

    /// Names of all registered types, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(String::as_str)
    }

    /// Allocates the zero value of the type registered under `name`.
    pub fn create_value(&self, name: &str) -> Result<Value, Error> {
        Ok(self.codec(name)?.value_type().zero())
    }

    /// Encodes `value` with the codec registered under `name`.
    pub fn encode(&self, value: &Value, name: &str) -> Result<Bytes, Error> {
        let codec = self.codec(name)?;
        let value = self.converter.convert(value.clone(), &codec.value_type())?;
        let encoded = codec.encode(&value, BytesMut::new())?;
        Ok(encoded.freeze())
    }

    /// Decodes a value of the type registered under `name`.
    pub fn decode(&self, bytes: &[u8], name: &str) -> Result<Value, Error> {
        let codec = self.codec(name)?;
        let (value, rest) = codec.decode(bytes)?;
        if !rest.is_empty() {
            if !self.allow_trailing_bytes {
                debug!(name, trailing = rest.len(), "rejected trailing bytes");
                return Err(Error::InvalidEncoding(format!(
                    "{} bytes left after decoding {name}",
                    rest.len()
                )));
            }
            trace!(name, trailing = rest.len(), "ignored trailing bytes");
        }
        Ok(value)
    }

    /// Decodes a value of the type registered under `name` and converts it to `target`.
    pub fn decode_as(&self, bytes: &[u8], name: &str, target: &Type) -> Result<Value, Error> {
        let value = self.decode(bytes, name)?;
        self.converter.convert(value, target)
    }

    /// Decodes a value of the type registered under `name` into a native type.
    pub fn decode_into<T: FromValue>(&self, bytes: &[u8], name: &str) -> Result<T, Error> {
        T::from_value(self.decode(bytes, name)?)
    }

    /// Returns the encoded length of `num_items` values of the type registered under `name`.
    pub fn max_encoding_size(&self, num_items: usize, name: &str) -> Result<usize, Error> {
        self.codec(name)?.size_at_top_level(num_items)
    }

    /// Returns the decoded length of `num_items` values of the type registered under `name`.
    pub fn max_decoding_size(&self, num_items: usize, name: &str) -> Result<usize, Error> {
        self.codec(name)?.size_at_top_level(num_items)
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("types", &self.codecs.keys().collect::<Vec<_>>())
            .field("allow_trailing_bytes", &self.allow_trailing_bytes)
            .finish()
    }
}
