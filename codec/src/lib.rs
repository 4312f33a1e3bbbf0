//! Compose binary codecs for oracle reports.
//!
//! # Overview
//!
//! A codec library designed to efficiently and safely:
//! - Encode dynamically typed values into a compact binary format
//! - Decode untrusted binary input without allocating more than the input can justify
//! - Report the exact encoded length of a value before it exists
//!
//! Codecs are assembled at setup from leaves created by a [Builder] (booleans, fixed-width
//! integers, floats, oracle identifiers, big integers, and bounded strings) and composites
//! ([Array], [Slice], [Record], [NotNil], [Empty]). The result is registered by name in a
//! [Registry], which is frozen into a [Bridge] used by callers that only know a type's name.
//!
//! Every codec is stateless after construction and can be shared across threads.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use oracle_codec::{Builder, Codec, Fields, Record, Slice, Value};
//!
//! let b = Builder::BIG_ENDIAN;
//! let report = Record::new([
//!     ("round", b.uint32()),
//!     ("prices", Slice::new(b.int64(), b.uint8()).unwrap().shared()),
//! ])
//! .unwrap();
//!
//! let value = Value::Record(
//!     Fields::new()
//!         .with("round", 7u32)
//!         .with("prices", vec![100i64, -3]),
//! );
//! let encoded = report.encode(&value, BytesMut::new()).unwrap();
//! assert_eq!(encoded.len(), 4 + 1 + 2 * 8);
//!
//! let (decoded, rest) = report.decode(&encoded).unwrap();
//! assert_eq!(decoded, value);
//! assert!(rest.is_empty());
//! ```

pub mod bridge;
pub mod builder;
pub mod codec;
pub mod config;
pub mod error;
pub mod types;
pub mod util;
pub mod value;

pub use bridge::{Bridge, Converter, Identity, Registry, Widening};
pub use builder::Builder;
pub use codec::{Codec, SharedCodec};
pub use config::{Config, EncodingType};
pub use error::Error;
pub use types::{
    array::Array,
    bigint::{BigIntCodec, NativeInt, MAX_BIG_INT_BYTES},
    empty::Empty,
    pointer::NotNil,
    primitives::{Numeric, Primitive},
    record::Record,
    slice::Slice,
    string::StringCodec,
};
pub use value::{Fields, FromValue, IntoValue, OracleId, Type, Value};
