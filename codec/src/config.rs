//! Configuration consumed at setup.
//!
//! Loading the configuration (from files, chain parameters, or the environment) is left to
//! the caller. These types only describe what the codec layer needs and can be deserialized
//! from any `serde` format.
//!
//! # Example
//!
//! ```
//! use oracle_codec::{Builder, Config, EncodingType};
//!
//! let cfg = Config {
//!     encoding: EncodingType::LittleEndian,
//!     allow_trailing_bytes: false,
//! };
//! assert_eq!(Builder::from(cfg.encoding), Builder::LITTLE_ENDIAN);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte order of multi-byte values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingType {
    #[default]
    BigEndian,
    LittleEndian,
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingType::BigEndian => write!(f, "big_endian"),
            EncodingType::LittleEndian => write!(f, "little_endian"),
        }
    }
}

/// Configuration for a [crate::Bridge] and the [crate::Builder] used to populate it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Byte order of the builder used to create codecs.
    pub encoding: EncodingType,

    /// Whether decoding tolerates bytes left over after the value.
    pub allow_trailing_bytes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let cfg: Config =
            serde_json::from_str(r#"{"encoding":"little_endian","allow_trailing_bytes":true}"#)
                .unwrap();
        assert_eq!(
            cfg,
            Config {
                encoding: EncodingType::LittleEndian,
                allow_trailing_bytes: true,
            }
        );
    }

    #[test]
    fn test_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.encoding, EncodingType::BigEndian);
        assert!(!cfg.allow_trailing_bytes);
    }

    #[test]
    fn test_unknown_encoding() {
        assert!(serde_json::from_str::<Config>(r#"{"encoding":"middle_endian"}"#).is_err());
    }

    #[test]
    fn test_round_trip() {
        let cfg = Config {
            encoding: EncodingType::LittleEndian,
            allow_trailing_bytes: false,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"encoding":"little_endian","allow_trailing_bytes":false}"#);
        assert_eq!(EncodingType::LittleEndian.to_string(), "little_endian");
    }
}
