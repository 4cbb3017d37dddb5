//! Factory configuration types.
//!
//! [`MapConfig`] is what [`CountableMapFactory`] consumes. It can be built
//! directly, converted from a [`RawValue`], or parsed from JSON text:
//!
//! ```rust
//! use ordo_map::config::{MapConfig, ScalarPolicy};
//!
//! let config: MapConfig = r#"{"data": {"a": 1}}"#.parse().unwrap();
//! assert!(config.data().is_structured());
//!
//! let policy: ScalarPolicy = "stringify".parse().unwrap();
//! assert_eq!(policy, ScalarPolicy::Stringify);
//! ```
//!
//! [`CountableMapFactory`]: crate::factory::CountableMapFactory

use crate::model::InvalidArgumentError;
use ordo_types::{Key, RawValue, Scalar};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Configuration key holding the raw data to build a map from.
pub const DATA_KEY: &str = "data";

/// Configuration of a single map build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// The raw data. Must be a map or a list when handed to a factory.
    pub data: RawValue,
}

impl MapConfig {
    /// Create a configuration for `data`.
    pub fn new(data: impl Into<RawValue>) -> Self {
        Self { data: data.into() }
    }

    /// The raw data.
    pub const fn data(&self) -> &RawValue {
        &self.data
    }

    /// Consume the configuration and return the raw data.
    pub fn into_data(self) -> RawValue {
        self.data
    }
}

impl TryFrom<RawValue> for MapConfig {
    type Error = InvalidArgumentError;

    /// Extract the configuration from a raw map with a [`DATA_KEY`] entry.
    /// Other entries are ignored.
    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        let mut map = raw.into_map().map_err(|other| {
            InvalidArgumentError::with_argument("configuration is not a map", other)
        })?;
        match map.shift_remove(&Key::from(DATA_KEY)) {
            Some(data) => Ok(Self { data }),
            None => Err(InvalidArgumentError::with_argument(
                "configuration has no `data` entry",
                RawValue::Map(map),
            )),
        }
    }
}

impl FromStr for MapConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: RawValue = serde_json::from_str(s)?;
        Ok(Self::try_from(raw)?)
    }
}

/// How [`CountableMapFactory`] normalises scalar children.
///
/// [`CountableMapFactory`]: crate::factory::CountableMapFactory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScalarPolicy {
    /// Store scalars as they are.
    #[default]
    Verbatim,
    /// Store every scalar as its string form.
    Stringify,
}

impl ScalarPolicy {
    /// Apply the policy to a scalar.
    pub fn apply(self, scalar: Scalar) -> Scalar {
        match (self, scalar) {
            (Self::Stringify, scalar @ Scalar::Str(_)) | (Self::Verbatim, scalar) => scalar,
            (Self::Stringify, scalar) => Scalar::Str(scalar.to_string()),
        }
    }
}

impl FromStr for ScalarPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verbatim" => Ok(Self::Verbatim),
            "stringify" => Ok(Self::Stringify),
            _ => Err(ConfigError::InvalidPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for ScalarPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbatim => write!(f, "verbatim"),
            Self::Stringify => write!(f, "stringify"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration text is not valid JSON.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is valid JSON but has the wrong shape.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// Invalid scalar policy string.
    #[error("invalid scalar policy: {0} (expected: verbatim, stringify)")]
    InvalidPolicy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scalar_policy() {
        assert_eq!("verbatim".parse::<ScalarPolicy>().unwrap(), ScalarPolicy::Verbatim);
        assert_eq!("stringify".parse::<ScalarPolicy>().unwrap(), ScalarPolicy::Stringify);
    }

    #[test]
    fn parse_invalid_policy() {
        let result = "shout".parse::<ScalarPolicy>();
        assert!(matches!(result, Err(ConfigError::InvalidPolicy(s)) if s == "shout"));
    }

    #[test]
    fn policy_display_roundtrip() {
        for policy in [ScalarPolicy::Verbatim, ScalarPolicy::Stringify] {
            assert_eq!(policy.to_string().parse::<ScalarPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn stringify_policy() {
        let p = ScalarPolicy::Stringify;
        assert_eq!(p.apply(Scalar::Int(3)), Scalar::from("3"));
        assert_eq!(p.apply(Scalar::Bool(true)), Scalar::from("true"));
        assert_eq!(p.apply(Scalar::from("s")), Scalar::from("s"));
        assert_eq!(ScalarPolicy::Verbatim.apply(Scalar::Int(3)), Scalar::Int(3));
    }

    #[test]
    fn parse_map_config() {
        let config: MapConfig = r#"{"data": {"a": 1}, "extra": true}"#.parse().unwrap();
        assert_eq!(config.data().get("a"), Some(&RawValue::from(1i64)));
    }

    #[test]
    fn map_config_missing_data() {
        let err = r#"{"other": 1}"#.parse::<MapConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));

        let err = MapConfig::try_from(RawValue::from(5i64)).unwrap_err();
        assert_eq!(err.argument(), Some(&RawValue::from(5i64)));
    }

    #[test]
    fn map_config_malformed_json() {
        let err = "{not json".parse::<MapConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
