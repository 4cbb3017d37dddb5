use crate::{config::ConfigError, model::InvalidArgumentError};
use thiserror::Error;

/// Error type for [`CountableMapFactory`] and the child factories it
/// delegates to.
///
/// [`CountableMapFactory`]: super::CountableMapFactory
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Raw data or configuration could not be used.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// Configuration text could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[source] ConfigError),

    /// A custom child factory failed.
    #[error("child factory failed: {0}")]
    Child(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl FactoryError {
    /// Wrap an error raised by a custom child factory.
    pub fn child(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Child(Box::new(err))
    }

    /// Returns the invalid-argument error, if that is what this is.
    pub const fn as_invalid_argument(&self) -> Option<&InvalidArgumentError> {
        match self {
            Self::InvalidArgument(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for FactoryError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidArgument(e) => Self::InvalidArgument(e),
            other => Self::Config(other),
        }
    }
}
