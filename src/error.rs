//! Error types.
//!
//! Only [`Error`] ever reaches the caller: it covers infrastructure failures
//! such as binding to a port or reading the config file. [`LoadError`] and
//! [`BindError`] describe per-file and per-route failures of the route
//! compiler, which logs them and carries on.

use thiserror::Error;

use crate::action::BoxError;
use crate::compiler::Shape;
use crate::config::ConfigError;
use crate::verb::Verb;

/// The error type returned by roost's fallible operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

/// Why an action file contributed no action.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no action registered for `{0}`")]
    NotRegistered(String),

    #[error("action `{path_name}` failed to initialise: {source}")]
    Init {
        path_name: String,
        #[source]
        source: BoxError,
    },
}

/// Why one route could not be bound.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("method `{0}` follows no routing convention")]
    Unconventional(String),

    #[error("method `{method}` is not registered on `{action}`")]
    NotCallable { method: String, action: &'static str },

    #[error("method `{method}` is written as {found} but its name calls for {expected}")]
    ShapeMismatch { method: String, expected: Shape, found: Shape },

    #[error("router rejected `{verb} {url}`: {source}")]
    Route {
        verb: Verb,
        url: String,
        #[source]
        source: matchit::InsertError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn startup(path: &str) -> Result<Config, Error> {
        Ok(Config::from_file(path)?)
    }

    #[test]
    fn config_errors_surface_through_the_crate_error() {
        let err = startup("/nonexistent/roost.toml").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Io(_))));
        assert!(err.to_string().starts_with("config: IO error"));
    }
}
