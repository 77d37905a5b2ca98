use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid value for `{variable}`: {source}")]
    Parse {
        variable: String,
        #[source]
        source: ParseError,
    },
}

impl ConfigError {
    pub fn parse(variable: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            variable: variable.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse map as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map value for key `{key}` must be a string, number or boolean")]
    NonScalarValue { key: String },
    #[error("invalid key/value pair: {0:?}")]
    InvalidPair(String),
    #[error("invalid integer {value:?}: {source}")]
    InvalidInteger {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("HTTP URL must not be null")]
    MissingUrl,
    #[error("HTTP URL {url:?} is invalid: {reason}")]
    InvalidUrl { url: String, reason: String },
}
