#![forbid(unsafe_code)]

//! Work-item model, variable coercion and typed configuration for the REST connector.
//!
//! Nothing in this crate performs I/O; request execution lives in `rest-connector-exec`.

pub mod config;
pub mod decode;
pub mod error;
pub mod task;

pub use crate::config::{ErrorHandlingMethod, FailureSettings, RequestConfig};
pub use crate::decode::{decode_int, decode_map, strip_whitespace};
pub use crate::error::{ConfigError, ParseError, ValidationError};
pub use crate::task::WorkItem;
