// File: crates/bands-core/src/error.rs
// Summary: Errors raised when decoding host payloads or resolving plugins.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid form data: {0}")]
    InvalidFormData(#[source] serde_json::Error),
    #[error("invalid chart props: {0}")]
    InvalidChartProps(#[source] serde_json::Error),
    #[error("no chart plugin registered under `{0}`")]
    UnknownPlugin(String),
}

pub type Result<T> = std::result::Result<T, Error>;
