use std::array::TryFromSliceError;
use thiserror::Error;

/// The primary error type for the `uwb-config-lib` crate.
#[derive(Error, Debug)]
pub enum UwbConfigError {
    #[error("Insufficient data: expected at least {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    #[error("Device MAC address is not set")]
    MissingMacAddress,

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed data: {0}")]
    Malformed(String),
}

impl From<TryFromSliceError> for UwbConfigError {
    fn from(_: TryFromSliceError) -> Self {
        UwbConfigError::Malformed("Failed to convert slice to array".to_string())
    }
}
