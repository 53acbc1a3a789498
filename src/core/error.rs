//! Error handling and error types for the classifier.
//!
//! Every fallible operation returns [`Result`]. Input validation happens
//! before any training work starts, so an error never leaves a partially
//! fitted model behind.

use std::io;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum XGBError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed training or prediction input
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Hyperparameter outside its declared domain
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Prediction errors
    #[error("Prediction error: {message}")]
    Prediction { message: String },

    /// TOML configuration errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using XGBError
pub type Result<T> = std::result::Result<T, XGBError>;

impl XGBError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        XGBError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        XGBError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        XGBError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        XGBError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        XGBError::Prediction {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        XGBError::Serialization {
            message: message.into(),
        }
    }

    /// True for every error raised by up-front input or hyperparameter checks.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            XGBError::InvalidInput { .. }
                | XGBError::InvalidParameter { .. }
                | XGBError::DimensionMismatch { .. }
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            XGBError::Config { .. } => "config",
            XGBError::InvalidInput { .. } => "invalid_input",
            XGBError::InvalidParameter { .. } => "invalid_parameter",
            XGBError::DimensionMismatch { .. } => "dimension_mismatch",
            XGBError::Prediction { .. } => "prediction",
            XGBError::Serialization { .. } => "serialization",
            XGBError::IO { .. } => "io",
            XGBError::Json { .. } => "json",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::XGBError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::XGBError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! input_error {
    ($msg:expr) => {
        $crate::core::error::XGBError::invalid_input($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::XGBError::invalid_input(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
