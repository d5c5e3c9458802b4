//! Conversion errors raised when a [`Value`](crate::Value) is demarshalled.

use thiserror::Error;

/// Error produced when a generic value cannot be turned back into a Rust type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value holds a different kind of data than the target type expects.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer value does not fit in the target integer type.
    #[error("integer overflow: {value} does not fit in {target_type}")]
    IntegerOverflow {
        value: i128,
        target_type: &'static str,
    },

    /// A float value cannot be represented in the target type.
    #[error("float conversion: {value} cannot be represented as {target_type}")]
    FloatConversion {
        value: f64,
        target_type: &'static str,
    },

    /// A null value was given to a type that cannot represent absence.
    #[error("null value cannot be converted to non-nullable {target_type}")]
    UnexpectedNull { target_type: &'static str },
}

impl ConversionError {
    /// Create a type mismatch error for target type `T`.
    pub fn mismatch<T: ?Sized>(actual: &'static str) -> Self {
        ConversionError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            actual,
        }
    }
}
