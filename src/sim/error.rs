//! Input errors rejected before a charging run starts.

use thiserror::Error;

/// Reasons a charging run cannot be started.
///
/// Every variant is raised before the first interval is processed; once a
/// run starts, the arithmetic is total and nothing fails mid-horizon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChargeError {
    /// A scalar parameter is outside its valid range.
    #[error("invalid parameter `{field}`: {message}")]
    InvalidParameter {
        /// Parameter name as used in [`ChargeParams`](super::types::ChargeParams).
        field: &'static str,
        /// Constraint that was violated.
        message: String,
    },

    /// A price series does not cover the horizon exactly.
    #[error("{series} price series has {actual} values, expected {expected}")]
    LengthMismatch {
        /// `"forecast"` or `"realized"`.
        series: &'static str,
        /// Horizon length.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// A price is NaN or infinite.
    #[error("{series} price at interval {interval} is not a finite number")]
    NonFinitePrice {
        /// `"forecast"` or `"realized"`.
        series: &'static str,
        /// Offending interval index.
        interval: usize,
    },
}

impl ChargeError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }
}
