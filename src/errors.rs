// ============================================================================
// Numeric Errors
// Error types for the fallible entry points of the fixed-point type
// ============================================================================

use std::fmt;

/// Errors returned by the explicitly checked entry points.
///
/// The operator path never returns these: division by zero on `/` is fatal
/// (panic) and 128-bit overflow on `+`, `-`, `*` wraps by design. Only the
/// boundary conversions and the `checked_*` variants report errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Value does not fit in 64 integer bits
    Overflow,
    /// Attempted division by zero or inversion of zero
    DivisionByZero,
    /// Floating-point input was NaN or infinite
    NonFinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: value exceeds 64 integer bits")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::NonFinite => write!(f, "non-finite input: value is NaN or infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: value exceeds 64 integer bits"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::NonFinite);
    }
}
