// ============================================================================
// Fixed128 Library
// Deterministic 64.64 fixed-point arithmetic on a signed 128-bit word
// ============================================================================

//! # Fixed128
//!
//! A signed fixed-point numeric type with 64 integer bits and 64 fractional
//! bits, backed by a single `i128`. Built for simulation time and rate
//! computations where floating-point rounding drift is unacceptable across
//! long chains of additions and multiplications.
//!
//! ## Guarantees
//!
//! - **Exact additive arithmetic**: `+`, `-` and negation never round.
//!   Overflow beyond 128 bits wraps (two's complement); it is never saturated
//!   or reported.
//! - **Deterministic widening multiply/divide**: products and quotients are
//!   computed in widened intermediate arithmetic and truncated toward zero,
//!   so results are bit-identical on every platform.
//! - **Fatal on zero divisor**: dividing by zero or inverting zero panics.
//!   There is no valid fixed-point answer, and a sentinel would silently
//!   poison downstream simulation state. Use [`Fixed128::checked_div`] /
//!   [`Fixed128::checked_invert`] at boundaries that must not abort.
//!
//! ## Example
//!
//! ```rust
//! use fixed128::Fixed128;
//!
//! // 3 * 0.5 == 1.5, bit-exact
//! let half = Fixed128::from_parts(0, 1 << 63);
//! assert_eq!(Fixed128::from(3i64) * half, Fixed128::from_parts(1, 1 << 63));
//!
//! // 10 / 4 == 2.5, bit-exact
//! let q = Fixed128::from(10i64) / Fixed128::from(4i64);
//! assert_eq!(q, Fixed128::from_parts(2, 1 << 63));
//!
//! // Precomputed reciprocal for repeated multiplication
//! let quarter = Fixed128::invert(4);
//! assert_eq!(quarter, Fixed128::from_parts(0, 1 << 62));
//! assert_eq!(q.mul_by_invert(quarter), q * quarter);
//! ```

pub mod errors;
pub mod fixed128;
mod wide;

// Re-exports for convenience
pub use errors::{NumericError, NumericResult};
pub use fixed128::Fixed128;
