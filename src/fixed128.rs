// ============================================================================
// Fixed128
// Signed 64.64 fixed-point value backed by a single i128
// ============================================================================

use crate::errors::{NumericError, NumericResult};
use crate::wide;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Not, Sub, SubAssign};

/// Scale used for the fractional word in f64 conversions.
///
/// The fractional remainder is multiplied by this on the way in and divided
/// by it on the way out. Written as `u64::MAX` (the maximum fractional word),
/// which f64 rounds up to exactly `2^64`; the same constant is used in both
/// directions so round trips stay symmetric. Callers depend on the exact bit
/// patterns this produces, so the scale is part of the conversion contract.
const FRAC_SCALE: f64 = u64::MAX as f64;

/// Signed fixed-point number in 64.64 format.
///
/// Internally stores `value * 2^64` as an `i128`: the high 64 bits hold the
/// integer part, the low 64 bits hold the fraction as a multiple of `2^-64`.
/// Sign is two's complement on the full 128-bit word, so comparison and
/// additive arithmetic are plain integer operations on the raw value. The
/// widening multiply/divide paths work sign-and-magnitude: extract signs,
/// operate on absolute values, reapply the combined sign.
///
/// # Value Range
/// - Minimum: `-2^63` (integer part), exactly `-9_223_372_036_854_775_808.0`
/// - Maximum: just under `+2^63`
/// - Precision: `2^-64`
///
/// # Overflow
/// All arithmetic wraps beyond the 128-bit range. No overflow detection is
/// provided; callers needing it must bound-check inputs themselves.
///
/// # Example
/// ```rust
/// use fixed128::Fixed128;
///
/// let dt = Fixed128::from(10i64) / Fixed128::from(4i64); // 2.5 exactly
/// assert_eq!(dt.integer_part(), 2);
/// assert_eq!(dt.fractional_part(), 1 << 63);
/// ```
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Fixed128(i128);

impl Fixed128 {
    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0)
    pub const ONE: Self = Self(1i128 << 64);

    /// Maximum representable value (just under 2^63)
    pub const MAX: Self = Self(i128::MAX);

    /// Minimum representable value (-2^63 exactly)
    pub const MIN: Self = Self(i128::MIN);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from the raw internal representation (`value * 2^64`).
    #[inline]
    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    /// Create from an integer part and a fractional word.
    ///
    /// The magnitude is `|hi| << 64 | lo` and the sign is taken from `hi`;
    /// `lo` is always treated as unsigned regardless of `hi`'s sign, so
    /// `from_parts(-1, 1 << 63)` is -1.5, not -0.5. Together with
    /// [`integer_part`](Self::integer_part) and
    /// [`fractional_part`](Self::fractional_part) this is the bit-exact
    /// serialization contract for persisting or transmitting values.
    ///
    /// `hi == i64::MIN` with a nonzero `lo` exceeds the representable
    /// magnitude and wraps.
    #[inline]
    pub const fn from_parts(hi: i64, lo: u64) -> Self {
        let negative = hi < 0;
        let magnitude = ((hi.unsigned_abs() as u128) << 64) | lo as u128;
        Self::from_sign_magnitude(negative, magnitude)
    }

    /// Create from a double-precision float.
    ///
    /// The sign is recorded, the absolute value is split at `floor`, and the
    /// fractional remainder is scaled by `u64::MAX` (as f64, exactly `2^64`)
    /// and truncated. Magnitudes
    /// that need more than 63 integer bits wrap: this is a hard boundary of
    /// the format, not something the conversion repairs. NaN and infinities
    /// are the caller's bug on this path; use
    /// [`try_from_f64`](Self::try_from_f64) where inputs are untrusted.
    pub fn from_f64(value: f64) -> Self {
        let negative = value < 0.0;
        let value = value.abs();
        let hi = value.floor();
        let lo = (value - hi) * FRAC_SCALE;
        let raw = ((hi as i128) << 64).wrapping_add(lo as i128);
        Self(if negative { raw.wrapping_neg() } else { raw })
    }

    /// Checked variant of [`from_f64`](Self::from_f64).
    ///
    /// # Errors
    /// - `NonFinite` if the input is NaN or infinite
    /// - `Overflow` if the magnitude needs more than 63 integer bits
    pub fn try_from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::NonFinite);
        }
        if value.abs() >= 9_223_372_036_854_775_808.0 {
            return Err(NumericError::Overflow);
        }
        Ok(Self::from_f64(value))
    }

    /// Compose a two's-complement raw value from a sign and a magnitude.
    #[inline]
    const fn from_sign_magnitude(negative: bool, magnitude: u128) -> Self {
        let raw = magnitude as i128;
        Self(if negative { raw.wrapping_neg() } else { raw })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (`value * 2^64`).
    #[inline]
    pub const fn raw_value(self) -> i128 {
        self.0
    }

    /// Get the integer part, truncated toward zero and carrying the value's
    /// sign.
    #[inline]
    pub const fn integer_part(self) -> i64 {
        let hi = (self.0.unsigned_abs() >> 64) as i64;
        if self.0 < 0 {
            hi.wrapping_neg()
        } else {
            hi
        }
    }

    /// Get the fractional word of the absolute value, as a multiple of
    /// `2^-64`. Always unsigned; the sign lives on
    /// [`integer_part`](Self::integer_part).
    #[inline]
    pub const fn fractional_part(self) -> u64 {
        self.0.unsigned_abs() as u64
    }

    /// Convert to a double-precision float.
    ///
    /// Lossy and approximate: `f64` has 53 mantissa bits against the 127
    /// magnitude bits stored here, so values with large integer parts lose
    /// their low fraction bits entirely. The fractional word is divided by
    /// the same scale used by [`from_f64`](Self::from_f64).
    pub fn to_f64(self) -> f64 {
        let magnitude = self.0.unsigned_abs();
        let hi = (magnitude >> 64) as u64 as f64;
        let lo = (magnitude as u64) as f64 / FRAC_SCALE;
        let value = hi + lo;
        if self.0 < 0 {
            -value
        } else {
            value
        }
    }

    /// Check if the value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Check if the value is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value. Wraps for [`MIN`](Self::MIN).
    #[inline]
    pub const fn abs(self) -> Self {
        if self.0 < 0 {
            Self(self.0.wrapping_neg())
        } else {
            self
        }
    }

    // ========================================================================
    // Division & Inversion
    // ========================================================================

    /// Checked division, for boundaries that must not abort on a zero
    /// divisor. Same truncation-toward-zero result as the `/` operator.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.0 == 0 {
            return Err(NumericError::DivisionByZero);
        }
        Ok(self.div_nonzero(rhs))
    }

    /// The reciprocal `1/v` in 64.64 format, truncated toward zero.
    ///
    /// Computed as a widened division so the full 64 fraction bits of the
    /// reciprocal are retained; `invert(4)` is exactly 0.25 (fractional word
    /// `1 << 62`). Intended for repeated multiplication by a fixed rate via
    /// [`mul_by_invert`](Self::mul_by_invert).
    ///
    /// # Panics
    /// Panics if `v == 0`. Zero has no reciprocal, and a sentinel would
    /// silently poison downstream simulation arithmetic.
    pub fn invert(v: u64) -> Self {
        if v == 0 {
            tracing::error!("attempted fixed-point inversion of zero");
            panic!("Fixed128::invert called with zero");
        }
        Self(wide::div_shift_64(1u128 << 64, (v as u128) << 64) as i128)
    }

    /// Checked variant of [`invert`](Self::invert).
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `v` is zero.
    pub fn checked_invert(v: u64) -> NumericResult<Self> {
        if v == 0 {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self::invert(v))
    }

    /// Multiply by a value known to be a reciprocal (magnitude at most 1).
    ///
    /// Uses a two-partial multiply instead of the general four-partial path.
    /// For any `o` produced by [`invert`](Self::invert) the result is
    /// bit-identical to `self * o`; the cheaper algorithm is not observable.
    #[inline]
    pub fn mul_by_invert(self, o: Self) -> Self {
        let negative = (self.0 < 0) != (o.0 < 0);
        let magnitude = wide::mul_by_invert(self.0.unsigned_abs(), o.0.unsigned_abs());
        Self::from_sign_magnitude(negative, magnitude)
    }

    /// Division with a divisor already checked to be nonzero.
    #[inline]
    fn div_nonzero(self, rhs: Self) -> Self {
        let negative = (self.0 < 0) != (rhs.0 < 0);
        let magnitude = wide::div_shift_64(self.0.unsigned_abs(), rhs.0.unsigned_abs());
        Self::from_sign_magnitude(negative, magnitude)
    }
}

// ============================================================================
// Integer Conversions
// ============================================================================

impl From<i64> for Fixed128 {
    /// Integer part `v`, fractional part zero. Sign-extends before widening.
    #[inline]
    fn from(v: i64) -> Self {
        Self((v as i128) << 64)
    }
}

impl From<i32> for Fixed128 {
    #[inline]
    fn from(v: i32) -> Self {
        Self((v as i128) << 64)
    }
}

impl From<u32> for Fixed128 {
    #[inline]
    fn from(v: u32) -> Self {
        Self((v as i128) << 64)
    }
}

impl From<u64> for Fixed128 {
    /// Integer part `v`, fractional part zero. Values at or above `2^63`
    /// exceed the signed integer range and wrap negative.
    #[inline]
    fn from(v: u64) -> Self {
        Self((v as i128) << 64)
    }
}

// ============================================================================
// Comparison
// ============================================================================

// Total order by direct signed comparison of the raw 128-bit word. Two
// values are equal iff their full representations are bit-identical.

impl PartialEq for Fixed128 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Fixed128 {}

impl PartialOrd for Fixed128 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Ord for Fixed128 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Hash for Fixed128 {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Default for Fixed128 {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

// ============================================================================
// Additive Operators (exact, wrapping)
// ============================================================================

impl Add for Fixed128 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Fixed128 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed128 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Fixed128 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fixed128 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(self.0.wrapping_neg())
    }
}

impl Not for Fixed128 {
    type Output = Self;

    /// Raw-level logical NOT of the signed 128-bit word: raw 1 if the word
    /// is zero, raw 0 otherwise. A low-level predicate escape hatch, not
    /// numeric negation; note the result is `2^-64`, not 1.0.
    #[inline]
    fn not(self) -> Self::Output {
        Self((self.0 == 0) as i128)
    }
}

// ============================================================================
// Multiplicative Operators (widened, truncating)
// ============================================================================

impl Mul for Fixed128 {
    type Output = Self;

    /// Widening multiply: the full 256-bit product of the two raw values is
    /// formed from four 64x64 partials, shifted right by 64 to renormalize,
    /// and truncated toward zero on the magnitude. Integer bits beyond 128
    /// wrap.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let negative = (self.0 < 0) != (rhs.0 < 0);
        let magnitude = wide::mul_shift_64(self.0.unsigned_abs(), rhs.0.unsigned_abs());
        Self::from_sign_magnitude(negative, magnitude)
    }
}

impl MulAssign for Fixed128 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for Fixed128 {
    type Output = Self;

    /// Widened division: `(raw << 64) / rhs.raw`, truncated toward zero.
    /// Truncation matches multiplication's, so `(a * b) / b` recovers `a`
    /// to within one unit in the last fractional bit for `|b| >= 1`.
    ///
    /// # Panics
    /// Panics on a zero divisor. Use [`Fixed128::checked_div`] at boundaries
    /// that must not abort.
    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        if rhs.0 == 0 {
            tracing::error!("attempted fixed-point division by zero");
            panic!("Fixed128 division by zero");
        }
        self.div_nonzero(rhs)
    }
}

impl DivAssign for Fixed128 {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Fixed128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed128({}, raw={:#034x})", self, self.0)
    }
}

impl fmt::Display for Fixed128 {
    /// Exact decimal rendering of the stored value, digits generated from
    /// the fractional word by repeated multiplication by ten. Terminates
    /// because the fraction is a multiple of 2^-64 (at most 64 digits).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        if self.0 < 0 {
            write!(f, "-")?;
        }
        write!(f, "{}", (magnitude >> 64) as u64)?;

        let mut frac = magnitude & wide::MASK_LO;
        if frac == 0 {
            return Ok(());
        }
        write!(f, ".")?;
        while frac != 0 {
            frac *= 10;
            write!(f, "{}", (frac >> 64) as u8)?;
            frac &= wide::MASK_LO;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
