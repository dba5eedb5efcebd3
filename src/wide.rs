// ============================================================================
// Widening Arithmetic
// Word-level helpers for the 64.64 multiply, divide and invert paths
// ============================================================================
//
// All functions here operate on unsigned 128-bit magnitudes. The caller
// (Fixed128) extracts signs, calls in here, and reapplies the combined sign.
// Truncation is always toward zero on the magnitude; overflow of the integer
// part beyond 128 bits wraps.

/// Mask selecting the low 64 bits of a 128-bit word.
pub(crate) const MASK_LO: u128 = (1u128 << 64) - 1;

/// Computes `(a * b) >> 64`, truncated toward zero.
///
/// The raw product of two 64.64 magnitudes is a 128.128 value; shifting the
/// 256-bit product right by 64 bits renormalizes it to 64.64. The 256-bit
/// intermediate is built from four 64x64->128 partial products:
///
/// ```text
/// (a_hi*2^64 + a_lo) * (b_hi*2^64 + b_lo)
///   = a_hi*b_hi*2^128 + (a_hi*b_lo + a_lo*b_hi)*2^64 + a_lo*b_lo
/// ```
///
/// After the >>64 shift, `a_hi*b_hi` lands at bit 64, the cross terms at
/// bit 0, and only the top half of `a_lo*b_lo` survives (the discarded low
/// 64 bits are the truncation). Bits above 128 wrap.
#[inline]
pub(crate) fn mul_shift_64(a: u128, b: u128) -> u128 {
    let a_lo = a & MASK_LO;
    let a_hi = a >> 64;
    let b_lo = b & MASK_LO;
    let b_hi = b >> 64;

    // Each partial is a 64x64 product and fits in 128 bits exactly.
    let lo = (a_lo * b_lo) >> 64;
    let mid = (a_hi * b_lo).wrapping_add(a_lo * b_hi);
    let hi = (a_hi * b_hi) << 64;

    hi.wrapping_add(mid).wrapping_add(lo)
}

/// Computes `(a << 64) / b`, truncated toward zero.
///
/// The dividend is widened by 64 fractional bits before dividing so the
/// quotient of two 64.64 magnitudes keeps 64 bits of fraction. The integer
/// part of the quotient comes from the native 128-bit division; the 64
/// fraction bits are recovered from the remainder by restoring long
/// division, one bit per step. Quotient bits above 128 wrap.
///
/// The divisor must be nonzero; the caller owns the fatal zero check.
pub(crate) fn div_shift_64(a: u128, b: u128) -> u128 {
    debug_assert!(b != 0);

    let quo = a / b;
    let mut rem = a % b;
    let mut frac: u64 = 0;

    for _ in 0..64 {
        // rem < b, so 2*rem < 2*b and the subtraction below cannot wrap the
        // true value even when the shift carries out of bit 127.
        let carry = rem >> 127;
        rem <<= 1;
        frac <<= 1;
        if carry != 0 || rem >= b {
            rem = rem.wrapping_sub(b);
            frac |= 1;
        }
    }

    (quo << 64) | frac as u128
}

/// Computes `(a * b) >> 64` assuming `b <= 2^64` (a reciprocal magnitude).
///
/// With `b_hi` known to be zero the four-partial decomposition collapses to
/// two products. The result is bit-identical to [`mul_shift_64`] for every
/// `b` in range, including `b == 2^64` exactly (the reciprocal of 1).
#[inline]
pub(crate) fn mul_by_invert(a: u128, b: u128) -> u128 {
    debug_assert!(b <= 1u128 << 64);

    let a_lo = a & MASK_LO;
    let a_hi = a >> 64;

    a_hi.wrapping_mul(b).wrapping_add((a_lo * b) >> 64)
}
