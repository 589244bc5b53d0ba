/// Truncates a float toward zero for use as an array index.
///
/// Returns `None` for NaN and infinities; callers treat those indices as out
/// of range. Fractional indices round toward zero, so `a[1.9]` reads the
/// element at position 1 and `a[-0.5]` reads position 0.
///
/// ## Example
/// ```
/// use sprig::util::num::truncate_index;
///
/// assert_eq!(truncate_index(2.0), Some(2));
/// assert_eq!(truncate_index(2.9), Some(2));
/// assert_eq!(truncate_index(-0.5), Some(0));
/// assert_eq!(truncate_index(f64::NAN), None);
/// assert_eq!(truncate_index(f64::INFINITY), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn truncate_index(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }

    Some(value.trunc() as i64)
}

/// Computes the remainder of the 64-bit-integer truncations of the operands.
///
/// A zero right-hand side yields NaN, matching the float remainder
/// convention instead of trapping.
///
/// ## Example
/// ```
/// use sprig::util::num::truncated_rem;
///
/// assert_eq!(truncated_rem(7.0, 3.0), 1.0);
/// assert_eq!(truncated_rem(7.9, 3.9), 1.0);
/// assert_eq!(truncated_rem(-7.0, 3.0), -1.0);
/// assert!(truncated_rem(1.0, 0.0).is_nan());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn truncated_rem(left: f64, right: f64) -> f64 {
    let (left, right) = (left.trunc() as i64, right.trunc() as i64);
    if right == 0 {
        return f64::NAN;
    }

    (left % right) as f64
}

/// Converts a collection length to the numeric value type.
///
/// Lengths are exact up to 2^53 elements, far beyond anything a program can
/// allocate, so the conversion is a plain cast.
///
/// ## Example
/// ```
/// use sprig::util::num::len_as_f64;
///
/// assert_eq!(len_as_f64(5), 5.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn len_as_f64(value: usize) -> f64 {
    value as f64
}
