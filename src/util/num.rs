/// Smallest `f64` that no longer fits into an `i64` (`2^63`).
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Converts an integer into the floating-point domain used for arithmetic.
///
/// Integers beyond `2^53` lose precision, which is the documented behavior of
/// the language's numeric model.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// Truncates a float toward zero and converts it to an `i64`.
///
/// # Parameters
/// - `value`: The float to convert.
///
/// # Returns
/// - `Some(i64)`: The truncated value when it is finite and in range.
/// - `None`: For NaN, infinities, and values outside the `i64` range.
///
/// # Example
/// ```
/// use marmoset::util::num::truncate_to_int;
///
/// assert_eq!(truncate_to_int(3.9), Some(3));
/// assert_eq!(truncate_to_int(-3.9), Some(-3));
/// assert_eq!(truncate_to_int(f64::INFINITY), None);
/// assert_eq!(truncate_to_int(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn truncate_to_int(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated >= I64_UPPER_BOUND || truncated < -I64_UPPER_BOUND {
        return None;
    }
    Some(truncated as i64)
}

/// Maps a language index onto a slice position.
///
/// Negative indices and indices at or beyond `len` have no position.
///
/// # Example
/// ```
/// use marmoset::util::num::checked_index;
///
/// assert_eq!(checked_index(2, 3), Some(2));
/// assert_eq!(checked_index(3, 3), None);
/// assert_eq!(checked_index(-1, 3), None);
/// ```
#[must_use]
pub fn checked_index(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&position| position < len)
}

/// Converts a collection length into a language integer, saturating at
/// `i64::MAX`.
#[must_use]
pub fn len_to_int(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
