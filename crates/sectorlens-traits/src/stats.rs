//! Null-aware arithmetic for derived financial figures.
//!
//! Every quantity the engine produces is either a finite `f64` or `None`.
//! These helpers are the only place division and averaging happen, so the
//! guarantee holds by construction: a zero denominator, a missing operand or
//! an overflowing result all collapse to `None` instead of `NaN`/`inf`.

/// Keep a value only if it is finite.
#[must_use]
pub const fn finite(value: f64) -> Option<f64> {
    if value.is_finite() { Some(value) } else { None }
}

/// Divide `a` by `b`, optionally tolerating a zero denominator.
///
/// Returns `None` when either operand is missing, when `b == 0` and
/// `allow_zero` is false, or when the quotient is not finite.
#[must_use]
pub fn safe_divide(a: Option<f64>, b: Option<f64>, allow_zero: bool) -> Option<f64> {
    let (a, b) = (a?, b?);
    if !allow_zero && b == 0.0 {
        return None;
    }
    finite(a / b)
}

/// Divide `a` by `b`, treating a zero denominator as "no value".
///
/// # Examples
///
/// ```
/// use sectorlens_traits::stats::ratio;
///
/// assert_eq!(ratio(Some(500.0), Some(250.0)), Some(2.0));
/// assert_eq!(ratio(Some(500.0), Some(0.0)), None);
/// assert_eq!(ratio(None, Some(250.0)), None);
/// ```
#[must_use]
pub fn ratio(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    safe_divide(a, b, false)
}

/// Divide `a` by `b` without rejecting a zero denominator up front.
///
/// The quotient must still be finite, so a zero denominator yields `None`
/// through the finiteness check rather than the up-front guard.
#[must_use]
pub fn ratio_allow_zero(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    safe_divide(a, b, true)
}

/// Subtract `b` from `a`, propagating missing operands.
#[must_use]
pub fn difference(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    finite(a? - b?)
}

/// Multiply two optional operands, propagating missing values.
#[must_use]
pub fn product(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    finite(a? * b?)
}

/// Arithmetic mean over the present, finite values.
///
/// Missing and non-finite entries are dropped before averaging, not counted
/// as zero. An empty remainder yields `None`.
///
/// # Examples
///
/// ```
/// use sectorlens_traits::stats::mean;
///
/// assert_eq!(mean([Some(2.0), None, Some(4.0)]), Some(3.0));
/// assert_eq!(mean(Vec::<Option<f64>>::new()), None);
/// ```
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let samples: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    if samples.is_empty() {
        return None;
    }

    let count = samples.len() as f64;
    let sum: f64 = samples.iter().sum();
    if sum.is_finite() {
        return finite(sum / count);
    }
    // Each scaled sample is bounded by the largest magnitude, so this cannot overflow.
    finite(samples.iter().map(|v| v / count).sum())
}
