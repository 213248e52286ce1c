//! Percentage helpers
//!
//! None of these functions return NaN or infinity: every zero denominator is
//! defined to yield 0.

/// Lowest modifier accepted; anything below would flip the sign of a metric.
pub const MIN_MODIFIER_PERCENT: f64 = -100.0;

/// Scale a value by a percentage delta (`10.0` means +10%).
///
/// Modifiers below -100% are clamped, so the result is never of the opposite
/// sign to `value`.
pub fn apply_modifier(value: f64, modifier_percent: f64) -> f64 {
    if !modifier_percent.is_finite() {
        return value;
    }

    let modifier = modifier_percent.max(MIN_MODIFIER_PERCENT);
    value * (1.0 + modifier / 100.0)
}

/// Percent change from `baseline` to `value`, relative to the baseline's
/// magnitude. A zero baseline yields 0.
pub fn percent_change(baseline: f64, value: f64) -> f64 {
    safe_ratio(value - baseline, baseline.abs()) * 100.0
}

/// `numerator / denominator`, or 0 when the quotient is not finite
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }

    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Clamp a percentage to `[0, 100]`; NaN becomes 0
pub fn clamp_percentage(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}
