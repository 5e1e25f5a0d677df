/// Division that yields 0 instead of NaN or infinity.
///
/// Used for every intermediate amount. Ratios and liquidation prices that
/// must stay "undefined" do not go through here.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// `amount` as a percentage of `base`, 0 when `base` is 0.
pub fn percent_of(amount: f64, base: f64) -> f64 {
    safe_div(amount, base) * 100.0
}

/// Positive, finite value or nothing.
pub fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
