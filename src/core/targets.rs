//! Percent and price are two views of the same offset from entry.
//!
//! Percentages are stored as non-negative magnitudes; the direction and
//! the target's role decide which side of entry the price lands on.

use crate::core::numeric::positive;
use crate::models::{TargetRole, TradeDirection};

/// Price at `percent` away from `entry`, on the side implied by the role.
///
/// Returns `None` when entry or percent is not positive, or when the
/// resulting price would not be positive (e.g. a 100% long stop).
pub fn price_from_percent(
    entry: f64,
    percent: f64,
    direction: TradeDirection,
    role: TargetRole,
) -> Option<f64> {
    let entry = positive(Some(entry))?;
    let percent = positive(Some(percent))?;

    let factor = if role.is_above_entry(direction) {
        1.0 + percent / 100.0
    } else {
        1.0 - percent / 100.0
    };
    positive(Some(entry * factor))
}

/// Distance between `price` and `entry` as a percentage of entry.
///
/// Always a magnitude. A zero distance is unresolved, the same as a
/// non-positive entry or price.
pub fn percent_from_price(entry: f64, price: f64) -> Option<f64> {
    let entry = positive(Some(entry))?;
    let price = positive(Some(price))?;
    positive(Some((price - entry).abs() / entry * 100.0))
}

/// Usable stop-loss price: positive and strictly on the loss side of entry.
pub fn valid_stop_price(entry: f64, price: Option<f64>, direction: TradeDirection) -> Option<f64> {
    let price = positive(price)?;
    if direction.is_loss_side(entry, price) {
        Some(price)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_profit_is_above_entry() {
        let p = price_from_percent(100.0, 10.0, TradeDirection::Long, TargetRole::Profit).unwrap();
        assert!((p - 110.0).abs() < 1e-9);
    }

    #[test]
    fn long_loss_is_below_entry() {
        let p = price_from_percent(80220.0, 4.5, TradeDirection::Long, TargetRole::Loss).unwrap();
        assert!((p - 76610.1).abs() < 1e-6);
    }

    #[test]
    fn short_profit_is_below_and_loss_above() {
        let tp = price_from_percent(200.0, 5.0, TradeDirection::Short, TargetRole::Profit).unwrap();
        let sl = price_from_percent(200.0, 5.0, TradeDirection::Short, TargetRole::Loss).unwrap();
        assert!((tp - 190.0).abs() < 1e-9);
        assert!((sl - 210.0).abs() < 1e-9);
    }

    #[test]
    fn unresolved_inputs() {
        assert!(price_from_percent(0.0, 5.0, TradeDirection::Long, TargetRole::Profit).is_none());
        assert!(price_from_percent(100.0, 0.0, TradeDirection::Long, TargetRole::Profit).is_none());
        assert!(price_from_percent(100.0, -2.0, TradeDirection::Long, TargetRole::Profit).is_none());
        assert!(price_from_percent(100.0, 100.0, TradeDirection::Long, TargetRole::Loss).is_none());
        assert!(percent_from_price(0.0, 5.0).is_none());
        assert!(percent_from_price(100.0, 0.0).is_none());
        assert!(percent_from_price(100.0, 100.0).is_none());
    }

    #[test]
    fn percent_is_a_magnitude() {
        assert!((percent_from_price(100.0, 95.0).unwrap() - 5.0).abs() < 1e-9);
        assert!((percent_from_price(100.0, 105.0).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn stop_on_wrong_side_is_rejected() {
        assert_eq!(valid_stop_price(100.0, Some(95.0), TradeDirection::Long), Some(95.0));
        assert_eq!(valid_stop_price(100.0, Some(105.0), TradeDirection::Long), None);
        assert_eq!(valid_stop_price(100.0, Some(100.0), TradeDirection::Long), None);
        assert_eq!(valid_stop_price(100.0, Some(105.0), TradeDirection::Short), Some(105.0));
        assert_eq!(valid_stop_price(100.0, Some(95.0), TradeDirection::Short), None);
        assert_eq!(valid_stop_price(100.0, None, TradeDirection::Short), None);
    }
}
