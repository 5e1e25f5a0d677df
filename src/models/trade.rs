use serde::{Deserialize, Serialize};

use crate::core::numeric::positive;
use crate::core::targets::{percent_from_price, price_from_percent, valid_stop_price};
use crate::fees::ExchangeFeeSchedule;
use crate::models::{SizingMode, TargetRole, TargetSource, TradeDirection};

pub const MIN_LEVERAGE: u32 = 1;
pub const MAX_LEVERAGE: u32 = 125;

/// One partial-exit target. `weight_percent` is the share of the total
/// quantity closed here; enabled slots always sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeProfitSlot {
    pub enabled: bool,
    #[serde(default)]
    pub target_price: Option<f64>,
    #[serde(default)]
    pub percent_from_entry: Option<f64>,
    #[serde(default)]
    pub weight_percent: u32,
}

impl TakeProfitSlot {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            target_price: None,
            percent_from_entry: None,
            weight_percent: 0,
        }
    }

    pub fn at_price(price: f64, weight_percent: u32) -> Self {
        Self {
            enabled: true,
            target_price: Some(price),
            percent_from_entry: None,
            weight_percent,
        }
    }

    pub fn at_percent(percent: f64, weight_percent: u32) -> Self {
        Self {
            enabled: true,
            target_price: None,
            percent_from_entry: Some(percent),
            weight_percent,
        }
    }

    /// Exit price, taking the explicit price first and the percent second.
    pub fn resolved_price(&self, entry: f64, direction: TradeDirection) -> Option<f64> {
        positive(self.target_price).or_else(|| {
            self.percent_from_entry
                .and_then(|p| price_from_percent(entry, p, direction, TargetRole::Profit))
        })
    }

    /// Apply an edit to `source` and derive the other field from it.
    pub fn with_edit(
        &self,
        source: TargetSource,
        value: f64,
        entry: f64,
        direction: TradeDirection,
    ) -> Self {
        let (target_price, percent_from_entry) = match source {
            TargetSource::Price => {
                let price = positive(Some(value));
                (price, price.and_then(|p| percent_from_price(entry, p)))
            }
            TargetSource::Percent => {
                let percent = positive(Some(value));
                (
                    percent.and_then(|p| price_from_percent(entry, p, direction, TargetRole::Profit)),
                    percent,
                )
            }
        };
        Self {
            target_price,
            percent_from_entry,
            ..self.clone()
        }
    }

    pub fn with_price(&self, price: f64, entry: f64, direction: TradeDirection) -> Self {
        self.with_edit(TargetSource::Price, price, entry, direction)
    }

    pub fn with_percent(&self, percent: f64, entry: f64, direction: TradeDirection) -> Self {
        self.with_edit(TargetSource::Percent, percent, entry, direction)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopLossConfig {
    pub enabled: bool,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub percent_from_entry: Option<f64>,
}

impl StopLossConfig {
    pub fn at_price(price: f64) -> Self {
        Self {
            enabled: true,
            price: Some(price),
            percent_from_entry: None,
        }
    }

    pub fn at_percent(percent: f64) -> Self {
        Self {
            enabled: true,
            price: None,
            percent_from_entry: Some(percent),
        }
    }

    /// Stop price usable for sizing and loss, or `None` when the stop is
    /// disabled, unresolved, or sits on the profitable side of entry.
    pub fn resolved_price(&self, entry: f64, direction: TradeDirection) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        let price = positive(self.price).or_else(|| {
            self.percent_from_entry
                .and_then(|p| price_from_percent(entry, p, direction, TargetRole::Loss))
        });
        valid_stop_price(entry, price, direction)
    }

    /// Apply an edit to `source` and derive the other field from it. A
    /// price on the wrong side of entry leaves the percent unresolved.
    pub fn with_edit(
        &self,
        source: TargetSource,
        value: f64,
        entry: f64,
        direction: TradeDirection,
    ) -> Self {
        let (price, percent_from_entry) = match source {
            TargetSource::Price => {
                let price = positive(Some(value));
                let percent = valid_stop_price(entry, price, direction)
                    .and_then(|p| percent_from_price(entry, p));
                (price, percent)
            }
            TargetSource::Percent => {
                let percent = positive(Some(value));
                (
                    percent.and_then(|p| price_from_percent(entry, p, direction, TargetRole::Loss)),
                    percent,
                )
            }
        };
        Self {
            price,
            percent_from_entry,
            ..self.clone()
        }
    }

    pub fn with_price(&self, price: f64, entry: f64, direction: TradeDirection) -> Self {
        self.with_edit(TargetSource::Price, price, entry, direction)
    }

    pub fn with_percent(&self, percent: f64, entry: f64, direction: TradeDirection) -> Self {
        self.with_edit(TargetSource::Percent, percent, entry, direction)
    }
}

/// Full input snapshot for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInputs {
    pub account_size: f64,
    pub leverage: u32,
    pub entry_price: f64,
    pub direction: TradeDirection,
    pub take_profits: Vec<TakeProfitSlot>,
    #[serde(default)]
    pub stop_loss: StopLossConfig,
    pub sizing_mode: SizingMode,
    #[serde(default)]
    pub fixed_margin_amount: f64,
    #[serde(default)]
    pub risk_percent: f64,
    pub fee_schedule: ExchangeFeeSchedule,
}

impl TradeInputs {
    /// Clamp leverage into the exchange range. Zero stays zero so the
    /// calculator can report the idle state.
    pub fn clamp_leverage(leverage: u32) -> u32 {
        if leverage == 0 {
            0
        } else {
            leverage.clamp(MIN_LEVERAGE, MAX_LEVERAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tp_price_takes_precedence_over_percent() {
        let slot = TakeProfitSlot {
            enabled: true,
            target_price: Some(120.0),
            percent_from_entry: Some(5.0),
            weight_percent: 100,
        };
        assert_eq!(slot.resolved_price(100.0, TradeDirection::Long), Some(120.0));
    }

    #[test]
    fn tp_falls_back_to_percent() {
        let slot = TakeProfitSlot::at_percent(5.0, 100);
        let p = slot.resolved_price(100.0, TradeDirection::Short).unwrap();
        assert!((p - 95.0).abs() < 1e-9);
    }

    #[test]
    fn tp_edit_by_price_derives_percent() {
        let slot = TakeProfitSlot::at_percent(1.0, 100).with_price(104.0, 100.0, TradeDirection::Long);
        assert_eq!(slot.target_price, Some(104.0));
        assert!((slot.percent_from_entry.unwrap() - 4.0).abs() < 1e-9);
        assert_eq!(slot.weight_percent, 100);
    }

    #[test]
    fn tp_edit_to_zero_is_unresolved() {
        let slot = TakeProfitSlot::at_price(110.0, 100).with_percent(0.0, 100.0, TradeDirection::Long);
        assert_eq!(slot.target_price, None);
        assert_eq!(slot.percent_from_entry, None);
    }

    #[test]
    fn sl_disabled_is_never_resolved() {
        let mut sl = StopLossConfig::at_price(95.0);
        sl.enabled = false;
        assert_eq!(sl.resolved_price(100.0, TradeDirection::Long), None);
    }

    #[test]
    fn sl_wrong_side_is_invalid() {
        let sl = StopLossConfig::at_price(105.0);
        assert_eq!(sl.resolved_price(100.0, TradeDirection::Long), None);
        assert_eq!(sl.resolved_price(100.0, TradeDirection::Short), Some(105.0));
    }

    #[test]
    fn sl_edit_by_wrong_side_price_has_no_percent() {
        let sl = StopLossConfig::at_percent(2.0).with_price(101.0, 100.0, TradeDirection::Long);
        assert_eq!(sl.price, Some(101.0));
        assert_eq!(sl.percent_from_entry, None);
    }

    #[test]
    fn sl_edit_by_percent_derives_price() {
        let sl = StopLossConfig::at_price(1.0).with_percent(2.0, 100.0, TradeDirection::Short);
        assert!((sl.price.unwrap() - 102.0).abs() < 1e-9);
    }

    #[test]
    fn leverage_clamp() {
        assert_eq!(TradeInputs::clamp_leverage(0), 0);
        assert_eq!(TradeInputs::clamp_leverage(1), 1);
        assert_eq!(TradeInputs::clamp_leverage(500), MAX_LEVERAGE);
    }
}
