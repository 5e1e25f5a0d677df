use serde::{Deserialize, Serialize};

use crate::models::SizingMode;

/// Derived figures for one take-profit slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TakeProfitOutcome {
    pub enabled: bool,
    pub target_price: Option<f64>,
    pub weight_percent: u32,
    pub quantity: f64,
    pub exit_fee_rate: f64,
    pub exit_fee: f64,
    pub gross_profit: f64,
    pub gross_profit_percent: f64,
    pub net_profit: f64,
    pub net_profit_percent: f64,
}

/// Full exit at the stop. Only present when the stop-loss is valid and the
/// quantity is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossScenario {
    pub gross_loss: f64,
    pub gross_loss_percent: f64,
    pub net_loss: f64,
    pub net_loss_percent: f64,
}

/// Liquidation price estimates. NaN means undefined, +inf means the
/// position cannot be liquidated by a price rise in practice (1x short).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidationEstimate {
    #[serde(with = "non_finite")]
    pub isolated: f64,
    #[serde(with = "non_finite")]
    pub real: f64,
}

impl LiquidationEstimate {
    pub fn undefined() -> Self {
        Self {
            isolated: f64::NAN,
            real: f64::NAN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub effective_sizing_mode: SizingMode,
    pub is_stop_loss_valid: bool,
    pub price_difference: f64,

    // Sizing
    pub quantity: f64,
    pub position_size: f64,
    pub margin: f64,
    pub required_margin: f64,
    pub exceeds_account: bool,
    pub risk_amount: f64,

    // Fees
    pub entry_fee: f64,
    pub take_profit_exit_fees: f64,
    pub stop_loss_exit_fee: f64,

    // Profit
    pub take_profits: Vec<TakeProfitOutcome>,
    pub weighted_gross_profit: f64,
    pub weighted_gross_profit_percent: f64,
    pub weighted_net_profit: f64,
    pub weighted_net_profit_percent: f64,

    // Loss
    pub loss: Option<LossScenario>,

    // Ratios, NaN when undefined
    #[serde(with = "non_finite")]
    pub net_risk_reward: f64,
    #[serde(with = "non_finite")]
    pub gross_risk_reward: f64,

    pub liquidation: LiquidationEstimate,
}

impl CalculationResult {
    /// Idle state: returned while entry price or leverage is not usable.
    pub fn neutral(slot_count: usize) -> Self {
        Self {
            effective_sizing_mode: SizingMode::FixedMargin,
            is_stop_loss_valid: false,
            price_difference: 0.0,
            quantity: 0.0,
            position_size: 0.0,
            margin: 0.0,
            required_margin: 0.0,
            exceeds_account: false,
            risk_amount: 0.0,
            entry_fee: 0.0,
            take_profit_exit_fees: 0.0,
            stop_loss_exit_fee: 0.0,
            take_profits: vec![TakeProfitOutcome::default(); slot_count],
            weighted_gross_profit: 0.0,
            weighted_gross_profit_percent: 0.0,
            weighted_net_profit: 0.0,
            weighted_net_profit_percent: 0.0,
            loss: None,
            net_risk_reward: f64::NAN,
            gross_risk_reward: f64::NAN,
            liquidation: LiquidationEstimate::undefined(),
        }
    }

    pub fn net_risk_reward(&self) -> Option<f64> {
        Some(self.net_risk_reward).filter(|r| !r.is_nan())
    }

    pub fn gross_risk_reward(&self) -> Option<f64> {
        Some(self.gross_risk_reward).filter(|r| !r.is_nan())
    }

    pub fn total_fees_at_targets(&self) -> f64 {
        self.entry_fee + self.take_profit_exit_fees
    }

    pub fn total_fees_at_stop(&self) -> f64 {
        self.entry_fee + self.stop_loss_exit_fee
    }
}

/// JSON has no NaN or infinity. NaN is written as `null`, infinities as
/// the strings `"inf"` / `"-inf"`, and all three are read back.
mod non_finite {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else if *value == f64::INFINITY {
            serializer.serialize_str("inf")
        } else if *value == f64::NEG_INFINITY {
            serializer.serialize_str("-inf")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(f64::NAN),
            Some(Repr::Number(v)) => Ok(v),
            Some(Repr::Text(text)) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, null, \"inf\" or \"-inf\"",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_has_undefined_ratios() {
        let r = CalculationResult::neutral(3);
        assert_eq!(r.take_profits.len(), 3);
        assert!(r.net_risk_reward().is_none());
        assert!(r.gross_risk_reward().is_none());
        assert!(r.liquidation.isolated.is_nan());
        assert!(!r.exceeds_account);
        assert!(!r.is_stop_loss_valid);
        assert_eq!(r.quantity, 0.0);
    }

    #[test]
    fn non_finite_fields_keep_their_meaning_in_json() {
        let mut r = CalculationResult::neutral(1);
        r.net_risk_reward = 2.5;
        r.liquidation = LiquidationEstimate {
            isolated: f64::INFINITY,
            real: f64::NEG_INFINITY,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["net_risk_reward"], 2.5);
        assert!(json["gross_risk_reward"].is_null());
        assert_eq!(json["liquidation"]["isolated"], "inf");
        assert_eq!(json["liquidation"]["real"], "-inf");

        let back: CalculationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.net_risk_reward, 2.5);
        assert!(back.gross_risk_reward.is_nan());
        assert_eq!(back.liquidation.isolated, f64::INFINITY);
        assert_eq!(back.liquidation.real, f64::NEG_INFINITY);
    }

    #[test]
    fn unknown_text_is_rejected() {
        let err = serde_json::from_str::<LiquidationEstimate>(r#"{"isolated":"none","real":1.0}"#);
        assert!(err.is_err());
        let ok: LiquidationEstimate = serde_json::from_str(r#"{"isolated":42,"real":null}"#).unwrap();
        assert_eq!(ok.isolated, 42.0);
        assert!(ok.real.is_nan());
    }
}
