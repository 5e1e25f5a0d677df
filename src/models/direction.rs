use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Long,
    Short,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Long => "long",
            TradeDirection::Short => "short",
        }
    }

    /// Signed per-unit gain when exiting at `exit` after entering at `entry`.
    pub fn price_delta(self, entry: f64, exit: f64) -> f64 {
        match self {
            TradeDirection::Long => exit - entry,
            TradeDirection::Short => entry - exit,
        }
    }

    /// True when `price` is strictly on the profitable side of `entry`.
    pub fn is_profit_side(self, entry: f64, price: f64) -> bool {
        match self {
            TradeDirection::Long => price > entry,
            TradeDirection::Short => price < entry,
        }
    }

    /// True when `price` is strictly on the losing side of `entry`.
    pub fn is_loss_side(self, entry: f64, price: f64) -> bool {
        match self {
            TradeDirection::Long => price < entry,
            TradeDirection::Short => price > entry,
        }
    }
}

impl FromStr for TradeDirection {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(TradeDirection::Long),
            "short" | "sell" => Ok(TradeDirection::Short),
            _ => Err(CalcError::UnknownDirection(s.to_string())),
        }
    }
}

/// How the position quantity is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    FixedMargin,
    RiskPercent,
}

impl fmt::Display for SizingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SizingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizingMode::FixedMargin => "fixed_margin",
            SizingMode::RiskPercent => "risk_percent",
        }
    }
}

impl FromStr for SizingMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fixed_margin" | "margin" | "fixed" => Ok(SizingMode::FixedMargin),
            "risk_percent" | "risk" => Ok(SizingMode::RiskPercent),
            _ => Err(CalcError::UnknownSizingMode(s.to_string())),
        }
    }
}

/// Whether a target is meant to close the position in profit or at a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetRole {
    Profit,
    Loss,
}

impl TargetRole {
    /// Whether the target sits above entry for the given direction.
    pub fn is_above_entry(self, direction: TradeDirection) -> bool {
        matches!(
            (direction, self),
            (TradeDirection::Long, TargetRole::Profit) | (TradeDirection::Short, TargetRole::Loss)
        )
    }
}

/// The field the user last typed into; the other one is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSource {
    Price,
    Percent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_delta_signs() {
        assert!((TradeDirection::Long.price_delta(100.0, 110.0) - 10.0).abs() < 1e-12);
        assert!((TradeDirection::Short.price_delta(100.0, 110.0) + 10.0).abs() < 1e-12);
    }

    #[test]
    fn sides_exclude_entry() {
        assert!(!TradeDirection::Long.is_profit_side(100.0, 100.0));
        assert!(!TradeDirection::Long.is_loss_side(100.0, 100.0));
        assert!(TradeDirection::Short.is_loss_side(100.0, 101.0));
        assert!(TradeDirection::Short.is_profit_side(100.0, 99.0));
    }

    #[test]
    fn parse_names() {
        assert_eq!("LONG".parse::<TradeDirection>().unwrap(), TradeDirection::Long);
        assert_eq!(" short ".parse::<TradeDirection>().unwrap(), TradeDirection::Short);
        assert!("sideways".parse::<TradeDirection>().is_err());
        assert_eq!("risk-percent".parse::<SizingMode>().unwrap(), SizingMode::RiskPercent);
        assert_eq!("fixed_margin".parse::<SizingMode>().unwrap(), SizingMode::FixedMargin);
    }

    #[test]
    fn role_orientation() {
        assert!(TargetRole::Profit.is_above_entry(TradeDirection::Long));
        assert!(TargetRole::Loss.is_above_entry(TradeDirection::Short));
        assert!(!TargetRole::Loss.is_above_entry(TradeDirection::Long));
        assert!(!TargetRole::Profit.is_above_entry(TradeDirection::Short));
    }
}
