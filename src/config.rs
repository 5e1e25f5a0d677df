use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::QuantityAllocator;
use crate::error::Result;
use crate::fees::ExchangeFeeSchedule;
use crate::input::{parse_leverage, parse_non_negative};
use crate::models::{SizingMode, StopLossConfig, TakeProfitSlot, TradeDirection, TradeInputs};

pub const TAKE_PROFIT_SLOTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TakeProfitConfig {
    pub price: Option<f64>,
    pub percent: Option<f64>,
    pub weight: Option<f64>,
}

impl TakeProfitConfig {
    pub fn is_set(&self) -> bool {
        self.price.is_some() || self.percent.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Exchange
    pub exchange: String,

    // Account
    pub account_size: f64,
    pub leverage: u32,

    // Position
    pub entry_price: f64,
    pub direction: TradeDirection,
    pub sizing_mode: SizingMode,
    pub fixed_margin: f64,
    pub risk_percent: f64,

    // Exits (price wins over percent when both are set)
    pub stop_loss_price: Option<f64>,
    pub stop_loss_percent: Option<f64>,
    pub take_profits: Vec<TakeProfitConfig>,

    // Logging
    pub log_level: String,
}

impl Config {
    /// Read `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; missing or blank keys use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let number = |key: &str, default: f64| -> Result<f64> {
            Ok(parse_non_negative(key, &env(key, ""))?.unwrap_or(default))
        };
        let optional = |key: &str| -> Result<Option<f64>> { parse_non_negative(key, &env(key, "")) };

        let take_profits = (1..=TAKE_PROFIT_SLOTS)
            .map(|n| -> Result<TakeProfitConfig> {
                Ok(TakeProfitConfig {
                    price: optional(&format!("TP{n}_PRICE"))?,
                    percent: optional(&format!("TP{n}_PERCENT"))?,
                    weight: optional(&format!("TP{n}_WEIGHT"))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Config {
            exchange: env("EXCHANGE", "binance"),
            account_size: number("ACCOUNT_SIZE", 1_000.0)?,
            leverage: parse_leverage(&env("LEVERAGE", "10"))?.unwrap_or(10),
            entry_price: number("ENTRY_PRICE", 0.0)?,
            direction: env("DIRECTION", "long").parse()?,
            sizing_mode: env("SIZING_MODE", "fixed_margin").parse()?,
            fixed_margin: number("FIXED_MARGIN", 100.0)?,
            risk_percent: number("RISK_PERCENT", 1.0)?,
            stop_loss_price: optional("STOP_LOSS_PRICE")?,
            stop_loss_percent: optional("STOP_LOSS_PERCENT")?,
            take_profits,
            log_level: env("LOG_LEVEL", "info"),
        })
    }

    /// Snapshot for the calculator, with targets resolved against the
    /// entry price and take-profit weights balanced.
    pub fn trade_inputs(&self) -> Result<TradeInputs> {
        let fee_schedule = ExchangeFeeSchedule::for_exchange(&self.exchange)?;
        let entry = self.entry_price;
        let direction = self.direction;

        let stop_loss = match (self.stop_loss_price, self.stop_loss_percent) {
            (Some(price), _) => StopLossConfig::at_price(price).with_price(price, entry, direction),
            (None, Some(percent)) => {
                StopLossConfig::at_percent(percent).with_percent(percent, entry, direction)
            }
            (None, None) => StopLossConfig::default(),
        };

        let slots: Vec<TakeProfitSlot> = self
            .take_profits
            .iter()
            .map(|tp| {
                let weight = explicit_weight(tp).unwrap_or(0);
                match (tp.price, tp.percent) {
                    (Some(price), _) => {
                        TakeProfitSlot::at_price(price, weight).with_price(price, entry, direction)
                    }
                    (None, Some(percent)) => TakeProfitSlot::at_percent(percent, weight)
                        .with_percent(percent, entry, direction),
                    (None, None) => TakeProfitSlot::disabled(),
                }
            })
            .collect();
        let explicit: Vec<bool> = self
            .take_profits
            .iter()
            .map(|tp| explicit_weight(tp).is_some())
            .collect();

        Ok(TradeInputs {
            account_size: self.account_size,
            leverage: self.leverage,
            entry_price: entry,
            direction,
            take_profits: balance_weights(slots, &explicit),
            stop_loss,
            sizing_mode: self.sizing_mode,
            fixed_margin_amount: self.fixed_margin,
            risk_percent: self.risk_percent,
            fee_schedule,
        })
    }
}

fn explicit_weight(tp: &TakeProfitConfig) -> Option<u32> {
    tp.weight.map(|w| w.round().clamp(0.0, 100.0) as u32)
}

/// Keep the weights the user gave and split what is left of 100 evenly over
/// the enabled slots without one. Falls back to an even split of everything
/// when the given weights alone cannot add up to 100.
fn balance_weights(mut slots: Vec<TakeProfitSlot>, explicit: &[bool]) -> Vec<TakeProfitSlot> {
    let is_explicit = |i: usize| explicit.get(i).copied().unwrap_or(false);
    let open: Vec<usize> = (0..slots.len())
        .filter(|&i| slots[i].enabled && !is_explicit(i))
        .collect();
    let given: u32 = (0..slots.len())
        .filter(|&i| slots[i].enabled && is_explicit(i))
        .map(|i| slots[i].weight_percent)
        .sum();

    if !open.is_empty() && given <= 100 {
        let n = open.len() as u32;
        let left = 100 - given;
        for (rank, &i) in open.iter().enumerate() {
            slots[i].weight_percent = left / n + u32::from((rank as u32) < left % n);
        }
    }
    for slot in slots.iter_mut().filter(|s| !s.enabled) {
        slot.weight_percent = 0;
    }

    if QuantityAllocator::is_balanced(&slots) {
        return slots;
    }
    warn!(
        "Take-profit weights add up to {}%, splitting evenly instead",
        QuantityAllocator::enabled_total(&slots)
    );
    QuantityAllocator::normalize(&slots)
}
