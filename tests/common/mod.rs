#![allow(dead_code)]

use futures_risk_calc::fees::ExchangeFeeSchedule;
use futures_risk_calc::models::{
    SizingMode, StopLossConfig, TakeProfitSlot, TradeDirection, TradeInputs,
};

pub fn binance() -> ExchangeFeeSchedule {
    ExchangeFeeSchedule::for_exchange("binance").unwrap()
}

/// Long position with no targets and no stop; tests fill in the rest.
pub fn base_inputs(entry: f64, leverage: u32, account_size: f64) -> TradeInputs {
    TradeInputs {
        account_size,
        leverage,
        entry_price: entry,
        direction: TradeDirection::Long,
        take_profits: vec![TakeProfitSlot::disabled(); 3],
        stop_loss: StopLossConfig::default(),
        sizing_mode: SizingMode::FixedMargin,
        fixed_margin_amount: 0.0,
        risk_percent: 0.0,
        fee_schedule: binance(),
    }
}

/// Slots with the given (enabled, weight) pairs and no targets.
pub fn weighted_slots(weights: &[(bool, u32)]) -> Vec<TakeProfitSlot> {
    weights
        .iter()
        .map(|&(enabled, weight_percent)| TakeProfitSlot {
            enabled,
            target_price: None,
            percent_from_entry: None,
            weight_percent,
        })
        .collect()
}

pub fn weights(slots: &[TakeProfitSlot]) -> Vec<u32> {
    slots.iter().map(|s| s.weight_percent).collect()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}
