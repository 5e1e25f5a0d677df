use crate::fees::ExchangeFeeSchedule;
use crate::models::{SizingMode, StopLossConfig, TakeProfitSlot, TradeDirection, TradeInputs};

pub fn binance() -> ExchangeFeeSchedule {
    ExchangeFeeSchedule {
        maker_rate: 0.0002,
        taker_rate: 0.0004,
    }
}

/// 10x long at 50k, 100 margin on a 1k account, two targets and a 2% stop.
pub fn sample_inputs() -> TradeInputs {
    TradeInputs {
        account_size: 1_000.0,
        leverage: 10,
        entry_price: 50_000.0,
        direction: TradeDirection::Long,
        take_profits: vec![
            TakeProfitSlot::at_price(51_000.0, 50),
            TakeProfitSlot::at_price(52_000.0, 50),
            TakeProfitSlot::disabled(),
        ],
        stop_loss: StopLossConfig::at_price(49_000.0),
        sizing_mode: SizingMode::FixedMargin,
        fixed_margin_amount: 100.0,
        risk_percent: 1.0,
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
