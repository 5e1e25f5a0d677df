use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// Maker/taker fee rates as fractions (0.0004 = 0.04%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeFeeSchedule {
    pub maker_rate: f64,
    pub taker_rate: f64,
}

/// USDT-margined perpetual base-tier rates.
const EXCHANGE_FEES: &[(&str, ExchangeFeeSchedule)] = &[
    (
        "binance",
        ExchangeFeeSchedule {
            maker_rate: 0.0002,
            taker_rate: 0.0004,
        },
    ),
    (
        "bybit",
        ExchangeFeeSchedule {
            maker_rate: 0.0002,
            taker_rate: 0.00055,
        },
    ),
    (
        "okx",
        ExchangeFeeSchedule {
            maker_rate: 0.0002,
            taker_rate: 0.0005,
        },
    ),
    (
        "bitget",
        ExchangeFeeSchedule {
            maker_rate: 0.0002,
            taker_rate: 0.0006,
        },
    ),
];

impl ExchangeFeeSchedule {
    pub fn for_exchange(name: &str) -> Result<Self> {
        let key = name.trim().to_lowercase();
        EXCHANGE_FEES
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, schedule)| *schedule)
            .ok_or_else(|| CalcError::UnknownExchange(name.to_string()))
    }

    pub fn exchanges() -> impl Iterator<Item = &'static str> {
        EXCHANGE_FEES.iter().map(|(n, _)| *n)
    }

    /// Maker when the exit is a resting limit in profit, taker otherwise.
    pub fn exit_rate(&self, in_profit: bool) -> f64 {
        if in_profit {
            self.maker_rate
        } else {
            self.taker_rate
        }
    }
}

impl Default for ExchangeFeeSchedule {
    fn default() -> Self {
        EXCHANGE_FEES[0].1
    }
}
