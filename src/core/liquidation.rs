use crate::models::{LiquidationEstimate, TradeDirection};

/// Flat maintenance margin rate. Real exchanges use tiered tables; this is
/// an estimate, not exchange parity.
pub const MAINTENANCE_MARGIN_RATE: f64 = 0.005;

/// Liquidation prices for an isolated position (only the margin absorbs
/// losses) and a "real" cross-style one (the whole account does).
///
/// 1x leverage is a convention whatever the size: a long is only wiped
/// out at 0 and a short never is (+inf). Otherwise, without quantity or
/// leverage the estimate is NaN.
pub fn estimate(
    direction: TradeDirection,
    leverage: u32,
    entry: f64,
    quantity: f64,
    margin: f64,
    account_size: f64,
) -> LiquidationEstimate {
    if leverage == 0 {
        return LiquidationEstimate::undefined();
    }

    if leverage == 1 {
        let price = match direction {
            TradeDirection::Long => 0.0,
            TradeDirection::Short => f64::INFINITY,
        };
        return LiquidationEstimate {
            isolated: price,
            real: price,
        };
    }

    if quantity.is_nan() || quantity <= 0.0 {
        return LiquidationEstimate::undefined();
    }

    let notional = quantity * entry;
    match direction {
        TradeDirection::Long => {
            let denom = quantity * (1.0 - MAINTENANCE_MARGIN_RATE);
            LiquidationEstimate {
                isolated: ((notional - margin) / denom).max(0.0),
                real: ((notional - account_size) / denom).max(0.0),
            }
        }
        TradeDirection::Short => {
            let denom = quantity * (1.0 + MAINTENANCE_MARGIN_RATE);
            LiquidationEstimate {
                isolated: (margin + notional) / denom,
                real: (account_size + notional) / denom,
            }
        }
    }
}
