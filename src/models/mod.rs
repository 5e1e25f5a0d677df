pub mod direction;
pub mod result;
pub mod trade;

pub use direction::*;
pub use result::{CalculationResult, LiquidationEstimate, LossScenario, TakeProfitOutcome};
pub use trade::{StopLossConfig, TakeProfitSlot, TradeInputs, MAX_LEVERAGE, MIN_LEVERAGE};
