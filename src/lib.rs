pub mod config;
pub mod core;
pub mod error;
pub mod fees;
pub mod input;
pub mod models;
pub mod report;
#[cfg(test)]
pub mod test_helpers;

use crate::models::{CalculationResult, TradeInputs};

/// Derive the full result for one input snapshot.
pub fn calculate(inputs: &TradeInputs) -> CalculationResult {
    crate::core::TradeCalculator::calculate(inputs)
}
