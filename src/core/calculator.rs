use tracing::debug;

use crate::core::liquidation;
use crate::core::numeric::{percent_of, safe_div};
use crate::fees::ExchangeFeeSchedule;
use crate::models::{
    CalculationResult, LossScenario, SizingMode, TakeProfitOutcome, TakeProfitSlot, TradeDirection,
    TradeInputs, MIN_LEVERAGE,
};

#[derive(Debug, Clone, Copy)]
struct Sizing {
    quantity: f64,
    position_size: f64,
    margin: f64,
    risk_amount: f64,
}

/// Derives every position metric from one input snapshot.
///
/// Stateless: the same inputs always produce the same result, and nothing
/// is kept between calls.
pub struct TradeCalculator;

impl TradeCalculator {
    pub fn calculate(inputs: &TradeInputs) -> CalculationResult {
        let entry = inputs.entry_price;
        if !entry.is_finite() || entry <= 0.0 || inputs.leverage < MIN_LEVERAGE {
            return CalculationResult::neutral(inputs.take_profits.len());
        }
        let direction = inputs.direction;
        let fees = &inputs.fee_schedule;

        let stop_price = inputs.stop_loss.resolved_price(entry, direction);
        let is_stop_loss_valid = stop_price.is_some();
        let price_difference = stop_price.map_or(0.0, |p| (entry - p).abs());
        if inputs.stop_loss.enabled && !is_stop_loss_valid {
            debug!(
                "Stop-loss ignored for {} entry {}: unresolved or not on the loss side",
                direction, entry
            );
        }

        let effective_sizing_mode = match inputs.sizing_mode {
            SizingMode::RiskPercent if is_stop_loss_valid => SizingMode::RiskPercent,
            SizingMode::RiskPercent => {
                debug!("Risk sizing needs a valid stop-loss, using fixed margin");
                SizingMode::FixedMargin
            }
            SizingMode::FixedMargin => SizingMode::FixedMargin,
        };

        let sizing = size_position(
            inputs,
            effective_sizing_mode,
            price_difference,
            is_stop_loss_valid,
        );

        // Entries are always market orders
        let entry_fee = sizing.position_size * fees.taker_rate;
        let stop_loss_exit_fee = if is_stop_loss_valid {
            sizing.position_size * fees.taker_rate
        } else {
            0.0
        };

        let take_profits: Vec<TakeProfitOutcome> = inputs
            .take_profits
            .iter()
            .map(|slot| {
                slot_outcome(
                    slot,
                    direction,
                    entry,
                    &sizing,
                    entry_fee,
                    fees,
                    inputs.account_size,
                )
            })
            .collect();

        let take_profit_exit_fees: f64 = take_profits.iter().map(|o| o.exit_fee).sum();
        let weighted_gross_profit: f64 = take_profits.iter().map(|o| o.gross_profit).sum();
        let weighted_net_profit: f64 = take_profits.iter().map(|o| o.net_profit).sum();

        let loss = if is_stop_loss_valid && sizing.quantity > 0.0 {
            let gross_loss = sizing.quantity * price_difference;
            let net_loss = gross_loss + entry_fee + stop_loss_exit_fee;
            Some(LossScenario {
                gross_loss,
                gross_loss_percent: percent_of(gross_loss, inputs.account_size),
                net_loss,
                net_loss_percent: percent_of(net_loss, inputs.account_size),
            })
        } else {
            None
        };

        let (net_risk_reward, gross_risk_reward) = match &loss {
            Some(l) => (
                ratio_or_nan(weighted_net_profit, l.net_loss),
                ratio_or_nan(weighted_gross_profit, l.gross_loss),
            ),
            None => (f64::NAN, f64::NAN),
        };

        let liquidation = liquidation::estimate(
            direction,
            inputs.leverage,
            entry,
            sizing.quantity,
            sizing.margin,
            inputs.account_size,
        );

        CalculationResult {
            effective_sizing_mode,
            is_stop_loss_valid,
            price_difference,
            quantity: sizing.quantity,
            position_size: sizing.position_size,
            margin: sizing.margin,
            required_margin: sizing.margin,
            exceeds_account: sizing.margin > inputs.account_size,
            risk_amount: sizing.risk_amount,
            entry_fee,
            take_profit_exit_fees,
            stop_loss_exit_fee,
            take_profits,
            weighted_gross_profit,
            weighted_gross_profit_percent: percent_of(weighted_gross_profit, inputs.account_size),
            weighted_net_profit,
            weighted_net_profit_percent: percent_of(weighted_net_profit, inputs.account_size),
            loss,
            net_risk_reward,
            gross_risk_reward,
            liquidation,
        }
    }
}

fn size_position(
    inputs: &TradeInputs,
    mode: SizingMode,
    price_difference: f64,
    is_stop_loss_valid: bool,
) -> Sizing {
    let leverage = inputs.leverage as f64;
    let entry = inputs.entry_price;

    match mode {
        SizingMode::RiskPercent => {
            let risk_amount = inputs.account_size * inputs.risk_percent / 100.0;
            let quantity = safe_div(risk_amount, price_difference);
            let position_size = quantity * entry;
            Sizing {
                quantity,
                position_size,
                margin: safe_div(position_size, leverage),
                risk_amount,
            }
        }
        // Margin above the account is reported, never resized.
        SizingMode::FixedMargin => {
            let margin = inputs.fixed_margin_amount;
            let position_size = margin * leverage;
            let quantity = safe_div(position_size, entry);
            Sizing {
                quantity,
                position_size,
                margin,
                risk_amount: if is_stop_loss_valid {
                    quantity * price_difference
                } else {
                    0.0
                },
            }
        }
    }
}

fn slot_outcome(
    slot: &TakeProfitSlot,
    direction: TradeDirection,
    entry: f64,
    sizing: &Sizing,
    entry_fee: f64,
    fees: &ExchangeFeeSchedule,
    account_size: f64,
) -> TakeProfitOutcome {
    if !slot.enabled {
        return TakeProfitOutcome::default();
    }

    let target_price = slot.resolved_price(entry, direction);
    let mut outcome = TakeProfitOutcome {
        enabled: true,
        target_price,
        weight_percent: slot.weight_percent,
        ..TakeProfitOutcome::default()
    };
    let Some(price) = target_price else {
        return outcome;
    };
    if slot.weight_percent == 0 {
        return outcome;
    }

    let share = slot.weight_percent as f64 / 100.0;
    // A target on the losing side exits like a stop: market order.
    let exit_fee_rate = fees.exit_rate(direction.is_profit_side(entry, price));
    let exit_fee = sizing.position_size * share * exit_fee_rate;
    let quantity = sizing.quantity * share;
    let gross_profit = quantity * direction.price_delta(entry, price);
    let net_profit = gross_profit - entry_fee * share - exit_fee;

    outcome.quantity = quantity;
    outcome.exit_fee_rate = exit_fee_rate;
    outcome.exit_fee = exit_fee;
    outcome.gross_profit = gross_profit;
    outcome.gross_profit_percent = percent_of(gross_profit, account_size);
    outcome.net_profit = net_profit;
    outcome.net_profit_percent = percent_of(net_profit, account_size);
    outcome
}

/// Undefined (NaN) rather than 0 when there is no loss to compare against.
fn ratio_or_nan(reward: f64, loss: f64) -> f64 {
    if loss > 0.0 && loss.is_finite() {
        reward / loss
    } else {
        f64::NAN
    }
}
