//! Plain-text rendering of a calculation. Display precision and the
//! sentinels for undefined values live here, not in the core.

use crate::models::{CalculationResult, TradeInputs};

pub const UNDEFINED_LABEL: &str = "N/A";

/// Sub-dollar prices get six decimals, everything else two.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return UNDEFINED_LABEL.to_string();
    }
    if price.abs() > 0.0 && price.abs() < 1.0 {
        format!("{:.6}", price)
    } else {
        format!("{:.2}", price)
    }
}

pub fn format_money(amount: f64) -> String {
    format!("${:+.2}", amount)
}

pub fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

pub fn format_quantity(quantity: f64) -> String {
    format!("{:.8}", quantity)
}

pub fn format_ratio(ratio: f64) -> String {
    if ratio.is_nan() {
        UNDEFINED_LABEL.to_string()
    } else {
        format!("1:{:.2}", ratio)
    }
}

/// NaN is undefined; +inf means no liquidation price exists.
pub fn format_liquidation(price: f64) -> String {
    if price.is_nan() {
        UNDEFINED_LABEL.to_string()
    } else if price.is_infinite() {
        "None".to_string()
    } else {
        format_price(price)
    }
}

pub fn print_summary(inputs: &TradeInputs, result: &CalculationResult) {
    println!("\n{}", "=".repeat(60));
    println!("  POSITION CALCULATOR");
    println!("{}", "=".repeat(60));
    println!(
        "  {} {}x @ {} | account ${:.2}",
        inputs.direction.as_str().to_uppercase(),
        inputs.leverage,
        format_price(inputs.entry_price),
        inputs.account_size
    );
    println!(
        "  Sizing:      {} (requested {})",
        result.effective_sizing_mode, inputs.sizing_mode
    );
    println!();
    println!("  POSITION");
    println!("  ───────────────────────────────────");
    println!("  Quantity:    {}", format_quantity(result.quantity));
    println!("  Size:        ${:.2}", result.position_size);
    println!("  Margin:      ${:.2}", result.margin);
    if result.exceeds_account {
        println!(
            "  WARNING:     margin ${:.2} exceeds account ${:.2}",
            result.required_margin, inputs.account_size
        );
    }
    println!("  Risk:        ${:.2}", result.risk_amount);
    println!();
    println!("  FEES");
    println!("  ───────────────────────────────────");
    println!("  Entry:       ${:.2}", result.entry_fee);
    println!("  TP exits:    ${:.2}", result.take_profit_exit_fees);
    println!("  SL exit:     ${:.2}", result.stop_loss_exit_fee);
    println!();
    println!("  TAKE PROFIT");
    println!("  ───────────────────────────────────");
    for (i, tp) in result.take_profits.iter().enumerate() {
        if !tp.enabled {
            continue;
        }
        println!(
            "  TP{} {:>3}% @ {:>12} | gross {} ({}) | net {} ({})",
            i + 1,
            tp.weight_percent,
            tp.target_price.map_or_else(|| UNDEFINED_LABEL.to_string(), format_price),
            format_money(tp.gross_profit),
            format_percent(tp.gross_profit_percent),
            format_money(tp.net_profit),
            format_percent(tp.net_profit_percent)
        );
    }
    println!(
        "  Total:       gross {} | net {}",
        format_money(result.weighted_gross_profit),
        format_money(result.weighted_net_profit)
    );
    println!();
    println!("  STOP LOSS");
    println!("  ───────────────────────────────────");
    match &result.loss {
        Some(loss) => {
            println!(
                "  Gross:       {} ({})",
                format_money(-loss.gross_loss),
                format_percent(-loss.gross_loss_percent)
            );
            println!(
                "  Net:         {} ({})",
                format_money(-loss.net_loss),
                format_percent(-loss.net_loss_percent)
            );
        }
        None => println!("  No valid stop-loss"),
    }
    println!("  R/R net:     {}", format_ratio(result.net_risk_reward));
    println!("  R/R gross:   {}", format_ratio(result.gross_risk_reward));
    println!();
    println!("  LIQUIDATION (estimate)");
    println!("  ───────────────────────────────────");
    println!("  Isolated:    {}", format_liquidation(result.liquidation.isolated));
    println!("  Account:     {}", format_liquidation(result.liquidation.real));
    println!("{}", "=".repeat(60));
}
