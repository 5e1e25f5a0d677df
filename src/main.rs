use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use futures_risk_calc::config::Config;
use futures_risk_calc::models::TradeInputs;
use futures_risk_calc::report;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Usage: futures-risk-calc [scenario.json] [--json]
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    scenario: Option<String>,
    as_json: bool,
    unrecognised: Vec<String>,
}

enum InputSource {
    Scenario(String),
    Environment(Config),
}

impl CliArgs {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut parsed = CliArgs::default();
        for arg in args {
            if arg == "--json" {
                parsed.as_json = true;
            } else if arg.starts_with("--") || parsed.scenario.is_some() {
                parsed.unrecognised.push(arg);
            } else {
                parsed.scenario = Some(arg);
            }
        }
        parsed
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1));

    // The environment config is only needed when no scenario file is given
    let source = match &args.scenario {
        Some(path) => InputSource::Scenario(path.clone()),
        None => InputSource::Environment(Config::from_env()?),
    };

    // Initialize tracing
    let level = match &source {
        InputSource::Environment(cfg) => cfg.log_level.as_str(),
        InputSource::Scenario(_) => DEFAULT_LOG_LEVEL,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    for arg in &args.unrecognised {
        warn!("Ignoring unrecognised argument: {}", arg);
    }

    let inputs = match &source {
        InputSource::Scenario(path) => load_scenario(path)?,
        InputSource::Environment(cfg) => cfg.trade_inputs()?,
    };

    info!(
        "Calculating {} {}x @ {} ({} mode, {} take-profit slots)",
        inputs.direction,
        inputs.leverage,
        inputs.entry_price,
        inputs.sizing_mode,
        inputs.take_profits.iter().filter(|s| s.enabled).count()
    );

    let result = futures_risk_calc::calculate(&inputs);

    if result.exceeds_account {
        warn!(
            "Required margin {:.2} exceeds account size {:.2}",
            result.required_margin, inputs.account_size
        );
    }

    if args.as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report::print_summary(&inputs, &result);
    }

    Ok(())
}

fn load_scenario(path: &str) -> Result<TradeInputs> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path))?;
    let inputs: TradeInputs = serde_json::from_str(&raw)
        .with_context(|| format!("parsing scenario {}", path))?;
    Ok(TradeInputs {
        leverage: TradeInputs::clamp_leverage(inputs.leverage),
        ..inputs
    })
}
