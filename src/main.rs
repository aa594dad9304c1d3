//! Wallet Numerics - command-line front end.
//!
//! Runs the library's conversions and fee checks on values given as
//! arguments. Useful for checking what a form would accept.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use wallet_numerics::fee::{CustomRates, FeeConfig, FeeEngine, RateBounds, SizeProfile};
use wallet_numerics::telemetry::amount_bucket;
use wallet_numerics::units::{from_satoshis, try_to_satoshis, Satoshis};
use wallet_numerics::{try_parse, Priority};

#[derive(Parser)]
#[command(name = "wallet-numerics", about = "Wallet amount conversion and fee checks")]
struct Cli {
    /// Path to a TOML fee configuration. Missing keys keep their defaults.
    #[arg(long, env = "WALLET_NUMERICS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a numeric value the way form fields are parsed.
    Parse {
        #[arg(allow_hyphen_values = true)]
        input: String,
    },

    /// Convert a BTC amount to satoshis (floored).
    ToSats {
        #[arg(allow_hyphen_values = true)]
        btc: String,
    },

    /// Convert satoshis to a BTC amount with 8 decimals.
    FromSats { sats: Satoshis },

    /// Estimate transaction size and fee.
    Fee {
        #[arg(long)]
        inputs: u64,
        #[arg(long)]
        outputs: u64,
        /// Fee rate in sat/vB
        #[arg(long)]
        rate: String,
        /// Input size in vbytes (defaults to config)
        #[arg(long)]
        input_size: Option<u64>,
        /// Output size in vbytes (defaults to config)
        #[arg(long)]
        output_size: Option<u64>,
        /// Fixed overhead in vbytes (defaults to config)
        #[arg(long)]
        overhead: Option<u64>,
    },

    /// Validate a fee rate.
    CheckRate {
        #[arg(allow_hyphen_values = true)]
        rate: String,
        #[arg(long)]
        min: Option<Decimal>,
        #[arg(long)]
        max: Option<Decimal>,
        /// Do not warn about high rates
        #[arg(long)]
        no_warn: bool,
    },

    /// Check that amount + fee fits in a balance.
    Balance {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(allow_hyphen_values = true)]
        fee: String,
        #[arg(allow_hyphen_values = true)]
        balance: String,
        /// Reject missing, unparseable and negative values instead of
        /// reading them as zero
        #[arg(long)]
        strict: bool,
    },

    /// Suggest a fee rate for a priority.
    Estimate {
        priority: Priority,
        #[arg(long)]
        low: Option<Decimal>,
        #[arg(long)]
        medium: Option<Decimal>,
        #[arg(long)]
        high: Option<Decimal>,
    },

    /// Solve the child fee rate for Child-Pays-For-Parent.
    Cpfp {
        /// Target combined rate in sat/vB
        #[arg(long)]
        target_rate: String,
        #[arg(long)]
        parent_rate: String,
        #[arg(long)]
        child_size: u64,
        #[arg(long)]
        parent_size: u64,
    },

    /// Show the telemetry bucket for an amount.
    Bucket {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<FeeConfig, String> {
    let Some(path) = path else {
        return Ok(FeeConfig::default());
    };

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
    let config = FeeConfig::from_toml_str(&contents).map_err(|e| e.to_string())?;
    tracing::info!("loaded fee config from {}", path.display());
    Ok(config)
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let engine = FeeEngine::new(config);

    match run(&engine, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(engine: &FeeEngine, command: Command) -> Result<(), String> {
    match command {
        Command::Parse { input } => {
            let value = try_parse(input.as_str()).map_err(|e| e.to_string())?;
            println!("{value}");
        }

        Command::ToSats { btc } => {
            let sats = try_to_satoshis(btc.as_str()).map_err(|e| e.to_string())?;
            println!("{sats}");
        }

        Command::FromSats { sats } => {
            println!("{}", from_satoshis(sats));
        }

        Command::Fee {
            inputs,
            outputs,
            rate,
            input_size,
            output_size,
            overhead,
        } => {
            let defaults = engine.config().size_profile();
            let sizes = SizeProfile {
                input_size: input_size.unwrap_or(defaults.input_size),
                output_size: output_size.unwrap_or(defaults.output_size),
                overhead: overhead.unwrap_or(defaults.overhead),
            };
            let result = engine
                .calculate_transaction_fee(inputs, outputs, rate.as_str(), &sizes)
                .map_err(|e| e.to_string())?;
            println!("Estimated size: {} vB", result.value.estimated_size);
            println!("Fee: {} sats ({} BTC)", result.value.fee, from_satoshis(result.value.fee));
            if let Some(warning) = result.warning {
                println!("Warning: {warning}");
            }
        }

        Command::CheckRate {
            rate,
            min,
            max,
            no_warn,
        } => {
            let defaults = engine.config().rate_bounds();
            let bounds = RateBounds {
                min_rate: min.unwrap_or(defaults.min_rate),
                max_rate: max.unwrap_or(defaults.max_rate),
                warn_high_fee: !no_warn,
            };
            let result = engine
                .validate_fee_rate(rate.as_str(), &bounds)
                .map_err(|e| e.to_string())?;
            println!("Valid: {} sat/vB", result.value);
            if let Some(warning) = result.warning {
                println!("Warning: {warning}");
            }
            if !engine.is_reasonable_fee_rate(result.value, None) {
                println!("Note: rate is outside the usual range");
            }
        }

        Command::Balance {
            amount,
            fee,
            balance,
            strict,
        } => {
            let (amount, fee, balance) = (amount.as_str(), fee.as_str(), balance.as_str());
            let result = if strict {
                engine.try_validate_fee_with_balance(amount, fee, balance)
            } else {
                engine.validate_fee_with_balance(amount, fee, balance)
            }
            .map_err(|e| e.to_string())?;
            println!("Total required: {}", result.value);
        }

        Command::Estimate {
            priority,
            low,
            medium,
            high,
        } => {
            let custom = (low.is_some() || medium.is_some() || high.is_some())
                .then_some(CustomRates { low, medium, high });
            let rate = engine.estimate_fee_rate(priority, custom.as_ref());
            println!("{rate} sat/vB");
        }

        Command::Cpfp {
            target_rate,
            parent_rate,
            child_size,
            parent_size,
        } => {
            let result = engine
                .validate_cpfp_fee(target_rate.as_str(), parent_rate.as_str(), child_size, parent_size)
                .map_err(|e| e.to_string())?;
            println!("Child fee rate: {} sat/vB", result.value);
        }

        Command::Bucket { amount } => {
            println!("{}", amount_bucket(amount.as_str()));
        }
    }

    Ok(())
}
