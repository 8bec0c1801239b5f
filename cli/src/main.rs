//! AMM Dashboard CLI - constant product (x·y=k) projections in the terminal
//!
//! Drives the `amm_model` engine the way the interactive dashboard does:
//! clamp the raw inputs, recompute everything from (x0, y0, multiplier,
//! usdt_in), and print the numeric series as tables or JSON for a chart
//! renderer.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod compare;
mod config;
mod curve;
mod history;
mod output;
mod pool;
mod trade;

use config::DashboardConfig;
use output::Format;

#[derive(Parser)]
#[command(name = "ammdash")]
#[command(about = "AMM Dashboard CLI - project constant product pools under price moves and trades", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/ammdash/config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial X (ETH) reserve, clamped to at least 1
    #[arg(long, global = true)]
    x0: Option<f64>,

    /// Initial Y (USDT) reserve, clamped to at least 1
    #[arg(long, global = true)]
    y0: Option<f64>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show k, price, reserves, pool ratio, IL and the AMM flow step
    Pool {
        /// Price multiplier relative to the initial price (e.g. 4 = price x4)
        #[arg(short, long)]
        multiplier: Option<f64>,

        /// USDT to spend in a simulated trade (drives the flow step)
        #[arg(long)]
        usdt_in: Option<f64>,
    },

    /// Impermanent loss for one or more price ratios
    Il {
        /// Price ratios r = P_current / P_initial
        #[arg(required = true, allow_negative_numbers = true)]
        ratios: Vec<f64>,
    },

    /// Sample y = k/x with tangent and secant overlays
    Curve {
        /// Price multiplier for the current position
        #[arg(short, long)]
        multiplier: Option<f64>,

        /// USDT to spend; adds the secant and post-trade tangent
        #[arg(long)]
        usdt_in: Option<f64>,

        /// Number of sampling intervals
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Simulate swapping USDT for ETH
    Trade {
        /// USDT to spend
        #[arg(long, allow_negative_numbers = true)]
        usdt_in: f64,

        /// Price multiplier the trade starts from
        #[arg(short, long)]
        multiplier: Option<f64>,

        /// Settle the trade and print the resulting pool
        #[arg(long)]
        execute: bool,
    },

    /// HODL vs LP value over price multipliers 0.1x - 10x
    Compare {
        /// Print every Nth sample of the 201-point grid
        #[arg(long, default_value = "10")]
        every: usize,
    },

    /// Record a stream of multiplier samples into the price history table
    History {
        /// Multiplier samples, in order
        #[arg(allow_negative_numbers = true)]
        samples: Vec<f64>,

        /// Also read samples from stdin (one per line, `clear` resets)
        #[arg(long)]
        stdin: bool,

        /// Simulate dragging the log slider from FROM to TO (positions in [-1, 1])
        #[arg(long, num_args = 2, value_names = ["FROM", "TO"], allow_negative_numbers = true)]
        sweep: Option<Vec<f64>>,

        /// Table capacity (overrides [history] capacity)
        #[arg(long)]
        capacity: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.x0, cli.y0);
    let format = Format::from_flag(cli.json);

    match cli.command {
        Commands::Pool { multiplier, usdt_in } => {
            pool::show_pool(&config, multiplier, usdt_in, format)?;
        }
        Commands::Il { ratios } => {
            pool::show_il(&ratios, format)?;
        }
        Commands::Curve { multiplier, usdt_in, steps } => {
            curve::show_curve(&config, multiplier, usdt_in, steps, format)?;
        }
        Commands::Trade { usdt_in, multiplier, execute } => {
            trade::run_trade(&config, usdt_in, multiplier, execute, format)?;
        }
        Commands::Compare { every } => {
            compare::show_comparison(&config, every, format)?;
        }
        Commands::History { samples, stdin, sweep, capacity } => {
            if let Some(capacity) = capacity {
                config.history.capacity = capacity;
            }
            let sweep = sweep.and_then(|v| match v.as_slice() {
                [from, to] => Some((*from, *to)),
                _ => None,
            });
            let sources = history::SampleSources {
                args: samples,
                stdin,
                sweep,
            };
            history::run_history(&config, sources, format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_history_sweep() {
        let cli = Cli::try_parse_from(["ammdash", "--x0", "50", "history", "--sweep", "-1", "0.5"]).unwrap();
        assert_eq!(cli.x0, Some(50.0));
        match cli.command {
            Commands::History { sweep, samples, .. } => {
                assert_eq!(sweep, Some(vec![-1.0, 0.5]));
                assert!(samples.is_empty());
            }
            _ => panic!("expected history"),
        }
    }

    #[test]
    fn test_parse_trade() {
        let cli = Cli::try_parse_from(["ammdash", "trade", "--usdt-in", "100", "--execute", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Trade { usdt_in, execute, multiplier } => {
                assert_eq!(usdt_in, 100.0);
                assert!(execute);
                assert!(multiplier.is_none());
            }
            _ => panic!("expected trade"),
        }
    }
}
