use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use somnia_components::{SleepCalculator, SleepCalculatorArgs, TimePickerArgs};
use somnia_foundation::{FixedClock, SystemClock, WallTime};
use tracing::debug;

mod config;
mod output;

#[derive(Parser)]
#[command(name = "somnia")]
#[command(version, about = "Sleep-cycle calculator", long_about = None)]
struct Cli {
    /// Read sleep-cycle settings from a TOML file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest bedtimes for waking up at TIME
    Bedtime {
        /// Wake-up time, e.g. "6:30 AM" or "18:30"
        time: WallTime,
    },
    /// Suggest wake-up times for going to bed now
    Wake {
        /// Going to bed at this time instead of now
        #[arg(long, value_name = "TIME")]
        at: Option<WallTime>,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let app_config = config::load(cli.config.as_deref())?;
    somnia_ui::init_tracing(app_config.log_filter());
    if let Some(path) = &cli.config {
        debug!(path = %path.display(), "loaded config");
    }

    let args = SleepCalculatorArgs::default().config(app_config.cycle);
    let mut calculator = match &cli.command {
        Commands::Bedtime { time } => {
            let picker = TimePickerArgs::default().initial_time(*time);
            SleepCalculator::new(args.picker(picker))?
        }
        Commands::Wake { at: Some(time) } => {
            SleepCalculator::new(args.clock(FixedClock(time.to_naive())))?
        }
        Commands::Wake { at: None } => SleepCalculator::new(args.clock(SystemClock))?,
    };

    let view = match cli.command {
        Commands::Bedtime { .. } => calculator.calculate_bedtime(),
        Commands::Wake { .. } => calculator.calculate_wake_up(),
    };

    if cli.json {
        println!("{}", output::results_json(view)?);
    } else {
        if let Some(summary) = output::summary(view) {
            output::status("Calculated", summary);
        }
        output::print_results(view);
    }
    Ok(())
}
