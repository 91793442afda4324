//! Command-line front end: loads a configuration document and a CSV ledger,
//! then prints a year projection or a fitted budget.

use std::path::PathBuf;

use chrono::Datelike;
use clap::{Args, Parser, Subcommand};

use crate::{
    config::{self, ArgOverrides, ExceptionMode},
    errors::Result,
    forecast::Forecaster,
    ledger::{load_csv, Table},
    report,
};

#[derive(Parser, Debug)]
#[command(name = "budget_forecast")]
#[command(about = "Project monthly balances and fit a monthly income/expense budget")]
pub struct Cli {
    /// Forecast configuration (JSON).
    #[arg(long, short, global = true, default_value = "forecast.json")]
    pub config: PathBuf,

    /// Ledger export (CSV).
    #[arg(long, short, global = true, default_value = "ledger.csv")]
    pub ledger: PathBuf,

    /// Plain ASCII output without colors.
    #[arg(long, global = true)]
    pub plain: bool,

    /// Default mode for exception tags without their own mode.
    #[arg(long, global = true, env = "EX_MODE", value_name = "MODE")]
    pub exception_mode: Option<ExceptionMode>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the running balance of a year.
    Project(ProjectArgs),
    /// Solve for income/expenses keeping the balance above `min_balance`.
    Fit(FitArgs),
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Months of history, counted back from today, used for predictions.
    #[arg(long)]
    pub months_ago: Option<u32>,

    #[arg(long, allow_negative_numbers = true)]
    pub income: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub expenses: Option<f64>,
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// Defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,
}

/// Parses process arguments and prints the requested report.
pub fn run_cli() -> Result<()> {
    let output = run(Cli::parse())?;
    println!("{output}");
    Ok(())
}

pub fn run(cli: Cli) -> Result<String> {
    let mut config = config::load(&cli.config)?;
    config.apply_overrides(&ArgOverrides {
        exception_mode: cli.exception_mode,
        plain: cli.plain,
    });

    let mut table = Table::new(&config);
    load_csv(&cli.ledger, &mut table)?;
    tracing::info!(%table, "ledger loaded");

    let forecaster = Forecaster::new(&config, &table);
    let current_year = forecaster.reference_date().year();
    let output = match cli.command {
        Command::Project(args) => {
            let projection = forecaster.project_year(
                args.year.unwrap_or(current_year),
                args.months_ago,
                args.income,
                args.expenses,
            )?;
            report::render_projection(&projection, config.plain)
        }
        Command::Fit(args) => {
            let year = args.year.unwrap_or(current_year);
            report::render_fit(year, forecaster.fit_year(year)?)
        }
    };
    Ok(output)
}
