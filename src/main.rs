//! Personal Finance CLI
//!
//! Command-line front end for goal projections, the annuity solver and loan
//! amortization schedules. Rates are entered as percentages.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use personal_finance::amortization::generator_for;
use personal_finance::export::{to_json, write_schedule_csv, write_trajectory_csv};
use personal_finance::{
    AmortizationMethod, AnnuityParameters, AnnuitySolver, CalculatorConfig, GoalProjectionInput,
    LoanParameters, ProjectionEngine, TvmVariable,
};

#[derive(Debug, Parser)]
#[command(name = "finance", version, about = "Investment goals, annuity solving and loan schedules")]
struct Cli {
    /// JSON file with solver and projection settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// How long until contributions and returns reach a savings goal
    Project {
        /// Amount invested up front
        #[arg(long, default_value_t = 0.0)]
        initial: f64,

        /// Contribution added every month
        #[arg(long, default_value_t = 0.0)]
        monthly: f64,

        /// Annual return in percent (12 = 12% a year)
        #[arg(long, default_value_t = 0.0)]
        annual_return: f64,

        /// Target balance
        #[arg(long)]
        goal: f64,

        /// Write the month-by-month trajectory to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Solve one of n, i, pv, pmt, fv from the other four
    #[command(allow_negative_numbers = true)]
    Tvm {
        /// Variable to solve for: n, i, pv, pmt or fv
        #[arg(long)]
        solve: TvmVariable,

        /// Number of periods
        #[arg(long, default_value_t = 0)]
        n: u32,

        /// Periodic rate in percent
        #[arg(long, default_value_t = 0.0)]
        i: f64,

        /// Present value
        #[arg(long, default_value_t = 0.0)]
        pv: f64,

        /// Periodic payment
        #[arg(long, default_value_t = 0.0)]
        pmt: f64,

        /// Future value
        #[arg(long, default_value_t = 0.0)]
        fv: f64,
    },

    /// Loan amortization schedule
    #[command(allow_negative_numbers = true)]
    Schedule {
        /// price or sac
        #[arg(long)]
        method: AmortizationMethod,

        /// Amount borrowed
        #[arg(long)]
        principal: f64,

        /// Interest rate per period in percent
        #[arg(long)]
        rate: f64,

        /// Number of periods
        #[arg(long)]
        term: u32,

        /// Balance left owing after the last payment
        #[arg(long, default_value_t = 0.0)]
        balloon: f64,

        /// Write the schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_json_path(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => CalculatorConfig::default(),
    }
    .with_env_overrides();

    match cli.command {
        Command::Project { initial, monthly, annual_return, goal, csv } => {
            let input = GoalProjectionInput::new(initial, monthly, annual_return / 100.0, goal);
            run_projection(&config, &input, cli.json, csv.as_deref())
        }
        Command::Tvm { solve, n, i, pv, pmt, fv } => {
            let params = AnnuityParameters::new(n, i / 100.0, pv, pmt, fv);
            run_tvm(&config, solve, &params, cli.json)
        }
        Command::Schedule { method, principal, rate, term, balloon, csv } => {
            let loan = LoanParameters::new(principal, rate / 100.0, term).with_balloon(balloon);
            run_schedule(method, &loan, cli.json, csv.as_deref())
        }
    }
}

fn run_projection(
    config: &CalculatorConfig,
    input: &GoalProjectionInput,
    json: bool,
    csv_path: Option<&Path>,
) -> Result<()> {
    let engine = ProjectionEngine::new(config.projection.clone());
    let result = engine.project(input).context("projection failed")?;

    if let Some(path) = csv_path {
        write_trajectory_csv(&result, create_file(path)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if json {
        println!("{}", to_json(&result)?);
        return Ok(());
    }

    let summary = result.summary();
    if summary.goal_reached {
        println!(
            "Goal of {:.2} reached in {} years and {} months.",
            input.goal, summary.years, summary.months
        );
    } else {
        println!(
            "Goal of {:.2} not reached within {} years and {} months.",
            input.goal, summary.years, summary.months
        );
    }
    println!("Total invested:  {:>16.2}", summary.total_invested);
    println!("Total interest:  {:>16.2}", summary.interest);
    println!("Final balance:   {:>16.2}", summary.final_balance);
    Ok(())
}

fn run_tvm(
    config: &CalculatorConfig,
    target: TvmVariable,
    params: &AnnuityParameters,
    json: bool,
) -> Result<()> {
    let solver = AnnuitySolver::new(config.solver.clone());
    let solution = solver
        .solve(target, params)
        .with_context(|| format!("could not solve for {}", target))?;

    if json {
        println!("{}", to_json(&solution)?);
        return Ok(());
    }

    match target {
        TvmVariable::Periods => println!("n = {} periods", solution.value),
        TvmVariable::Rate => println!(
            "i = {:.4}% per period",
            solution.rate_percent().unwrap_or(solution.value * 100.0)
        ),
        _ => println!("{} = {:.2}", target.key().to_uppercase(), solution.value),
    }
    Ok(())
}

fn run_schedule(
    method: AmortizationMethod,
    loan: &LoanParameters,
    json: bool,
    csv_path: Option<&Path>,
) -> Result<()> {
    let schedule = generator_for(method)
        .generate(loan)
        .with_context(|| format!("could not build {} schedule", method))?;

    if let Some(path) = csv_path {
        write_schedule_csv(&schedule, create_file(path)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if json {
        println!("{}", to_json(&schedule)?);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    writeln!(out, "{} schedule", method)?;
    writeln!(out, "Total amortized: {:>14.2}", schedule.total_amortized)?;
    writeln!(out, "Total interest:  {:>14.2}", schedule.total_interest)?;
    writeln!(out, "Total paid:      {:>14.2}", schedule.total_paid)?;
    writeln!(out)?;
    writeln!(
        out,
        "{:>6} {:>14} {:>14} {:>14} {:>14}",
        "Period", "Payment", "Interest", "Principal", "Balance"
    )?;
    writeln!(out, "{}", "-".repeat(66))?;
    for row in &schedule.rows {
        writeln!(
            out,
            "{:>6} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            row.period, row.payment, row.interest, row.principal_portion, row.remaining_balance
        )?;
    }
    out.flush()?;
    Ok(())
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("unable to create {}", path.display()))
}
