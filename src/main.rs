//! Portfolio Projection CLI
//!
//! Command-line interface for previewing deposits, withdrawals, payouts,
//! growth and accrual

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use portfolio_projection::{
    projection::{AccrualSchedule, GrowthMode, ProjectionResult},
    statement::format::format_rupees,
    Amount, ClientDetails, PayoutDetails, PortfolioSnapshot, ProductTerms, ProfitMode, ProfitPeriod,
    ProjectionCalculator, Role, StaticAuth,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portfolio-projection", version, about = "Preview portfolio transactions and growth")]
struct Cli {
    /// Product terms CSV (key,value); defaults are used when omitted
    #[arg(long, global = true)]
    terms: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preview a deposit
    Deposit {
        #[command(flatten)]
        portfolio: PortfolioArgs,
        #[arg(long)]
        amount: String,
    },
    /// Preview a withdrawal (profit first, then capital)
    Withdraw {
        #[command(flatten)]
        portfolio: PortfolioArgs,
        #[arg(long)]
        amount: String,
        /// Allow amounts above the available balance (result is clamped)
        #[arg(long)]
        lenient: bool,
    },
    /// Project lump-sum growth
    Growth {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        months: u32,
        #[arg(long, value_enum, default_value_t = ModeArg::Fixed)]
        mode: ModeArg,
    },
    /// Render a payout settlement statement
    Payout {
        #[command(flatten)]
        portfolio: PortfolioArgs,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        mobile: Option<String>,
        /// Payout date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Any day in the month being paid out; defaults to the payout month
        #[arg(long)]
        period: Option<NaiveDate>,
        #[arg(long)]
        transaction_id: Option<String>,
        /// Role of the operator preparing the statement
        #[arg(long, value_enum, default_value_t = RoleArg::Admin)]
        role: RoleArg,
    },
    /// Project monthly profit accrual
    Accrue {
        #[command(flatten)]
        portfolio: PortfolioArgs,
        #[arg(long)]
        months: u32,
        #[arg(long)]
        compounding: bool,
    },
}

#[derive(Args, Debug)]
struct PortfolioArgs {
    /// Invested capital
    #[arg(long)]
    invested: f64,
    /// Available (unpaid) profit
    #[arg(long, default_value_t = 0.0)]
    profit: f64,
    /// Monthly profit percentage (0 = product default)
    #[arg(long, default_value_t = 0.0)]
    rate: f64,
}

impl PortfolioArgs {
    fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot::new(self.invested, self.profit, self.rate)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Fixed,
    Compounded,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleArg {
    Admin,
    Mediator,
    Client,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Mediator => Role::Mediator,
            RoleArg::Client => Role::Client,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let terms = match &cli.terms {
        Some(path) => ProductTerms::from_csv_path(path)
            .with_context(|| format!("Failed to load product terms from {}", path.display()))?,
        None => ProductTerms::default(),
    };
    let calculator = ProjectionCalculator::new(terms);

    match cli.command {
        Command::Deposit { portfolio, amount } => {
            let amount = Amount::parse(&amount)?;
            let result = calculator.project_deposit(&portfolio.snapshot(), amount.value());
            emit(cli.json, &result, print_projection)?;
        }
        Command::Withdraw { portfolio, amount, lenient } => {
            let snapshot = portfolio.snapshot();
            let amount = Amount::parse(&amount)?;
            if !lenient {
                calculator.validate_withdrawal(&snapshot, amount)?;
            }
            let result = calculator.project_withdrawal(&snapshot, amount.value());
            emit(cli.json, &result, print_projection)?;
        }
        Command::Growth { principal, months, mode } => {
            let mode = match mode {
                ModeArg::Fixed => GrowthMode::Fixed,
                ModeArg::Compounded => GrowthMode::Compounded,
            };
            let result = calculator.project_compound_growth(principal, months, mode);
            emit(cli.json, &result, |g| match g.rate {
                Some(rate) => {
                    println!("Rate:         {}% per month", rate);
                    println!("Profit:       {}", format_rupees(g.profit.round()));
                    println!("Final amount: {}", format_rupees(g.final_amount.round()));
                }
                None => println!(
                    "Compounding requires at least {} months",
                    calculator.terms().min_compounding_months
                ),
            })?;
        }
        Command::Payout {
            portfolio,
            amount,
            user_id,
            name,
            mobile,
            date,
            period,
            transaction_id,
            role,
        } => {
            let amount = Amount::parse(&amount)?;
            let paid_on = date.unwrap_or_else(|| Local::now().date_naive());
            let mut client = ClientDetails::new(user_id, name);
            if let Some(mobile) = mobile {
                client = client.with_mobile(mobile);
            }
            let details = PayoutDetails {
                amount: amount.value(),
                period: ProfitPeriod::month_of(period.unwrap_or(paid_on)),
                paid_on,
                transaction_id,
            };
            let auth = StaticAuth {
                role: role.into(),
                user_id: None,
            };
            let statement = calculator.payout_statement_for(&auth, &client, &portfolio.snapshot(), &details)?;
            emit(cli.json, &statement, |s| println!("{}", s.message))?;
        }
        Command::Accrue { portfolio, months, compounding } => {
            let mut snapshot = portfolio.snapshot();
            if compounding {
                snapshot = snapshot.with_mode(ProfitMode::Compounding);
            }
            let schedule = calculator.project_accrual(&snapshot, months)?;
            emit(cli.json, &schedule, print_schedule)?;
        }
    }

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, print: impl Fn(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print(value);
    }
    Ok(())
}

fn print_projection(result: &ProjectionResult) {
    println!("{:<26} {:>16}", "Amount", format_rupees(result.amount));
    println!("{:<26} {:>16}", "From profit", format_rupees(result.deduct_from_profit));
    println!("{:<26} {:>16}", "From capital", format_rupees(result.deduct_from_capital));
    println!("{}", "-".repeat(43));
    println!("{:<26} {:>16}", "Invested capital", format_rupees(result.new_invested));
    println!("{:<26} {:>16}", "Available profit", format_rupees(result.new_available_profit));
    println!("{:<26} {:>16}", "Total balance", format_rupees(result.new_total_balance));
    println!("{:<26} {:>16}", "Projected monthly profit", format_rupees(result.projected_monthly_profit.round()));
    if result.is_capital_impacted {
        println!("\nCapital impact: this withdrawal reduces invested capital.");
    }
}

fn print_schedule(schedule: &AccrualSchedule) {
    println!("{:>5} {:>16} {:>8} {:>14} {:>16} {:>16}", "Month", "Base", "Rate", "Profit", "Avail. profit", "Balance");
    println!("{}", "-".repeat(80));
    for row in &schedule.rows {
        println!(
            "{:>5} {:>16.2} {:>7}% {:>14.2} {:>16.2} {:>16.2}",
            row.month, row.opening_base, row.rate, row.profit, row.available_profit, row.total_balance
        );
    }

    let summary = schedule.summary();
    println!("\nSummary:");
    println!("  Months accruing: {}/{}", summary.accruing_months, summary.total_months);
    println!("  Total profit:    {:.2}", summary.total_profit);
    println!("  Final balance:   {:.2}", summary.final_total_balance);
}
