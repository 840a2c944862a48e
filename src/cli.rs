use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use std::net::{IpAddr, SocketAddr};

use crate::api::{
    ApiError, GoalPayload, LumpsumPayload, RetirementPayload, SipPayload, run_goal, run_lumpsum,
    run_retirement, run_sip,
};

#[derive(Parser, Debug)]
#[command(
    name = "wealthcalc",
    about = "SIP, lumpsum, goal and retirement calculators with a JSON HTTP API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the calculators over HTTP
    Serve(ServeArgs),
    #[command(flatten)]
    Calculator(Calculator),
}

#[derive(Subcommand, Debug)]
pub enum Calculator {
    /// Future value of a monthly SIP
    Sip(SipArgs),
    /// Future value of a one-off investment
    Lumpsum(LumpsumArgs),
    /// Lumpsum or periodic investment needed to reach a target amount
    Goal(GoalArgs),
    /// Corpus, lumpsum and SIP needed to fund retirement
    Retirement(RetirementArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "WEALTHCALC_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "WEALTHCALC_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Args, Debug)]
pub struct SipArgs {
    #[arg(long)]
    monthly_investment: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    expected_return: f64,
    #[arg(long, help = "Number of monthly instalments")]
    time_period: f64,
}

#[derive(Args, Debug)]
pub struct LumpsumArgs {
    #[arg(long)]
    initial_investment: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    expected_return: f64,
    #[arg(long, help = "Horizon in months, compounded monthly; wins over --years")]
    months: Option<f64>,
    #[arg(long, help = "Horizon in years, compounded annually")]
    years: Option<f64>,
}

#[derive(Args, Debug)]
pub struct GoalArgs {
    #[arg(long)]
    goal_amount: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    annual_rate: f64,
    #[arg(long)]
    months: Option<f64>,
    #[arg(long)]
    years: Option<f64>,
}

#[derive(Args, Debug)]
pub struct RetirementArgs {
    #[arg(long)]
    current_age: f64,
    #[arg(long)]
    retirement_age: f64,
    #[arg(long)]
    life_expectancy: f64,
    #[arg(long)]
    current_monthly_expenses: f64,
    #[arg(
        long,
        default_value_t = 100.0,
        help = "Share of today's expenses that continue after retirement, in percent"
    )]
    percent_expenses_continue: f64,
    #[arg(long, help = "Expected annual inflation in percent")]
    expected_inflation: f64,
    #[arg(long, help = "Expected annual return after retirement in percent")]
    post_retirement_return: f64,
    #[arg(
        long = "saving",
        value_name = "AMOUNT:RETURN",
        value_parser = parse_saving,
        help = "Existing saving and its annual pre-retirement return in percent; repeatable"
    )]
    savings: Vec<(f64, f64)>,
}

fn parse_saving(raw: &str) -> Result<(f64, f64), String> {
    let (amount, rate) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected AMOUNT:RETURN, got {raw:?}"))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid saving amount {amount:?}: {e}"))?;
    let rate = rate
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid saving return {rate:?}: {e}"))?;
    Ok((amount, rate))
}

impl From<&SipArgs> for SipPayload {
    fn from(args: &SipArgs) -> Self {
        Self {
            monthly_investment: Some(args.monthly_investment),
            expected_return: Some(args.expected_return),
            time_period: Some(args.time_period),
        }
    }
}

impl From<&LumpsumArgs> for LumpsumPayload {
    fn from(args: &LumpsumArgs) -> Self {
        Self {
            initial_investment: Some(args.initial_investment),
            expected_return: Some(args.expected_return),
            months: args.months,
            years: args.years,
        }
    }
}

impl From<&GoalArgs> for GoalPayload {
    fn from(args: &GoalArgs) -> Self {
        Self {
            goal_amount: Some(args.goal_amount),
            annual_rate: Some(args.annual_rate),
            months: args.months,
            years: args.years,
        }
    }
}

impl From<&RetirementArgs> for RetirementPayload {
    fn from(args: &RetirementArgs) -> Self {
        let savings = args
            .savings
            .iter()
            .map(|(amount, rate)| json!({ "amount": amount, "preRetirementReturn": rate }))
            .collect();
        Self {
            current_age: Some(args.current_age),
            retirement_age: Some(args.retirement_age),
            life_expectancy: Some(args.life_expectancy),
            current_monthly_expenses: Some(args.current_monthly_expenses),
            percent_expenses_continue: Some(args.percent_expenses_continue),
            expected_inflation: Some(args.expected_inflation),
            post_retirement_return: Some(args.post_retirement_return),
            existing_savings: Some(Value::Array(savings)),
        }
    }
}

/// Runs a calculator subcommand through the HTTP validation pipeline and
/// renders the response body as pretty JSON.
pub fn run_calculator(calculator: &Calculator) -> Result<String, ApiError> {
    match calculator {
        Calculator::Sip(args) => render(run_sip(&args.into())?),
        Calculator::Lumpsum(args) => render(run_lumpsum(&args.into())?),
        Calculator::Goal(args) => render(run_goal(&args.into())?),
        Calculator::Retirement(args) => render(run_retirement(&args.into())?),
    }
}

fn render<T: Serialize>(response: T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(&response).map_err(|e| ApiError::Internal(e.to_string()))
}
