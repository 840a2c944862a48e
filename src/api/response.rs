use serde::Serialize;

use super::error::ApiError;
use super::payload::{GoalPayload, LumpsumPayload, SipPayload, present};
use crate::core::format::{format_inr, round_half_up, round_to, to_fixed};
use crate::core::{
    DelayScenario, GoalPlan, GoalResult, LumpsumInputs, LumpsumResult, Period, RetirementResult,
    SipResult,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResponse {
    pub total_investment: f64,
    pub total_returns: f64,
    pub maturity_amount: f64,
    pub annuity_due_maturity_amount: f64,
    pub annuity_due_returns: f64,
    pub monthly_investment: Option<f64>,
    pub expected_return: Option<f64>,
    pub time_period: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumResponse {
    pub initial_investment: Option<f64>,
    pub total_returns: f64,
    pub maturity_amount: f64,
    pub expected_return: Option<f64>,
    pub time_period: String,
    pub months: Option<f64>,
    pub years: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_goal: Option<MonthlyGoal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_goal: Option<YearlyGoal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGoal {
    pub goal_amount: String,
    pub annual_rate: String,
    pub months: f64,
    pub years: String,
    pub lumpsum_needed: String,
    #[serde(rename = "monthlySIP")]
    pub monthly_sip: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyGoal {
    pub goal_amount: String,
    pub annual_rate: String,
    pub years: f64,
    pub lumpsum_needed: String,
    #[serde(rename = "yearlySIP")]
    pub yearly_sip: String,
    pub message: String,
}

/// Retirement figures are `null` when degenerate ages leave no horizon to
/// spread them over.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResponse {
    pub monthly_expense_at_retirement: Option<f64>,
    pub corpus_required: Option<f64>,
    pub appreciated_existing_savings: Option<f64>,
    pub additional_retirement_corpus_needed: Option<f64>,
    pub lumpsum_required: Option<f64>,
    pub sip_required: Option<f64>,
    pub weighted_pre_retirement_return: Option<f64>,
    pub investment_pattern: Vec<DelayRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayRow {
    pub delay_years: u32,
    pub lumpsum: Option<f64>,
    pub sip: Option<f64>,
}

fn ensure_finite(label: &str, value: f64) -> Result<f64, ApiError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ApiError::Internal(format!("{label} is not finite ({value})")))
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

pub(super) fn build_sip_response(
    payload: &SipPayload,
    result: &SipResult,
) -> Result<SipResponse, ApiError> {
    let maturity_amount = ensure_finite("SIP maturity amount", result.maturity_amount)?;
    let annuity_due =
        ensure_finite("SIP annuity-due maturity", result.annuity_due_maturity_amount)?;

    Ok(SipResponse {
        total_investment: round_half_up(result.total_investment),
        total_returns: round_half_up(result.total_returns),
        maturity_amount: round_half_up(maturity_amount),
        annuity_due_maturity_amount: round_half_up(annuity_due),
        annuity_due_returns: round_half_up(result.annuity_due_returns),
        monthly_investment: payload.monthly_investment,
        expected_return: payload.expected_return,
        time_period: payload.time_period,
    })
}

pub(super) fn build_lumpsum_response(
    payload: &LumpsumPayload,
    inputs: &LumpsumInputs,
    result: &LumpsumResult,
) -> Result<LumpsumResponse, ApiError> {
    let maturity_amount = ensure_finite("lumpsum maturity amount", result.maturity_amount)?;
    let time_period = match inputs.period {
        Period::Months(months) => format!("{months} months"),
        Period::Years(years) => format!("{years} years"),
    };

    Ok(LumpsumResponse {
        initial_investment: payload.initial_investment,
        total_returns: round_half_up(result.total_returns),
        maturity_amount: round_half_up(maturity_amount),
        expected_return: payload.expected_return,
        time_period,
        months: present(payload.months),
        years: present(payload.years),
    })
}

pub(super) fn build_goal_response(
    payload: &GoalPayload,
    result: &GoalResult,
) -> Result<GoalResponse, ApiError> {
    let goal_amount = payload.goal_amount.unwrap_or_default();
    let annual_rate = format!("{}%", payload.annual_rate.unwrap_or_default());
    let goal_display = format_inr(goal_amount);

    let monthly_goal = result
        .monthly
        .map(|plan| -> Result<MonthlyGoal, ApiError> {
            let (lumpsum, sip) = finite_plan("monthly goal", &plan)?;
            let months = plan.periods;
            let years = to_fixed(months / 12.0, 1);
            let sip_display = format_inr(sip);
            Ok(MonthlyGoal {
                message: format!(
                    "To reach ₹{goal_display} in {months} months ({years} years), invest ₹{} today (lumpsum) or ₹{sip_display} per month as SIP.",
                    format_inr(lumpsum)
                ),
                goal_amount: goal_display.clone(),
                annual_rate: annual_rate.clone(),
                months,
                years,
                lumpsum_needed: format_inr(round_half_up(lumpsum)),
                monthly_sip: sip_display,
            })
        })
        .transpose()?;

    let yearly_goal = result
        .yearly
        .map(|plan| -> Result<YearlyGoal, ApiError> {
            let (lumpsum, sip) = finite_plan("yearly goal", &plan)?;
            let years = plan.periods;
            let sip_display = format_inr(sip);
            Ok(YearlyGoal {
                message: format!(
                    "To reach ₹{goal_display} in {years} years, invest ₹{} today (lumpsum) or ₹{sip_display} per year as SIP.",
                    format_inr(lumpsum)
                ),
                goal_amount: goal_display.clone(),
                annual_rate: annual_rate.clone(),
                years,
                lumpsum_needed: format_inr(round_half_up(lumpsum)),
                yearly_sip: sip_display,
            })
        })
        .transpose()?;

    Ok(GoalResponse {
        monthly_goal,
        yearly_goal,
    })
}

fn finite_plan(label: &str, plan: &GoalPlan) -> Result<(f64, f64), ApiError> {
    Ok((
        ensure_finite(&format!("{label} lumpsum"), plan.lumpsum_needed)?,
        ensure_finite(&format!("{label} SIP"), plan.periodic_investment)?,
    ))
}

pub(super) fn build_retirement_response(result: &RetirementResult) -> RetirementResponse {
    let three_places = |value: f64| finite(value).map(|v| round_to(v, 3));
    let whole = |value: f64| finite(value).map(round_half_up);

    RetirementResponse {
        monthly_expense_at_retirement: three_places(result.monthly_expense_at_retirement),
        corpus_required: whole(result.corpus_required),
        appreciated_existing_savings: three_places(result.appreciated_existing_savings),
        additional_retirement_corpus_needed: three_places(result.additional_corpus_needed),
        lumpsum_required: whole(result.lumpsum_required),
        sip_required: three_places(result.sip_required),
        weighted_pre_retirement_return: three_places(result.weighted_pre_retirement_return * 100.0),
        investment_pattern: result
            .investment_pattern
            .iter()
            .map(|row: &DelayScenario| DelayRow {
                delay_years: row.delay_years,
                lumpsum: row.lumpsum.and_then(three_places),
                sip: row.sip.and_then(three_places),
            })
            .collect(),
    }
}
