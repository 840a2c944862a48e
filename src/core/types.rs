// Rates below are fractions, not percentages.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipInputs {
    pub monthly_investment: f64,
    pub annual_return: f64,
    pub months: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipResult {
    pub total_investment: f64,
    pub total_returns: f64,
    pub maturity_amount: f64,
    pub annuity_due_maturity_amount: f64,
    pub annuity_due_returns: f64,
}

/// Investment horizon for lumpsum growth. The unit also selects the
/// compounding convention: monthly for `Months`, annual for `Years`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Period {
    Months(f64),
    Years(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumpsumInputs {
    pub initial_investment: f64,
    pub annual_return: f64,
    pub period: Period,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumpsumResult {
    pub total_returns: f64,
    pub maturity_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalInputs {
    pub goal_amount: f64,
    pub annual_rate: f64,
    pub months: Option<f64>,
    pub years: Option<f64>,
}

/// Investment needed to reach a goal over one horizon. `periodic_investment`
/// is per month or per year depending on which path produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalPlan {
    pub periods: f64,
    pub lumpsum_needed: f64,
    pub periodic_investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalResult {
    pub monthly: Option<GoalPlan>,
    pub yearly: Option<GoalPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExistingSaving {
    pub amount: f64,
    pub pre_retirement_return: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementInputs {
    pub current_age: f64,
    pub retirement_age: f64,
    pub life_expectancy: f64,
    pub current_monthly_expenses: f64,
    pub expense_continuation: f64,
    pub inflation: f64,
    pub post_retirement_return: f64,
    pub existing_savings: Vec<ExistingSaving>,
}

/// `None` when the delay leaves no time before retirement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayScenario {
    pub delay_years: u32,
    pub lumpsum: Option<f64>,
    pub sip: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementResult {
    pub monthly_expense_at_retirement: f64,
    pub corpus_required: f64,
    pub appreciated_existing_savings: f64,
    pub additional_corpus_needed: f64,
    pub lumpsum_required: f64,
    pub sip_required: f64,
    pub weighted_pre_retirement_return: f64,
    pub investment_pattern: Vec<DelayScenario>,
}
