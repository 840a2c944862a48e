use super::types::{
    GoalInputs, GoalPlan, GoalResult, LumpsumInputs, LumpsumResult, Period, SipInputs, SipResult,
};

const MONTHS_PER_YEAR: f64 = 12.0;

pub fn calculate_sip(inputs: &SipInputs) -> SipResult {
    let monthly_rate = inputs.annual_return / MONTHS_PER_YEAR;
    let maturity_amount = inputs.monthly_investment
        * annuity_future_value_factor(monthly_rate, inputs.months);
    let annuity_due_maturity_amount = maturity_amount * (1.0 + monthly_rate);
    let total_investment = inputs.monthly_investment * inputs.months;

    SipResult {
        total_investment,
        total_returns: maturity_amount - total_investment,
        maturity_amount,
        annuity_due_maturity_amount,
        annuity_due_returns: annuity_due_maturity_amount - total_investment,
    }
}

pub fn calculate_lumpsum(inputs: &LumpsumInputs) -> LumpsumResult {
    let maturity_amount = match inputs.period {
        Period::Months(months) => {
            inputs.initial_investment
                * growth_factor(inputs.annual_return / MONTHS_PER_YEAR, months)
        }
        Period::Years(years) => {
            inputs.initial_investment * growth_factor(inputs.annual_return, years)
        }
    };

    LumpsumResult {
        total_returns: maturity_amount - inputs.initial_investment,
        maturity_amount,
    }
}

pub fn calculate_goal(inputs: &GoalInputs) -> GoalResult {
    let monthly_rate = inputs.annual_rate / MONTHS_PER_YEAR;
    let monthly = inputs
        .months
        .map(|months| plan_for_goal(inputs.goal_amount, monthly_rate, months));
    let yearly = inputs
        .years
        .map(|years| plan_for_goal(inputs.goal_amount, inputs.annual_rate, years));

    GoalResult { monthly, yearly }
}

fn plan_for_goal(goal_amount: f64, rate: f64, periods: f64) -> GoalPlan {
    GoalPlan {
        periods,
        lumpsum_needed: goal_amount / growth_factor(rate, periods),
        periodic_investment: annuity_payment(goal_amount, rate, periods),
    }
}

pub(crate) fn growth_factor(rate: f64, periods: f64) -> f64 {
    (1.0 + rate).powf(periods)
}

/// Future value of 1 paid at the end of each period.
pub(crate) fn annuity_future_value_factor(rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        return periods;
    }
    (growth_factor(rate, periods) - 1.0) / rate
}

pub(crate) fn annuity_payment(future_value: f64, rate: f64, periods: f64) -> f64 {
    future_value / annuity_future_value_factor(rate, periods)
}
