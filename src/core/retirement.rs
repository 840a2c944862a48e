use super::engine::{annuity_payment, growth_factor};
use super::types::{DelayScenario, ExistingSaving, RetirementInputs, RetirementResult};

const MONTHS_PER_YEAR: f64 = 12.0;

pub const DELAY_YEARS: [u32; 4] = [0, 1, 3, 5];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SavingsSummary {
    appreciated: f64,
    weighted_return: f64,
}

impl SavingsSummary {
    /// Every saving compounds monthly over the full pre-retirement horizon,
    /// regardless of when it was made.
    fn from_savings(savings: &[ExistingSaving], months_to_retirement: f64) -> Self {
        let mut total = 0.0;
        let mut weighted_sum = 0.0;
        let mut appreciated = 0.0;
        for saving in savings {
            total += saving.amount;
            weighted_sum += saving.amount * saving.pre_retirement_return;
            appreciated += saving.amount
                * growth_factor(
                    saving.pre_retirement_return / MONTHS_PER_YEAR,
                    months_to_retirement,
                );
        }

        let weighted_return = if total == 0.0 {
            0.0
        } else {
            weighted_sum / total
        };
        Self {
            appreciated,
            weighted_return,
        }
    }
}

pub fn calculate_retirement(inputs: &RetirementInputs) -> RetirementResult {
    let years_to_retirement = inputs.retirement_age - inputs.current_age;
    let months_to_retirement = years_to_retirement * MONTHS_PER_YEAR;
    let months_after_retirement =
        (inputs.life_expectancy - inputs.retirement_age) * MONTHS_PER_YEAR;

    let monthly_expense_at_retirement = inputs.current_monthly_expenses
        * growth_factor(inputs.inflation, years_to_retirement)
        * inputs.expense_continuation;

    let monthly_real_rate =
        real_rate(inputs.post_retirement_return, inputs.inflation) / MONTHS_PER_YEAR;
    let corpus_required = monthly_expense_at_retirement
        * annuity_present_value_factor(monthly_real_rate, months_after_retirement);

    let savings = SavingsSummary::from_savings(&inputs.existing_savings, months_to_retirement);
    let remaining_corpus_needed = corpus_required - savings.appreciated;
    let weighted_return = savings.weighted_return;

    // Lumpsum discounts at the effective monthly rate; SIP uses the flat
    // annual/12 rate. The two conventions differ on purpose.
    let effective_monthly_rate = (1.0 + weighted_return).powf(1.0 / MONTHS_PER_YEAR) - 1.0;
    let lumpsum_required =
        remaining_corpus_needed / growth_factor(effective_monthly_rate, months_to_retirement);
    let sip_required = annuity_payment(
        remaining_corpus_needed,
        weighted_return / MONTHS_PER_YEAR,
        months_to_retirement,
    );

    let investment_pattern = DELAY_YEARS
        .iter()
        .map(|&delay_years| {
            delay_scenario(
                remaining_corpus_needed,
                weighted_return,
                years_to_retirement,
                delay_years,
            )
        })
        .collect();

    RetirementResult {
        monthly_expense_at_retirement,
        corpus_required,
        appreciated_existing_savings: savings.appreciated,
        additional_corpus_needed: remaining_corpus_needed,
        lumpsum_required,
        sip_required,
        weighted_pre_retirement_return: weighted_return,
        investment_pattern,
    }
}

fn delay_scenario(
    remaining_corpus_needed: f64,
    weighted_return: f64,
    years_to_retirement: f64,
    delay_years: u32,
) -> DelayScenario {
    let remaining_years = years_to_retirement - f64::from(delay_years);
    if remaining_years <= 0.0 {
        return DelayScenario {
            delay_years,
            lumpsum: None,
            sip: None,
        };
    }

    let lumpsum = remaining_corpus_needed / growth_factor(weighted_return, remaining_years);
    DelayScenario {
        delay_years,
        lumpsum: Some(lumpsum),
        sip: Some(annuity_payment(
            remaining_corpus_needed,
            weighted_return / MONTHS_PER_YEAR,
            remaining_years * MONTHS_PER_YEAR,
        )),
    }
}

fn real_rate(nominal: f64, inflation: f64) -> f64 {
    (1.0 + nominal) / (1.0 + inflation) - 1.0
}

/// Present value of 1 paid at the end of each period.
fn annuity_present_value_factor(rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        return periods;
    }
    (1.0 - (1.0 + rate).powf(-periods)) / rate
}
