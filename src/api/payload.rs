use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::ApiError;
use crate::core::{ExistingSaving, GoalInputs, LumpsumInputs, Period, RetirementInputs, SipInputs};

const DEFAULT_PERCENT_EXPENSES_CONTINUE: f64 = 100.0;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SipPayload {
    pub monthly_investment: Option<f64>,
    pub expected_return: Option<f64>,
    pub time_period: Option<f64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LumpsumPayload {
    pub initial_investment: Option<f64>,
    pub expected_return: Option<f64>,
    pub months: Option<f64>,
    pub years: Option<f64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalPayload {
    pub goal_amount: Option<f64>,
    pub annual_rate: Option<f64>,
    pub months: Option<f64>,
    pub years: Option<f64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetirementPayload {
    pub current_age: Option<f64>,
    pub retirement_age: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub current_monthly_expenses: Option<f64>,
    pub percent_expenses_continue: Option<f64>,
    pub expected_inflation: Option<f64>,
    pub post_retirement_return: Option<f64>,
    /// Kept loose so a non-array value, `null` included, can be reported as
    /// a shape error. Only an absent key means "no savings".
    #[serde(deserialize_with = "given")]
    pub existing_savings: Option<Value>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SavingPayload {
    amount: Option<f64>,
    pre_retirement_return: Option<f64>,
}

fn given<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A field counts as given only when it holds a non-zero number.
pub(crate) fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

pub fn sip_inputs(payload: &SipPayload) -> Result<SipInputs, ApiError> {
    let (Some(monthly_investment), Some(expected_return), Some(months)) = (
        present(payload.monthly_investment),
        present(payload.expected_return),
        present(payload.time_period),
    ) else {
        return Err(ApiError::missing("Missing required parameters"));
    };

    if monthly_investment <= 0.0 || expected_return <= 0.0 || months <= 0.0 {
        return Err(ApiError::out_of_range("All values must be positive"));
    }

    Ok(SipInputs {
        monthly_investment,
        annual_return: expected_return / 100.0,
        months,
    })
}

/// Months win when both periods are supplied.
pub fn lumpsum_inputs(payload: &LumpsumPayload) -> Result<LumpsumInputs, ApiError> {
    let (Some(initial_investment), Some(expected_return)) = (
        present(payload.initial_investment),
        present(payload.expected_return),
    ) else {
        return Err(ApiError::missing("Missing required parameters"));
    };

    let period = match (present(payload.months), present(payload.years)) {
        (Some(months), _) => Period::Months(months),
        (None, Some(years)) => Period::Years(years),
        (None, None) => return Err(ApiError::missing("Missing required parameters")),
    };

    if initial_investment <= 0.0 || expected_return <= 0.0 {
        return Err(ApiError::out_of_range(
            "Investment amount and return must be positive",
        ));
    }

    match period {
        Period::Months(months) if months <= 0.0 => {
            return Err(ApiError::out_of_range("Months must be positive"));
        }
        Period::Years(years) if years <= 0.0 => {
            return Err(ApiError::out_of_range("Years must be positive"));
        }
        _ => {}
    }

    Ok(LumpsumInputs {
        initial_investment,
        annual_return: expected_return / 100.0,
        period,
    })
}

pub fn goal_inputs(payload: &GoalPayload) -> Result<GoalInputs, ApiError> {
    let (Some(goal_amount), Some(annual_rate)) =
        (present(payload.goal_amount), present(payload.annual_rate))
    else {
        return Err(ApiError::missing("Please provide amount and rate"));
    };

    let months = present(payload.months);
    let years = present(payload.years);
    if months.is_none() && years.is_none() {
        return Err(ApiError::missing("Please provide either months or years"));
    }

    let negative = |v: Option<f64>| v.is_some_and(|v| v < 0.0);
    if goal_amount < 0.0 || annual_rate < 0.0 || negative(months) || negative(years) {
        return Err(ApiError::out_of_range(
            "Goal amount, rate and period must be positive",
        ));
    }

    Ok(GoalInputs {
        goal_amount,
        annual_rate: annual_rate / 100.0,
        months,
        years,
    })
}

pub fn retirement_inputs(payload: &RetirementPayload) -> Result<RetirementInputs, ApiError> {
    let (
        Some(current_age),
        Some(retirement_age),
        Some(life_expectancy),
        Some(current_monthly_expenses),
        Some(expected_inflation),
        Some(post_retirement_return),
    ) = (
        present(payload.current_age),
        present(payload.retirement_age),
        present(payload.life_expectancy),
        present(payload.current_monthly_expenses),
        payload.expected_inflation,
        payload.post_retirement_return,
    )
    else {
        return Err(ApiError::missing("Missing required inputs."));
    };

    let existing_savings = match &payload.existing_savings {
        None => Vec::new(),
        Some(value) => existing_savings(value)?,
    };

    let percent_expenses_continue = payload
        .percent_expenses_continue
        .unwrap_or(DEFAULT_PERCENT_EXPENSES_CONTINUE);

    Ok(RetirementInputs {
        current_age,
        retirement_age,
        life_expectancy,
        current_monthly_expenses,
        expense_continuation: percent_expenses_continue / 100.0,
        inflation: expected_inflation / 100.0,
        post_retirement_return: post_retirement_return / 100.0,
        existing_savings,
    })
}

/// Entries without an amount or a return are dropped rather than rejected.
fn existing_savings(value: &Value) -> Result<Vec<ExistingSaving>, ApiError> {
    const SHAPE_ERROR: &str = "existingSavings must be an array of objects.";

    let Value::Array(entries) = value else {
        return Err(ApiError::malformed(SHAPE_ERROR));
    };

    let mut savings = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.is_object() {
            return Err(ApiError::malformed(SHAPE_ERROR));
        }
        let saving = SavingPayload::deserialize(entry)
            .map_err(|e| ApiError::Malformed(format!("Invalid existingSavings entry: {e}")))?;
        if let (Some(amount), Some(rate)) = (present(saving.amount), saving.pre_retirement_return)
        {
            savings.push(ExistingSaving {
                amount,
                pre_retirement_return: rate / 100.0,
            });
        }
    }
    Ok(savings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EPS: f64 = 1e-12;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn retirement_payload(value: Value) -> RetirementPayload {
        serde_json::from_value(value).expect("payload should parse")
    }

    fn sample_retirement_json() -> Value {
        json!({
            "currentAge": 30,
            "retirementAge": 60,
            "lifeExpectancy": 80,
            "currentMonthlyExpenses": 50000,
            "expectedInflation": 6,
            "postRetirementReturn": 8
        })
    }

    #[test]
    fn sip_converts_percentages_to_fractions() {
        let inputs = sip_inputs(&SipPayload {
            monthly_investment: Some(5_000.0),
            expected_return: Some(12.0),
            time_period: Some(120.0),
        })
        .expect("valid inputs");

        assert_approx(inputs.annual_return, 0.12);
        assert_approx(inputs.months, 120.0);
    }

    #[test]
    fn sip_treats_zero_as_missing_and_negative_as_out_of_range() {
        let zero = sip_inputs(&SipPayload {
            monthly_investment: Some(5_000.0),
            expected_return: Some(0.0),
            time_period: Some(12.0),
        })
        .expect_err("zero rate is missing");
        assert!(matches!(zero, ApiError::MissingField(_)));

        let negative = sip_inputs(&SipPayload {
            monthly_investment: Some(-5_000.0),
            expected_return: Some(12.0),
            time_period: Some(12.0),
        })
        .expect_err("negative amount is rejected");
        assert_eq!(negative.to_string(), "All values must be positive");
    }

    #[test]
    fn lumpsum_prefers_months_and_checks_each_period() {
        let both = lumpsum_inputs(&LumpsumPayload {
            initial_investment: Some(1_000.0),
            expected_return: Some(10.0),
            months: Some(6.0),
            years: Some(2.0),
        })
        .expect("valid inputs");
        assert_eq!(both.period, Period::Months(6.0));

        let zero_months = lumpsum_inputs(&LumpsumPayload {
            initial_investment: Some(1_000.0),
            expected_return: Some(10.0),
            months: Some(0.0),
            years: Some(2.0),
        })
        .expect("zero months falls through to years");
        assert_eq!(zero_months.period, Period::Years(2.0));

        let err = lumpsum_inputs(&LumpsumPayload {
            initial_investment: Some(1_000.0),
            expected_return: Some(10.0),
            months: None,
            years: Some(-1.0),
        })
        .expect_err("negative years");
        assert_eq!(err.to_string(), "Years must be positive");

        let err = lumpsum_inputs(&LumpsumPayload {
            initial_investment: Some(1_000.0),
            expected_return: Some(10.0),
            months: None,
            years: None,
        })
        .expect_err("no period");
        assert_eq!(err.to_string(), "Missing required parameters");
    }

    #[test]
    fn goal_requires_a_period_and_rejects_negatives() {
        let err = goal_inputs(&GoalPayload {
            goal_amount: Some(1_000_000.0),
            annual_rate: Some(12.0),
            months: None,
            years: None,
        })
        .expect_err("no period");
        assert_eq!(err.to_string(), "Please provide either months or years");

        let err = goal_inputs(&GoalPayload {
            goal_amount: None,
            annual_rate: Some(12.0),
            months: Some(12.0),
            years: None,
        })
        .expect_err("no amount");
        assert_eq!(err.to_string(), "Please provide amount and rate");

        let err = goal_inputs(&GoalPayload {
            goal_amount: Some(1_000_000.0),
            annual_rate: Some(12.0),
            months: Some(-12.0),
            years: None,
        })
        .expect_err("negative months");
        assert!(matches!(err, ApiError::OutOfRange(_)));
    }

    #[test]
    fn retirement_defaults_continuation_and_allows_zero_inflation() {
        let mut json = sample_retirement_json();
        json["expectedInflation"] = json!(0);
        let inputs = retirement_inputs(&retirement_payload(json)).expect("valid inputs");

        assert_approx(inputs.expense_continuation, 1.0);
        assert_approx(inputs.inflation, 0.0);
        assert_approx(inputs.post_retirement_return, 0.08);
        assert!(inputs.existing_savings.is_empty());
    }

    #[test]
    fn retirement_requires_scalars() {
        let mut json = sample_retirement_json();
        json.as_object_mut()
            .expect("object")
            .remove("postRetirementReturn");
        let err = retirement_inputs(&retirement_payload(json)).expect_err("missing return");
        assert_eq!(err.to_string(), "Missing required inputs.");

        let mut json = sample_retirement_json();
        json["currentAge"] = json!(0);
        let err = retirement_inputs(&retirement_payload(json)).expect_err("zero age");
        assert!(matches!(err, ApiError::MissingField(_)));
    }

    #[test]
    fn retirement_skips_incomplete_savings_entries() {
        let mut json = sample_retirement_json();
        json["existingSavings"] = json!([
            { "amount": 100000, "preRetirementReturn": 10 },
            { "amount": 50000 },
            { "preRetirementReturn": 8 },
            { "amount": 0, "preRetirementReturn": 8 },
            { "amount": 25000, "preRetirementReturn": 0 }
        ]);
        let inputs = retirement_inputs(&retirement_payload(json)).expect("valid inputs");

        assert_eq!(
            inputs.existing_savings,
            vec![
                ExistingSaving {
                    amount: 100_000.0,
                    pre_retirement_return: 0.10,
                },
                ExistingSaving {
                    amount: 25_000.0,
                    pre_retirement_return: 0.0,
                },
            ]
        );
    }

    #[test]
    fn retirement_rejects_non_array_savings() {
        let mut json = sample_retirement_json();
        json["existingSavings"] = json!({ "amount": 100000, "preRetirementReturn": 10 });
        let err = retirement_inputs(&retirement_payload(json)).expect_err("object is not array");
        assert_eq!(err.to_string(), "existingSavings must be an array of objects.");

        let mut json = sample_retirement_json();
        json["existingSavings"] = json!([100000]);
        let err = retirement_inputs(&retirement_payload(json)).expect_err("entry is not object");
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn retirement_null_savings_is_a_shape_error_but_absent_is_empty() {
        let mut json = sample_retirement_json();
        json["existingSavings"] = Value::Null;
        let payload = retirement_payload(json);
        assert_eq!(payload.existing_savings, Some(Value::Null));
        let err = retirement_inputs(&payload).expect_err("null is not an array");
        assert_eq!(err.to_string(), "existingSavings must be an array of objects.");

        let payload = retirement_payload(sample_retirement_json());
        assert_eq!(payload.existing_savings, None);
        let inputs = retirement_inputs(&payload).expect("absent savings default to empty");
        assert!(inputs.existing_savings.is_empty());
    }

    #[test]
    fn lumpsum_rejects_negative_amount_or_return() {
        let err = lumpsum_inputs(&LumpsumPayload {
            initial_investment: Some(-1_000.0),
            expected_return: Some(10.0),
            months: None,
            years: Some(5.0),
        })
        .expect_err("negative investment");
        assert!(matches!(err, ApiError::OutOfRange(_)));
        assert_eq!(err.to_string(), "Investment amount and return must be positive");

        let err = lumpsum_inputs(&LumpsumPayload {
            initial_investment: Some(1_000.0),
            expected_return: Some(-10.0),
            months: Some(12.0),
            years: None,
        })
        .expect_err("negative return");
        assert_eq!(err.to_string(), "Investment amount and return must be positive");
    }
}
