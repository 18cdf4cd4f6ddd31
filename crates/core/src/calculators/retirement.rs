use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{annuity_due_payment, round_currency};
use crate::errors::CoreError;

/// Years the corpus is expected to fund after retirement.
pub const RETIREMENT_HORIZON_YEARS: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Shown alongside the result; the corpus itself assumes a fixed horizon.
    pub life_expectancy: u32,
    pub monthly_expenses: f64,
    /// Expected yearly inflation in percent.
    pub inflation_rate: f64,
    /// Expected yearly return on investments in percent.
    pub expected_return: f64,
    #[serde(default)]
    pub current_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub years_to_retirement: u32,
    pub future_monthly_expense: f64,
    pub corpus_required: f64,
    pub future_value_of_savings: f64,
    pub shortfall: f64,
    pub monthly_sip_required: f64,
}

impl RetirementInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .count("current_age", self.current_age, 18, 99)
            .count("retirement_age", self.retirement_age, 19, 100)
            .check(
                "retirement_age",
                self.retirement_age > self.current_age,
                "must be greater than current age",
            )
            .check(
                "life_expectancy",
                self.life_expectancy >= self.retirement_age,
                "must not be less than retirement age",
            )
            .positive("monthly_expenses", self.monthly_expenses)
            .range("inflation_rate", self.inflation_rate, 0.0, 20.0)
            .check(
                "expected_return",
                self.expected_return > 0.0 && self.expected_return <= 30.0,
                "must be greater than 0 and at most 30",
            )
            .non_negative("current_savings", self.current_savings)
            .finish()
    }
}

/// Corpus sizing treats the post-retirement annual expense as a perpetuity
/// multiple: `expense * 12 * 25 / (return / 100)`.
pub fn calculate_retirement(input: &RetirementInput) -> Result<RetirementResult, CoreError> {
    input.validate()?;

    let years = input.retirement_age - input.current_age;
    let months = years * 12;
    let future_expense =
        input.monthly_expenses * (1.0 + input.inflation_rate / 100.0).powi(years as i32);
    let corpus = future_expense * 12.0 * RETIREMENT_HORIZON_YEARS / (input.expected_return / 100.0);

    let i = input.expected_return / 1200.0;
    let savings_fv = input.current_savings * (1.0 + i).powi(months as i32);
    let shortfall = (corpus - savings_fv).max(0.0);
    let sip = annuity_due_payment(shortfall, i, months);

    Ok(RetirementResult {
        years_to_retirement: years,
        future_monthly_expense: round_currency(future_expense),
        corpus_required: round_currency(corpus),
        future_value_of_savings: round_currency(savings_fv),
        shortfall: round_currency(shortfall),
        monthly_sip_required: round_currency(sip),
    })
}
