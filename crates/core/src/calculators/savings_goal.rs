use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{annuity_due_payment, round_currency};
use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalInput {
    pub target_amount: f64,
    #[serde(default)]
    pub current_savings: f64,
    pub years: u32,
    pub expected_return: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalResult {
    pub future_value_of_savings: f64,
    pub shortfall: f64,
    pub monthly_investment: f64,
    pub total_contribution: f64,
    pub goal_met: bool,
}

impl SavingsGoalInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("target_amount", self.target_amount)
            .non_negative("current_savings", self.current_savings)
            .count("years", self.years, 1, 50)
            .range("expected_return", self.expected_return, 0.0, 30.0)
            .finish()
    }
}

/// Current savings compound monthly at the expected return; any gap to the
/// target is closed by an annuity-due monthly contribution.
pub fn calculate_savings_goal(input: &SavingsGoalInput) -> Result<SavingsGoalResult, CoreError> {
    input.validate()?;

    let i = input.expected_return / 1200.0;
    let months = input.years * 12;
    let savings_fv = input.current_savings * (1.0 + i).powi(months as i32);
    let shortfall = (input.target_amount - savings_fv).max(0.0);
    let monthly = annuity_due_payment(shortfall, i, months);

    Ok(SavingsGoalResult {
        future_value_of_savings: round_currency(savings_fv),
        shortfall: round_currency(shortfall),
        monthly_investment: round_currency(monthly),
        total_contribution: round_currency(monthly * f64::from(months)),
        goal_met: shortfall == 0.0,
    })
}
