use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::round_currency;
use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleInterestInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleInterestResult {
    pub interest: f64,
    pub total_amount: f64,
}

impl SimpleInterestInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("principal", self.principal)
            .range("annual_rate", self.annual_rate, 0.0, 50.0)
            .range("years", self.years, 0.0, 50.0)
            .finish()
    }
}

pub fn calculate_simple_interest(
    input: &SimpleInterestInput,
) -> Result<SimpleInterestResult, CoreError> {
    input.validate()?;

    let interest = input.principal * input.annual_rate * input.years / 100.0;
    Ok(SimpleInterestResult {
        interest: round_currency(interest),
        total_amount: round_currency(input.principal + interest),
    })
}
