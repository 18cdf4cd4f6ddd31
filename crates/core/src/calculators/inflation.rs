use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{round_currency, round_pct};
use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationInput {
    pub current_amount: f64,
    pub inflation_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationYear {
    pub year: u32,
    pub future_cost: f64,
    pub purchasing_power: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationResult {
    /// What today's basket will cost after `years`.
    pub future_cost: f64,
    /// What today's amount will be worth in today's money after `years`.
    pub purchasing_power: f64,
    pub value_lost_pct: f64,
    pub yearly: Vec<InflationYear>,
}

impl InflationInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("current_amount", self.current_amount)
            .range("inflation_rate", self.inflation_rate, 0.0, 30.0)
            .count("years", self.years, 1, 50)
            .finish()
    }
}

pub fn calculate_inflation(input: &InflationInput) -> Result<InflationResult, CoreError> {
    input.validate()?;

    let factor = 1.0 + input.inflation_rate / 100.0;
    let yearly = (1..=input.years)
        .map(|year| {
            let growth = factor.powi(year as i32);
            InflationYear {
                year,
                future_cost: round_currency(input.current_amount * growth),
                purchasing_power: round_currency(input.current_amount / growth),
            }
        })
        .collect();

    let growth = factor.powi(input.years as i32);
    let power = input.current_amount / growth;

    Ok(InflationResult {
        future_cost: round_currency(input.current_amount * growth),
        purchasing_power: round_currency(power),
        value_lost_pct: round_pct((1.0 - power / input.current_amount) * 100.0),
        yearly,
    })
}
