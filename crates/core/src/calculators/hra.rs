use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::round_currency;
use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HraInput {
    /// Annual basic salary.
    pub basic_salary: f64,
    /// Annual dearness allowance forming part of salary.
    #[serde(default)]
    pub dearness_allowance: f64,
    pub hra_received: f64,
    pub rent_paid: f64,
    /// Delhi, Mumbai, Kolkata or Chennai.
    pub metro_city: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HraResult {
    pub actual_hra: f64,
    pub rent_minus_ten_pct_salary: f64,
    pub salary_pct_limit: f64,
    pub exempt_hra: f64,
    pub taxable_hra: f64,
}

impl HraInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("basic_salary", self.basic_salary)
            .non_negative("dearness_allowance", self.dearness_allowance)
            .non_negative("hra_received", self.hra_received)
            .non_negative("rent_paid", self.rent_paid)
            .finish()
    }
}

/// Exemption under section 10(13A): the least of the HRA actually received,
/// rent paid in excess of 10% of salary, and 50% (metro) or 40% of salary.
pub fn calculate_hra(input: &HraInput) -> Result<HraResult, CoreError> {
    input.validate()?;

    let salary = input.basic_salary + input.dearness_allowance;
    let rent_excess = (input.rent_paid - 0.10 * salary).max(0.0);
    let city_pct = if input.metro_city { 0.50 } else { 0.40 };
    let salary_limit = city_pct * salary;

    let exempt = input.hra_received.min(rent_excess).min(salary_limit).max(0.0);

    Ok(HraResult {
        actual_hra: round_currency(input.hra_received),
        rent_minus_ten_pct_salary: round_currency(rent_excess),
        salary_pct_limit: round_currency(salary_limit),
        exempt_hra: round_currency(exempt),
        taxable_hra: round_currency(input.hra_received - exempt),
    })
}
