use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{round_currency, round_pct};
use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumInput {
    pub principal: f64,
    /// Expected annual return in percent, compounded yearly.
    pub annual_rate: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumResult {
    pub future_value: f64,
    pub total_gains: f64,
    pub absolute_return_pct: f64,
    pub cagr_pct: f64,
}

impl LumpsumInput {
    pub fn new(principal: f64, annual_rate: f64, years: f64) -> Self {
        Self {
            principal,
            annual_rate,
            years,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("principal", self.principal)
            .range("annual_rate", self.annual_rate, 0.0, 50.0)
            .range("years", self.years, 0.0, 50.0)
            .finish()
    }
}

pub fn calculate_lumpsum(input: &LumpsumInput) -> Result<LumpsumResult, CoreError> {
    input.validate()?;

    let fv = input.principal * (1.0 + input.annual_rate / 100.0).powf(input.years);
    let gains = fv - input.principal;
    let cagr = if input.years > 0.0 {
        ((fv / input.principal).powf(1.0 / input.years) - 1.0) * 100.0
    } else {
        0.0
    };

    Ok(LumpsumResult {
        future_value: round_currency(fv),
        total_gains: round_currency(gains),
        absolute_return_pct: round_pct(gains / input.principal * 100.0),
        cagr_pct: round_pct(cagr),
    })
}
