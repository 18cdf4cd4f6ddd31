use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{round_currency, round_pct};
use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInput {
    pub amount_invested: f64,
    pub amount_returned: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub total_gain: f64,
    pub roi_pct: f64,
    /// CAGR over the holding period. Zero when `years` is zero.
    pub annualized_roi_pct: f64,
}

impl RoiInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("amount_invested", self.amount_invested)
            .non_negative("amount_returned", self.amount_returned)
            .range("years", self.years, 0.0, 100.0)
            .finish()
    }
}

pub fn calculate_roi(input: &RoiInput) -> Result<RoiResult, CoreError> {
    input.validate()?;

    let gain = input.amount_returned - input.amount_invested;
    let ratio = input.amount_returned / input.amount_invested;
    let annualized = if input.years > 0.0 {
        (ratio.powf(1.0 / input.years) - 1.0) * 100.0
    } else {
        0.0
    };

    Ok(RoiResult {
        total_gain: round_currency(gain),
        roi_pct: round_pct(gain / input.amount_invested * 100.0),
        annualized_roi_pct: round_pct(annualized),
    })
}
