use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{annuity_due_fv, round_currency};
use crate::errors::CoreError;

pub const MAX_SIP_YEARS: u32 = 50;
pub const MAX_RETURN_RATE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipInput {
    pub monthly_amount: f64,
    /// Expected annual return in percent.
    pub annual_rate: f64,
    pub tenure_years: u32,
    /// Yearly increase of the contribution in percent. Zero disables step-up.
    #[serde(default)]
    pub step_up_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYear {
    pub year: u32,
    pub monthly_contribution: f64,
    pub invested: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub total_investment: f64,
    pub future_value: f64,
    pub total_returns: f64,
    pub yearly: Vec<SipYear>,
}

impl SipInput {
    pub fn new(monthly_amount: f64, annual_rate: f64, tenure_years: u32) -> Self {
        Self {
            monthly_amount,
            annual_rate,
            tenure_years,
            step_up_rate: 0.0,
        }
    }

    pub fn with_step_up(mut self, step_up_rate: f64) -> Self {
        self.step_up_rate = step_up_rate;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("monthly_amount", self.monthly_amount)
            .range("annual_rate", self.annual_rate, 0.0, MAX_RETURN_RATE)
            .count("tenure_years", self.tenure_years, 1, MAX_SIP_YEARS)
            .range("step_up_rate", self.step_up_rate, 0.0, 100.0)
            .finish()
    }
}

pub fn calculate_sip(input: &SipInput) -> Result<SipResult, CoreError> {
    input.validate()?;

    let i = input.annual_rate / 1200.0;
    let months = input.tenure_years * 12;

    let (total_investment, future_value) = if input.step_up_rate == 0.0 {
        (
            input.monthly_amount * f64::from(months),
            annuity_due_fv(input.monthly_amount, i, months),
        )
    } else {
        step_up_totals(input, i, months)
    };

    Ok(SipResult {
        total_investment: round_currency(total_investment),
        future_value: round_currency(future_value),
        total_returns: round_currency(future_value - total_investment),
        yearly: yearly_projection(input, i),
    })
}

/// Each month's contribution compounded forward to maturity and summed.
fn step_up_totals(input: &SipInput, i: f64, months: u32) -> (f64, f64) {
    let mut invested = 0.0;
    let mut value = 0.0;
    for k in 0..months {
        let contribution = contribution_for_year(input, k / 12);
        invested += contribution;
        value += contribution * (1.0 + i).powi((months - k) as i32);
    }
    (invested, value)
}

fn contribution_for_year(input: &SipInput, year_index: u32) -> f64 {
    input.monthly_amount * (1.0 + input.step_up_rate / 100.0).powi(year_index as i32)
}

/// Running balance at the end of each year, simulated month by month.
fn yearly_projection(input: &SipInput, i: f64) -> Vec<SipYear> {
    let mut invested = 0.0;
    let mut value = 0.0;
    let mut years = Vec::with_capacity(input.tenure_years as usize);

    for year_index in 0..input.tenure_years {
        let contribution = contribution_for_year(input, year_index);
        for _ in 0..12 {
            invested += contribution;
            value = (value + contribution) * (1.0 + i);
        }
        years.push(SipYear {
            year: year_index + 1,
            monthly_contribution: round_currency(contribution),
            invested: round_currency(invested),
            value: round_currency(value),
        });
    }

    years
}
