//! Government small-savings schemes with statutory rates: PPF and NSC.

use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{annuity_due_fv, round_currency};
use crate::errors::CoreError;

pub const PPF_DEFAULT_RATE: f64 = 7.1;
pub const PPF_MIN_DEPOSIT: f64 = 500.0;
pub const PPF_MAX_DEPOSIT: f64 = 150_000.0;
/// Lock-in period; accounts may be extended in 5-year blocks afterwards.
pub const PPF_MIN_YEARS: u32 = 15;

pub const NSC_DEFAULT_RATE: f64 = 7.7;
pub const NSC_MIN_DEPOSIT: f64 = 1_000.0;
pub const NSC_TENURE_YEARS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfInput {
    pub yearly_deposit: f64,
    pub annual_rate: f64,
    pub years: u32,
}

impl Default for PpfInput {
    fn default() -> Self {
        Self {
            yearly_deposit: PPF_MAX_DEPOSIT,
            annual_rate: PPF_DEFAULT_RATE,
            years: PPF_MIN_YEARS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfYear {
    pub year: u32,
    pub opening_balance: f64,
    pub deposit: f64,
    pub interest: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfResult {
    pub total_deposited: f64,
    pub maturity_amount: f64,
    pub interest_earned: f64,
    pub yearly: Vec<PpfYear>,
}

impl PpfInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .range("yearly_deposit", self.yearly_deposit, PPF_MIN_DEPOSIT, PPF_MAX_DEPOSIT)
            .range("annual_rate", self.annual_rate, 0.0, 15.0)
            .count("years", self.years, PPF_MIN_YEARS, 50)
            .finish()
    }
}

/// Deposits are made at the start of each financial year and interest is
/// credited once a year.
pub fn calculate_ppf(input: &PpfInput) -> Result<PpfResult, CoreError> {
    input.validate()?;

    let r = input.annual_rate / 100.0;
    let mut balance = 0.0;
    let mut yearly = Vec::with_capacity(input.years as usize);
    for year in 1..=input.years {
        let opening = balance;
        let interest = (opening + input.yearly_deposit) * r;
        balance = opening + input.yearly_deposit + interest;
        yearly.push(PpfYear {
            year,
            opening_balance: round_currency(opening),
            deposit: input.yearly_deposit,
            interest: round_currency(interest),
            closing_balance: round_currency(balance),
        });
    }

    let deposited = input.yearly_deposit * f64::from(input.years);
    let maturity = annuity_due_fv(input.yearly_deposit, r, input.years);

    Ok(PpfResult {
        total_deposited: round_currency(deposited),
        maturity_amount: round_currency(maturity),
        interest_earned: round_currency(maturity - deposited),
        yearly,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NscInput {
    pub principal: f64,
    pub annual_rate: f64,
}

impl NscInput {
    pub fn new(principal: f64) -> Self {
        Self {
            principal,
            annual_rate: NSC_DEFAULT_RATE,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .check(
                "principal",
                self.principal >= NSC_MIN_DEPOSIT,
                "minimum NSC purchase is 1000",
            )
            .range("annual_rate", self.annual_rate, 0.0, 15.0)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NscResult {
    pub maturity_amount: f64,
    pub interest_earned: f64,
    pub tenure_years: u32,
}

pub fn calculate_nsc(input: &NscInput) -> Result<NscResult, CoreError> {
    input.validate()?;

    let maturity =
        input.principal * (1.0 + input.annual_rate / 100.0).powi(NSC_TENURE_YEARS as i32);

    Ok(NscResult {
        maturity_amount: round_currency(maturity),
        interest_earned: round_currency(maturity - input.principal),
        tenure_years: NSC_TENURE_YEARS,
    })
}
