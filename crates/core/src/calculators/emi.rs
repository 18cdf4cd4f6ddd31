use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::round_currency;
use crate::errors::CoreError;

/// Highest annual rate (in percent) accepted by the loan calculators.
pub const MAX_LOAN_RATE: f64 = 50.0;

/// Longest tenure accepted, in months (40 years).
pub const MAX_TENURE_MONTHS: u32 = 480;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiInput {
    pub principal: f64,
    /// Annual interest rate in percent (8.5 = 8.5%).
    pub annual_rate: f64,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResult {
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// One month of an amortization schedule. Amounts are not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Loan-year totals, used for the yearly table under the EMI result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub closing_balance: f64,
}

impl EmiInput {
    pub fn new(principal: f64, annual_rate: f64, tenure_months: u32) -> Self {
        Self {
            principal,
            annual_rate,
            tenure_months,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("principal", self.principal)
            .range("annual_rate", self.annual_rate, 0.0, MAX_LOAN_RATE)
            .count("tenure_months", self.tenure_months, 1, MAX_TENURE_MONTHS)
            .finish()
    }
}

/// Unrounded monthly installment. A zero rate amortizes linearly.
///
/// When `(1+i)^n` overflows, the installment is its limit for an endless
/// tenure: the monthly interest on the principal.
pub fn monthly_installment(principal: f64, annual_rate: f64, tenure_months: u32) -> f64 {
    let n = f64::from(tenure_months);
    let i = annual_rate / 1200.0;
    if i == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + i).powf(n);
    if !growth.is_finite() {
        return principal * i;
    }
    principal * i * growth / (growth - 1.0)
}

pub fn calculate_emi(input: &EmiInput) -> Result<EmiResult, CoreError> {
    input.validate()?;

    let emi = monthly_installment(input.principal, input.annual_rate, input.tenure_months);
    let total = emi * f64::from(input.tenure_months);

    Ok(EmiResult {
        emi: round_currency(emi),
        total_payment: round_currency(total),
        total_interest: round_currency(total - input.principal),
    })
}

/// Month-by-month breakdown of each installment into principal and interest.
///
/// The last row absorbs floating-point drift so the closing balance is zero.
pub fn amortization_schedule(input: &EmiInput) -> Result<Vec<AmortizationRow>, CoreError> {
    input.validate()?;

    let emi = monthly_installment(input.principal, input.annual_rate, input.tenure_months);
    let i = input.annual_rate / 1200.0;
    let mut balance = input.principal;
    let mut rows = Vec::with_capacity(input.tenure_months as usize);

    for month in 1..=input.tenure_months {
        let interest = balance * i;
        let mut principal = emi - interest;
        if month == input.tenure_months {
            principal = balance;
        }
        balance = (balance - principal).max(0.0);
        rows.push(AmortizationRow {
            month,
            payment: principal + interest,
            principal,
            interest,
            balance,
        });
    }

    Ok(rows)
}

/// Schedule folded into 12-month loan years. A trailing partial year is kept.
pub fn yearly_schedule(input: &EmiInput) -> Result<Vec<AmortizationYear>, CoreError> {
    let rows = amortization_schedule(input)?;
    Ok(rows
        .chunks(12)
        .enumerate()
        .map(|(idx, chunk)| AmortizationYear {
            year: idx as u32 + 1,
            principal_paid: round_currency(chunk.iter().map(|r| r.principal).sum()),
            interest_paid: round_currency(chunk.iter().map(|r| r.interest).sum()),
            closing_balance: round_currency(chunk.last().map_or(0.0, |r| r.balance)),
        })
        .collect())
}
