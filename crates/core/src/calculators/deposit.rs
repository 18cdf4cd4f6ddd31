use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{annuity_due_fv, round_currency};
use crate::errors::CoreError;

/// Interest compounding frequency for a fixed deposit.
/// Indian banks compound FD interest quarterly, hence the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Compounding {
    Monthly,
    #[default]
    Quarterly,
    HalfYearly,
    Yearly,
}

impl Compounding {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Compounding::Monthly => 12,
            Compounding::Quarterly => 4,
            Compounding::HalfYearly => 2,
            Compounding::Yearly => 1,
        }
    }
}

impl std::fmt::Display for Compounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compounding::Monthly => write!(f, "Monthly"),
            Compounding::Quarterly => write!(f, "Quarterly"),
            Compounding::HalfYearly => write!(f, "Half-yearly"),
            Compounding::Yearly => write!(f, "Yearly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdInput {
    pub principal: f64,
    pub annual_rate: f64,
    /// Tenure in years; fractional values express extra months.
    pub years: f64,
    #[serde(default)]
    pub compounding: Compounding,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdResult {
    pub maturity_amount: f64,
    pub interest_earned: f64,
}

impl FdInput {
    pub fn new(principal: f64, annual_rate: f64, years: f64, compounding: Compounding) -> Self {
        Self {
            principal,
            annual_rate,
            years,
            compounding,
        }
    }

    /// Tenure given as whole years plus months, the way deposit forms ask for it.
    pub fn from_years_months(
        principal: f64,
        annual_rate: f64,
        years: u32,
        months: u32,
        compounding: Compounding,
    ) -> Self {
        let tenure = f64::from(years) + f64::from(months) / 12.0;
        Self::new(principal, annual_rate, tenure, compounding)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("principal", self.principal)
            .range("annual_rate", self.annual_rate, 0.0, 20.0)
            .range("years", self.years, 0.0, 30.0)
            .finish()
    }
}

pub fn calculate_fd(input: &FdInput) -> Result<FdResult, CoreError> {
    input.validate()?;

    let n = f64::from(input.compounding.periods_per_year());
    let maturity = input.principal * (1.0 + input.annual_rate / (100.0 * n)).powf(n * input.years);

    Ok(FdResult {
        maturity_amount: round_currency(maturity),
        interest_earned: round_currency(maturity - input.principal),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdInput {
    pub monthly_deposit: f64,
    pub annual_rate: f64,
    pub months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdResult {
    pub total_deposited: f64,
    pub maturity_amount: f64,
    pub interest_earned: f64,
}

impl RdInput {
    pub fn new(monthly_deposit: f64, annual_rate: f64, months: u32) -> Self {
        Self {
            monthly_deposit,
            annual_rate,
            months,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("monthly_deposit", self.monthly_deposit)
            .range("annual_rate", self.annual_rate, 0.0, 20.0)
            .count("months", self.months, 1, 120)
            .finish()
    }
}

pub fn calculate_rd(input: &RdInput) -> Result<RdResult, CoreError> {
    input.validate()?;

    let deposited = input.monthly_deposit * f64::from(input.months);
    let maturity = annuity_due_fv(input.monthly_deposit, input.annual_rate / 1200.0, input.months);

    Ok(RdResult {
        total_deposited: round_currency(deposited),
        maturity_amount: round_currency(maturity),
        interest_earned: round_currency(maturity - deposited),
    })
}
