use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::round_currency;
use crate::errors::CoreError;

/// Hard cap on simulated months (30 years). A payment that never outpaces
/// interest stops here instead of looping forever.
pub const MAX_PAYOFF_MONTHS: u32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardInput {
    pub outstanding: f64,
    pub monthly_payment: f64,
    /// Annual rate in percent. Card rates in India commonly run 36-45%.
    pub annual_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardResult {
    pub months_to_payoff: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub remaining_balance: f64,
    /// False when the month cap was reached with a balance still owed.
    pub paid_off: bool,
    /// False when the payment does not even cover the first month's
    /// interest, so the balance can never shrink.
    pub payment_covers_interest: bool,
}

impl CreditCardInput {
    pub fn new(outstanding: f64, monthly_payment: f64, annual_rate: f64) -> Self {
        Self {
            outstanding,
            monthly_payment,
            annual_rate,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("outstanding", self.outstanding)
            .positive("monthly_payment", self.monthly_payment)
            .range("annual_rate", self.annual_rate, 0.0, 60.0)
            .finish()
    }

    /// Interest charged on the full outstanding balance in the first month.
    pub fn first_month_interest(&self) -> f64 {
        self.outstanding * self.annual_rate / 1200.0
    }

    /// Whether the payment can ever retire the balance.
    pub fn payment_covers_interest(&self) -> bool {
        self.monthly_payment > self.first_month_interest()
    }
}

pub fn calculate_credit_card_payoff(input: &CreditCardInput) -> Result<CreditCardResult, CoreError> {
    input.validate()?;

    let i = input.annual_rate / 1200.0;
    let mut balance = input.outstanding;
    let mut months = 0;
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;

    while balance > 0.0 && months < MAX_PAYOFF_MONTHS {
        let interest = balance * i;
        total_interest += interest;
        balance += interest;

        let payment = input.monthly_payment.min(balance);
        total_paid += payment;
        balance -= payment;
        months += 1;
    }

    let covers_interest = input.payment_covers_interest();
    if !covers_interest {
        log::debug!(
            "credit card payment {:.2} does not cover monthly interest {:.2}",
            input.monthly_payment,
            input.first_month_interest()
        );
    }
    if balance > 0.0 {
        log::debug!(
            "credit card payoff hit the {MAX_PAYOFF_MONTHS}-month cap with {balance:.2} outstanding"
        );
    }

    Ok(CreditCardResult {
        months_to_payoff: months,
        total_interest: round_currency(total_interest),
        total_paid: round_currency(total_paid),
        remaining_balance: round_currency(balance.max(0.0)),
        paid_off: balance <= 0.0,
        payment_covers_interest: covers_interest,
    })
}
