//! Closed-form personal-finance calculators.
//!
//! Every calculator follows the same contract: a typed input record goes in,
//! the input is validated field by field, and only then is the result
//! computed. Validation failures come back as
//! [`CoreError::InvalidInput`](crate::errors::CoreError::InvalidInput).

pub mod capital_gains;
pub mod credit_card;
pub mod deposit;
pub mod emi;
pub mod hra;
pub mod income_tax;
pub mod inflation;
pub mod lumpsum;
pub mod retirement;
pub mod roi;
pub mod savings_goal;
pub mod schemes;
pub mod simple_interest;
pub mod sip;
pub mod tds;
pub mod validation;

/// Round a monetary amount to the nearest whole rupee.
pub fn round_currency(value: f64) -> f64 {
    value.round()
}

/// Round a percentage to two decimal places.
pub fn round_pct(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Future value of `periods` equal contributions made at the start of each
/// period (annuity-due), growing at `rate` per period.
pub(crate) fn annuity_due_fv(payment: f64, rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return payment * f64::from(periods);
    }
    let growth = (1.0 + rate).powi(periods as i32);
    payment * ((growth - 1.0) / rate) * (1.0 + rate)
}

/// Per-period contribution needed for an annuity-due to reach `target`.
pub(crate) fn annuity_due_payment(target: f64, rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    let factor = annuity_due_fv(1.0, rate, periods);
    target / factor
}
