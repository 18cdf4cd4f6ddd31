//! Property-based tests for the formula calculators.
//!
//! These check invariants that must hold across the whole valid input
//! range, using `proptest` for case generation.

use proptest::prelude::*;

use fincalc_core::calculators::credit_card::{
    calculate_credit_card_payoff, CreditCardInput, MAX_PAYOFF_MONTHS,
};
use fincalc_core::calculators::deposit::{calculate_fd, Compounding, FdInput};
use fincalc_core::calculators::emi::monthly_installment;
use fincalc_core::calculators::income_tax::{slab_tax, IncomeTaxInput, TaxRegime};
use fincalc_core::calculators::lumpsum::{calculate_lumpsum, LumpsumInput};
use fincalc_core::calculators::sip::{calculate_sip, SipInput};

// =============================================================================
// Generators
// =============================================================================

fn arb_principal() -> impl Strategy<Value = f64> {
    1_000.0f64..50_000_000.0
}

fn arb_loan_rate() -> impl Strategy<Value = f64> {
    0.1f64..=50.0
}

fn arb_compounding() -> impl Strategy<Value = Compounding> {
    prop_oneof![
        Just(Compounding::Monthly),
        Just(Compounding::Quarterly),
        Just(Compounding::HalfYearly),
        Just(Compounding::Yearly),
    ]
}

fn arb_regime() -> impl Strategy<Value = TaxRegime> {
    prop_oneof![Just(TaxRegime::Old), Just(TaxRegime::New)]
}

// =============================================================================
// EMI
// =============================================================================

proptest! {
    #[test]
    fn emi_repays_at_least_principal(p in arb_principal(), r in arb_loan_rate(), n in 1u32..=480) {
        let emi = monthly_installment(p, r, n);
        prop_assert!(emi * f64::from(n) >= p * (1.0 - 1e-12));
    }

    #[test]
    fn emi_increases_with_rate(p in arb_principal(), r in 0.1f64..49.0, n in 1u32..=480) {
        let low = monthly_installment(p, r, n);
        let high = monthly_installment(p, r + 1.0, n);
        prop_assert!(high > low);
    }

    #[test]
    fn emi_increases_with_principal(p in arb_principal(), r in arb_loan_rate(), n in 1u32..=480) {
        prop_assert!(monthly_installment(p * 1.5, r, n) > monthly_installment(p, r, n));
    }

    #[test]
    fn emi_decreases_with_tenure(p in arb_principal(), r in arb_loan_rate(), n in 1u32..480) {
        prop_assert!(monthly_installment(p, r, n + 1) < monthly_installment(p, r, n));
    }
}

// =============================================================================
// SIP
// =============================================================================

proptest! {
    #[test]
    fn sip_investment_is_exact(a in 100u32..100_000, r in 0.0f64..=50.0, t in 1u32..=50) {
        let amount = f64::from(a);
        let result = calculate_sip(&SipInput::new(amount, r, t)).unwrap();
        prop_assert_eq!(result.total_investment, amount * 12.0 * f64::from(t));
    }

    #[test]
    fn sip_value_covers_investment(a in 100u32..100_000, r in 0.1f64..=50.0, t in 1u32..=50) {
        let result = calculate_sip(&SipInput::new(f64::from(a), r, t)).unwrap();
        prop_assert!(result.future_value >= result.total_investment);
    }

    #[test]
    fn zero_step_up_matches_plain_sip(a in 100u32..100_000, r in 0.0f64..=50.0, t in 1u32..=50) {
        let plain = calculate_sip(&SipInput::new(f64::from(a), r, t)).unwrap();
        let stepped = calculate_sip(&SipInput::new(f64::from(a), r, t).with_step_up(0.0)).unwrap();
        prop_assert_eq!(plain, stepped);
    }

    #[test]
    fn step_up_never_lowers_value(a in 100u32..100_000, r in 0.0f64..=30.0, t in 2u32..=30, s in 0.5f64..=25.0) {
        let plain = calculate_sip(&SipInput::new(f64::from(a), r, t)).unwrap();
        let stepped = calculate_sip(&SipInput::new(f64::from(a), r, t).with_step_up(s)).unwrap();
        prop_assert!(stepped.future_value >= plain.future_value);
        prop_assert!(stepped.total_investment >= plain.total_investment);
    }
}

// =============================================================================
// Compound growth boundaries
// =============================================================================

proptest! {
    #[test]
    fn fd_at_zero_tenure_is_principal(p in 1_000u32..10_000_000, r in 0.0f64..=20.0, c in arb_compounding()) {
        let principal = f64::from(p);
        let result = calculate_fd(&FdInput::new(principal, r, 0.0, c)).unwrap();
        prop_assert_eq!(result.maturity_amount, principal);
    }

    #[test]
    fn lumpsum_at_zero_years_is_principal(p in 1_000u32..10_000_000, r in 0.0f64..=50.0) {
        let principal = f64::from(p);
        let result = calculate_lumpsum(&LumpsumInput::new(principal, r, 0.0)).unwrap();
        prop_assert_eq!(result.future_value, principal);
    }
}

// =============================================================================
// Income tax
// =============================================================================

proptest! {
    #[test]
    fn tax_is_monotonic_in_income(income in 0.0f64..50_000_000.0, bump in 1.0f64..1_000_000.0, regime in arb_regime()) {
        let lower = slab_tax(&IncomeTaxInput::new(income, regime));
        let higher = slab_tax(&IncomeTaxInput::new(income + bump, regime));
        prop_assert!(higher >= lower);
    }

    #[test]
    fn marginal_rate_never_exceeds_top_band(income in 0.0f64..50_000_000.0, regime in arb_regime()) {
        let at = slab_tax(&IncomeTaxInput::new(income, regime));
        let above = slab_tax(&IncomeTaxInput::new(income + 1.0, regime));
        prop_assert!(above - at <= 0.30 + 1e-6);
    }
}

// =============================================================================
// Credit card convergence guard
// =============================================================================

proptest! {
    #[test]
    fn insufficient_payment_hits_cap(balance in 10_000.0f64..1_000_000.0, rate in 12.0f64..=48.0, share in 0.01f64..=1.0) {
        let interest = balance * rate / 1200.0;
        let input = CreditCardInput::new(balance, interest * share, rate);
        let result = calculate_credit_card_payoff(&input).unwrap();
        prop_assert_eq!(result.months_to_payoff, MAX_PAYOFF_MONTHS);
        prop_assert!(!result.paid_off);
        prop_assert!(!result.payment_covers_interest);
    }

    #[test]
    fn payoff_never_exceeds_cap(balance in 1_000.0f64..1_000_000.0, payment in 100.0f64..100_000.0, rate in 0.0f64..=60.0) {
        let result = calculate_credit_card_payoff(&CreditCardInput::new(balance, payment, rate)).unwrap();
        prop_assert!(result.months_to_payoff <= MAX_PAYOFF_MONTHS);
        prop_assert!(result.months_to_payoff >= 1);
    }
}
