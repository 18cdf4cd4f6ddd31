// ═══════════════════════════════════════════════════════════════════
// Portfolio Tests — PortfolioService, AnalyticsService, FinanceTracker
// ═══════════════════════════════════════════════════════════════════

use approx::assert_abs_diff_eq;
use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use fincalc_core::errors::CoreError;
use fincalc_core::models::insurance::{InsuranceInput, InsuranceType, PremiumFrequency};
use fincalc_core::models::investment::{InvestmentInput, InvestmentType};
use fincalc_core::models::loan::{LoanInput, LoanType};
use fincalc_core::models::portfolio::Portfolio;
use fincalc_core::models::settings::Settings;
use fincalc_core::services::analytics_service::AnalyticsService;
use fincalc_core::services::portfolio_service::PortfolioService;
use fincalc_core::storage::store::{KeyValueStore, MemoryStore};
use fincalc_core::FinanceTracker;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn fund(name: &str, amount: f64) -> InvestmentInput {
    InvestmentInput::new(name, InvestmentType::MutualFund, amount, d(2024, 4, 1))
}

fn term_plan() -> InsuranceInput {
    InsuranceInput::new("Term cover", InsuranceType::Term, 12_000.0, 10_000_000.0, d(2023, 1, 10))
}

fn car_loan() -> LoanInput {
    LoanInput::new("Car", LoanType::Car, 600_000.0, 9.0, 60, d(2024, 1, 5)).with_outstanding(450_000.0)
}

fn tracker() -> FinanceTracker<MemoryStore> {
    FinanceTracker::new(MemoryStore::new())
}

// ═══════════════════════════════════════════════════════════════════
//  PortfolioService
// ═══════════════════════════════════════════════════════════════════

mod portfolio_service {
    use super::*;

    #[test]
    fn add_investment_assigns_id_and_timestamps() {
        let svc = PortfolioService::new();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let mut p = Portfolio::empty(now);
        let inv = svc.add_investment(&mut p, fund("Index fund", 50_000.0), now).unwrap();
        assert_eq!(p.investments.len(), 1);
        assert_eq!(p.investments[0].id, inv.id);
        assert_eq!(inv.created_at, now);
        assert_eq!(inv.updated_at, now);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let err = svc.add_investment(&mut p, fund("Bad", -1.0), Utc::now()).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "amount");
        assert!(p.investments.is_empty());
    }

    #[test]
    fn blank_name_is_rejected() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let err = svc.add_investment(&mut p, fund("   ", 10.0), Utc::now()).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "name");
    }

    #[test]
    fn maturity_before_start_is_rejected() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let mut input = fund("FD", 10_000.0);
        input.maturity_date = Some(d(2020, 1, 1));
        assert!(svc.add_investment(&mut p, input, Utc::now()).is_err());
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let svc = PortfolioService::new();
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let mut p = Portfolio::empty(t0);
        let inv = svc.add_investment(&mut p, fund("Fund", 1_000.0), t0).unwrap();

        let updated = svc
            .update_investment(&mut p, inv.id, fund("Fund v2", 2_000.0).with_current_value(2_500.0), t1)
            .unwrap();
        assert_eq!(updated.id, inv.id);
        assert_eq!(updated.created_at, t0);
        assert_eq!(updated.updated_at, t1);
        assert_eq!(updated.name, "Fund v2");
        assert_eq!(p.investments[0].current_value, Some(2_500.0));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let err = svc
            .update_investment(&mut p, Uuid::new_v4(), fund("x", 1.0), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CoreError::RecordNotFound(_)));
    }

    #[test]
    fn delete_returns_removed_record() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let loan = svc.add_loan(&mut p, car_loan(), Utc::now()).unwrap();
        let removed = svc.delete_loan(&mut p, loan.id).unwrap();
        assert_eq!(removed.id, loan.id);
        assert!(p.loans.is_empty());
    }

    #[test]
    fn loan_outstanding_above_principal_rejected_on_create() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let err = svc
            .add_loan(&mut p, car_loan().with_outstanding(700_000.0), Utc::now())
            .unwrap_err();
        assert_eq!(err.field_errors()[0].field, "outstanding_amount");
    }

    #[test]
    fn loan_outstanding_above_principal_allowed_on_update() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let loan = svc.add_loan(&mut p, car_loan(), Utc::now()).unwrap();
        let updated = svc
            .update_loan(&mut p, loan.id, car_loan().with_outstanding(610_000.0), Utc::now())
            .unwrap();
        assert_eq!(updated.outstanding_amount, 610_000.0);
    }

    #[test]
    fn loan_emi_is_derived_when_absent() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let loan = svc.add_loan(&mut p, car_loan(), Utc::now()).unwrap();
        // 6 lakh at 9% over 60 months
        assert_eq!(loan.emi, 12_455.0);
    }

    #[test]
    fn loan_emi_from_caller_wins() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let loan = svc.add_loan(&mut p, car_loan().with_emi(13_000.0), Utc::now()).unwrap();
        assert_eq!(loan.emi, 13_000.0);
    }

    #[test]
    fn negative_premium_is_rejected() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::default();
        let mut input = term_plan();
        input.premium = -100.0;
        let err = svc.add_insurance(&mut p, input, Utc::now()).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "premium");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AnalyticsService
// ═══════════════════════════════════════════════════════════════════

mod analytics_service {
    use super::*;

    fn sample() -> Portfolio {
        let svc = PortfolioService::new();
        let now = Utc::now();
        let mut p = Portfolio::empty(now);
        svc.add_investment(&mut p, fund("Fund A", 100_000.0).with_current_value(120_000.0), now)
            .unwrap();
        svc.add_investment(
            &mut p,
            InvestmentInput::new("Bank FD", InvestmentType::FixedDeposit, 200_000.0, d(2024, 1, 1))
                .with_interest_rate(7.2),
            now,
        )
        .unwrap();
        svc.add_insurance(
            &mut p,
            term_plan().with_frequency(PremiumFrequency::Monthly),
            now,
        )
        .unwrap();
        svc.add_loan(&mut p, car_loan().with_emi(12_000.0), now).unwrap();
        p
    }

    #[test]
    fn summary_totals() {
        let p = sample();
        let s = AnalyticsService::new().summarize(&p, Utc::now());
        assert_eq!(s.total_investments, 320_000.0);
        assert_eq!(s.total_insurance, 10_000_000.0);
        assert_eq!(s.total_loans, 450_000.0);
        assert_eq!(s.net_worth, -130_000.0);
    }

    #[test]
    fn summary_monthly_flows() {
        let p = sample();
        let s = AnalyticsService::new().summarize(&p, Utc::now());
        // 200000 × 7.2% / 12
        assert_abs_diff_eq!(s.monthly_income, 1_200.0, epsilon = 1e-9);
        // EMI 12000 + monthly premium 12000
        assert_abs_diff_eq!(s.monthly_expenses, 24_000.0, epsilon = 1e-9);
    }

    #[test]
    fn breakdown_has_every_type() {
        let p = sample();
        let b = AnalyticsService::new().breakdown(&p);
        assert_eq!(b.investments.len(), InvestmentType::ALL.len());
        assert_eq!(b.insurance.len(), InsuranceType::ALL.len());
        assert_eq!(b.loans.len(), LoanType::ALL.len());
        assert_eq!(b.investments[&InvestmentType::MutualFund], 120_000.0);
        assert_eq!(b.investments[&InvestmentType::FixedDeposit], 200_000.0);
        assert_eq!(b.investments[&InvestmentType::Gold], 0.0);
        assert_eq!(b.insurance[&InsuranceType::Term], 10_000_000.0);
        assert_eq!(b.loans[&LoanType::Car], 450_000.0);
    }

    #[test]
    fn breakdown_sums_match_summary() {
        let p = sample();
        let svc = AnalyticsService::new();
        let s = svc.summarize(&p, Utc::now());
        let b = svc.breakdown(&p);
        assert_eq!(b.investments.values().sum::<f64>(), s.total_investments);
        assert_eq!(b.loans.values().sum::<f64>(), s.total_loans);
    }

    #[test]
    fn recompute_stamps_updated_at() {
        let mut p = sample();
        let later = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        AnalyticsService::new().recompute(&mut p, later);
        assert_eq!(p.updated_at, later);
        assert_eq!(p.summary.last_updated, Some(later));
    }

    #[test]
    fn empty_portfolio_summarizes_to_zero() {
        let s = AnalyticsService::new().summarize(&Portfolio::default(), Utc::now());
        assert_eq!(s.total_investments, 0.0);
        assert_eq!(s.net_worth, 0.0);
        assert_eq!(s.monthly_expenses, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FinanceTracker facade
// ═══════════════════════════════════════════════════════════════════

mod tracker {
    use super::*;

    #[test]
    fn nothing_stored_initially() {
        let t = tracker();
        assert!(t.get_portfolio().is_none());
        assert!(t.get_or_create().is_empty());
        // get_or_create does not persist
        assert!(t.store().is_empty());
    }

    #[test]
    fn first_add_creates_document() {
        let mut t = tracker();
        t.add_investment(fund("Fund", 10_000.0)).unwrap();
        let p = t.get_portfolio().unwrap();
        assert_eq!(p.investments.len(), 1);
        assert_eq!(p.summary.total_investments, 10_000.0);
    }

    #[test]
    fn add_then_get_has_one_more_matching_record() {
        let mut t = tracker();
        t.add_investment(fund("Existing", 5_000.0).with_current_value(6_000.0)).unwrap();
        let before = t.get_portfolio().unwrap();

        let added = t
            .add_investment(fund("New", 20_000.0).with_units(100.0, 200.0).with_notes("SIP"))
            .unwrap();
        let after = t.get_portfolio().unwrap();

        assert_eq!(after.investments.len(), before.investments.len() + 1);
        let stored = after.investments.iter().find(|i| i.id == added.id).unwrap();
        assert_eq!(stored, &added);
        assert_eq!(stored.units, Some(100.0));
        assert_eq!(stored.notes, "SIP");

        let expected: f64 = after
            .investments
            .iter()
            .map(|i| i.current_value.unwrap_or(i.amount))
            .sum();
        assert_eq!(after.summary.total_investments, expected);
        assert_eq!(expected, 26_000.0);
    }

    #[test]
    fn every_mutation_recomputes_views() {
        let mut t = tracker();
        let inv = t.add_investment(fund("Fund", 10_000.0)).unwrap();
        let loan = t.add_loan(car_loan()).unwrap();
        assert_eq!(t.get_portfolio().unwrap().summary.net_worth, -440_000.0);

        t.update_investment(inv.id, fund("Fund", 10_000.0).with_current_value(500_000.0))
            .unwrap();
        assert_eq!(t.get_portfolio().unwrap().summary.net_worth, 50_000.0);

        t.delete_loan(loan.id).unwrap();
        let p = t.get_portfolio().unwrap();
        assert_eq!(p.summary.total_loans, 0.0);
        assert_eq!(p.breakdown.loans[&LoanType::Car], 0.0);
    }

    #[test]
    fn insurance_crud() {
        let mut t = tracker();
        let policy = t.add_insurance(term_plan()).unwrap();
        assert_eq!(t.get_insurance(policy.id).unwrap().coverage, 10_000_000.0);

        let mut edit = term_plan();
        edit.coverage = 20_000_000.0;
        t.update_insurance(policy.id, edit).unwrap();
        assert_eq!(t.get_portfolio().unwrap().summary.total_insurance, 20_000_000.0);

        t.delete_insurance(policy.id).unwrap();
        assert!(t.get_insurance(policy.id).is_none());
    }

    #[test]
    fn get_by_id() {
        let mut t = tracker();
        let inv = t.add_investment(fund("Fund", 1.0)).unwrap();
        let loan = t.add_loan(car_loan()).unwrap();
        assert_eq!(t.get_investment(inv.id).unwrap().name, "Fund");
        assert_eq!(t.get_loan(loan.id).unwrap().name, "Car");
        assert!(t.get_loan(Uuid::new_v4()).is_none());
    }

    #[test]
    fn failed_mutation_leaves_store_untouched() {
        let mut t = tracker();
        t.add_investment(fund("Fund", 1_000.0)).unwrap();
        let before = t.get_portfolio().unwrap();

        assert!(t.add_investment(fund("", 1.0)).is_err());
        assert!(t.delete_investment(Uuid::new_v4()).is_err());

        assert_eq!(t.get_portfolio().unwrap(), before);
    }

    #[test]
    fn clear_removes_document() {
        let mut t = tracker();
        t.add_investment(fund("Fund", 1_000.0)).unwrap();
        t.clear().unwrap();
        assert!(t.get_portfolio().is_none());
    }

    #[test]
    fn corrupt_document_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set("finance-portfolio", "{not json").unwrap();
        let mut t = FinanceTracker::new(store);
        assert!(t.get_portfolio().is_none());

        // Next mutation starts from an empty document.
        t.add_investment(fund("Fund", 1_000.0)).unwrap();
        assert_eq!(t.get_portfolio().unwrap().investments.len(), 1);
    }

    #[test]
    fn custom_storage_key_is_used() {
        let settings = Settings {
            storage_key: "household".into(),
            ..Settings::default()
        };
        let mut t = FinanceTracker::with_settings(MemoryStore::new(), settings).unwrap();
        t.add_investment(fund("Fund", 1_000.0)).unwrap();
        let store = t.into_store();
        assert!(store.get("household").unwrap().is_some());
        assert!(store.get("finance-portfolio").unwrap().is_none());
    }

    #[test]
    fn empty_storage_key_is_rejected() {
        let settings = Settings {
            storage_key: String::new(),
            ..Settings::default()
        };
        let err = FinanceTracker::with_settings(MemoryStore::new(), settings).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn loan_tenure_beyond_limit_is_rejected_and_store_kept() {
        let mut t = tracker();
        t.add_investment(fund("Fund", 10_000.0)).unwrap();

        let err = t
            .add_loan(LoanInput::new("Odd", LoanType::Home, 1_000_000.0, 12.0, 100_000, d(2024, 1, 1)))
            .unwrap_err();
        assert_eq!(err.field_errors()[0].field, "tenure_months");

        let p = t.get_portfolio().unwrap();
        assert_eq!(p.investments.len(), 1);
        assert!(p.loans.is_empty());
    }

    #[test]
    fn overflowing_totals_are_not_persisted() {
        let mut t = tracker();
        t.add_investment(fund("Huge", 1e308)).unwrap();

        let err = t.add_investment(fund("Huger", 1e308)).unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));

        // The stored document is still readable and unchanged.
        let p = t.get_portfolio().unwrap();
        assert_eq!(p.investments.len(), 1);
        assert_eq!(p.investments[0].name, "Huge");
    }

    #[test]
    fn created_at_survives_mutations() {
        let mut t = tracker();
        t.add_investment(fund("Fund", 1.0)).unwrap();
        let first = t.get_portfolio().unwrap();
        t.add_investment(fund("Fund 2", 1.0)).unwrap();
        let second = t.get_portfolio().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert!(second.updated_at >= first.updated_at);
    }
}
