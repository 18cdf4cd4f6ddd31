use chrono::{DateTime, Utc};

use crate::models::portfolio::{Breakdown, Portfolio, Summary};

/// Derives the `summary` and `breakdown` views from the portfolio records.
///
/// Both are pure folds over `investments`, `insurance` and `loans`.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, portfolio: &Portfolio, now: DateTime<Utc>) -> Summary {
        let total_investments: f64 = portfolio.investments.iter().map(|i| i.value()).sum();
        let total_insurance: f64 = portfolio.insurance.iter().map(|p| p.coverage).sum();
        let total_loans: f64 = portfolio.loans.iter().map(|l| l.outstanding_amount).sum();

        let monthly_income: f64 = portfolio
            .investments
            .iter()
            .map(|i| i.monthly_interest())
            .sum();
        let monthly_expenses: f64 = portfolio.loans.iter().map(|l| l.emi).sum::<f64>()
            + portfolio
                .insurance
                .iter()
                .map(|p| p.monthly_premium())
                .sum::<f64>();

        Summary {
            total_investments,
            total_insurance,
            total_loans,
            net_worth: total_investments - total_loans,
            monthly_income,
            monthly_expenses,
            last_updated: Some(now),
        }
    }

    pub fn breakdown(&self, portfolio: &Portfolio) -> Breakdown {
        let mut breakdown = Breakdown::default();
        for investment in &portfolio.investments {
            *breakdown
                .investments
                .entry(investment.investment_type)
                .or_insert(0.0) += investment.value();
        }
        for policy in &portfolio.insurance {
            *breakdown
                .insurance
                .entry(policy.insurance_type)
                .or_insert(0.0) += policy.coverage;
        }
        for loan in &portfolio.loans {
            *breakdown.loans.entry(loan.loan_type).or_insert(0.0) += loan.outstanding_amount;
        }
        breakdown
    }

    /// Refresh both derived views and stamp `updated_at`.
    pub fn recompute(&self, portfolio: &mut Portfolio, now: DateTime<Utc>) {
        portfolio.summary = self.summarize(portfolio, now);
        portfolio.breakdown = self.breakdown(portfolio);
        portfolio.updated_at = now;
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
