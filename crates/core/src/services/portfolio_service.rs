use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::calculators::emi;
use crate::calculators::round_currency;
use crate::calculators::validation::Validator;
use crate::errors::CoreError;
use crate::models::insurance::{Insurance, InsuranceInput};
use crate::models::investment::{Investment, InvestmentInput};
use crate::models::loan::{Loan, LoanInput};
use crate::models::portfolio::Portfolio;

/// Add/update/delete of portfolio records.
///
/// Pure business logic: no I/O and no derived views. The caller recomputes
/// the summary and persists.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    // ── Investments ─────────────────────────────────────────────────

    pub fn add_investment(
        &self,
        portfolio: &mut Portfolio,
        input: InvestmentInput,
        now: DateTime<Utc>,
    ) -> Result<Investment, CoreError> {
        Self::validate_investment(&input)?;
        let investment = Investment::from_input(input, now);
        portfolio.investments.push(investment.clone());
        Ok(investment)
    }

    pub fn update_investment(
        &self,
        portfolio: &mut Portfolio,
        id: Uuid,
        input: InvestmentInput,
        now: DateTime<Utc>,
    ) -> Result<Investment, CoreError> {
        Self::validate_investment(&input)?;
        let investment = portfolio
            .investments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(format!("investment {id}")))?;
        investment.apply(input, now);
        Ok(investment.clone())
    }

    pub fn delete_investment(&self, portfolio: &mut Portfolio, id: Uuid) -> Result<Investment, CoreError> {
        let idx = portfolio
            .investments
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(format!("investment {id}")))?;
        Ok(portfolio.investments.remove(idx))
    }

    // ── Insurance ───────────────────────────────────────────────────

    pub fn add_insurance(
        &self,
        portfolio: &mut Portfolio,
        input: InsuranceInput,
        now: DateTime<Utc>,
    ) -> Result<Insurance, CoreError> {
        Self::validate_insurance(&input)?;
        let policy = Insurance::from_input(input, now);
        portfolio.insurance.push(policy.clone());
        Ok(policy)
    }

    pub fn update_insurance(
        &self,
        portfolio: &mut Portfolio,
        id: Uuid,
        input: InsuranceInput,
        now: DateTime<Utc>,
    ) -> Result<Insurance, CoreError> {
        Self::validate_insurance(&input)?;
        let policy = portfolio
            .insurance
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(format!("insurance {id}")))?;
        policy.apply(input, now);
        Ok(policy.clone())
    }

    pub fn delete_insurance(&self, portfolio: &mut Portfolio, id: Uuid) -> Result<Insurance, CoreError> {
        let idx = portfolio
            .insurance
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(format!("insurance {id}")))?;
        Ok(portfolio.insurance.remove(idx))
    }

    // ── Loans ───────────────────────────────────────────────────────

    pub fn add_loan(
        &self,
        portfolio: &mut Portfolio,
        input: LoanInput,
        now: DateTime<Utc>,
    ) -> Result<Loan, CoreError> {
        Self::validate_loan(&input, true)?;
        let emi = Self::resolve_emi(&input);
        let loan = Loan::from_input(input, emi, now);
        portfolio.loans.push(loan.clone());
        Ok(loan)
    }

    /// Updates may record an outstanding amount above the principal (for
    /// example after capitalized interest); only creation enforces the bound.
    pub fn update_loan(
        &self,
        portfolio: &mut Portfolio,
        id: Uuid,
        input: LoanInput,
        now: DateTime<Utc>,
    ) -> Result<Loan, CoreError> {
        Self::validate_loan(&input, false)?;
        let emi = Self::resolve_emi(&input);
        let loan = portfolio
            .loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(format!("loan {id}")))?;
        loan.apply(input, emi, now);
        Ok(loan.clone())
    }

    pub fn delete_loan(&self, portfolio: &mut Portfolio, id: Uuid) -> Result<Loan, CoreError> {
        let idx = portfolio
            .loans
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(format!("loan {id}")))?;
        Ok(portfolio.loans.remove(idx))
    }

    // ── Validation ──────────────────────────────────────────────────

    fn validate_investment(input: &InvestmentInput) -> Result<(), CoreError> {
        Validator::new()
            .check("name", !input.name.trim().is_empty(), "is required")
            .non_negative("amount", input.amount)
            .non_negative("current_value", input.current_value.unwrap_or(0.0))
            .non_negative("units", input.units.unwrap_or(0.0))
            .non_negative("nav", input.nav.unwrap_or(0.0))
            .range("interest_rate", input.interest_rate.unwrap_or(0.0), 0.0, 100.0)
            .check(
                "maturity_date",
                input.maturity_date.map_or(true, |d| d >= input.start_date),
                "cannot be before start date",
            )
            .finish()
    }

    fn validate_insurance(input: &InsuranceInput) -> Result<(), CoreError> {
        Validator::new()
            .check("name", !input.name.trim().is_empty(), "is required")
            .non_negative("premium", input.premium)
            .non_negative("coverage", input.coverage)
            .check(
                "end_date",
                input.end_date.map_or(true, |d| d >= input.start_date),
                "cannot be before start date",
            )
            .finish()
    }

    fn validate_loan(input: &LoanInput, creating: bool) -> Result<(), CoreError> {
        Validator::new()
            .check("name", !input.name.trim().is_empty(), "is required")
            .non_negative("principal_amount", input.principal_amount)
            .non_negative("outstanding_amount", input.outstanding_amount)
            .check(
                "outstanding_amount",
                !creating || input.outstanding_amount <= input.principal_amount,
                "cannot exceed principal amount",
            )
            .range("interest_rate", input.interest_rate, 0.0, emi::MAX_LOAN_RATE)
            .non_negative("emi", input.emi.unwrap_or(0.0))
            .check(
                "tenure_months",
                input.emi.is_some() || input.tenure_months > 0,
                "is required when emi is not given",
            )
            .check(
                "tenure_months",
                input.tenure_months <= emi::MAX_TENURE_MONTHS,
                "must be at most 480",
            )
            .finish()
    }

    /// Caller-provided EMI wins; otherwise derive it from the loan terms.
    fn resolve_emi(input: &LoanInput) -> f64 {
        match input.emi {
            Some(emi) => emi,
            None if input.principal_amount > 0.0 && input.tenure_months > 0 => round_currency(
                emi::monthly_installment(
                    input.principal_amount,
                    input.interest_rate,
                    input.tenure_months,
                ),
            ),
            None => 0.0,
        }
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
