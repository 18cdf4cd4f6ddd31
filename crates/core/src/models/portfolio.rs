use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::insurance::{Insurance, InsuranceType};
use super::investment::{Investment, InvestmentType};
use super::loan::{Loan, LoanType};

/// The persisted document. Everything in here is serialized to JSON and
/// stored under a single key.
///
/// `summary` and `breakdown` are derived views. They are never edited
/// directly and are recomputed after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: Uuid,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub insurance: Vec<Insurance>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub breakdown: Breakdown,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
    /// A fresh, empty document stamped with `now`.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            investments: Vec::new(),
            insurance: Vec::new(),
            loans: Vec::new(),
            summary: Summary {
                last_updated: Some(now),
                ..Summary::default()
            },
            breakdown: Breakdown::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.investments.is_empty() && self.insurance.is_empty() && self.loans.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.investments.len() + self.insurance.len() + self.loans.len()
    }

    /// Path of the first NaN or infinite number in the document, if any.
    /// JSON has no encoding for these, so such a document cannot be stored.
    pub fn first_non_finite(&self) -> Option<String> {
        let bad = |v: &f64| !v.is_finite();
        let opt = |v: &Option<f64>| v.is_some_and(|x| !x.is_finite());

        for inv in &self.investments {
            if bad(&inv.amount)
                || [inv.current_value, inv.units, inv.nav, inv.interest_rate]
                    .iter()
                    .any(opt)
            {
                return Some(format!("investments[{}]", inv.id));
            }
        }
        for policy in &self.insurance {
            if bad(&policy.premium) || bad(&policy.coverage) {
                return Some(format!("insurance[{}]", policy.id));
            }
        }
        for loan in &self.loans {
            if [loan.principal_amount, loan.outstanding_amount, loan.interest_rate, loan.emi]
                .iter()
                .any(bad)
            {
                return Some(format!("loans[{}]", loan.id));
            }
        }

        let s = &self.summary;
        if [
            s.total_investments,
            s.total_insurance,
            s.total_loans,
            s.net_worth,
            s.monthly_income,
            s.monthly_expenses,
        ]
        .iter()
        .any(bad)
        {
            return Some("summary".into());
        }
        if self.breakdown.investments.values().any(bad)
            || self.breakdown.insurance.values().any(bad)
            || self.breakdown.loans.values().any(bad)
        {
            return Some("breakdown".into());
        }
        None
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::empty(Utc::now())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Σ `currentValue ?? amount` over investments.
    pub total_investments: f64,
    /// Σ coverage over insurance policies.
    pub total_insurance: f64,
    /// Σ outstanding amount over loans.
    pub total_loans: f64,
    /// total_investments − total_loans
    pub net_worth: f64,
    /// Interest yield of rate-bearing investments, per month.
    pub monthly_income: f64,
    /// Loan EMIs plus premiums spread per month.
    pub monthly_expenses: f64,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Per-type sums for each category. Every type of the fixed taxonomy is
/// present, including types with no records (value 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub investments: BTreeMap<InvestmentType, f64>,
    pub insurance: BTreeMap<InsuranceType, f64>,
    pub loans: BTreeMap<LoanType, f64>,
}

impl Default for Breakdown {
    fn default() -> Self {
        Self {
            investments: InvestmentType::ALL.iter().map(|t| (*t, 0.0)).collect(),
            insurance: InsuranceType::ALL.iter().map(|t| (*t, 0.0)).collect(),
            loans: LoanType::ALL.iter().map(|t| (*t, 0.0)).collect(),
        }
    }
}
