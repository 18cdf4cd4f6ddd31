use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoanType {
    Home,
    Car,
    Personal,
    Education,
    Gold,
    Business,
    CreditCard,
    Other,
}

impl LoanType {
    pub const ALL: [LoanType; 8] = [
        LoanType::Home,
        LoanType::Car,
        LoanType::Personal,
        LoanType::Education,
        LoanType::Gold,
        LoanType::Business,
        LoanType::CreditCard,
        LoanType::Other,
    ];
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanType::Home => "Home Loan",
            LoanType::Car => "Car Loan",
            LoanType::Personal => "Personal Loan",
            LoanType::Education => "Education Loan",
            LoanType::Gold => "Gold Loan",
            LoanType::Business => "Business Loan",
            LoanType::CreditCard => "Credit Card",
            LoanType::Other => "Other",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    pub name: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub principal_amount: f64,
    pub outstanding_amount: f64,
    /// Annual rate in percent.
    pub interest_rate: f64,
    /// Monthly installment. Derived from principal, rate and tenure when absent.
    #[serde(default)]
    pub emi: Option<f64>,
    pub tenure_months: u32,
    #[serde(default)]
    pub lender: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl LoanInput {
    pub fn new(
        name: impl Into<String>,
        loan_type: LoanType,
        principal_amount: f64,
        interest_rate: f64,
        tenure_months: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            loan_type,
            principal_amount,
            outstanding_amount: principal_amount,
            interest_rate,
            emi: None,
            tenure_months,
            lender: None,
            start_date,
            end_date: None,
            notes: String::new(),
        }
    }

    pub fn with_outstanding(mut self, outstanding: f64) -> Self {
        self.outstanding_amount = outstanding;
        self
    }

    pub fn with_emi(mut self, emi: f64) -> Self {
        self.emi = Some(emi);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub principal_amount: f64,
    pub outstanding_amount: f64,
    pub interest_rate: f64,
    pub emi: f64,
    pub tenure_months: u32,
    #[serde(default)]
    pub lender: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Loan {
    /// `emi` must already be resolved; see `PortfolioService::add_loan`.
    pub fn from_input(input: LoanInput, emi: f64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            loan_type: input.loan_type,
            principal_amount: input.principal_amount,
            outstanding_amount: input.outstanding_amount,
            interest_rate: input.interest_rate,
            emi,
            tenure_months: input.tenure_months,
            lender: input.lender,
            start_date: input.start_date,
            end_date: input.end_date,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: LoanInput, emi: f64, now: DateTime<Utc>) {
        self.name = input.name;
        self.loan_type = input.loan_type;
        self.principal_amount = input.principal_amount;
        self.outstanding_amount = input.outstanding_amount;
        self.interest_rate = input.interest_rate;
        self.emi = emi;
        self.tenure_months = input.tenure_months;
        self.lender = input.lender;
        self.start_date = input.start_date;
        self.end_date = input.end_date;
        self.notes = input.notes;
        self.updated_at = now;
    }
}
