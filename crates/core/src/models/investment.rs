use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a tracked investment. Also the key set of the investment
/// breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvestmentType {
    MutualFund,
    Stocks,
    FixedDeposit,
    RecurringDeposit,
    Ppf,
    Epf,
    Nps,
    Gold,
    RealEstate,
    Bonds,
    Crypto,
    Other,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 12] = [
        InvestmentType::MutualFund,
        InvestmentType::Stocks,
        InvestmentType::FixedDeposit,
        InvestmentType::RecurringDeposit,
        InvestmentType::Ppf,
        InvestmentType::Epf,
        InvestmentType::Nps,
        InvestmentType::Gold,
        InvestmentType::RealEstate,
        InvestmentType::Bonds,
        InvestmentType::Crypto,
        InvestmentType::Other,
    ];
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InvestmentType::MutualFund => "Mutual Fund",
            InvestmentType::Stocks => "Stocks",
            InvestmentType::FixedDeposit => "Fixed Deposit",
            InvestmentType::RecurringDeposit => "Recurring Deposit",
            InvestmentType::Ppf => "PPF",
            InvestmentType::Epf => "EPF",
            InvestmentType::Nps => "NPS",
            InvestmentType::Gold => "Gold",
            InvestmentType::RealEstate => "Real Estate",
            InvestmentType::Bonds => "Bonds",
            InvestmentType::Crypto => "Crypto",
            InvestmentType::Other => "Other",
        };
        write!(f, "{label}")
    }
}

/// Caller-supplied fields for creating or replacing an investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentInput {
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    /// Amount invested (cost).
    pub amount: f64,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub units: Option<f64>,
    #[serde(default)]
    pub nav: Option<f64>,
    /// Annual interest rate in percent, for interest-bearing instruments.
    #[serde(default)]
    pub interest_rate: Option<f64>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl InvestmentInput {
    pub fn new(
        name: impl Into<String>,
        investment_type: InvestmentType,
        amount: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            investment_type,
            amount,
            current_value: None,
            units: None,
            nav: None,
            interest_rate: None,
            start_date,
            maturity_date: None,
            notes: String::new(),
        }
    }

    pub fn with_current_value(mut self, value: f64) -> Self {
        self.current_value = Some(value);
        self
    }

    pub fn with_units(mut self, units: f64, nav: f64) -> Self {
        self.units = Some(units);
        self.nav = Some(nav);
        self
    }

    pub fn with_interest_rate(mut self, rate: f64) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub amount: f64,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub units: Option<f64>,
    #[serde(default)]
    pub nav: Option<f64>,
    #[serde(default)]
    pub interest_rate: Option<f64>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Investment {
    pub fn from_input(input: InvestmentInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            investment_type: input.investment_type,
            amount: input.amount,
            current_value: input.current_value,
            units: input.units,
            nav: input.nav,
            interest_rate: input.interest_rate,
            start_date: input.start_date,
            maturity_date: input.maturity_date,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite caller-editable fields, keeping `id` and `created_at`.
    pub fn apply(&mut self, input: InvestmentInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.investment_type = input.investment_type;
        self.amount = input.amount;
        self.current_value = input.current_value;
        self.units = input.units;
        self.nav = input.nav;
        self.interest_rate = input.interest_rate;
        self.start_date = input.start_date;
        self.maturity_date = input.maturity_date;
        self.notes = input.notes;
        self.updated_at = now;
    }

    /// Market value if known, otherwise the invested amount.
    pub fn value(&self) -> f64 {
        self.current_value.unwrap_or(self.amount)
    }

    /// Monthly interest yield for instruments with a stated rate.
    pub fn monthly_interest(&self) -> f64 {
        self.interest_rate
            .map_or(0.0, |rate| self.amount * rate / 1200.0)
    }
}
