use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsuranceType {
    Life,
    Term,
    Health,
    Vehicle,
    Home,
    Travel,
    Other,
}

impl InsuranceType {
    pub const ALL: [InsuranceType; 7] = [
        InsuranceType::Life,
        InsuranceType::Term,
        InsuranceType::Health,
        InsuranceType::Vehicle,
        InsuranceType::Home,
        InsuranceType::Travel,
        InsuranceType::Other,
    ];
}

impl std::fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InsuranceType::Life => "Life",
            InsuranceType::Term => "Term",
            InsuranceType::Health => "Health",
            InsuranceType::Vehicle => "Vehicle",
            InsuranceType::Home => "Home",
            InsuranceType::Travel => "Travel",
            InsuranceType::Other => "Other",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PremiumFrequency {
    Monthly,
    Quarterly,
    HalfYearly,
    #[default]
    Yearly,
}

impl PremiumFrequency {
    pub fn payments_per_year(self) -> u32 {
        match self {
            PremiumFrequency::Monthly => 12,
            PremiumFrequency::Quarterly => 4,
            PremiumFrequency::HalfYearly => 2,
            PremiumFrequency::Yearly => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceInput {
    pub name: String,
    #[serde(rename = "type")]
    pub insurance_type: InsuranceType,
    pub premium: f64,
    #[serde(default)]
    pub premium_frequency: PremiumFrequency,
    /// Sum assured / cover amount.
    pub coverage: f64,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl InsuranceInput {
    pub fn new(
        name: impl Into<String>,
        insurance_type: InsuranceType,
        premium: f64,
        coverage: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            insurance_type,
            premium,
            premium_frequency: PremiumFrequency::default(),
            coverage,
            policy_number: None,
            provider: None,
            start_date,
            end_date: None,
            notes: String::new(),
        }
    }

    pub fn with_frequency(mut self, frequency: PremiumFrequency) -> Self {
        self.premium_frequency = frequency;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub insurance_type: InsuranceType,
    pub premium: f64,
    #[serde(default)]
    pub premium_frequency: PremiumFrequency,
    pub coverage: f64,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Insurance {
    pub fn from_input(input: InsuranceInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            insurance_type: input.insurance_type,
            premium: input.premium,
            premium_frequency: input.premium_frequency,
            coverage: input.coverage,
            policy_number: input.policy_number,
            provider: input.provider,
            start_date: input.start_date,
            end_date: input.end_date,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: InsuranceInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.insurance_type = input.insurance_type;
        self.premium = input.premium;
        self.premium_frequency = input.premium_frequency;
        self.coverage = input.coverage;
        self.policy_number = input.policy_number;
        self.provider = input.provider;
        self.start_date = input.start_date;
        self.end_date = input.end_date;
        self.notes = input.notes;
        self.updated_at = now;
    }

    pub fn annual_premium(&self) -> f64 {
        self.premium * f64::from(self.premium_frequency.payments_per_year())
    }

    pub fn monthly_premium(&self) -> f64 {
        self.annual_premium() / 12.0
    }
}
