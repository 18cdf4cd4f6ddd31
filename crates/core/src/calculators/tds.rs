use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::round_currency;
use crate::errors::CoreError;

/// Nature of payment, keyed by the section of the Income Tax Act it falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentNature {
    /// 194A: interest other than on securities.
    Interest,
    /// 194A for a resident senior citizen.
    InterestSeniorCitizen,
    /// 194B: lottery and game winnings.
    Lottery,
    /// 194C: contractor payment to an individual or HUF.
    ContractorIndividual,
    /// 194C: contractor payment to any other entity.
    ContractorOther,
    /// 194H: commission or brokerage.
    Commission,
    /// 194I(a): rent on plant and machinery.
    RentPlantMachinery,
    /// 194I(b): rent on land, building or furniture.
    RentLandBuilding,
    /// 194J: fees for technical services.
    TechnicalFees,
    /// 194J: professional fees.
    ProfessionalFees,
}

/// Statutory rate (percent) and threshold for one payment nature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdsRule {
    pub section: &'static str,
    pub rate: f64,
    pub threshold: f64,
}

impl PaymentNature {
    pub fn rule(self) -> TdsRule {
        let (section, rate, threshold) = match self {
            PaymentNature::Interest => ("194A", 10.0, 40_000.0),
            PaymentNature::InterestSeniorCitizen => ("194A", 10.0, 50_000.0),
            PaymentNature::Lottery => ("194B", 30.0, 10_000.0),
            PaymentNature::ContractorIndividual => ("194C", 1.0, 30_000.0),
            PaymentNature::ContractorOther => ("194C", 2.0, 30_000.0),
            PaymentNature::Commission => ("194H", 5.0, 15_000.0),
            PaymentNature::RentPlantMachinery => ("194I", 2.0, 240_000.0),
            PaymentNature::RentLandBuilding => ("194I", 10.0, 240_000.0),
            PaymentNature::TechnicalFees => ("194J", 2.0, 30_000.0),
            PaymentNature::ProfessionalFees => ("194J", 10.0, 30_000.0),
        };
        TdsRule {
            section,
            rate,
            threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdsInput {
    pub amount: f64,
    pub nature: PaymentNature,
    /// Whether the payee's PAN is on file. Without it the rate doubles.
    pub pan_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdsResult {
    pub section: String,
    pub threshold: f64,
    pub rate_pct: f64,
    pub tds_amount: f64,
    pub net_payment: f64,
    pub applicable: bool,
}

impl TdsInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new().positive("amount", self.amount).finish()
    }
}

pub fn calculate_tds(input: &TdsInput) -> Result<TdsResult, CoreError> {
    input.validate()?;

    let rule = input.nature.rule();
    let applicable = input.amount > rule.threshold;
    let rate = if input.pan_available { rule.rate } else { rule.rate * 2.0 };
    let tds = if applicable { input.amount * rate / 100.0 } else { 0.0 };

    Ok(TdsResult {
        section: rule.section.to_string(),
        threshold: rule.threshold,
        rate_pct: if applicable { rate } else { 0.0 },
        tds_amount: round_currency(tds),
        net_payment: round_currency(input.amount - tds),
        applicable,
    })
}
