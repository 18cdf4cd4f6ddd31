//! Individual income tax under the old and new regimes.
//!
//! Slab tables are policy data and are reproduced literally. Band limits are
//! inclusive upper bounds on taxable income: income up to and including
//! `upper` is taxed at the band's rate.

use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::{round_currency, round_pct};
use crate::errors::CoreError;

/// Health and education cess, applied on top of slab tax.
pub const CESS_RATE: f64 = 0.04;

pub const OLD_REGIME_STANDARD_DEDUCTION: f64 = 50_000.0;
pub const OLD_REGIME_BASIC_EXEMPTION: f64 = 250_000.0;
pub const NEW_REGIME_BASIC_EXEMPTION: f64 = 300_000.0;

/// One band of a slab table: income above the previous band's limit and up to
/// `upper` is taxed at `rate`. `None` is the open top band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    pub upper: Option<f64>,
    pub rate: f64,
}

const OLD_REGIME_SLABS: [Slab; 4] = [
    Slab { upper: Some(250_000.0), rate: 0.0 },
    Slab { upper: Some(500_000.0), rate: 0.05 },
    Slab { upper: Some(1_000_000.0), rate: 0.20 },
    Slab { upper: None, rate: 0.30 },
];

const NEW_REGIME_SLABS: [Slab; 6] = [
    Slab { upper: Some(300_000.0), rate: 0.0 },
    Slab { upper: Some(700_000.0), rate: 0.05 },
    Slab { upper: Some(1_000_000.0), rate: 0.10 },
    Slab { upper: Some(1_200_000.0), rate: 0.15 },
    Slab { upper: Some(1_500_000.0), rate: 0.20 },
    Slab { upper: None, rate: 0.30 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaxRegime {
    Old,
    New,
}

impl TaxRegime {
    pub fn slabs(self) -> &'static [Slab] {
        match self {
            TaxRegime::Old => &OLD_REGIME_SLABS,
            TaxRegime::New => &NEW_REGIME_SLABS,
        }
    }

    pub fn basic_exemption(self) -> f64 {
        match self {
            TaxRegime::Old => OLD_REGIME_BASIC_EXEMPTION,
            TaxRegime::New => NEW_REGIME_BASIC_EXEMPTION,
        }
    }

    pub fn standard_deduction(self) -> f64 {
        match self {
            TaxRegime::Old => OLD_REGIME_STANDARD_DEDUCTION,
            TaxRegime::New => 0.0,
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxRegime::Old => write!(f, "Old regime"),
            TaxRegime::New => write!(f, "New regime"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxInput {
    /// Gross annual income.
    pub annual_income: f64,
    /// Chapter VI-A deductions (80C, 80D, ...). Only the old regime uses them.
    #[serde(default)]
    pub deductions: f64,
    pub regime: TaxRegime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabTax {
    pub lower: f64,
    pub upper: Option<f64>,
    pub rate: f64,
    pub taxable_in_band: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxResult {
    pub regime: TaxRegime,
    pub gross_income: f64,
    pub taxable_income: f64,
    pub slab_tax: f64,
    pub cess: f64,
    pub total_tax: f64,
    pub effective_rate_pct: f64,
    pub slabs: Vec<SlabTax>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeComparison {
    pub old: IncomeTaxResult,
    pub new: IncomeTaxResult,
    pub recommended: TaxRegime,
    pub savings: f64,
}

impl IncomeTaxInput {
    pub fn new(annual_income: f64, regime: TaxRegime) -> Self {
        Self {
            annual_income,
            deductions: 0.0,
            regime,
        }
    }

    pub fn with_deductions(mut self, deductions: f64) -> Self {
        self.deductions = deductions;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .non_negative("annual_income", self.annual_income)
            .non_negative("deductions", self.deductions)
            .finish()
    }

    /// Income left after the regime's standard deduction and, under the old
    /// regime, the caller's deductions. Never negative.
    pub fn taxable_income(&self) -> f64 {
        let deductions = match self.regime {
            TaxRegime::Old => self.deductions,
            TaxRegime::New => 0.0,
        };
        (self.annual_income - self.regime.standard_deduction() - deductions).max(0.0)
    }
}

/// Apply a slab table to taxable income, band by band.
pub fn slab_breakdown(taxable_income: f64, slabs: &[Slab]) -> Vec<SlabTax> {
    let mut lower = 0.0;
    let mut out = Vec::with_capacity(slabs.len());
    for slab in slabs {
        let top = slab.upper.unwrap_or(f64::INFINITY);
        let in_band = (taxable_income.min(top) - lower).max(0.0);
        out.push(SlabTax {
            lower,
            upper: slab.upper,
            rate: slab.rate,
            taxable_in_band: in_band,
            tax: in_band * slab.rate,
        });
        lower = top;
    }
    out
}

/// Unrounded slab tax (before cess) on gross income.
pub fn slab_tax(input: &IncomeTaxInput) -> f64 {
    slab_breakdown(input.taxable_income(), input.regime.slabs())
        .iter()
        .map(|s| s.tax)
        .sum()
}

pub fn calculate_income_tax(input: &IncomeTaxInput) -> Result<IncomeTaxResult, CoreError> {
    input.validate()?;

    let taxable = input.taxable_income();
    let slabs = slab_breakdown(taxable, input.regime.slabs());
    let tax: f64 = slabs.iter().map(|s| s.tax).sum();
    let cess = tax * CESS_RATE;
    let total = tax + cess;
    let effective = if input.annual_income > 0.0 {
        total / input.annual_income * 100.0
    } else {
        0.0
    };

    Ok(IncomeTaxResult {
        regime: input.regime,
        gross_income: input.annual_income,
        taxable_income: round_currency(taxable),
        slab_tax: round_currency(tax),
        cess: round_currency(cess),
        total_tax: round_currency(total),
        effective_rate_pct: round_pct(effective),
        slabs,
    })
}

/// Compute both regimes for the same income and pick the cheaper one.
/// Ties go to the new regime, which is the default when no choice is filed.
pub fn compare_regimes(annual_income: f64, deductions: f64) -> Result<RegimeComparison, CoreError> {
    let old = calculate_income_tax(
        &IncomeTaxInput::new(annual_income, TaxRegime::Old).with_deductions(deductions),
    )?;
    let new = calculate_income_tax(
        &IncomeTaxInput::new(annual_income, TaxRegime::New).with_deductions(deductions),
    )?;

    let recommended = if old.total_tax < new.total_tax {
        TaxRegime::Old
    } else {
        TaxRegime::New
    };
    let savings = (old.total_tax - new.total_tax).abs();

    Ok(RegimeComparison {
        old,
        new,
        recommended,
        savings,
    })
}
