use serde::{Deserialize, Serialize};

use super::validation::Validator;
use super::round_currency;
use crate::errors::CoreError;

pub const EQUITY_STCG_RATE: f64 = 0.20;
pub const EQUITY_LTCG_RATE: f64 = 0.125;
/// Yearly long-term gain on listed equity that is not taxed.
pub const EQUITY_LTCG_EXEMPTION: f64 = 125_000.0;
pub const NON_EQUITY_LTCG_RATE: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetClass {
    /// Listed shares and equity-oriented mutual funds.
    Equity,
    /// Debt funds and bonds.
    Debt,
    Gold,
    Property,
}

impl AssetClass {
    /// Holding period, in months, beyond which a gain is long-term.
    pub fn long_term_threshold_months(self) -> u32 {
        match self {
            AssetClass::Equity => 12,
            AssetClass::Gold | AssetClass::Property => 24,
            AssetClass::Debt => 36,
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::Equity => write!(f, "Equity"),
            AssetClass::Debt => write!(f, "Debt"),
            AssetClass::Gold => write!(f, "Gold"),
            AssetClass::Property => write!(f, "Property"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GainType {
    ShortTerm,
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsInput {
    pub asset_class: AssetClass,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub holding_months: u32,
    /// Cost inflation index ratio (sale-year CII / purchase-year CII).
    /// Only applied to long-term gains on property.
    #[serde(default = "default_indexation")]
    pub indexation_multiplier: f64,
    /// Marginal slab rate in percent for short-term non-equity gains.
    #[serde(default = "default_slab_rate")]
    pub slab_rate: f64,
}

fn default_indexation() -> f64 {
    1.0
}

fn default_slab_rate() -> f64 {
    30.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsResult {
    pub gain_type: GainType,
    pub cost_basis: f64,
    pub capital_gain: f64,
    pub exemption: f64,
    pub taxable_gain: f64,
    pub tax_rate_pct: f64,
    pub tax: f64,
    pub net_proceeds: f64,
}

impl CapitalGainsInput {
    pub fn new(asset_class: AssetClass, purchase_price: f64, sale_price: f64, holding_months: u32) -> Self {
        Self {
            asset_class,
            purchase_price,
            sale_price,
            holding_months,
            indexation_multiplier: default_indexation(),
            slab_rate: default_slab_rate(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .positive("purchase_price", self.purchase_price)
            .non_negative("sale_price", self.sale_price)
            .range("indexation_multiplier", self.indexation_multiplier, 1.0, 10.0)
            .range("slab_rate", self.slab_rate, 0.0, 30.0)
            .finish()
    }

    pub fn gain_type(&self) -> GainType {
        if self.holding_months > self.asset_class.long_term_threshold_months() {
            GainType::LongTerm
        } else {
            GainType::ShortTerm
        }
    }
}

pub fn calculate_capital_gains(input: &CapitalGainsInput) -> Result<CapitalGainsResult, CoreError> {
    input.validate()?;

    let gain_type = input.gain_type();
    let (cost_basis, rate, exemption_cap) = match (input.asset_class, gain_type) {
        (AssetClass::Equity, GainType::ShortTerm) => (input.purchase_price, EQUITY_STCG_RATE, 0.0),
        (AssetClass::Equity, GainType::LongTerm) => {
            (input.purchase_price, EQUITY_LTCG_RATE, EQUITY_LTCG_EXEMPTION)
        }
        (_, GainType::ShortTerm) => (input.purchase_price, input.slab_rate / 100.0, 0.0),
        (AssetClass::Property, GainType::LongTerm) => (
            input.purchase_price * input.indexation_multiplier,
            NON_EQUITY_LTCG_RATE,
            0.0,
        ),
        (_, GainType::LongTerm) => (input.purchase_price, NON_EQUITY_LTCG_RATE, 0.0),
    };

    let gain = input.sale_price - cost_basis;
    let exemption = exemption_cap.min(gain.max(0.0));
    let taxable = (gain - exemption).max(0.0);
    let tax = taxable * rate;

    Ok(CapitalGainsResult {
        gain_type,
        cost_basis: round_currency(cost_basis),
        capital_gain: round_currency(gain),
        exemption: round_currency(exemption),
        taxable_gain: round_currency(taxable),
        tax_rate_pct: rate * 100.0,
        tax: round_currency(tax),
        net_proceeds: round_currency(input.sale_price - tax),
    })
}
