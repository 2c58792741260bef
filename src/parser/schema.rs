//! Record types shared by the parser, aggregator and flow builder.

use std::fmt;

/// A single itemized cost line, after normalization
///
/// **Public** - produced by the parser, consumed by the aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRecord {
    /// Raw pricing model label (kept as text so unknown tiers survive)
    pub pricing_model: String,

    /// Billing category, after the ETL merge
    pub category: String,

    /// Deployment environment
    pub environment: String,

    /// Monthly cost in whole currency units
    pub monthly_cost: u64,
}

impl CostRecord {
    /// Create a new record
    ///
    /// **Public** - constructor; does not normalize `category`
    pub fn new(
        pricing_model: impl Into<String>,
        category: impl Into<String>,
        environment: impl Into<String>,
        monthly_cost: u64,
    ) -> Self {
        Self {
            pricing_model: pricing_model.into(),
            category: category.into(),
            environment: environment.into(),
            monthly_cost,
        }
    }

    /// True if this record's pricing model is exactly `model`
    pub fn is_priced_as(&self, model: PricingModel) -> bool {
        self.pricing_model == model.as_str()
    }
}

/// Recognized billing commitment tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricingModel {
    /// Pre-purchased compute savings plan
    SavingsPlan,
    /// Pre-committed reserved capacity
    Reservation,
    /// Pay-as-you-go
    OnDemand,
}

/// Order in which pricing models feed the diagram
pub const PRICING_ORDER: [PricingModel; 3] = [
    PricingModel::SavingsPlan,
    PricingModel::Reservation,
    PricingModel::OnDemand,
];

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::SavingsPlan => "SavingsPlan",
            PricingModel::Reservation => "Reservation",
            PricingModel::OnDemand => "OnDemand",
        }
    }

    /// Map an export label to a known tier (exact, case-sensitive match)
    pub fn from_label(label: &str) -> Option<Self> {
        PRICING_ORDER.into_iter().find(|m| m.as_str() == label)
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
