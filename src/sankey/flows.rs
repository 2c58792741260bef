//! Build the three weighted edge lists of the cost Sankey.
//!
//! Stage A: pricing model -> category
//! Stage B: category -> TotalMonthly
//! Stage C: TotalMonthly -> environment
//!
//! Within each stage edges follow cost rank, largest first. Renderers stack
//! nodes in emission order, so this ordering is part of the output contract.

use super::labels::LabelMap;
use crate::aggregator::{GroupedRecord, OrderedTotals};
use crate::parser::schema::{PricingModel, PRICING_ORDER};
use crate::utils::config::TOTAL_MONTHLY_LABEL;
use log::debug;
use std::fmt;

/// A directed, weighted link between two diagram nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub weight: u64,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, weight: u64, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            weight,
            target: target.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.source, self.weight, self.target)
    }
}

/// All three stages, each already in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SankeyFlows {
    /// Stage A: pricing model -> category
    pub pricing: Vec<Edge>,
    /// Stage B: category -> TotalMonthly
    pub categories: Vec<Edge>,
    /// Stage C: TotalMonthly -> environment
    pub environments: Vec<Edge>,
}

impl SankeyFlows {
    pub fn is_empty(&self) -> bool {
        self.pricing.is_empty() && self.categories.is_empty() && self.environments.is_empty()
    }

    /// Sum of the Stage B weights, i.e. the diagram's total cost (saturating)
    pub fn total_weight(&self) -> u64 {
        self.categories
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.weight))
    }
}

/// Build the flow edges from grouped records
///
/// **Public** - main entry point for flow construction
///
/// # Arguments
/// * `grouped` - Records tagged with their reported category
/// * `labels` - Display-label lookup applied to category and environment names
///
/// # Returns
/// Edge lists for the three stages. Zero-weight edges are never emitted.
///
/// Records whose pricing model is not one of the recognized tiers count
/// toward category and environment totals but produce no Stage A edge.
pub fn build_flows(grouped: &[GroupedRecord], labels: &LabelMap) -> SankeyFlows {
    let category_totals = grouped_category_totals(grouped);
    let environment_totals = environment_totals(grouped);

    let category_order = category_totals.sorted_desc();
    let environment_order = environment_totals.sorted_desc();

    let unmatched = grouped
        .iter()
        .filter(|g| PricingModel::from_label(&g.record.pricing_model).is_none())
        .count();
    if unmatched > 0 {
        debug!("{} records have an unrecognized pricing model and are left out of pricing flows", unmatched);
    }

    let mut pricing = Vec::new();
    for model in PRICING_ORDER {
        let per_category = model_category_totals(grouped, model);

        for (category, _) in &category_order {
            let cost = per_category.get(category).unwrap_or(0);
            if cost > 0 {
                pricing.push(Edge::new(model.as_str(), cost, labels.resolve(category)));
            }
        }
    }

    let categories: Vec<Edge> = category_order
        .iter()
        .filter(|(_, cost)| *cost > 0)
        .map(|(category, cost)| Edge::new(labels.resolve(category), *cost, TOTAL_MONTHLY_LABEL))
        .collect();

    let environments: Vec<Edge> = environment_order
        .iter()
        .filter(|(_, cost)| *cost > 0)
        .map(|(environment, cost)| Edge::new(TOTAL_MONTHLY_LABEL, *cost, labels.resolve(environment)))
        .collect();

    debug!(
        "Built {} pricing, {} category and {} environment edges",
        pricing.len(),
        categories.len(),
        environments.len()
    );

    SankeyFlows {
        pricing,
        categories,
        environments,
    }
}

/// Totals per reported category ("Others" included)
fn grouped_category_totals(grouped: &[GroupedRecord]) -> OrderedTotals {
    let mut totals = OrderedTotals::new();
    for g in grouped {
        totals.add(&g.grouped_category, g.record.monthly_cost);
    }
    totals
}

/// Totals per environment over every record, independent of category folding
fn environment_totals(grouped: &[GroupedRecord]) -> OrderedTotals {
    let mut totals = OrderedTotals::new();
    for g in grouped {
        totals.add(&g.record.environment, g.record.monthly_cost);
    }
    totals
}

fn model_category_totals(grouped: &[GroupedRecord], model: PricingModel) -> OrderedTotals {
    let mut totals = OrderedTotals::new();
    for g in grouped.iter().filter(|g| g.record.is_priced_as(model)) {
        totals.add(&g.grouped_category, g.record.monthly_cost);
    }
    totals
}
