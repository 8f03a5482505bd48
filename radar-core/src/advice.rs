//! Classification of a simulated price change into a pricing
//! recommendation.
//!
//! A pure decision table over two axes: elasticity magnitude (elastic vs
//! inelastic, boundary at |e| = 1 exclusive) and the direction of the
//! proposed change. Six cells, five distinct outcomes. No state is
//! retained between calls.

use std::fmt;

use serde::Serialize;

use crate::thresholds;

/// Direction of a proposed price change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PriceMove {
    Cut,
    Hike,
    Hold,
}

impl PriceMove {
    /// Sign of the percentage change. Zero (and NaN) map to `Hold`.
    pub fn from_pct(price_change_pct: f64) -> Self {
        if price_change_pct < 0.0 {
            PriceMove::Cut
        } else if price_change_pct > 0.0 {
            PriceMove::Hike
        } else {
            PriceMove::Hold
        }
    }
}

/// The recommendation category selected by the decision table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AdviceKind {
    /// Elastic demand, price cut: volume gain outweighs the per-unit drop.
    PriceCutValid,
    /// Elastic demand, price hike: volume loss likely hurts revenue.
    PriceHikeRisk,
    /// Inelastic demand, price hike: margin grows faster than volume shrinks.
    MarginOptimizationValid,
    /// Inelastic demand, price cut: demand stimulation too weak to pay
    /// for the margin given up.
    PriceCutInefficient,
    /// No price change proposed; nothing to recommend.
    Neutral,
}

impl AdviceKind {
    /// Short canned recommendation a rendering layer can show directly.
    pub fn recommendation(&self) -> &'static str {
        match self {
            AdviceKind::PriceCutValid => {
                "Price cut is valid: demand stimulation should grow revenue"
            }
            AdviceKind::PriceHikeRisk => {
                "Caution: raising price on elastic demand risks a sharp revenue drop"
            }
            AdviceKind::MarginOptimizationValid => {
                "Margin optimization (price increase) strategy is valid"
            }
            AdviceKind::PriceCutInefficient => {
                "Price cut is inefficient: volume response will not offset the margin loss"
            }
            AdviceKind::Neutral => "No price change scenario selected",
        }
    }
}

impl fmt::Display for AdviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceKind::PriceCutValid => write!(f, "Price Cut Valid"),
            AdviceKind::PriceHikeRisk => write!(f, "Price Hike Risk"),
            AdviceKind::MarginOptimizationValid => write!(f, "Margin Optimization"),
            AdviceKind::PriceCutInefficient => write!(f, "Price Cut Inefficient"),
            AdviceKind::Neutral => write!(f, "Neutral"),
        }
    }
}

/// A recommendation plus the numbers a renderer interpolates into text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Advice {
    pub kind: AdviceKind,
    pub price_move: PriceMove,
    pub is_elastic: bool,
    pub revenue_change: f64,
    pub profit_change_ratio: f64,
}

/// Evaluate the decision table for one simulated scenario.
pub fn classify(
    elasticity: f64,
    price_change_pct: f64,
    revenue_change: f64,
    profit_change_ratio: f64,
) -> Advice {
    let is_elastic = elasticity.abs() > thresholds::ELASTIC_BOUNDARY;
    let price_move = PriceMove::from_pct(price_change_pct);

    let kind = match (is_elastic, price_move) {
        (true, PriceMove::Cut) => AdviceKind::PriceCutValid,
        (true, PriceMove::Hike) => AdviceKind::PriceHikeRisk,
        (false, PriceMove::Hike) => AdviceKind::MarginOptimizationValid,
        (false, PriceMove::Cut) => AdviceKind::PriceCutInefficient,
        (_, PriceMove::Hold) => AdviceKind::Neutral,
    };

    Advice {
        kind,
        price_move,
        is_elastic,
        revenue_change,
        profit_change_ratio,
    }
}
