//! Category elasticity table: the read-only input every simulation runs
//! against.
//!
//! One row per category, validated once at construction. After that the
//! table is immutable and safe to share across concurrent callers.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{PricingError, PricingResult};
use crate::thresholds;

/// Point estimate of price elasticity for one category, with its
/// baseline revenue over the analysis window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryElasticity {
    pub category: String,
    /// %ΔQuantity per 1% ΔPrice. Typically negative. Values far outside
    /// [-10, 10] are suspect but not rejected; display layers may clip,
    /// the simulator never does.
    pub mean_elasticity: f64,
    /// Baseline revenue for the category over the analysis window. Never
    /// negative (enforced at table construction).
    pub category_revenue: f64,
    /// Fit quality of the elasticity regression, when known. Only used
    /// for the reliability label, never in the arithmetic.
    pub avg_r_squared: Option<f64>,
}

impl CategoryElasticity {
    /// Whether demand in this category is elastic (`|e| > 1`).
    /// Exactly ±1 counts as inelastic.
    pub fn is_elastic(&self) -> bool {
        self.mean_elasticity.abs() > thresholds::ELASTIC_BOUNDARY
    }

    /// Distance from unit elasticity, `|e + 1|`. The further a category
    /// sits from -1, the more revenue headroom a price adjustment has.
    pub fn optimization_potential(&self) -> f64 {
        (self.mean_elasticity + 1.0).abs()
    }

    /// Statistical reliability tier derived from the regression r².
    /// A missing r² is treated as the most conservative tier.
    pub fn reliability(&self) -> Reliability {
        match self.avg_r_squared {
            Some(r2) if r2 > thresholds::HIGH_RELIABILITY_R2 => Reliability::High,
            Some(r2) if r2 > thresholds::MODERATE_RELIABILITY_R2 => Reliability::Moderate,
            _ => Reliability::Low,
        }
    }
}

/// How much to trust a category's elasticity estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Reliability {
    High,
    Moderate,
    Low,
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reliability::High => write!(f, "High (Reliable)"),
            Reliability::Moderate => write!(f, "Moderate"),
            Reliability::Low => write!(f, "Low (needs more data)"),
        }
    }
}

/// Immutable lookup table from category name to its elasticity row.
///
/// Rows keep their insertion order so iteration is deterministic; the
/// index gives O(1) lookups by name.
pub struct ElasticityTable {
    rows: Vec<CategoryElasticity>,
    index: HashMap<String, usize>,
}

impl ElasticityTable {
    /// Build a table from rows, validating the invariants:
    /// category names unique, baseline revenue non-negative.
    pub fn from_rows(rows: Vec<CategoryElasticity>) -> PricingResult<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.category_revenue < 0.0 {
                return Err(PricingError::NegativeRevenue {
                    category: row.category.clone(),
                    revenue: row.category_revenue,
                });
            }
            if index.insert(row.category.clone(), i).is_some() {
                return Err(PricingError::DuplicateCategory(row.category.clone()));
            }
        }
        Ok(Self { rows, index })
    }

    /// Look up a category's row. A miss is an error, never a default.
    pub fn get(&self, category: &str) -> PricingResult<&CategoryElasticity> {
        self.index
            .get(category)
            .map(|&i| &self.rows[i])
            .ok_or_else(|| PricingError::UnknownCategory(category.to_string()))
    }

    /// All rows, in insertion order.
    pub fn rows(&self) -> &[CategoryElasticity] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, elasticity: f64, revenue: f64, r2: Option<f64>) -> CategoryElasticity {
        CategoryElasticity {
            category: category.to_string(),
            mean_elasticity: elasticity,
            category_revenue: revenue,
            avg_r_squared: r2,
        }
    }

    #[test]
    fn lookup_hits_and_misses() {
        let table = ElasticityTable::from_rows(vec![
            row("electronics", -1.8, 52_000.0, Some(0.42)),
            row("housewares", -0.4, 18_500.0, Some(0.15)),
        ])
        .unwrap();

        assert_eq!(table.get("housewares").unwrap().mean_elasticity, -0.4);
        assert!(matches!(
            table.get("garden_tools"),
            Err(PricingError::UnknownCategory(_))
        ));
    }

    #[test]
    fn duplicate_category_is_a_build_error() {
        let result = ElasticityTable::from_rows(vec![
            row("toys", -1.2, 9_000.0, None),
            row("toys", -0.9, 4_000.0, None),
        ]);
        assert!(matches!(result, Err(PricingError::DuplicateCategory(c)) if c == "toys"));
    }

    #[test]
    fn negative_revenue_is_a_build_error() {
        let result = ElasticityTable::from_rows(vec![row("toys", -1.2, -1.0, None)]);
        assert!(matches!(result, Err(PricingError::NegativeRevenue { .. })));
    }

    #[test]
    fn elastic_boundary_is_exclusive() {
        assert!(!row("a", -1.0, 0.0, None).is_elastic());
        assert!(!row("b", 1.0, 0.0, None).is_elastic());
        assert!(row("c", -1.0001, 0.0, None).is_elastic());
        assert!(!row("d", -0.5, 0.0, None).is_elastic());
    }

    #[test]
    fn optimization_potential_is_distance_from_unit_elasticity() {
        assert!((row("a", -1.0, 0.0, None).optimization_potential()).abs() < 1e-12);
        assert!((row("b", -2.5, 0.0, None).optimization_potential() - 1.5).abs() < 1e-12);
        assert!((row("c", -0.2, 0.0, None).optimization_potential() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn reliability_tiers_follow_r_squared_cuts() {
        assert_eq!(row("a", -1.0, 0.0, Some(0.45)).reliability(), Reliability::High);
        assert_eq!(row("b", -1.0, 0.0, Some(0.3)).reliability(), Reliability::Moderate);
        assert_eq!(row("c", -1.0, 0.0, Some(0.11)).reliability(), Reliability::Moderate);
        assert_eq!(row("d", -1.0, 0.0, Some(0.1)).reliability(), Reliability::Low);
        assert_eq!(row("e", -1.0, 0.0, None).reliability(), Reliability::Low);
    }
}
