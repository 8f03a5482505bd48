//! Staged candidate pipeline for scanning pricing opportunities.
//!
//! The pipeline is built from small swappable stages — sources produce
//! candidates, hydrators enrich them, filters partition them, scorers
//! rank them, a selector truncates, and side effects run after selection
//! without affecting the result. Stage contracts are generic over the
//! query and candidate types; the concrete wiring lives in `pipelines/`.

pub mod candidate_pipeline;
pub mod components;
pub mod elasticity_loader;
pub mod filter;
pub mod groups;
pub mod hydrator;
pub mod pipelines;
pub mod query_hydrator;
pub mod sales_loader;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;
