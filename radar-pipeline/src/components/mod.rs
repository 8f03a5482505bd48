pub mod default_margin_hydrator;
pub mod elasticity_scan_source;
pub mod group_diversity_scorer;
pub mod low_baseline_filter;
pub mod profit_uplift_scorer;
pub mod reliability_hydrator;
pub mod scan_log_side_effect;
pub mod top_k_selector;
