/// Strip the module path from a fully qualified type name.
///
/// `"radar_pipeline::components::top_k_selector::TopKSelector"` becomes
/// `"TopKSelector"`. Used for stage names in log lines.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
