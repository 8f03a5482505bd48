//! CSV loader for category elasticity extracts.
//!
//! Expected columns: `category, mean_elasticity, category_revenue,
//! avg_r_squared`. The r² column may be blank for categories whose
//! regression did not converge.

use std::io::Read;

use serde::Deserialize;

use radar_core::elasticity::{CategoryElasticity, ElasticityTable};

/// One CSV row, as parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticityRecord {
    pub category: String,
    pub mean_elasticity: f64,
    pub category_revenue: f64,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub avg_r_squared: Option<f64>,
}

impl ElasticityRecord {
    pub fn to_row(&self) -> CategoryElasticity {
        CategoryElasticity {
            category: self.category.clone(),
            mean_elasticity: self.mean_elasticity,
            category_revenue: self.category_revenue,
            avg_r_squared: self.avg_r_squared,
        }
    }
}

/// Load elasticity records from a CSV reader.
pub fn load_elasticity<R: Read>(reader: R) -> Result<Vec<ElasticityRecord>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: ElasticityRecord =
            result.map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        records.push(record);
    }

    Ok(records)
}

/// Load elasticity records from a CSV file path.
pub fn load_elasticity_file(path: &str) -> Result<Vec<ElasticityRecord>, String> {
    let file =
        std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_elasticity(file)
}

/// Load and validate a whole table in one step. Table invariants
/// (unique categories, non-negative revenue) become load errors here.
pub fn load_table_file(path: &str) -> Result<ElasticityTable, String> {
    let rows = load_elasticity_file(path)?
        .iter()
        .map(ElasticityRecord::to_row)
        .collect();
    ElasticityTable::from_rows(rows).map_err(|e| e.to_string())
}

/// Blank cells become `None` instead of a parse error.
fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<f64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("expected float, got '{}': {}", v, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
category,mean_elasticity,category_revenue,avg_r_squared
electronics,-1.82,52340.50,0.42
bed_bath_table,-0.46,118500.00,0.15
garden_tools,-2.31,9875.25,
watches_sun_glass,-1.05,40210.00,0.08
";

    #[test]
    fn load_sample_csv() {
        let records = load_elasticity(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].category, "electronics");
        assert!((records[0].mean_elasticity - (-1.82)).abs() < 1e-9);
        assert!((records[1].category_revenue - 118500.0).abs() < 1e-9);
        assert_eq!(records[2].avg_r_squared, None);
        assert_eq!(records[3].avg_r_squared, Some(0.08));
    }

    #[test]
    fn to_row_preserves_fields() {
        let records = load_elasticity(SAMPLE_CSV.as_bytes()).unwrap();
        let row = records[0].to_row();
        assert_eq!(row.category, "electronics");
        assert!((row.mean_elasticity - (-1.82)).abs() < 1e-9);
        assert_eq!(row.avg_r_squared, Some(0.42));
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let bad = "\
category,mean_elasticity,category_revenue,avg_r_squared
electronics,not_a_number,100.0,0.4
";
        let err = load_elasticity(bad.as_bytes()).unwrap_err();
        assert!(err.contains("line 2"), "error was: {}", err);
    }

    #[test]
    fn duplicate_category_fails_table_build() {
        let dup = "\
category,mean_elasticity,category_revenue,avg_r_squared
toys,-1.2,100.0,0.4
toys,-0.8,200.0,0.3
";
        let rows: Vec<_> = load_elasticity(dup.as_bytes())
            .unwrap()
            .iter()
            .map(ElasticityRecord::to_row)
            .collect();
        assert!(radar_core::elasticity::ElasticityTable::from_rows(rows).is_err());
    }
}
