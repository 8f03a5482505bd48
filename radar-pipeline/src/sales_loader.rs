//! CSV loader for daily sales history.
//!
//! Expected columns: `category, date (YYYY-MM-DD), daily_sales_count`.
//! The forecaster needs a continuous daily series, so [`daily_series`]
//! sorts by date and fills calendar gaps with zero sales.

use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

/// Longest believable gap-filled history. Two rows further apart than
/// this are treated as bad dates rather than a multi-gigabyte series.
const MAX_SERIES_SPAN_DAYS: i64 = 3_650;

/// One CSV row, as parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesRecord {
    pub category: String,
    pub date: String,
    pub daily_sales_count: f64,
}

/// Load sales records from a CSV reader.
pub fn load_sales<R: Read>(reader: R) -> Result<Vec<SalesRecord>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: SalesRecord =
            result.map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        records.push(record);
    }

    Ok(records)
}

/// Load sales records from a CSV file path.
pub fn load_sales_file(path: &str) -> Result<Vec<SalesRecord>, String> {
    let file =
        std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_sales(file)
}

/// Continuous daily series for one category: filtered, sorted by date,
/// calendar gaps filled with 0.0. Duplicate dates are summed. Empty when
/// the category has no rows.
pub fn daily_series(records: &[SalesRecord], category: &str) -> Result<Vec<f64>, String> {
    let mut dated: Vec<(NaiveDate, f64)> = Vec::new();
    for record in records.iter().filter(|r| r.category == category) {
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
            .map_err(|e| format!("Bad date '{}' for {}: {}", record.date, category, e))?;
        dated.push((date, record.daily_sales_count));
    }
    if dated.is_empty() {
        return Ok(Vec::new());
    }
    dated.sort_by_key(|(date, _)| *date);

    let start = dated[0].0;
    let end = dated[dated.len() - 1].0;
    let span = (end - start).num_days();
    if span >= MAX_SERIES_SPAN_DAYS {
        return Err(format!(
            "sales history for '{}' spans {} days ({} to {}), over the {}-day limit",
            category, span, start, end, MAX_SERIES_SPAN_DAYS
        ));
    }
    let days = span as usize + 1;

    let mut series = vec![0.0; days];
    for (date, count) in dated {
        let idx = (date - start).num_days() as usize;
        series[idx] += count;
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
category,date,daily_sales_count
toys,2017-11-01,4
toys,2017-11-02,6
toys,2017-11-05,2
electronics,2017-11-01,10
toys,2017-11-03,1
";

    #[test]
    fn load_sample_csv() {
        let records = load_sales(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].category, "toys");
        assert_eq!(records[0].date, "2017-11-01");
        assert!((records[3].daily_sales_count - 10.0).abs() < 1e-9);
    }

    #[test]
    fn daily_series_fills_calendar_gaps() {
        let records = load_sales(SAMPLE_CSV.as_bytes()).unwrap();
        let series = daily_series(&records, "toys").unwrap();
        // Nov 1 through Nov 5, with Nov 4 missing -> 0.0.
        assert_eq!(series, vec![4.0, 6.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn daily_series_is_per_category() {
        let records = load_sales(SAMPLE_CSV.as_bytes()).unwrap();
        let series = daily_series(&records, "electronics").unwrap();
        assert_eq!(series, vec![10.0]);
    }

    #[test]
    fn unknown_category_yields_empty_series() {
        let records = load_sales(SAMPLE_CSV.as_bytes()).unwrap();
        assert!(daily_series(&records, "garden_tools").unwrap().is_empty());
    }

    #[test]
    fn implausible_date_span_is_an_error() {
        let records = vec![
            SalesRecord {
                category: "toys".into(),
                date: "2017-11-01".into(),
                daily_sales_count: 4.0,
            },
            SalesRecord {
                category: "toys".into(),
                date: "2031-11-01".into(),
                daily_sales_count: 2.0,
            },
        ];
        let err = daily_series(&records, "toys").unwrap_err();
        assert!(err.contains("over the 3650-day limit"), "{}", err);
    }

    #[test]
    fn bad_date_is_an_error() {
        let records = vec![SalesRecord {
            category: "toys".into(),
            date: "11/01/2017".into(),
            daily_sales_count: 4.0,
        }];
        assert!(daily_series(&records, "toys").is_err());
    }
}
