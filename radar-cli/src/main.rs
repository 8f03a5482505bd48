use std::env;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use radar_core::advice::Advice;
use radar_core::elasticity::{CategoryElasticity, ElasticityTable};
use radar_core::forecast::{forecast_demand, reorder_plan, DemandForecast, ReorderPlan};
use radar_core::simulator::{
    simulate_request, validate_margin_rate, SimulationRequest, SimulationResult,
};
use radar_core::stats;
use radar_core::thresholds;

use radar_pipeline::candidate_pipeline::CandidatePipeline;
use radar_pipeline::elasticity_loader::load_table_file;
use radar_pipeline::pipelines::opportunity_scan::OpportunityScanPipeline;
use radar_pipeline::sales_loader::{daily_series, load_sales_file};
use radar_pipeline::types::{OpportunityCandidate, ScenarioQuery};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CategoryReportJson {
    generated_at: String,
    category: String,
    mean_elasticity: f64,
    reliability: String,
    is_elastic: bool,
    price_change_pct: f64,
    margin_rate: f64,
    baseline_revenue: f64,
    simulation: SimulationJson,
    advice: AdviceJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    forecast: Option<ForecastJson>,
}

#[derive(Serialize)]
struct SimulationJson {
    expected_revenue: f64,
    revenue_change: f64,
    revenue_change_ratio: f64,
    expected_profit_change: f64,
    profit_change_ratio: f64,
}

#[derive(Serialize)]
struct AdviceJson {
    kind: String,
    recommendation: String,
}

#[derive(Serialize)]
struct ForecastJson {
    method: String,
    horizon_days: usize,
    total_expected: f64,
    history_days: usize,
    anomalies_flagged: usize,
    reorder: ReorderJson,
}

#[derive(Serialize)]
struct ReorderJson {
    forecast_qty: f64,
    safety_stock_qty: f64,
    recommended_order_qty: f64,
    safety_share: f64,
}

#[derive(Serialize)]
struct ScanJson {
    generated_at: String,
    price_change_pct: f64,
    margin_rate: f64,
    pipeline_ms: u128,
    opportunities: Vec<OpportunityJson>,
    summary: ScanSummaryJson,
}

#[derive(Serialize)]
struct OpportunityJson {
    rank: usize,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    mean_elasticity: f64,
    reliability: String,
    baseline_revenue: f64,
    expected_revenue: f64,
    revenue_change: f64,
    expected_profit_change: f64,
    profit_change_ratio: f64,
    priority_score: f64,
    advice: String,
    recommendation: String,
    context: String,
}

#[derive(Serialize)]
struct ScanSummaryJson {
    categories_scanned: usize,
    filtered_out: usize,
    selected: usize,
    total_projected_uplift: f64,
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format an amount with comma thousands separators and two decimal
/// places (no currency sign).
fn format_brl(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && total_cents > 0 { "-" } else { "" };
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    let s = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();
    format!("{}{}.{:02}", sign, grouped, cents)
}

fn reliability_str(row: &CategoryElasticity) -> String {
    row.reliability().to_string()
}

/// One explanatory sentence per opportunity, with the concrete numbers
/// interpolated.
fn generate_context(candidate: &OpportunityCandidate) -> String {
    use radar_core::advice::AdviceKind;
    match candidate.advice {
        AdviceKind::PriceCutValid => format!(
            "Elastic demand ({:.2}): the cut stimulates enough volume to move revenue by R$ {}.",
            candidate.mean_elasticity,
            format_brl(candidate.revenue_change)
        ),
        AdviceKind::PriceHikeRisk => format!(
            "Elastic demand ({:.2}): expect revenue to move by R$ {} if the hike lands.",
            candidate.mean_elasticity,
            format_brl(candidate.revenue_change)
        ),
        AdviceKind::MarginOptimizationValid => format!(
            "Inelastic demand ({:.2}): projected profit change {:+.1}% with volume nearly intact.",
            candidate.mean_elasticity,
            candidate.profit_change_ratio * 100.0
        ),
        AdviceKind::PriceCutInefficient => format!(
            "Inelastic demand ({:.2}): the cut gives up margin for little volume, profit {:+.1}%.",
            candidate.mean_elasticity,
            candidate.profit_change_ratio * 100.0
        ),
        AdviceKind::Neutral => "No price change proposed for this category.".to_string(),
    }
}

fn print_banner(title: &str) {
    println!();
    println!("  {:=<64}", "");
    println!("  PRICE RADAR \u{2014} {}", title);
    println!("  {:=<64}", "");
    println!();
}

fn print_category_human(
    row: &CategoryElasticity,
    price_change_pct: f64,
    margin_rate: f64,
    result: &SimulationResult,
    advice: &Advice,
    forecast: Option<(&DemandForecast, &ReorderPlan, usize, usize)>,
) {
    print_banner("Category Pricing Report");

    println!("  Category        {}", row.category);
    println!(
        "  Elasticity      {:.2}  ({})",
        row.mean_elasticity,
        if result.is_elastic { "elastic" } else { "inelastic" }
    );
    println!("  Reliability     {}", reliability_str(row));
    println!("  Baseline        R$ {}", format_brl(row.category_revenue));
    println!(
        "  Scenario        {:+.1}% price change at {:.0}% margin",
        price_change_pct,
        margin_rate * 100.0
    );
    println!();
    println!(
        "  Expected revenue     R$ {:>12}   ({:+.1}%)",
        format_brl(result.expected_revenue),
        result.revenue_change_ratio * 100.0
    );
    println!(
        "  Revenue change       R$ {:>12}",
        format_brl(result.revenue_change)
    );
    println!(
        "  Profit change        R$ {:>12}   ({:+.1}%)",
        format_brl(result.expected_profit_change),
        result.profit_change_ratio * 100.0
    );
    println!();
    println!("  >> {}", advice.kind.recommendation());

    if let Some((forecast, plan, history_days, anomalies)) = forecast {
        println!();
        println!("  {:\u{2500}<64}", "");
        println!(
            "  Demand forecast ({} days history, {:?})",
            history_days, forecast.method
        );
        println!(
            "  Expected demand next {} days:  {:.0} units",
            forecast.points.len(),
            forecast.total_expected
        );
        println!(
            "  Recommended order:  {:.0} units ({:.0} forecast + {:.0} safety, {:.0}% buffer)",
            plan.recommended_order_qty,
            plan.forecast_qty,
            plan.safety_stock_qty,
            plan.safety_share * 100.0
        );
        if anomalies > 0 {
            println!(
                "  Note: {} anomalous sales spike(s) in the history window",
                anomalies
            );
        }
    }
    println!();
}

fn print_scan_human(
    result: &radar_pipeline::candidate_pipeline::PipelineResult<ScenarioQuery, OpportunityCandidate>,
    price_change_pct: f64,
    margin_rate: f64,
    pipeline_ms: u128,
) {
    print_banner("Pricing Opportunity Scan");

    let total_uplift: f64 = result
        .selected_candidates
        .iter()
        .map(|c| c.expected_profit_change)
        .sum();

    println!(
        "  Scenario: {:+.1}% price change at {:.0}% margin",
        price_change_pct,
        margin_rate * 100.0
    );
    println!(
        "  {} categories scanned  \u{00b7}  {} below baseline floor  \u{00b7}  top {} selected",
        result.retrieved_candidates.len(),
        result.filtered_candidates.len(),
        result.selected_candidates.len()
    );
    println!(
        "  Projected profit impact of selection: R$ {}",
        format_brl(total_uplift)
    );
    println!();

    if result.selected_candidates.is_empty() {
        println!("  No opportunities survived the scan.");
    } else {
        println!("  {:\u{2500}<64}", "");
        for (i, c) in result.selected_candidates.iter().enumerate() {
            let group = c
                .group
                .map(|g| g.to_string())
                .unwrap_or_else(|| "Ungrouped".to_string());
            let reliability = c
                .reliability
                .map(|r| r.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            println!(
                "  {}. {:28} {:16} score {:>7.2}",
                i + 1,
                c.category,
                group,
                c.priority_score.unwrap_or(0.0)
            );
            println!(
                "     {}  \u{00b7}  reliability: {}",
                c.advice, reliability
            );
            println!("     {}", generate_context(c));
            println!();
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    println!("  \u{23f1}  Scan ran in {}ms", pipeline_ms);
    println!();
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

struct CliArgs {
    elasticity_csv: String,
    price_change_pct: f64,
    category: Option<String>,
    margin_rate: Option<f64>,
    top: usize,
    json: bool,
    sales_history: Option<String>,
    safety_days: f64,
}

fn print_usage() {
    eprintln!(
        "Usage: radar-cli <elasticity.csv> --price-change <pct> [--category <name>] \
         [--margin <rate>] [--top <n>] [--json] [--sales-history <csv>] [--safety-days <d>]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --price-change   Price change percentage to simulate, e.g. -10");
    eprintln!("  --category       Report a single category instead of scanning");
    eprintln!("  --margin         Margin rate as a fraction in (0, 1); default 0.25");
    eprintln!("  --top            Number of scan opportunities to show (default: 5)");
    eprintln!("  --json           Output as JSON instead of formatted text");
    eprintln!("  --sales-history  Daily sales CSV for the demand forecast section");
    eprintln!("  --safety-days    Safety stock coverage in days (default: 3)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  radar-cli fixtures/sample_elasticity.csv --price-change -10");
    eprintln!("  radar-cli fixtures/sample_elasticity.csv --price-change 5 --category electronics");
    eprintln!("  radar-cli fixtures/sample_elasticity.csv --price-change -10 --top 3 --json");
}

fn parse_flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    if i + 1 >= args.len() {
        eprintln!("Error: {} requires a value", flag);
        process::exit(1);
    }
    args[i + 1].parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value '{}' for {}", args[i + 1], flag);
        process::exit(1);
    })
}

fn parse_args(args: &[String]) -> CliArgs {
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let elasticity_csv = args[1].clone();
    let mut price_change_pct: Option<f64> = None;
    let mut category: Option<String> = None;
    let mut margin_rate: Option<f64> = None;
    let mut top: usize = 5;
    let mut json = false;
    let mut sales_history: Option<String> = None;
    let mut safety_days: f64 = thresholds::DEFAULT_SAFETY_STOCK_DAYS;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--price-change" => {
                price_change_pct = Some(parse_flag_value(args, i, "--price-change"));
                i += 2;
            }
            "--category" => {
                category = Some(parse_flag_value::<String>(args, i, "--category"));
                i += 2;
            }
            "--margin" => {
                margin_rate = Some(parse_flag_value(args, i, "--margin"));
                i += 2;
            }
            "--top" => {
                top = parse_flag_value(args, i, "--top");
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--sales-history" => {
                sales_history = Some(parse_flag_value::<String>(args, i, "--sales-history"));
                i += 2;
            }
            "--safety-days" => {
                safety_days = parse_flag_value(args, i, "--safety-days");
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
    }

    let price_change_pct = price_change_pct.unwrap_or_else(|| {
        eprintln!("Error: --price-change is required");
        print_usage();
        process::exit(1);
    });

    // Both report modes need a valid margin, so reject it up front
    // instead of letting one mode fail later and the other degrade.
    if let Some(m) = margin_rate {
        if let Err(e) = validate_margin_rate(m) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    CliArgs {
        elasticity_csv,
        price_change_pct,
        category,
        margin_rate,
        top,
        json,
        sales_history,
        safety_days,
    }
}

// ---------------------------------------------------------------------------
// Report modes
// ---------------------------------------------------------------------------

/// Forecast block for the single-category report, when sales history
/// was provided. Returns (forecast, plan, history days, anomaly count).
fn build_forecast(
    sales_path: &str,
    category: &str,
    safety_days: f64,
) -> Result<(DemandForecast, ReorderPlan, usize, usize), String> {
    let records = load_sales_file(sales_path)?;
    let series = daily_series(&records, category)?;
    if series.is_empty() {
        return Err(format!("no sales history rows for category '{}'", category));
    }
    let forecast = forecast_demand(&series, thresholds::FORECAST_HORIZON_DAYS)
        .map_err(|e| e.to_string())?;
    let plan = reorder_plan(&forecast, stats::mean(&series), safety_days);
    let anomalies = stats::default_anomaly_flags(&series).len();
    Ok((forecast, plan, series.len(), anomalies))
}

fn run_category_report(args: &CliArgs, table: &ElasticityTable) {
    let category = args.category.as_deref().unwrap();
    let margin_rate = args.margin_rate.unwrap_or(thresholds::DEFAULT_MARGIN_RATE);

    let request = SimulationRequest {
        target_category: category.to_string(),
        price_change_pct: args.price_change_pct,
        margin_rate,
    };
    let (result, advice) = match simulate_request(table, &request) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    // The lookup cannot fail after simulate_request succeeded.
    let row = table.get(category).unwrap();

    let forecast = match &args.sales_history {
        Some(path) => match build_forecast(path, category, args.safety_days) {
            Ok(built) => Some(built),
            Err(e) => {
                eprintln!("Error building forecast: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    if args.json {
        let report = CategoryReportJson {
            generated_at: Utc::now().to_rfc3339(),
            category: row.category.clone(),
            mean_elasticity: row.mean_elasticity,
            reliability: reliability_str(row),
            is_elastic: result.is_elastic,
            price_change_pct: args.price_change_pct,
            margin_rate,
            baseline_revenue: row.category_revenue,
            simulation: SimulationJson {
                expected_revenue: result.expected_revenue,
                revenue_change: result.revenue_change,
                revenue_change_ratio: result.revenue_change_ratio,
                expected_profit_change: result.expected_profit_change,
                profit_change_ratio: result.profit_change_ratio,
            },
            advice: AdviceJson {
                kind: advice.kind.to_string(),
                recommendation: advice.kind.recommendation().to_string(),
            },
            forecast: forecast.as_ref().map(|(f, plan, history_days, anomalies)| {
                ForecastJson {
                    method: format!("{:?}", f.method),
                    horizon_days: f.points.len(),
                    total_expected: f.total_expected,
                    history_days: *history_days,
                    anomalies_flagged: *anomalies,
                    reorder: ReorderJson {
                        forecast_qty: plan.forecast_qty,
                        safety_stock_qty: plan.safety_stock_qty,
                        recommended_order_qty: plan.recommended_order_qty,
                        safety_share: plan.safety_share,
                    },
                }
            }),
        };
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        print_category_human(
            row,
            args.price_change_pct,
            margin_rate,
            &result,
            &advice,
            forecast
                .as_ref()
                .map(|(f, plan, days, anomalies)| (f, plan, *days, *anomalies)),
        );
    }
}

async fn run_scan(args: &CliArgs, table: Arc<ElasticityTable>) {
    let margin_rate = args.margin_rate.unwrap_or(thresholds::DEFAULT_MARGIN_RATE);

    let pipeline_start = Instant::now();
    let pipeline = OpportunityScanPipeline::with_table_and_size(table, args.top);
    let query = ScenarioQuery {
        request_id: format!("scan-{}", Utc::now().timestamp()),
        price_change_pct: args.price_change_pct,
        margin_rate: args.margin_rate,
        categories: vec![],
    };
    let result = pipeline.execute(query).await;
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if args.json {
        let total_uplift: f64 = result
            .selected_candidates
            .iter()
            .map(|c| c.expected_profit_change)
            .sum();
        let scan = ScanJson {
            generated_at: Utc::now().to_rfc3339(),
            price_change_pct: args.price_change_pct,
            margin_rate,
            pipeline_ms,
            opportunities: result
                .selected_candidates
                .iter()
                .enumerate()
                .map(|(i, c)| OpportunityJson {
                    rank: i + 1,
                    category: c.category.clone(),
                    group: c.group.map(|g| g.to_string()),
                    mean_elasticity: c.mean_elasticity,
                    reliability: c
                        .reliability
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    baseline_revenue: c.baseline_revenue,
                    expected_revenue: c.expected_revenue,
                    revenue_change: c.revenue_change,
                    expected_profit_change: c.expected_profit_change,
                    profit_change_ratio: c.profit_change_ratio,
                    priority_score: c.priority_score.unwrap_or(0.0),
                    advice: c.advice.to_string(),
                    recommendation: c.advice.recommendation().to_string(),
                    context: generate_context(c),
                })
                .collect(),
            summary: ScanSummaryJson {
                categories_scanned: result.retrieved_candidates.len(),
                filtered_out: result.filtered_candidates.len(),
                selected: result.selected_candidates.len(),
                total_projected_uplift: total_uplift,
            },
        };
        println!("{}", serde_json::to_string_pretty(&scan).unwrap());
    } else {
        print_scan_human(&result, args.price_change_pct, margin_rate, pipeline_ms);
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    let table = match load_table_file(&cli.elasticity_csv) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error loading elasticity CSV: {}", e);
            process::exit(1);
        }
    };
    log::info!(
        "loaded {} categories from {}",
        table.len(),
        cli.elasticity_csv
    );

    if cli.category.is_some() {
        run_category_report(&cli, &table);
    } else {
        run_scan(&cli, Arc::new(table)).await;
    }
}
