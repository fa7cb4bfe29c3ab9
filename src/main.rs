use alerter::{Alert, AlertEngine, AlertInputs, Severity};
use analytics::{DashboardReport, MetricsEngine};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use core_types::{DateRange, FilterSelection};
use datasource::{DataSource, SyntheticSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Finsight CFO dashboard CLI.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Financial health metrics for a multi-country, multi-team organization.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the full dashboard report.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Start of the reporting window (format: YYYY-MM-DD). Requires --to.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the reporting window (format: YYYY-MM-DD). Requires --from.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Restrict to one or more countries (repeatable).
    #[arg(long = "country")]
    countries: Vec<String>,

    /// Restrict to one or more teams (repeatable).
    #[arg(long = "team")]
    teams: Vec<String>,

    /// Override the synthetic data seed from config.toml.
    #[arg(long)]
    seed: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = configuration::load_config_from(&args.config)?;

    let selection = build_selection(&args)?;

    // The snapshot is loaded once and shared read-only with every
    // calculator; a filter change only re-runs the computation.
    let mut data_config = config.synthetic_data.clone();
    if let Some(seed) = args.seed {
        data_config.seed = seed;
    }
    let source = SyntheticSource::new(data_config);
    let snapshot = source.load()?;

    let engine = MetricsEngine::new();
    let report = engine.calculate(&snapshot, &selection);

    let alert_engine = AlertEngine::new(config.alerts.clone())?;
    let alerts = alert_engine.evaluate(&AlertInputs {
        runway_months: report.runway.runway_months,
        overdue_ar: report.ar.overdue,
        total_revenue: report.kpi.total_revenue,
        has_receivables: report.ar.has_receivables(),
        net_profit: report.pnl.total_net_profit(),
    });

    match args.format {
        OutputFormat::Table => print_tables(&report, &alerts),
        OutputFormat::Json => {
            let doc = serde_json::json!({ "report": report, "alerts": alerts });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }

    Ok(())
}

/// Builds the filter selection from CLI arguments. A single-sided date
/// range is rejected here at the boundary instead of being silently
/// ignored.
fn build_selection(args: &ReportArgs) -> anyhow::Result<FilterSelection> {
    let date_range = match (args.from, args.to) {
        (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
        (None, None) => None,
        _ => anyhow::bail!("--from and --to must be supplied together"),
    };
    Ok(FilterSelection {
        date_range,
        countries: non_empty_set(&args.countries),
        teams: non_empty_set(&args.teams),
    })
}

fn non_empty_set(values: &[String]) -> Option<BTreeSet<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().cloned().collect())
    }
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn print_tables(report: &DashboardReport, alerts: &[Alert]) {
    print_kpi(report);
    print_cash_flow(report);
    print_pnl(report);
    print_pipeline(report);
    print_productivity(report);
    print_ar(report);
    print_alerts(alerts);
}

/// Formats a KRW amount in units of 100 million won, the convention the
/// finance team reads everything in.
fn krw(amount: Decimal) -> String {
    format!("{}억", (amount / dec!(100_000_000)).round_dp(1))
}

fn pct(value: Decimal) -> String {
    format!("{}%", value.round_dp(1))
}

fn print_kpi(report: &DashboardReport) {
    let kpi = &report.kpi;
    let cash_as_of = kpi
        .cash_as_of
        .map(|d| d.to_string())
        .unwrap_or_else(|| "n/a".to_string());

    println!("== Key KPIs ==");
    let mut table = Table::new();
    table.set_header(vec![
        "Total Revenue",
        "Total Expense",
        "Net Profit",
        "Net Margin",
        "Cash Balance",
        "Cash As Of",
        "Headcount",
        "Revenue / Head",
    ]);
    table.add_row(vec![
        krw(kpi.total_revenue),
        krw(kpi.total_expense),
        krw(kpi.net_profit),
        pct(kpi.net_margin_pct),
        krw(kpi.cash_balance),
        cash_as_of,
        kpi.active_headcount.to_string(),
        krw(kpi.per_capita_revenue),
    ]);
    println!("{table}\n");
}

fn print_cash_flow(report: &DashboardReport) {
    println!("== Monthly Cash Flow ==");
    let mut table = Table::new();
    table.set_header(vec!["Month", "Revenue", "Expense", "Net"]);
    for row in &report.cash_flow {
        table.add_row(vec![
            row.period.clone(),
            krw(row.revenue),
            krw(row.expense),
            krw(row.net),
        ]);
    }
    println!("{table}");

    let runway = &report.runway;
    println!(
        "Runway: {} months (cash {} as of {}, average burn {}/month)\n",
        runway.runway_months.round_dp(1),
        krw(runway.cash_balance),
        runway
            .cash_as_of
            .map(|d| d.to_string())
            .unwrap_or_else(|| "n/a".to_string()),
        krw(runway.average_monthly_burn),
    );
}

fn print_pnl(report: &DashboardReport) {
    println!("== P&L Summary ==");
    let mut table = Table::new();
    table.set_header(vec![
        "Month",
        "Revenue",
        "COGS",
        "Gross Profit",
        "Gross Margin",
        "OpEx",
        "Net Profit",
        "Net Margin",
    ]);
    for row in &report.pnl.rows {
        table.add_row(vec![
            row.period.clone(),
            krw(row.revenue),
            krw(row.cogs),
            krw(row.gross_profit),
            pct(row.gross_margin_pct),
            krw(row.opex),
            krw(row.net_profit),
            pct(row.net_margin_pct),
        ]);
    }
    println!("{table}\n");
}

fn print_pipeline(report: &DashboardReport) {
    let pipeline = &report.pipeline;
    println!("== Sales Pipeline ==");
    println!(
        "Raw: {}  Weighted: {}  Closed Won: {}",
        krw(pipeline.raw_total),
        krw(pipeline.weighted_total),
        krw(pipeline.closed_total),
    );
    let mut table = Table::new();
    table.set_header(vec!["Stage", "Value"]);
    for stage in &pipeline.by_stage {
        table.add_row(vec![stage.stage.as_str().to_string(), krw(stage.total)]);
    }
    println!("{table}\n");
}

fn print_productivity(report: &DashboardReport) {
    println!("== Team Productivity ==");
    let mut table = Table::new();
    table.set_header(vec!["Team", "Revenue", "Headcount", "Revenue / Head"]);
    for row in &report.productivity {
        table.add_row(vec![
            row.team.clone(),
            krw(row.revenue),
            row.headcount.to_string(),
            krw(row.per_capita_revenue),
        ]);
    }
    println!("{table}\n");
}

fn print_ar(report: &DashboardReport) {
    let ar = &report.ar;
    println!("== Accounts Receivable ==");
    if !ar.has_receivables() {
        println!("No outstanding receivables.\n");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Pending", "Overdue", "Total"]);
        table.add_row(vec![krw(ar.pending), krw(ar.overdue), krw(ar.total)]);
        println!("{table}\n");
    }

    println!("== Cash by Country ==");
    let mut table = Table::new();
    table.set_header(vec!["Country", "Balance"]);
    for (country, balance) in &report.cash_by_country {
        table.add_row(vec![country.clone(), krw(*balance)]);
    }
    println!("{table}\n");
}

fn print_alerts(alerts: &[Alert]) {
    println!("== Alerts ==");
    if alerts.is_empty() {
        println!("All clear.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Severity", "Category", "Message"]);
    for alert in alerts {
        let severity = match alert.severity {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
        };
        table.add_row(vec![
            severity.to_string(),
            alert.category.as_str().to_string(),
            alert.message.clone(),
        ]);
    }
    println!("{table}");
}
