//! ContextGuard CLI: command-line views over the misinformation tracking pipeline
//!
//! Loads the posts and edges tables once, applies the filter flags and prints
//! the requested view as a table, JSON or CSV.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use contextguard::alerts::{HOSPITAL_ALERTS, THREAT_ALERTS};
use contextguard::metrics::truncate_label;
use contextguard::records::table::escape_field;
use contextguard::{
    counts_by_key, edges_to_csv, engagement, export_file_name, posts_to_csv, recovery_queue,
    score_histogram, search_content, sort_for_display, timeline, top_by_field, top_topics,
    CountKey, Dashboard, DashboardView, ExportKind, FilterCriteria, GraphScope, GuardConfig,
    RankField, SortKey,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Content column width in table output
const CONTENT_WIDTH: usize = 60;

#[derive(Parser)]
#[command(name = "contextguard", version, about = "Healthcare misinformation tracking pipeline")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the posts and edges tables
    #[arg(long, global = true, env = "CONTEXTGUARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Platforms to include (default: all)
    #[arg(long, global = true, value_delimiter = ',')]
    platform: Vec<String>,

    /// Categories to include (default: all)
    #[arg(long, global = true, value_delimiter = ',')]
    category: Vec<String>,

    /// Minimum misinformation score
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,

    /// Which edges feed the sharing graph
    #[arg(long, global = true)]
    edge_scope: Option<EdgeScope>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum EdgeScope {
    Full,
    WorkingSet,
}

impl From<EdgeScope> for GraphScope {
    fn from(scope: EdgeScope) -> Self {
        match scope {
            EdgeScope::Full => GraphScope::Full,
            EdgeScope::WorkingSet => GraphScope::WorkingSet,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SortArg {
    Timestamp,
    Score,
    Shares,
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Timestamp => SortKey::Timestamp,
            SortArg::Score => SortKey::MisinfoScore,
            SortArg::Shares => SortKey::Shares,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FieldArg {
    Score,
    Shares,
    Likes,
    Comments,
}

impl From<FieldArg> for RankField {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Score => RankField::MisinfoScore,
            FieldArg::Shares => RankField::Shares,
            FieldArg::Likes => RankField::Likes,
            FieldArg::Comments => RankField::Comments,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ExportArg {
    Posts,
    Edges,
    Report,
}

impl From<ExportArg> for ExportKind {
    fn from(kind: ExportArg) -> Self {
        match kind {
            ExportArg::Posts => ExportKind::Posts,
            ExportArg::Edges => ExportKind::Edges,
            ExportArg::Report => ExportKind::Report,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Overview metrics with platform, category and status breakdowns
    Overview,
    /// Posts per calendar day
    Timeline,
    /// Misinformation score distribution
    Histogram {
        /// Number of bins
        #[arg(long)]
        bins: Option<usize>,
    },
    /// List filtered posts
    Posts {
        /// Case-insensitive content search
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "timestamp")]
        sort: SortArg,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// Posts with the largest value of a field
    Top {
        #[arg(long, default_value = "shares")]
        field: FieldArg,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Most repeated misinformation topics
    Topics {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Engagement of the most shared posts
    Engagement {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Unarchived posts awaiting recovery
    Recovery {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Best-connected users of the sharing graph
    Spreaders {
        #[arg(long)]
        limit: Option<usize>,

        /// Only analyze users with at least this many connections
        #[arg(long, default_value_t = 0)]
        min_connections: usize,
    },
    /// Export posts, edges or the summary report
    Export {
        kind: ExportArg,

        /// Output file, or a directory to receive a timestamped file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Schema violations found while loading
    Violations,
    /// Current threat alerts and hospital preparedness
    Alerts,
}

/// Column names plus one JSON value per cell
struct Rows {
    columns: Vec<&'static str>,
    records: Vec<Vec<Value>>,
}

impl Rows {
    fn new(columns: Vec<&'static str>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<Value>) {
        self.records.push(row);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Static content needs no data
    if let Commands::Alerts = cli.command {
        return run_alerts(&cli.format);
    }

    let config = load_config(cli)?;
    let dashboard = Dashboard::open(config)?;
    let view = dashboard.view(criteria(cli, &dashboard));
    let config = dashboard.config();
    let format = &cli.format;

    match &cli.command {
        Commands::Overview => run_overview(&view, format),
        Commands::Timeline => run_timeline(&view, format),
        Commands::Histogram { bins } => {
            run_histogram(&view, bins.unwrap_or(config.histogram_bins), format)
        }
        Commands::Posts { search, sort, limit } => run_posts(
            &view,
            search.as_deref(),
            *sort,
            limit.unwrap_or(config.post_page_size),
            format,
        ),
        Commands::Top { field, limit } => run_top(&view, *field, *limit, format),
        Commands::Topics { limit } => {
            run_topics(&view, limit.unwrap_or(config.topic_count), format)
        }
        Commands::Engagement { limit } => {
            run_engagement(&view, limit.unwrap_or(config.engagement_count), format)
        }
        Commands::Recovery { limit } => {
            run_recovery(&view, limit.unwrap_or(config.recovery_queue_size), format)
        }
        Commands::Spreaders { limit, min_connections } => run_spreaders(
            &view,
            limit.unwrap_or(config.spreader_limit),
            *min_connections,
            format,
        ),
        Commands::Export { kind, out } => {
            run_export(&dashboard, &view, (*kind).into(), out.as_ref())
        }
        Commands::Violations => run_violations(&dashboard, format),
        Commands::Alerts => run_alerts(format),
    }
}

/// Config file (if any), then flag and environment overrides
fn load_config(cli: &Cli) -> Result<GuardConfig> {
    let mut config = match &cli.config {
        Some(path) => GuardConfig::from_file(path)?,
        None => GuardConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(scope) = cli.edge_scope {
        config.graph_scope = scope.into();
    }
    Ok(config)
}

/// Dashboard defaults narrowed by the filter flags
fn criteria(cli: &Cli, dashboard: &Dashboard) -> FilterCriteria {
    let mut criteria = dashboard.default_criteria();
    if !cli.platform.is_empty() {
        criteria.platforms = cli.platform.iter().cloned().collect();
    }
    if !cli.category.is_empty() {
        criteria.categories = cli.category.iter().cloned().collect();
    }
    if let Some(min_score) = cli.min_score {
        criteria.min_score = min_score;
    }
    criteria
}

fn run_overview(view: &DashboardView<'_>, format: &OutputFormat) -> Result<()> {
    let ws = &view.working_set;
    let breakdowns = [
        (CountKey::Platform, counts_by_key(ws, CountKey::Platform)),
        (CountKey::Category, counts_by_key(ws, CountKey::Category)),
        (CountKey::Status, counts_by_key(ws, CountKey::Status)),
    ];

    if let OutputFormat::Json = format {
        let mut doc = json!({ "overview": view.overview });
        for (key, counts) in &breakdowns {
            doc[key.column()] = serde_json::to_value(counts)?;
        }
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let o = &view.overview;
    let mut rows = Rows::new(vec!["metric", "value"]);
    rows.push(vec![json!("total_posts"), json!(o.total_posts)]);
    rows.push(vec![json!("high_risk_posts"), json!(o.high_risk_posts)]);
    rows.push(vec![json!("archived_posts"), json!(o.archived_posts)]);
    rows.push(vec![json!("active_spreaders"), json!(o.active_spreaders)]);
    print_rows(&rows, format);

    for (key, counts) in &breakdowns {
        println!();
        let mut rows = Rows::new(vec![key.column(), "count"]);
        for c in counts {
            rows.push(vec![json!(c.key), json!(c.count)]);
        }
        print_rows(&rows, format);
    }
    Ok(())
}

fn run_timeline(view: &DashboardView<'_>, format: &OutputFormat) -> Result<()> {
    let days = timeline(&view.working_set);
    let mut rows = Rows::new(vec!["date", "posts"]);
    for day in &days {
        rows.push(vec![json!(day.date.to_string()), json!(day.posts)]);
    }
    emit(format, &days, &rows)
}

fn run_histogram(view: &DashboardView<'_>, bins: usize, format: &OutputFormat) -> Result<()> {
    let histogram = score_histogram(&view.working_set, bins);
    let mut rows = Rows::new(vec!["lower", "upper", "count"]);
    for bin in &histogram {
        rows.push(vec![
            json!(format!("{:.1}", bin.lower)),
            json!(format!("{:.1}", bin.upper)),
            json!(bin.count),
        ]);
    }
    emit(format, &histogram, &rows)
}

fn run_posts(
    view: &DashboardView<'_>,
    search: Option<&str>,
    sort: SortArg,
    limit: usize,
    format: &OutputFormat,
) -> Result<()> {
    let matched = search_content(&view.working_set, search);
    let sorted = sort_for_display(&matched, sort.into());
    let posts: Vec<_> = sorted.iter().take(limit).collect();

    let mut rows = Rows::new(vec![
        "post_id",
        "timestamp",
        "platform",
        "category",
        "misinfo_score",
        "shares",
        "status",
        "content",
    ]);
    for p in &posts {
        rows.push(vec![
            json!(p.post_id),
            json!(p.timestamp.format(contextguard::records::TIMESTAMP_FORMAT).to_string()),
            json!(p.platform),
            json!(p.category),
            json!(p.misinfo_score),
            json!(p.shares),
            json!(p.status),
            json!(content_cell(&p.content, format)),
        ]);
    }
    emit(format, &posts, &rows)?;

    if let OutputFormat::Table = format {
        if sorted.len() > posts.len() {
            println!("showing {} of {} matching posts", posts.len(), sorted.len());
        }
    }
    Ok(())
}

fn run_top(
    view: &DashboardView<'_>,
    field: FieldArg,
    limit: usize,
    format: &OutputFormat,
) -> Result<()> {
    let field: RankField = field.into();
    let posts = top_by_field(&view.working_set, field, limit);

    let mut rows = Rows::new(vec!["post_id", "user_id", field.column(), "content"]);
    for p in &posts {
        rows.push(vec![
            json!(p.post_id),
            json!(p.user_id),
            json!(field.value(p)),
            json!(content_cell(&p.content, format)),
        ]);
    }
    emit(format, &posts, &rows)
}

fn run_topics(view: &DashboardView<'_>, limit: usize, format: &OutputFormat) -> Result<()> {
    let topics = top_topics(&view.working_set, limit);
    let mut rows = Rows::new(vec!["topic", "count"]);
    for t in &topics {
        rows.push(vec![json!(content_cell(&t.key, format)), json!(t.count)]);
    }
    emit(format, &topics, &rows)
}

fn run_engagement(view: &DashboardView<'_>, limit: usize, format: &OutputFormat) -> Result<()> {
    let engaged = engagement(&view.working_set, limit);
    let mut rows = Rows::new(vec!["post_id", "shares", "likes", "comments", "content"]);
    for e in &engaged {
        rows.push(vec![
            json!(e.post_id),
            json!(e.shares),
            json!(e.likes),
            json!(e.comments),
            json!(content_cell(&e.content, format)),
        ]);
    }
    emit(format, &engaged, &rows)
}

fn run_recovery(view: &DashboardView<'_>, limit: usize, format: &OutputFormat) -> Result<()> {
    let queue = recovery_queue(&view.working_set, limit);
    let mut rows = Rows::new(vec!["post_id", "platform", "misinfo_score", "status", "content"]);
    for p in &queue {
        rows.push(vec![
            json!(p.post_id),
            json!(p.platform),
            json!(p.misinfo_score),
            json!(p.status),
            json!(content_cell(&p.content, format)),
        ]);
    }
    emit(format, &queue, &rows)
}

fn run_spreaders(
    view: &DashboardView<'_>,
    limit: usize,
    min_connections: usize,
    format: &OutputFormat,
) -> Result<()> {
    let restricted;
    let graph = if min_connections > 0 {
        restricted = view.graph.restrict(min_connections);
        &restricted
    } else {
        &view.graph
    };

    let spreaders = graph.top_spreaders(limit);
    let mut rows = Rows::new(vec!["user_id", "connections", "centrality", "risk_level"]);
    for s in &spreaders {
        rows.push(vec![
            json!(s.user_id),
            json!(s.connections),
            json!(format!("{:.3}", s.centrality)),
            json!(s.risk.as_str()),
        ]);
    }
    emit(format, &spreaders, &rows)?;

    if let OutputFormat::Table = format {
        println!("graph: {} users, {} connections", graph.node_count(), graph.edge_count());
    }
    Ok(())
}

fn run_export(
    dashboard: &Dashboard,
    view: &DashboardView<'_>,
    kind: ExportKind,
    out: Option<&PathBuf>,
) -> Result<()> {
    let now = Local::now().naive_local();
    let text = match kind {
        ExportKind::Posts => posts_to_csv(&view.working_set),
        ExportKind::Edges => {
            let edges = dashboard.store().edges();
            match dashboard.config().graph_scope {
                GraphScope::Full => edges_to_csv(edges),
                GraphScope::WorkingSet => {
                    let users = view.working_set.user_set();
                    edges_to_csv(edges.iter().filter(|e| {
                        users.contains(e.source.as_str()) || users.contains(e.target.as_str())
                    }))
                }
            }
        }
        ExportKind::Report => view.summary_report(dashboard.config(), now),
    };

    match out {
        None => print!("{}", text),
        Some(path) => {
            let path = if path.is_dir() {
                path.join(export_file_name(kind, now))
            } else {
                path.clone()
            };
            std::fs::write(&path, text)
                .with_context(|| format!("writing export to {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn run_violations(dashboard: &Dashboard, format: &OutputFormat) -> Result<()> {
    let report = dashboard.store().report();
    let mut rows = Rows::new(vec!["table", "line", "problem", "row"]);
    for v in &report.violations {
        rows.push(vec![
            json!(v.table.to_string()),
            json!(v.line),
            json!(v.kind.to_string()),
            json!(if v.dropped { "dropped" } else { "kept" }),
        ]);
    }
    emit(format, &report.violations, &rows)
}

fn run_alerts(format: &OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        let doc = json!({ "threats": THREAT_ALERTS, "hospitals": HOSPITAL_ALERTS });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let mut threats = Rows::new(vec!["severity", "message"]);
    for a in THREAT_ALERTS {
        threats.push(vec![json!(a.severity.to_string()), json!(a.message)]);
    }
    print_rows(&threats, format);
    println!();

    let mut hospitals = Rows::new(vec![
        "hospital",
        "alert_level",
        "affected_posts",
        "primary_threat",
        "estimated_impact",
        "recommended_action",
    ]);
    for h in HOSPITAL_ALERTS {
        hospitals.push(vec![
            json!(h.hospital),
            json!(h.level.to_string()),
            json!(h.affected_posts),
            json!(h.primary_threat),
            json!(h.estimated_impact),
            json!(h.recommended_action),
        ]);
    }
    print_rows(&hospitals, format);
    Ok(())
}

fn content_cell(content: &str, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Table => truncate_label(content, CONTENT_WIDTH),
        _ => content.to_string(),
    }
}

/// JSON output serializes `data` itself; the other formats render `rows`
fn emit<T: Serialize + ?Sized>(format: &OutputFormat, data: &T, rows: &Rows) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        _ => print_rows(rows, format),
    }
    Ok(())
}

/// Table or CSV rendering of `rows`
fn print_rows(rows: &Rows, format: &OutputFormat) {
    match format {
        OutputFormat::Csv => {
            println!("{}", rows.columns.join(","));
            for row in &rows.records {
                let cells: Vec<String> = row.iter().map(csv_cell).collect();
                println!("{}", cells.join(","));
            }
        }
        _ => {
            if rows.records.is_empty() {
                println!("(no results)");
                return;
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&rows.columns);

            for row in &rows.records {
                let cells: Vec<String> = row.iter().map(cell_text).collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s)", rows.records.len());
        }
    }
}

/// Plain text of a cell, as shown in table output
fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        _ => v.to_string(),
    }
}

/// Cell text with the same quoting as the library's CSV exports
fn csv_cell(v: &Value) -> String {
    escape_field(&cell_text(v)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_cells_follow_export_quoting() {
        assert_eq!(csv_cell(&json!("plain")), "plain");
        assert_eq!(csv_cell(&json!("a, b")), "\"a, b\"");
        assert_eq!(csv_cell(&json!("say \"hi\"")), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_cell(&json!("line\r\nbreak")), "\"line\r\nbreak\"");
        assert_eq!(csv_cell(&json!(42)), "42");
        assert_eq!(csv_cell(&Value::Null), "");
    }

    #[test]
    fn test_table_cells() {
        assert_eq!(cell_text(&json!("Reddit")), "Reddit");
        assert_eq!(cell_text(&json!(0.5)), "0.5");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&Value::Null), "");
    }
}
