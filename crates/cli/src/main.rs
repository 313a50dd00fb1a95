// dashgen CLI - profile tabular files, recommend charts, browse rows, export HTML

mod exit_codes;
mod util;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use dashgen_config::{ConfigError, Settings};
use dashgen_core::value::format_number;
use dashgen_core::{AnalysisResult, ChartSpec, Dataset};
use dashgen_engine::narrate::{
    analysis_context, entries_label, format_kpi_value, narrate, page_label, trend_label,
};
use dashgen_engine::stages::{run_stages, Silent, StageObserver, ANALYSIS_STAGES};
use dashgen_engine::{profile, transform, ChartData, TableEvent, TableView, TableViewState};
use dashgen_io::IoError;

use exit_codes::{config_exit_code, io_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

/// Points listed per chart in the text report.
const PREVIEW_POINTS: usize = 5;

#[derive(Parser)]
#[command(name = "dashgen")]
#[command(about = "Profile CSV/JSON data and recommend dashboard charts")]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/dashgen/settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

const ANALYZE_HELP: &str = "\
Examples:
  dashgen analyze sales.csv --problem 'Why did revenue drop in Q3?'
  dashgen analyze sales.csv -p 'regional sales' --json -o report.json
  dashgen analyze sales.csv -p 'regional sales' --quiet

Problem statements to start from:
  I want to understand our sales performance across different regions and
    identify which products are driving the most revenue.
  Help me analyze customer behavior patterns to identify our most valuable
    customer segments and their purchasing trends.
  I need to track key performance indicators for our marketing campaigns and
    see which channels are most effective.
  Show me operational metrics that help identify bottlenecks in our supply
    chain and delivery performance.";

const EXPORT_HELP: &str = "\
Examples:
  dashgen export sales.csv --problem 'regional sales'
  dashgen export sales.csv -p 'regional sales' -o dashboard.html

Problem statements to start from:
  I want to understand our sales performance across different regions and
    identify which products are driving the most revenue.
  Help me analyze customer behavior patterns to identify our most valuable
    customer segments and their purchasing trends.
  I need to track key performance indicators for our marketing campaigns and
    see which channels are most effective.
  Show me operational metrics that help identify bottlenecks in our supply
    chain and delivery performance.";

#[derive(Subcommand)]
enum Commands {
    /// Classify every column as numeric, temporal or categorical
    #[command(after_help = "\
Examples:
  dashgen profile sales.csv
  dashgen profile orders.json --json")]
    Profile {
        /// Input file (.csv or .json)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recommend charts for a problem statement and prepare their data
    #[command(after_help = ANALYZE_HELP)]
    Analyze {
        /// Input file (.csv or .json)
        file: PathBuf,

        /// Business question the dashboard should answer
        #[arg(long, short = 'p')]
        problem: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Suppress stage progress on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Search, sort and page through rows
    #[command(after_help = "\
Examples:
  dashgen table sales.csv
  dashgen table sales.csv --columns region,sales --sort sales --page 2
  dashgen table sales.csv --search east --sort sales --sort sales   (descending)")]
    Table {
        /// Input file (.csv or .json)
        file: PathBuf,

        /// Columns to show and search (default: all)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Case-insensitive substring filter
        #[arg(long)]
        search: Option<String>,

        /// Sort by column; repeating the same column flips the direction
        #[arg(long = "sort")]
        sort: Vec<String>,

        /// Page to show (1-based, clamped into range)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a standalone HTML dashboard for a problem statement
    #[command(after_help = EXPORT_HELP)]
    Export {
        /// Input file (.csv or .json)
        file: PathBuf,

        /// Business question the dashboard should answer
        #[arg(long, short = 'p')]
        problem: String,

        /// Output path (default: export.fileName from settings)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();

    let result = load_settings(cli.settings.as_deref()).and_then(|settings| match cli.command {
        Commands::Profile { file, json } => cmd_profile(&settings, &file, json),
        Commands::Analyze {
            file,
            problem,
            json,
            output,
            quiet,
        } => cmd_analyze(&settings, &file, &problem, json, output.as_deref(), quiet),
        Commands::Table {
            file,
            columns,
            search,
            sort,
            page,
            json,
        } => cmd_table(&settings, &file, columns, search, sort, page, json),
        Commands::Export {
            file,
            problem,
            output,
        } => cmd_export(&settings, &file, &problem, output),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Prefix the message with the file it concerns.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.message = format!("{}: {}", path.display(), self.message);
        self
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        let hint = match &err {
            IoError::UnsupportedFormat(_) => Some("use a .csv or .json file".to_string()),
            IoError::Empty => Some("the first line must hold the column names".to_string()),
            _ => None,
        };
        Self { code: io_exit_code(&err), message: err.to_string(), hint }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self { code: config_exit_code(&err), message: err.to_string(), hint: None }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(path) => Settings::load_from(path).map_err(|e| {
            CliError::from(e).with_hint(format!("check {}", path.display()))
        }),
        None => Ok(Settings::load()),
    }
}

fn load_dataset(settings: &Settings, file: &Path) -> Result<Dataset, CliError> {
    let dataset = dashgen_io::load(file, settings.max_rows)
        .map_err(|e| CliError::from(e).with_path(file))?;
    log::info!(
        "loaded {} ({} rows, {} columns)",
        dataset.name(),
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

fn require_problem(problem: &str) -> Result<&str, CliError> {
    let trimmed = problem.trim();
    if trimmed.is_empty() {
        return Err(CliError::args("problem statement is empty")
            .with_hint("describe the question, e.g. --problem 'Which region sells most?'"));
    }
    Ok(trimmed)
}

fn check_column(dataset: &Dataset, column: &str) -> Result<(), CliError> {
    if dataset.columns().iter().any(|c| c == column) {
        return Ok(());
    }
    Err(CliError::args(format!("unknown column '{column}'"))
        .with_hint(format!("available columns: {}", dataset.columns().join(", "))))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::general(format!("failed to serialize output: {e}")))
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .and_then(|_| handle.flush())
        .map_err(|e| CliError::from(IoError::from(e)))
}

// ============================================================================
// profile
// ============================================================================

fn cmd_profile(settings: &Settings, file: &Path, json: bool) -> Result<(), CliError> {
    let dataset = load_dataset(settings, file)?;
    let profiles = profile(&dataset);

    if json {
        return write_stdout(&format!("{}\n", to_json(&profiles)?));
    }

    let rows: Vec<Vec<String>> = profiles
        .iter()
        .map(|p| vec![p.name.clone(), p.kind.to_string()])
        .collect();
    let widths = util::column_widths(&["column", "kind"], &rows);

    let header = util::format_row(&["column".to_string(), "kind".to_string()], &widths);
    let lines: Vec<String> = std::iter::once(header)
        .chain(rows.iter().map(|row| util::format_row(row, &widths)))
        .collect();
    write_stdout(&format!("{}\n", lines.join("\n")))
}

// ============================================================================
// analyze
// ============================================================================

/// Prints `[n/5] stage` lines to stderr.
struct StderrProgress;

impl StageObserver for StderrProgress {
    fn stage_completed(&mut self, index: usize, name: &str) {
        eprintln!("[{}/{}] {}", index + 1, ANALYSIS_STAGES.len(), name);
    }
}

#[derive(Serialize)]
struct ChartReport<'a> {
    spec: &'a ChartSpec,
    data: ChartData<'a>,
}

#[derive(Serialize)]
struct AnalyzeReport<'a> {
    result: &'a AnalysisResult,
    charts: Vec<ChartReport<'a>>,
}

fn cmd_analyze(
    settings: &Settings,
    file: &Path,
    problem: &str,
    json: bool,
    output: Option<&Path>,
    quiet: bool,
) -> Result<(), CliError> {
    let problem = require_problem(problem)?;
    let dataset = load_dataset(settings, file)?;

    let result = if quiet {
        run_stages(&dataset, problem, settings.step_delay(), &mut Silent)
    } else {
        let context = analysis_context(&dataset, problem);
        eprintln!("Dataset: {}", context.dataset);
        eprintln!("Problem: {}", context.problem);
        run_stages(&dataset, problem, settings.step_delay(), &mut StderrProgress)
    };

    let charts: Vec<ChartReport<'_>> = result
        .recommended_charts
        .iter()
        .map(|spec| ChartReport { spec, data: transform(dataset.rows(), spec) })
        .collect();

    let text = if json {
        let report = AnalyzeReport { result: &result, charts };
        format!("{}\n", to_json(&report)?)
    } else {
        render_report(&result, &charts)
    };

    match output {
        Some(path) => {
            std::fs::write(path, text).map_err(|e| CliError::from(IoError::from(e)))?;
            if !quiet {
                eprintln!("wrote {}", path.display());
            }
            Ok(())
        }
        None => write_stdout(&text),
    }
}

fn render_report(result: &AnalysisResult, charts: &[ChartReport<'_>]) -> String {
    if result.is_empty() {
        return "No rows to analyze.\n".to_string();
    }

    let narrative = narrate(result);
    let mut lines = vec!["Summary".to_string(), format!("  {}", narrative.summary), String::new()];

    lines.push("Insights".to_string());
    lines.extend(narrative.insights.iter().map(|insight| format!("  - {insight}")));

    lines.push(String::new());
    lines.push("Dashboard Components".to_string());
    for (line, chart) in narrative.components.iter().zip(charts) {
        lines.push(format!("  - {line}"));
        lines.extend(chart_data_lines(&chart.data));
    }

    lines.push(String::new());
    lines.push("Next Steps".to_string());
    lines.extend(narrative.next_steps.iter().map(|step| format!("  - {step}")));

    format!("{}\n", lines.join("\n"))
}

fn chart_data_lines(data: &ChartData<'_>) -> Vec<String> {
    match data {
        ChartData::Kpi(values) => values
            .iter()
            .map(|kpi| {
                format!(
                    "      {}: {} ({})",
                    kpi.column,
                    format_kpi_value(kpi.value, &kpi.column),
                    trend_label(kpi.trend)
                )
            })
            .collect(),
        ChartData::Line(points) => std::iter::once(format!("      {} points", points.len()))
            .chain(
                points
                    .iter()
                    .take(PREVIEW_POINTS)
                    .map(|p| format!("      {} -> {}", p.x.display_string(), format_number(p.y))),
            )
            .collect(),
        ChartData::Bar(groups) => {
            let mut lines: Vec<String> = groups
                .iter()
                .take(PREVIEW_POINTS)
                .map(|g| format!("      {}: {}", g.label, format_number(g.total)))
                .collect();
            if groups.len() > PREVIEW_POINTS {
                lines.push(format!("      ... {} more", groups.len() - PREVIEW_POINTS));
            }
            lines
        }
        ChartData::Scatter(points) => vec![format!("      {} points", points.len())],
        ChartData::Table(rows) => vec![format!("      {} rows", rows.len())],
    }
}

// ============================================================================
// table
// ============================================================================

fn cmd_table(
    settings: &Settings,
    file: &Path,
    columns: Vec<String>,
    search: Option<String>,
    sort: Vec<String>,
    page: usize,
    json: bool,
) -> Result<(), CliError> {
    let dataset = load_dataset(settings, file)?;

    for column in columns.iter().chain(&sort) {
        check_column(&dataset, column)?;
    }
    let columns = if columns.is_empty() {
        dataset.columns().to_vec()
    } else {
        columns
    };

    let view = TableView::new(dataset.rows(), &columns);
    let mut state = TableViewState::default();
    for column in sort {
        state = view.update(state, TableEvent::SortBy(column));
    }
    if let Some(term) = search {
        state = view.update(state, TableEvent::Search(term));
    }
    state = view.update(state, TableEvent::GoToPage(page));

    let rendered = view.render(&state);

    if json {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = rendered
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| {
                        let value = serde_json::to_value(row.get(c)).unwrap_or_default();
                        (c.clone(), value)
                    })
                    .collect()
            })
            .collect();
        let body = serde_json::json!({
            "columns": &columns,
            "state": &state,
            "rows": rows,
            "total_filtered": rendered.total_filtered,
            "total_pages": rendered.total_pages,
            "current_page": rendered.current_page,
            "first_entry": rendered.first_entry,
            "last_entry": rendered.last_entry,
        });
        return write_stdout(&format!("{}\n", to_json(&body)?));
    }

    let headers: Vec<&str> = columns.iter().map(String::as_str).collect();
    let cells: Vec<Vec<String>> = rendered
        .rows
        .iter()
        .map(|row| columns.iter().map(|c| row.get(c).display_string()).collect())
        .collect();
    let widths = util::column_widths(&headers, &cells);

    let mut lines = vec![util::format_row(&columns, &widths)];
    lines.extend(cells.iter().map(|row| util::format_row(row, &widths)));
    if cells.is_empty() {
        lines.push("(no matching rows)".to_string());
    }
    lines.push(String::new());
    lines.push(format!("{}  |  {}", entries_label(&rendered), page_label(&rendered)));
    write_stdout(&format!("{}\n", lines.join("\n")))
}

// ============================================================================
// export
// ============================================================================

fn cmd_export(
    settings: &Settings,
    file: &Path,
    problem: &str,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let problem = require_problem(problem)?;
    let dataset = load_dataset(settings, file)?;
    let result = run_stages(&dataset, problem, settings.step_delay(), &mut Silent);

    let path = output.unwrap_or_else(|| PathBuf::from(&settings.export_file_name));
    dashgen_io::export(&path, dataset.name(), problem, &result)
        .map_err(|e| CliError::from(e).with_path(&path))?;

    eprintln!("wrote {}", path.display());
    Ok(())
}
