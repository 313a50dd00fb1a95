use dashgen_core::{AnalysisResult, ChartSpec, ChartType, Dataset};

use crate::profile::ColumnBuckets;

/// Columns bound to the KPI card.
pub const MAX_KPI_COLUMNS: usize = 4;
/// Columns shown in the detailed table.
pub const MAX_TABLE_COLUMNS: usize = 6;
/// Characters of the problem statement echoed in the summary.
pub const SUMMARY_ECHO_CHARS: usize = 100;

/// Build insights, chart specs and a summary for one (dataset, statement) pair.
///
/// Specs are appended in a fixed order: KPI, Line, Bar, Scatter, Table. Each is
/// conditional on the column buckets except Table, which is always present.
/// A dataset without rows short-circuits to [`AnalysisResult::empty`].
pub fn recommend(dataset: &Dataset, problem_statement: &str) -> AnalysisResult {
    if dataset.is_empty() {
        log::debug!("dataset '{}' has no rows, skipping analysis", dataset.name());
        return AnalysisResult::empty();
    }

    let buckets = ColumnBuckets::from_dataset(dataset);
    log::debug!(
        "buckets for '{}': numeric={:?} temporal={:?} categorical={:?}",
        dataset.name(),
        buckets.numeric,
        buckets.temporal,
        buckets.categorical
    );

    let insights = build_insights(dataset, &buckets);
    let recommended_charts = build_chart_specs(dataset, &buckets);
    let summary = build_summary(problem_statement, recommended_charts.len());

    AnalysisResult {
        insights,
        recommended_charts,
        summary,
    }
}

fn build_insights(dataset: &Dataset, buckets: &ColumnBuckets) -> Vec<String> {
    vec![
        format!(
            "Found {} records with {} columns",
            dataset.row_count(),
            dataset.column_count()
        ),
        format!(
            "Identified {} numeric metrics for KPI tracking",
            buckets.numeric.len()
        ),
        format!(
            "Detected {} categorical dimensions for grouping",
            buckets.categorical.len()
        ),
        format!(
            "Found {} date columns for time-series analysis",
            buckets.temporal.len()
        ),
    ]
}

/// Chart specs in priority order.
pub fn build_chart_specs(dataset: &Dataset, buckets: &ColumnBuckets) -> Vec<ChartSpec> {
    let numeric = &buckets.numeric;
    let temporal = &buckets.temporal;
    let categorical = &buckets.categorical;
    let mut charts = Vec::new();

    if !numeric.is_empty() {
        let cols: Vec<String> = numeric.iter().take(MAX_KPI_COLUMNS).cloned().collect();
        charts.push(ChartSpec {
            chart_type: ChartType::Kpi,
            title: "Key Performance Indicators".into(),
            description: format!("Summary metrics from {}", cols.join(", ")),
            columns: cols,
        });
    }

    if let (Some(x), Some(y)) = (temporal.first(), numeric.first()) {
        charts.push(ChartSpec {
            chart_type: ChartType::Line,
            title: "Trend Analysis Over Time".into(),
            description: format!("Time series visualization of {y} over {x}"),
            columns: vec![x.clone(), y.clone()],
        });
    }

    if let (Some(x), Some(y)) = (categorical.first(), numeric.first()) {
        charts.push(ChartSpec {
            chart_type: ChartType::Bar,
            title: "Performance by Category".into(),
            description: format!("{y} breakdown by {x}"),
            columns: vec![x.clone(), y.clone()],
        });
    }

    if numeric.len() >= 2 {
        let (a, b) = (&numeric[0], &numeric[1]);
        charts.push(ChartSpec {
            chart_type: ChartType::Scatter,
            title: "Correlation Analysis".into(),
            description: format!("Relationship between {a} and {b}"),
            columns: vec![a.clone(), b.clone()],
        });
    }

    charts.push(ChartSpec {
        chart_type: ChartType::Table,
        title: "Detailed Data View".into(),
        description: "Searchable and sortable data table".into(),
        columns: dataset.columns().iter().take(MAX_TABLE_COLUMNS).cloned().collect(),
    });

    charts
}

fn build_summary(problem_statement: &str, chart_count: usize) -> String {
    let echo: String = problem_statement.chars().take(SUMMARY_ECHO_CHARS).collect();
    format!(
        "Based on your problem statement about \"{echo}...\", I've identified {chart_count} key \
         visualizations that will help answer your business questions. The dashboard includes \
         KPI tracking, trend analysis, and categorical breakdowns to provide comprehensive \
         insights into your data."
    )
}
