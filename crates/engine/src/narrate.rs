// Display strings for analysis results, KPI values and table pages.
// Pure formatting: nothing here recomputes what the recommender produced.

use dashgen_core::{AnalysisResult, ChartSpec, Dataset};
use serde::Serialize;

use crate::table_view::TablePage;

/// Characters of the problem statement shown in the analysis context.
pub const CONTEXT_ECHO_CHARS: usize = 200;

pub const NEXT_STEPS: &[&str] = &[
    "Review the generated dashboard for accuracy and relevance",
    "Download the HTML prototype for offline viewing",
    "Consider adding more specific filters or drill-down capabilities",
    "Share insights with stakeholders for feedback and validation",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub summary: String,
    pub insights: Vec<String>,
    pub components: Vec<String>,
    pub next_steps: Vec<String>,
}

pub fn narrate(result: &AnalysisResult) -> Narrative {
    Narrative {
        summary: result.summary.clone(),
        insights: result.insights.clone(),
        components: result.recommended_charts.iter().map(component_line).collect(),
        next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}

/// `{title} [{TYPE}]: {description} (Columns: a, b)`
pub fn component_line(spec: &ChartSpec) -> String {
    format!(
        "{} [{}]: {} (Columns: {})",
        spec.title,
        spec.chart_type.to_string().to_uppercase(),
        spec.description,
        spec.columns.join(", ")
    )
}

/// Dataset line and echoed statement shown while the analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisContext {
    pub dataset: String,
    pub problem: String,
}

pub fn analysis_context(dataset: &Dataset, problem_statement: &str) -> AnalysisContext {
    let echo: String = problem_statement.chars().take(CONTEXT_ECHO_CHARS).collect();
    AnalysisContext {
        dataset: format!(
            "{} ({} rows, {} columns)",
            dataset.name(),
            dataset.row_count(),
            dataset.column_count()
        ),
        problem: format!("{echo}..."),
    }
}

// ---------------------------------------------------------------------------
// KPI formatting
// ---------------------------------------------------------------------------

/// Currency for price/revenue/cost columns, percent for percentage/rate,
/// otherwise a grouped integer.
pub fn format_kpi_value(value: f64, column: &str) -> String {
    let lower = column.to_lowercase();
    if lower.contains("price") || lower.contains("revenue") || lower.contains("cost") {
        format!("${}", group_thousands(value))
    } else if lower.contains("percentage") || lower.contains("rate") {
        format!("{value:.1}%")
    } else {
        group_thousands(value)
    }
}

/// `+1.5%`, `-2.0%`, `0.0%`
pub fn trend_label(trend: f64) -> String {
    if trend > 0.0 {
        format!("+{trend:.1}%")
    } else {
        format!("{trend:.1}%")
    }
}

fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

// ---------------------------------------------------------------------------
// Table footer
// ---------------------------------------------------------------------------

pub fn entries_label(page: &TablePage<'_>) -> String {
    format!(
        "Showing {} to {} of {} entries",
        page.first_entry, page.last_entry, page.total_filtered
    )
}

pub fn page_label(page: &TablePage<'_>) -> String {
    format!("Page {} of {}", page.current_page, page.total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashgen_core::{ChartType, Row};

    #[test]
    fn component_line_format() {
        let spec = ChartSpec {
            chart_type: ChartType::Bar,
            title: "Performance by Category".into(),
            description: "sales breakdown by region".into(),
            columns: vec!["region".into(), "sales".into()],
        };
        assert_eq!(
            component_line(&spec),
            "Performance by Category [BAR]: sales breakdown by region (Columns: region, sales)"
        );
    }

    #[test]
    fn narrate_carries_result_through() {
        let result = AnalysisResult {
            insights: vec!["one".into()],
            recommended_charts: vec![],
            summary: "s".into(),
        };
        let n = narrate(&result);
        assert_eq!(n.summary, "s");
        assert_eq!(n.insights, vec!["one"]);
        assert!(n.components.is_empty());
        assert_eq!(n.next_steps.len(), 4);
    }

    #[test]
    fn kpi_formats() {
        assert_eq!(format_kpi_value(1234567.4, "Revenue"), "$1,234,567");
        assert_eq!(format_kpi_value(12.345, "conversion_rate"), "12.3%");
        assert_eq!(format_kpi_value(999.6, "units"), "1,000");
        assert_eq!(format_kpi_value(-4321.0, "delta"), "-4,321");
        assert_eq!(format_kpi_value(0.0, "units"), "0");
    }

    #[test]
    fn trend_labels() {
        assert_eq!(trend_label(0.0), "0.0%");
        assert_eq!(trend_label(2.5), "+2.5%");
        assert_eq!(trend_label(-1.0), "-1.0%");
    }

    #[test]
    fn context_truncates_to_two_hundred_chars() {
        let ds = Dataset::new("d.csv", vec!["a".into()], vec![Row::default()]);
        let ctx = analysis_context(&ds, &"x".repeat(300));
        assert_eq!(ctx.dataset, "d.csv (1 rows, 1 columns)");
        assert_eq!(ctx.problem.len(), CONTEXT_ECHO_CHARS + 3);
    }
}
