use serde::Serialize;

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Temporal,
    Categorical,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Temporal => write!(f, "temporal"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
}

// ---------------------------------------------------------------------------
// Chart specs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Kpi,
    Line,
    Bar,
    Scatter,
    Table,
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kpi => write!(f, "kpi"),
            Self::Line => write!(f, "line"),
            Self::Bar => write!(f, "bar"),
            Self::Scatter => write!(f, "scatter"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// Declarative description of one recommended visualization.
///
/// Column bindings by type:
/// - `Kpi`: up to 4 numeric columns
/// - `Line`: `[x (temporal), y (numeric)]`
/// - `Bar`: `[category, value]`
/// - `Scatter`: `[x, y]`, both numeric
/// - `Table`: up to 6 display columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub description: String,
    pub columns: Vec<String>,
}

impl ChartSpec {
    /// Bound column at `index`, if the spec has one.
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }
}

/// Output of one analysis run over a (dataset, problem statement) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub insights: Vec<String>,
    pub recommended_charts: Vec<ChartSpec>,
    pub summary: String,
}

impl AnalysisResult {
    /// The result for a dataset with no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty() && self.recommended_charts.is_empty() && self.summary.is_empty()
    }
}
