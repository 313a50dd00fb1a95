//! Chart-ready data shapes.
//!
//! One pure transform per chart type. None of them fail: values that do not
//! parse are either coerced to zero (Line and Bar aggregation) or excluded
//! (Scatter inclusion, KPI averaging). The two policies are kept apart on
//! purpose and must not be merged.

use std::collections::HashMap;

use dashgen_core::{ChartSpec, ChartType, RawValue, Row};
use serde::Serialize;

/// Points kept for a trend line.
pub const MAX_TREND_POINTS: usize = 50;
/// Groups kept for a bar chart.
pub const MAX_BAR_GROUPS: usize = 15;
/// Pairs kept for a scatter plot.
pub const MAX_SCATTER_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiValue {
    pub column: String,
    pub value: f64,
    pub aggregation: Aggregation,
    /// Cosmetic placeholder. Always neutral; carries no delta-over-time meaning.
    pub trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub x: RawValue,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroup {
    pub label: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Data for one chart spec. `Table` borrows the input rows unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChartData<'a> {
    Kpi(Vec<KpiValue>),
    Line(Vec<TrendPoint>),
    Bar(Vec<BarGroup>),
    Scatter(Vec<ScatterPoint>),
    Table(&'a [Row]),
}

impl ChartData<'_> {
    pub fn len(&self) -> usize {
        match self {
            ChartData::Kpi(v) => v.len(),
            ChartData::Line(v) => v.len(),
            ChartData::Bar(v) => v.len(),
            ChartData::Scatter(v) => v.len(),
            ChartData::Table(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Produce the data shape `spec` needs from `rows`.
///
/// A spec with fewer bound columns than its type needs yields an empty series.
pub fn transform<'a>(rows: &'a [Row], spec: &ChartSpec) -> ChartData<'a> {
    match spec.chart_type {
        ChartType::Kpi => ChartData::Kpi(kpi_values(rows, &spec.columns)),
        ChartType::Line => ChartData::Line(match (spec.column(0), spec.column(1)) {
            (Some(x), Some(y)) => trend_points(rows, x, y),
            _ => Vec::new(),
        }),
        ChartType::Bar => ChartData::Bar(match (spec.column(0), spec.column(1)) {
            (Some(x), Some(y)) => bar_groups(rows, x, y),
            _ => Vec::new(),
        }),
        ChartType::Scatter => ChartData::Scatter(match (spec.column(0), spec.column(1)) {
            (Some(x), Some(y)) => scatter_points(rows, x, y),
            _ => Vec::new(),
        }),
        ChartType::Table => ChartData::Table(rows),
    }
}

// ---------------------------------------------------------------------------
// Per-type transforms
// ---------------------------------------------------------------------------

/// Sum for count/quantity columns, mean otherwise. Zero when nothing parses.
pub fn kpi_values(rows: &[Row], columns: &[String]) -> Vec<KpiValue> {
    columns
        .iter()
        .map(|column| {
            let values: Vec<f64> = rows.iter().filter_map(|r| r.get(column).as_number()).collect();
            let aggregation = aggregation_for(column);
            let value = if values.is_empty() {
                0.0
            } else {
                let sum: f64 = values.iter().sum();
                match aggregation {
                    Aggregation::Sum => sum,
                    Aggregation::Mean => sum / values.len() as f64,
                }
            };
            KpiValue {
                column: column.clone(),
                value,
                aggregation,
                trend: 0.0,
            }
        })
        .collect()
}

fn aggregation_for(column: &str) -> Aggregation {
    let lower = column.to_lowercase();
    if lower.contains("count") || lower.contains("quantity") {
        Aggregation::Sum
    } else {
        Aggregation::Mean
    }
}

/// Rows with a truthy x and a present y, y coerced (fallback 0), first 50 in row order.
pub fn trend_points(rows: &[Row], x: &str, y: &str) -> Vec<TrendPoint> {
    rows.iter()
        .filter(|r| r.get(x).is_truthy() && r.contains(y))
        .take(MAX_TREND_POINTS)
        .map(|r| TrendPoint {
            x: r.get(x).clone(),
            y: r.get(y).as_number_or_zero(),
        })
        .collect()
}

/// Group by the x display string, sum y (fallback 0), top 15 by total.
///
/// Groups start in first-seen order and the sort is stable, so equal totals
/// keep that order.
pub fn bar_groups(rows: &[Row], x: &str, y: &str) -> Vec<BarGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<BarGroup> = Vec::new();

    for row in rows {
        let label = row.get(x).display_string();
        let value = row.get(y).as_number_or_zero();
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            groups.push(BarGroup {
                label,
                total: 0.0,
                count: 0,
            });
            groups.len() - 1
        });
        groups[slot].total += value;
        groups[slot].count += 1;
    }

    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
    groups.truncate(MAX_BAR_GROUPS);
    groups
}

/// Rows where both x and y are numeric, first 200 in row order. No zero fallback.
pub fn scatter_points(rows: &[Row], x: &str, y: &str) -> Vec<ScatterPoint> {
    rows.iter()
        .filter_map(|r| {
            let x = r.get(x).as_number()?;
            let y = r.get(y).as_number()?;
            Some(ScatterPoint { x, y })
        })
        .take(MAX_SCATTER_POINTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(columns: &[&str], values: &[&[&str]]) -> Vec<Row> {
        values
            .iter()
            .map(|vals| columns.iter().zip(vals.iter()).map(|(c, v)| (*c, *v)).collect())
            .collect()
    }

    fn spec(chart_type: ChartType, columns: &[&str]) -> ChartSpec {
        ChartSpec {
            chart_type,
            title: String::new(),
            description: String::new(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn kpi_mean_vs_sum() {
        let data = rows(
            &["price", "Item Count"],
            &[&["10", "2"], &["20", "3"], &["", "x"]],
        );
        let kpis = kpi_values(&data, &["price".into(), "Item Count".into()]);
        assert_eq!(kpis[0].aggregation, Aggregation::Mean);
        assert_eq!(kpis[0].value, 15.0);
        assert_eq!(kpis[1].aggregation, Aggregation::Sum);
        assert_eq!(kpis[1].value, 5.0);
        assert_eq!(kpis[1].trend, 0.0);
    }

    #[test]
    fn kpi_without_numbers_is_zero() {
        let data = rows(&["quantity"], &[&["a"], &[""]]);
        let kpis = kpi_values(&data, &["quantity".into()]);
        assert_eq!(kpis[0].value, 0.0);
    }

    #[test]
    fn trend_skips_empty_x_and_coerces_y() {
        let data = rows(
            &["date", "sales"],
            &[&["2024-01-01", "5"], &["", "7"], &["2024-01-03", "oops"], &["0", "1"]],
        );
        let points = trend_points(&data, "date", "sales");
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].y, 5.0);
        assert_eq!(points[1].x, RawValue::from("2024-01-03"));
        assert_eq!(points[1].y, 0.0);
        // Zero-looking text is still a non-empty cell
        assert_eq!(points[2].x, RawValue::from("0"));
    }

    #[test]
    fn trend_skips_native_zero_x() {
        let data: Vec<Row> = vec![
            [("d", RawValue::Number(0.0)), ("y", RawValue::from("5"))].into_iter().collect(),
            [("d", RawValue::from("0")), ("y", RawValue::from("5"))].into_iter().collect(),
            [("d", RawValue::from("2024-01-01")), ("y", RawValue::from("7"))]
                .into_iter()
                .collect(),
        ];
        let points = trend_points(&data, "d", "y");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, RawValue::from("0"));
    }

    #[test]
    fn trend_requires_y_key_present() {
        let mut data = rows(&["date"], &[&["2024-01-01"]]);
        data.extend(rows(&["date", "sales"], &[&["2024-01-02", ""]]));
        let points = trend_points(&data, "date", "sales");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].y, 0.0);
    }

    #[test]
    fn trend_caps_at_fifty_in_row_order() {
        let values: Vec<Vec<String>> = (1..=80)
            .map(|i| vec![format!("2024-01-{:02}", (i % 28) + 1), i.to_string()])
            .collect();
        let data: Vec<Row> = values
            .iter()
            .map(|v| [("d", v[0].as_str()), ("y", v[1].as_str())].into_iter().collect())
            .collect();
        let points = trend_points(&data, "d", "y");
        assert_eq!(points.len(), MAX_TREND_POINTS);
        assert_eq!(points[0].y, 1.0);
        assert_eq!(points[49].y, 50.0);
    }

    #[test]
    fn scenario_b_single_group() {
        let data: Vec<Row> = (0..20)
            .map(|_| [("region", "X"), ("sales", "1")].into_iter().collect())
            .collect();
        let groups = bar_groups(&data, "region", "sales");
        assert_eq!(
            groups,
            vec![BarGroup {
                label: "X".into(),
                total: 20.0,
                count: 20
            }]
        );
    }

    #[test]
    fn bar_sorted_descending_and_capped() {
        let values: Vec<(String, String)> =
            (0..30).map(|i| (format!("cat{i}"), i.to_string())).collect();
        let data: Vec<Row> = values
            .iter()
            .map(|(c, v)| [("c", c.as_str()), ("v", v.as_str())].into_iter().collect())
            .collect();
        let groups = bar_groups(&data, "c", "v");
        assert_eq!(groups.len(), MAX_BAR_GROUPS);
        assert_eq!(groups[0].label, "cat29");
        assert!(groups.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn bar_non_numeric_counts_but_adds_zero() {
        let data = rows(&["c", "v"], &[&["a", "n/a"], &["a", "3"], &["", "1"]]);
        let groups = bar_groups(&data, "c", "v");
        assert_eq!(groups[0].label, "a");
        assert_eq!(groups[0].total, 3.0);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].label, "");
    }

    #[test]
    fn scatter_excludes_rather_than_zeroes() {
        let data = rows(
            &["a", "b"],
            &[&["1", "2"], &["", "3"], &["4", "x"], &["5", "6"]],
        );
        let points = scatter_points(&data, "a", "b");
        assert_eq!(
            points,
            vec![ScatterPoint { x: 1.0, y: 2.0 }, ScatterPoint { x: 5.0, y: 6.0 }]
        );
    }

    #[test]
    fn scatter_caps_at_two_hundred() {
        let data: Vec<Row> = (0..250)
            .map(|i| [("a", RawValue::Number(i as f64)), ("b", RawValue::Number(1.0))].into_iter().collect())
            .collect();
        let points = scatter_points(&data, "a", "b");
        assert_eq!(points.len(), MAX_SCATTER_POINTS);
        assert_eq!(points[199].x, 199.0);
    }

    #[test]
    fn table_passes_rows_through() {
        let data = rows(&["a"], &[&["1"], &["2"]]);
        match transform(&data, &spec(ChartType::Table, &["a"])) {
            ChartData::Table(out) => assert_eq!(out, data.as_slice()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn short_spec_yields_empty_series() {
        let data = rows(&["a"], &[&["1"]]);
        assert!(transform(&data, &spec(ChartType::Scatter, &["a"])).is_empty());
        assert!(transform(&data, &spec(ChartType::Line, &[])).is_empty());
        assert!(transform(&data, &spec(ChartType::Bar, &["a"])).is_empty());
    }

    #[test]
    fn chart_data_serializes_tagged() {
        let data = rows(&["a", "b"], &[&["1", "2"]]);
        let json = serde_json::to_value(transform(&data, &spec(ChartType::Scatter, &["a", "b"]))).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["data"][0]["x"], 1.0);
    }
}
