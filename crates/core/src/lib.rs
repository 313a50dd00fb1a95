//! `dashgen-core`: shared data model.
//!
//! Raw cell values, datasets, column kinds and chart specs. No I/O.

pub mod chart;
pub mod dataset;
pub mod value;

pub use chart::{AnalysisResult, ChartSpec, ChartType, ColumnKind, ColumnProfile};
pub use dataset::{Dataset, Row};
pub use value::{parse_date, parse_number, RawValue};
