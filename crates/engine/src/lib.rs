//! `dashgen-engine`: tabular profiling and chart preparation.
//!
//! Pure engine crate: receives a decoded dataset, returns chart specs and
//! chart-ready data. No file or terminal I/O.

pub mod narrate;
pub mod profile;
pub mod recommend;
pub mod stages;
pub mod table_view;
pub mod transform;

pub use profile::{classify, profile, ColumnBuckets};
pub use recommend::recommend;
pub use table_view::{TableEvent, TablePage, TableView, TableViewState};
pub use transform::{transform, ChartData};
