use dashgen_core::{ColumnKind, ColumnProfile, Dataset, RawValue};

/// Number of leading rows inspected per column.
pub const SAMPLE_SIZE: usize = 10;

/// First `min(SAMPLE_SIZE, rows)` values of `column`.
pub fn sample<'a>(column: &'a str, dataset: &'a Dataset) -> Vec<&'a RawValue> {
    dataset.column_values(column).take(SAMPLE_SIZE).collect()
}

/// At least one sampled value parses as a finite number. Empty never counts.
pub fn looks_numeric(sample: &[&RawValue]) -> bool {
    sample.iter().any(|v| v.as_number().is_some())
}

/// At least one sampled value parses as a calendar date.
pub fn looks_temporal(sample: &[&RawValue]) -> bool {
    sample.iter().any(|v| v.as_date().is_some())
}

/// Single tag per column. Numeric wins over Temporal, so `"2024"` is Numeric.
pub fn classify(column: &str, dataset: &Dataset) -> ColumnKind {
    let values = sample(column, dataset);
    if looks_numeric(&values) {
        ColumnKind::Numeric
    } else if looks_temporal(&values) {
        ColumnKind::Temporal
    } else {
        ColumnKind::Categorical
    }
}

/// Classify every column, in dataset column order.
pub fn profile(dataset: &Dataset) -> Vec<ColumnProfile> {
    dataset
        .columns()
        .iter()
        .map(|name| ColumnProfile {
            name: name.clone(),
            kind: classify(name, dataset),
        })
        .collect()
}

/// Columns split into the three mutually exclusive buckets, each in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnBuckets {
    pub numeric: Vec<String>,
    pub temporal: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnBuckets {
    pub fn from_profiles(profiles: &[ColumnProfile]) -> Self {
        let mut buckets = Self::default();
        for p in profiles {
            let bucket = match p.kind {
                ColumnKind::Numeric => &mut buckets.numeric,
                ColumnKind::Temporal => &mut buckets.temporal,
                ColumnKind::Categorical => &mut buckets.categorical,
            };
            bucket.push(p.name.clone());
        }
        buckets
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_profiles(&profile(dataset))
    }
}
