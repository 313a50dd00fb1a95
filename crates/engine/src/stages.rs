// Staged analysis walk-through.
//
// The stages are display-only. `run_stages` reports each one to an observer
// (optionally pausing between them) and then calls the recommender; the
// result is identical with or without the pauses.

use std::time::Duration;

use dashgen_core::{AnalysisResult, Dataset};

use crate::recommend::recommend;

pub const ANALYSIS_STAGES: &[&str] = &[
    "Analyzing data structure",
    "Processing business requirements",
    "Identifying key metrics",
    "Recommending visualizations",
    "Generating insights",
];

/// Receives stage progress. `index` is 0-based.
pub trait StageObserver {
    fn stage_completed(&mut self, index: usize, name: &str);
}

/// Observer that ignores progress.
pub struct Silent;

impl StageObserver for Silent {
    fn stage_completed(&mut self, _index: usize, _name: &str) {}
}

/// Walk the stages, then run the recommender.
pub fn run_stages(
    dataset: &Dataset,
    problem_statement: &str,
    step_delay: Duration,
    observer: &mut dyn StageObserver,
) -> AnalysisResult {
    for (index, name) in ANALYSIS_STAGES.iter().enumerate() {
        if !step_delay.is_zero() {
            std::thread::sleep(step_delay);
        }
        log::debug!("stage {}/{}: {}", index + 1, ANALYSIS_STAGES.len(), name);
        observer.stage_completed(index, name);
    }
    recommend(dataset, problem_statement)
}
