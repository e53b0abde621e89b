use std::time::Instant;

use tracing::{info, warn};

use crate::error::AnalysisError;
use crate::model::file_group::{DensityCutoffs, FileGroup};
use crate::model::summary::RunSummary;
use crate::model::thresholds::ThresholdProfile;

pub mod stage1_cutoffs;
pub mod stage2_outliers;
pub mod stage3_normalize;
pub mod stage4_summary;
pub mod stage5_report;

use stage1_cutoffs::run_stage1;
use stage2_outliers::run_stage2;
use stage3_normalize::{Stage3Output, run_stage3};
use stage4_summary::run_stage4;

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub files: Vec<FileGroup>,
    pub cutoffs: DensityCutoffs,
    pub normalization: Stage3Output,
    pub summary: RunSummary,
}

fn timed<T>(
    stage: &'static str,
    f: impl FnOnce() -> Result<T, AnalysisError>,
) -> Result<T, AnalysisError> {
    let start = Instant::now();
    info!(stage, "stage started");
    let result = f();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => info!(stage, elapsed_ms, "stage finished"),
        Err(err) => warn!(stage, elapsed_ms, error = %err, "stage failed"),
    }
    result
}

/// Runs every stage over the full, already-loaded set of files.
///
/// Each stage sees the complete output of the previous one: cutoffs are pooled
/// over all files before any ROI is marked, and the baseline is pooled over all
/// marked files before any area is normalized.
pub fn run_pipeline(
    mut files: Vec<FileGroup>,
    params: &ThresholdProfile,
) -> Result<PipelineOutput, AnalysisError> {
    params.validate()?;

    let cutoffs = timed("cutoffs", || run_stage1(&files, params))?;
    let total_fragments = timed("outliers", || Ok(run_stage2(&mut files, &cutoffs)))?;
    info!(total_fragments, "fragments excluded");
    let normalization = timed("normalize", || run_stage3(&mut files, params))?;
    let summary = timed("summary", || Ok(run_stage4(&files)))?;

    Ok(PipelineOutput {
        files,
        cutoffs,
        normalization,
        summary,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
