use tracing::debug;

use crate::error::AnalysisError;
use crate::model::file_group::FileGroup;
use crate::model::roi::{Decondensation, NormalizedRoi};
use crate::model::thresholds::{NormalizationMode, ThresholdProfile};
use crate::stats::mean_of_smallest;

pub const BASELINE_ROIS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage3Output {
    pub baseline: f64,
    pub divisor: f64,
    pub normalized_rois: usize,
}

/// Mean area of the globally smallest retained ROIs, pooled across files.
pub fn pooled_baseline(files: &[FileGroup]) -> Result<f64, AnalysisError> {
    let mut areas: Vec<f64> = files
        .iter()
        .flat_map(|f| f.retained().map(|r| r.area))
        .collect();
    let baseline = mean_of_smallest(&mut areas, BASELINE_ROIS, "normalization baseline")?;
    if !(baseline.is_finite() && baseline > 0.0) {
        return Err(AnalysisError::malformed(
            "<pooled areas>",
            format!("normalization baseline must be positive, got {baseline}"),
        ));
    }
    Ok(baseline)
}

pub fn classify(normalized_area: f64, tiers: &[f64; 4]) -> Decondensation {
    if normalized_area > tiers[3] {
        Decondensation::Tier4
    } else if normalized_area > tiers[2] {
        Decondensation::Tier3
    } else if normalized_area > tiers[1] {
        Decondensation::Tier2
    } else if normalized_area > tiers[0] {
        Decondensation::Tier1
    } else {
        Decondensation::Below
    }
}

pub fn normalize_roi(area: f64, divisor: f64, params: &ThresholdProfile) -> NormalizedRoi {
    let normalized = area / divisor;
    NormalizedRoi {
        area: normalized,
        class: classify(normalized, &params.tier_cutoffs),
        is_net: normalized > params.net_cutoff,
    }
}

/// Requires every file to be outlier-marked already.
pub fn run_stage3(
    files: &mut [FileGroup],
    params: &ThresholdProfile,
) -> Result<Stage3Output, AnalysisError> {
    let baseline = pooled_baseline(files)?;
    let divisor = match params.normalization {
        NormalizationMode::Relative => baseline,
        NormalizationMode::Absolute => params.absolute_area,
    };

    let mut normalized_rois = 0usize;
    for file in files.iter_mut() {
        for roi in &mut file.rois {
            if roi.is_outlier {
                roi.normalized = None;
                continue;
            }
            roi.normalized = Some(normalize_roi(roi.area, divisor, params));
            normalized_rois += 1;
        }
    }

    debug!(baseline, divisor, normalized_rois, "areas normalized");
    Ok(Stage3Output {
        baseline,
        divisor,
        normalized_rois,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_normalize.rs"]
mod tests;
