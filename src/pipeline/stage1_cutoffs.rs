use tracing::debug;

use crate::error::AnalysisError;
use crate::model::file_group::{DensityCutoffs, FileGroup};
use crate::model::thresholds::ThresholdProfile;
use crate::stats::{mean, sample_sd};

/// Global raw-density cutoffs pooled over every ROI of every file.
///
/// The upper bound is `mean + factor * sd`; the lower bound is the absolute
/// `lower_cutoff` from the profile, used as-is.
pub fn run_stage1(
    files: &[FileGroup],
    params: &ThresholdProfile,
) -> Result<DensityCutoffs, AnalysisError> {
    let mut densities = Vec::with_capacity(files.iter().map(|f| f.rois.len()).sum());
    for file in files {
        for (row, roi) in file.rois.iter().enumerate() {
            if !roi.raw_density.is_finite() {
                return Err(AnalysisError::malformed(
                    file.name.as_str(),
                    format!("ROI {} has non-finite raw density", row + 1),
                ));
            }
            densities.push(roi.raw_density);
        }
    }

    if densities.is_empty() {
        return Err(AnalysisError::malformed(
            "<all files>",
            "no raw integrated density values",
        ));
    }

    let what = "raw density standard deviation";
    if densities.len() < 2 {
        return Err(AnalysisError::insufficient(what, 2, densities.len()));
    }
    let mean = mean(&densities, what)?;
    let sd = sample_sd(&densities, mean, what)?;

    let cutoffs = DensityCutoffs {
        mean,
        sd,
        lower: params.lower_cutoff,
        upper: mean + params.upper_cutoff_factor * sd,
    };
    debug!(
        n_rois = densities.len(),
        mean = cutoffs.mean,
        sd = cutoffs.sd,
        lower = cutoffs.lower,
        upper = cutoffs.upper,
        "density cutoffs"
    );
    Ok(cutoffs)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_cutoffs.rs"]
mod tests;
