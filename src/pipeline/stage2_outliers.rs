use tracing::debug;

use crate::model::file_group::{DensityCutoffs, FileGroup};

/// Marks outliers in every file and returns the total fragment count.
pub fn run_stage2(files: &mut [FileGroup], cutoffs: &DensityCutoffs) -> usize {
    let mut total = 0usize;
    for file in files.iter_mut() {
        let fragments = file.mark_outliers(cutoffs);
        debug!(
            file = %file.name,
            rois = file.rois.len(),
            fragments,
            "outliers marked"
        );
        total += fragments;
    }
    total
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_outliers.rs"]
mod tests;
