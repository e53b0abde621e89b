use serde::Serialize;

use crate::model::roi::RoiRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityCutoffs {
    pub mean: f64,
    pub sd: f64,
    pub lower: f64,
    pub upper: f64,
}

impl DensityCutoffs {
    pub fn excludes(&self, raw_density: f64) -> bool {
        raw_density < self.lower || raw_density > self.upper
    }
}

/// ROIs read from one input table, in row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileGroup {
    pub name: String,
    pub is_treatment: bool,
    pub rois: Vec<RoiRecord>,
    pub fragment_count: usize,
}

impl FileGroup {
    pub fn new(name: impl Into<String>, is_treatment: bool, rois: Vec<RoiRecord>) -> Self {
        Self {
            name: name.into(),
            is_treatment,
            rois,
            fragment_count: 0,
        }
    }

    /// Flags every ROI against the global cutoffs and returns the fragment count.
    pub fn mark_outliers(&mut self, cutoffs: &DensityCutoffs) -> usize {
        let mut fragments = 0usize;
        for roi in &mut self.rois {
            roi.is_outlier = cutoffs.excludes(roi.raw_density);
            if roi.is_outlier {
                fragments += 1;
            }
        }
        self.fragment_count = fragments;
        fragments
    }

    pub fn retained(&self) -> impl Iterator<Item = &RoiRecord> {
        self.rois.iter().filter(|r| !r.is_outlier)
    }

    pub fn retained_count(&self) -> usize {
        self.retained().count()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/file_group.rs"]
mod tests;
