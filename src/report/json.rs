use serde::Serialize;

use crate::error::AnalysisError;
use crate::model::file_group::DensityCutoffs;
use crate::model::summary::RunSummary;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::PipelineOutput;

#[derive(Debug, Serialize)]
pub struct ToolMeta<'a> {
    pub name: &'a str,
    pub version: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NormalizationMeta {
    pub baseline: f64,
    pub divisor: f64,
    pub normalized_rois: usize,
}

#[derive(Debug, Serialize)]
pub struct FileEntry<'a> {
    pub name: &'a str,
    pub treatment: bool,
    pub rois: usize,
    pub fragments: usize,
    pub retained: usize,
    pub net: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub tool: ToolMeta<'a>,
    pub params: &'a ThresholdProfile,
    pub cutoffs: &'a DensityCutoffs,
    pub normalization: NormalizationMeta,
    pub files: Vec<FileEntry<'a>>,
    pub summary: &'a RunSummary,
}

pub fn build_summary_document<'a>(
    output: &'a PipelineOutput,
    params: &'a ThresholdProfile,
    tool: ToolMeta<'a>,
) -> SummaryDocument<'a> {
    let files = output
        .files
        .iter()
        .map(|f| FileEntry {
            name: &f.name,
            treatment: f.is_treatment,
            rois: f.rois.len(),
            fragments: f.fragment_count,
            retained: f.retained_count(),
            net: f.rois.iter().filter(|r| r.is_net()).count(),
        })
        .collect();

    SummaryDocument {
        tool,
        params,
        cutoffs: &output.cutoffs,
        normalization: NormalizationMeta {
            baseline: output.normalization.baseline,
            divisor: output.normalization.divisor,
            normalized_rois: output.normalization.normalized_rois,
        },
        files,
        summary: &output.summary,
    }
}

pub fn render_summary_json(doc: &SummaryDocument<'_>) -> Result<String, AnalysisError> {
    let mut json = serde_json::to_string_pretty(doc)?;
    json.push('\n');
    Ok(json)
}
