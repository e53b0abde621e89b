use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AnalysisError;
use crate::input::table_stem;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::PipelineOutput;
use crate::report::csv::{render_roi_table, render_summary_csv};
use crate::report::json::{ToolMeta, build_summary_document, render_summary_json};
use crate::report::text::render_report_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Annotated per-file tables plus every summary artifact.
    Full,
    /// `summary.json` only.
    JsonOnly,
}

pub fn roi_table_path(out_dir: &Path, file_name: &str) -> PathBuf {
    out_dir.join(format!("{}_analyzed.csv", table_stem(file_name)))
}

pub fn write_reports(
    output: &PipelineOutput,
    params: &ThresholdProfile,
    out_dir: &Path,
    mode: ReportMode,
) -> Result<(), AnalysisError> {
    fs::create_dir_all(out_dir).map_err(|e| AnalysisError::io(out_dir, e))?;

    if mode == ReportMode::Full {
        for file in &output.files {
            let path = roi_table_path(out_dir, &file.name);
            write_text(&path, &render_roi_table(file))?;
        }

        let summary_csv = render_summary_csv(&output.summary, params.treatment_token.as_deref());
        write_text(&out_dir.join("Summary.csv"), &summary_csv)?;

        write_text(&out_dir.join("report.txt"), &render_report_text(output))?;
    }

    let doc = build_summary_document(
        output,
        params,
        ToolMeta {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    );
    write_text(&out_dir.join("summary.json"), &render_summary_json(&doc)?)?;

    info!(out_dir = %out_dir.display(), "reports written");
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<(), AnalysisError> {
    let file = File::create(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut w = BufWriter::new(file);
    w.write_all(contents.as_bytes())
        .and_then(|_| w.flush())
        .map_err(|e| AnalysisError::io(path, e))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
