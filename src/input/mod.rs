use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tracing::info;

use crate::error::AnalysisError;
use crate::model::file_group::FileGroup;
use crate::model::thresholds::ThresholdProfile;

pub mod table;

use table::parse_roi_table;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn is_roi_table(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".csv") || lower.ends_with(".csv.gz")
}

/// File name without the `.csv` / `.csv.gz` suffix.
pub fn table_stem(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    for suffix in [".csv.gz", ".csv"] {
        if lower.ends_with(suffix) {
            return &name[..name.len() - suffix.len()];
        }
    }
    name
}

/// ROI tables directly inside `input_dir`, sorted by file name.
pub fn discover_tables(input_dir: &Path) -> Result<Vec<PathBuf>, AnalysisError> {
    let entries = std::fs::read_dir(input_dir).map_err(|e| AnalysisError::io(input_dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AnalysisError::io(input_dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(AnalysisError::malformed(
                path.display().to_string(),
                "file name is not valid UTF-8",
            ));
        };
        if is_roi_table(name) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    reject_shared_stems(&paths)?;
    Ok(paths)
}

/// Two tables with one stem would write the same `<stem>_analyzed.csv`.
fn reject_shared_stems(paths: &[PathBuf]) -> Result<(), AnalysisError> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(paths.len());
    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(first) = seen.insert(table_stem(name), name) {
            return Err(AnalysisError::malformed(
                name,
                format!("shares its output name with {first}"),
            ));
        }
    }
    Ok(())
}

pub fn load_file_group(
    path: &Path,
    params: &ThresholdProfile,
) -> Result<FileGroup, AnalysisError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let mut reader = open_maybe_gz(path)?;
    let rois = parse_roi_table(&name, reader.as_mut())?;
    let is_treatment = params.is_treatment(&name);
    Ok(FileGroup::new(name, is_treatment, rois))
}

pub fn load_input(
    input_dir: &Path,
    params: &ThresholdProfile,
) -> Result<Vec<FileGroup>, AnalysisError> {
    let paths = discover_tables(input_dir)?;
    if paths.is_empty() {
        return Err(AnalysisError::malformed(
            input_dir.display().to_string(),
            "no .csv or .csv.gz ROI tables found",
        ));
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let group = load_file_group(path, params)?;
        info!(
            file = %group.name,
            rois = group.rois.len(),
            treatment = group.is_treatment,
            "loaded ROI table"
        );
        files.push(group);
    }
    Ok(files)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
