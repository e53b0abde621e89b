use std::io::BufRead;

use crate::error::AnalysisError;
use crate::model::roi::RoiRecord;

pub const DENSITY_COLUMN: &str = "RawIntDen";
pub const AREA_COLUMN: &str = "Area";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub density: usize,
    pub area: usize,
}

pub fn resolve_columns(file: &str, header: &str) -> Result<ColumnLayout, AnalysisError> {
    let cols: Vec<&str> = header
        .split(',')
        .map(|c| c.trim().trim_matches('"'))
        .collect();
    let find = |name: &str| {
        cols.iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| AnalysisError::malformed(file, format!("missing column {name}")))
    };
    Ok(ColumnLayout {
        density: find(DENSITY_COLUMN)?,
        area: find(AREA_COLUMN)?,
    })
}

fn parse_field(
    file: &str,
    line_no: usize,
    fields: &[&str],
    idx: usize,
    name: &str,
) -> Result<f64, AnalysisError> {
    let raw = fields
        .get(idx)
        .map(|s| s.trim().trim_matches('"'))
        .unwrap_or("");
    if raw.is_empty() {
        return Err(AnalysisError::malformed(
            file,
            format!("line {line_no}: missing {name}"),
        ));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AnalysisError::malformed(
            file,
            format!("line {line_no}: invalid {name} value {raw:?}"),
        )),
    }
}

/// Reads a comma-separated ROI table: header line, then one ROI per row.
pub fn parse_roi_table(
    file: &str,
    reader: &mut dyn BufRead,
) -> Result<Vec<RoiRecord>, AnalysisError> {
    let mut buf = String::new();
    let mut line_no = 0usize;
    let mut layout: Option<ColumnLayout> = None;
    let mut rois = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|e| AnalysisError::malformed(file, format!("read failed: {e}")))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let Some(cols) = layout else {
            layout = Some(resolve_columns(file, line.trim_start_matches('\u{feff}'))?);
            continue;
        };
        let fields: Vec<&str> = line.split(',').collect();
        let raw_density = parse_field(file, line_no, &fields, cols.density, DENSITY_COLUMN)?;
        let area = parse_field(file, line_no, &fields, cols.area, AREA_COLUMN)?;
        rois.push(RoiRecord::new(raw_density, area));
    }

    if layout.is_none() {
        return Err(AnalysisError::malformed(file, "table is empty"));
    }
    Ok(rois)
}
