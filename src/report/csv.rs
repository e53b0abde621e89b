use crate::model::file_group::FileGroup;
use crate::model::summary::{GroupStats, RunSummary, Stat};
use crate::report::{format_f64_6, format_stat, yes_no};

pub const ROI_TABLE_HEADER: &str =
    "roi,raw_int_den,area,outlier,normalized_area,classification,net";

pub fn render_roi_table(file: &FileGroup) -> String {
    let mut out = String::new();
    out.push_str(ROI_TABLE_HEADER);
    out.push('\n');
    for (idx, roi) in file.rois.iter().enumerate() {
        let (normalized, class, net) = match roi.normalized {
            Some(n) => (
                format_f64_6(n.area),
                n.class.name(),
                if n.is_net { "true" } else { "false" },
            ),
            None => (String::new(), "", ""),
        };
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            idx + 1,
            format_f64_6(roi.raw_density),
            format_f64_6(roi.area),
            roi.is_outlier,
            normalized,
            class,
            net
        ));
    }
    out
}

fn row(
    out: &mut String,
    label: &str,
    summary: &RunSummary,
    pick: impl Fn(&GroupStats) -> Stat,
) {
    out.push_str(label);
    out.push(',');
    for group in summary.groups() {
        out.push_str(&format_stat(pick(group)));
        out.push(',');
    }
    out.push('\n');
}

fn count_row(out: &mut String, label: &str, summary: &RunSummary) {
    out.push_str(label);
    out.push(',');
    for group in summary.groups() {
        out.push_str(&group.cells.to_string());
        out.push(',');
    }
    out.push('\n');
}

/// Cross-file summary in the spreadsheet layout lab users already read.
pub fn render_summary_csv(summary: &RunSummary, treatment_token: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        " ,Treatment ({}),Non-treatment,Combined,\n",
        treatment_token.unwrap_or("")
    ));
    row(&mut out, "% NETosis", summary, |g| g.percent_net);
    row(&mut out, "Avg. Normalized Area", summary, |g| {
        g.normalized_area.mean
    });
    row(&mut out, "ANA SD", summary, |g| g.normalized_area.sd);
    row(&mut out, "ANA SEM", summary, |g| g.normalized_area.sem);
    count_row(&mut out, "Total Cells", summary);

    out.push('\n');
    row(&mut out, "Avg. Area", summary, |g| g.raw_area.mean);
    row(&mut out, "AA SD", summary, |g| g.raw_area.sd);
    row(&mut out, "AA SEM", summary, |g| g.raw_area.sem);

    out.push('\n');
    out.push_str(&format!("tscore:,{},\n", format_stat(summary.welch.t)));
    out.push_str(&format!("Welch df:,{},\n", format_stat(summary.welch.df)));

    out.push('\n');
    out.push_str(&format!(
        "Consider Optimizing Lower Cutoff Parameter:,{},\n",
        yes_no(summary.qc.consider_optimizing_lower_cutoff)
    ));
    out.push_str(&format!("Total Fragments:,{},\n", summary.qc.total_fragments));
    for (i, name) in summary.qc.files_to_check.iter().enumerate() {
        let label = if i == 0 { "Files to check:" } else { "" };
        out.push_str(&format!("{label},{name},\n"));
    }
    out
}
