use crate::model::summary::{GroupStats, RunSummary};
use crate::pipeline::PipelineOutput;
use crate::report::{format_f64_6, format_stat, yes_no};

pub fn render_report_text(output: &PipelineOutput) -> String {
    let summary = &output.summary;
    let mut out = String::new();

    out.push_str("DNA Area and NETosis Report\n");
    out.push_str("===========================\n\n");

    out.push_str("1. Exclusion\n");
    out.push_str(&format!(
        "Raw density mean: {}\nRaw density SD: {}\n",
        format_f64_6(output.cutoffs.mean),
        format_f64_6(output.cutoffs.sd)
    ));
    out.push_str(&format!(
        "Retained density range: [{}, {}]\n",
        format_f64_6(output.cutoffs.lower),
        format_f64_6(output.cutoffs.upper)
    ));
    out.push_str(&format!(
        "Files: {}, fragments excluded: {}\n\n",
        output.files.len(),
        summary.qc.total_fragments
    ));

    out.push_str("2. Normalization\n");
    out.push_str(&format!(
        "Baseline (mean of 5 smallest retained areas): {}\n",
        format_f64_6(output.normalization.baseline)
    ));
    out.push_str(&format!(
        "Divisor applied: {}\n\n",
        format_f64_6(output.normalization.divisor)
    ));

    out.push_str("3. Groups\n");
    for group in summary.groups() {
        out.push_str(&group_line(group));
    }
    out.push('\n');

    out.push_str("4. Treatment vs non-treatment\n");
    out.push_str(&format!(
        "t = {}, Welch df = {}\n\n",
        format_stat(summary.welch.t),
        format_stat(summary.welch.df)
    ));

    out.push_str("5. Quality and caveats\n");
    out.push_str(&qc_section(summary));

    out
}

fn group_line(group: &GroupStats) -> String {
    format!(
        "{}: cells={}, %NET={}, normalized area mean={} (SEM {}), area mean={} (SEM {})\n",
        group.group.label(),
        group.cells,
        format_stat(group.percent_net),
        format_stat(group.normalized_area.mean),
        format_stat(group.normalized_area.sem),
        format_stat(group.raw_area.mean),
        format_stat(group.raw_area.sem),
    )
}

fn qc_section(summary: &RunSummary) -> String {
    let mut out = format!(
        "Consider optimizing lower cutoff: {}\n",
        yes_no(summary.qc.consider_optimizing_lower_cutoff)
    );
    if !summary.qc.files_to_check.is_empty() {
        out.push_str(&format!(
            "Files to check: {}\n",
            summary.qc.files_to_check.join(", ")
        ));
    }
    for warning in &summary.warnings {
        out.push_str(&format!("Warning: {warning}\n"));
    }
    out
}
