use tracing::warn;

use crate::model::file_group::FileGroup;
use crate::model::summary::{GroupKind, GroupStats, Moments, QcReport, RunSummary, Stat, WelchTest};
use crate::stats::{mean, sample_sd, sem};

pub const QC_FRAGMENT_THRESHOLD: usize = 20;
pub const QC_FILES_REPORTED: usize = 3;

#[derive(Debug, Default, Clone)]
struct Bucket {
    normalized: Vec<f64>,
    raw: Vec<f64>,
    net_cells: usize,
}

impl Bucket {
    fn push(&mut self, normalized: f64, raw: f64, is_net: bool) {
        self.normalized.push(normalized);
        self.raw.push(raw);
        if is_net {
            self.net_cells += 1;
        }
    }

    fn extend(&mut self, other: &Bucket) {
        self.normalized.extend_from_slice(&other.normalized);
        self.raw.extend_from_slice(&other.raw);
        self.net_cells += other.net_cells;
    }
}

/// Requires every file to be normalized already.
pub fn run_stage4(files: &[FileGroup]) -> RunSummary {
    let mut treatment = Bucket::default();
    let mut non_treatment = Bucket::default();
    for file in files {
        let bucket = if file.is_treatment {
            &mut treatment
        } else {
            &mut non_treatment
        };
        for roi in file.retained() {
            if let Some(n) = roi.normalized {
                bucket.push(n.area, roi.area, n.is_net);
            }
        }
    }
    let mut combined = treatment.clone();
    combined.extend(&non_treatment);

    let mut warnings = Vec::new();
    let treatment_stats = group_stats(GroupKind::Treatment, &treatment, &mut warnings);
    let non_treatment_stats = group_stats(GroupKind::NonTreatment, &non_treatment, &mut warnings);
    let combined_stats = group_stats(GroupKind::Combined, &combined, &mut warnings);

    let welch = welch_test(&treatment_stats, &non_treatment_stats);
    if !welch.t.is_computable() {
        let msg = "t-statistic: not computable (needs SEM of raw area in both groups)".to_string();
        warn!("{msg}");
        warnings.push(msg);
    }

    RunSummary {
        treatment: treatment_stats,
        non_treatment: non_treatment_stats,
        combined: combined_stats,
        welch,
        qc: qc_report(files),
        warnings,
    }
}

fn group_stats(group: GroupKind, bucket: &Bucket, warnings: &mut Vec<String>) -> GroupStats {
    let cells = bucket.raw.len();
    let percent_net = if cells == 0 {
        Stat::NotComputable
    } else {
        Stat::Value(100.0 * bucket.net_cells as f64 / cells as f64)
    };
    let normalized_area = moments(group, "normalized area", &bucket.normalized, warnings);
    let raw_area = moments(group, "raw area", &bucket.raw, warnings);
    GroupStats {
        group,
        cells,
        net_cells: bucket.net_cells,
        percent_net,
        normalized_area,
        raw_area,
    }
}

fn moments(group: GroupKind, name: &str, values: &[f64], warnings: &mut Vec<String>) -> Moments {
    let what = format!("{} {}", group.label(), name);
    let m = match mean(values, &what) {
        Ok(m) => m,
        Err(err) => {
            degrade(&err, warnings);
            return Moments {
                mean: Stat::NotComputable,
                sd: Stat::NotComputable,
                sem: Stat::NotComputable,
            };
        }
    };
    match sample_sd(values, m, &what) {
        Ok(sd) => Moments {
            mean: Stat::Value(m),
            sd: Stat::Value(sd),
            sem: Stat::Value(sem(sd, values.len())),
        },
        Err(err) => {
            degrade(&err, warnings);
            Moments {
                mean: Stat::Value(m),
                sd: Stat::NotComputable,
                sem: Stat::NotComputable,
            }
        }
    }
}

fn degrade(err: &crate::error::AnalysisError, warnings: &mut Vec<String>) {
    let msg = format!("{err}; reported as not computable");
    warn!("{msg}");
    warnings.push(msg);
}

/// Unpooled two-sample t on raw-area means with Welch-Satterthwaite df.
pub fn welch_test(treatment: &GroupStats, non_treatment: &GroupStats) -> WelchTest {
    let not_computable = WelchTest {
        t: Stat::NotComputable,
        df: Stat::NotComputable,
    };
    let (Some(mt), Some(mn), Some(st), Some(sn)) = (
        treatment.raw_area.mean.value(),
        non_treatment.raw_area.mean.value(),
        treatment.raw_area.sem.value(),
        non_treatment.raw_area.sem.value(),
    ) else {
        return not_computable;
    };

    let a = st * st;
    let b = sn * sn;
    let denom = (a + b).sqrt();
    if denom == 0.0 {
        return not_computable;
    }
    let t = (mt - mn) / denom;

    let nt = treatment.cells as f64;
    let nn = non_treatment.cells as f64;
    let df_denom = a * a / (nt - 1.0) + b * b / (nn - 1.0);
    let df = if df_denom > 0.0 {
        Stat::Value((a + b) * (a + b) / df_denom)
    } else {
        Stat::NotComputable
    };
    WelchTest { t: Stat::Value(t), df }
}

/// Files ranked by fragment count, highest first; ties keep file order.
pub fn most_fragmented(files: &[FileGroup], limit: usize) -> Vec<String> {
    let mut ranked: Vec<(usize, usize)> = files
        .iter()
        .enumerate()
        .map(|(idx, f)| (idx, f.fragment_count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(idx, _)| files[idx].name.clone())
        .collect()
}

pub fn qc_report(files: &[FileGroup]) -> QcReport {
    let total_fragments: usize = files.iter().map(|f| f.fragment_count).sum();
    let flagged = total_fragments >= QC_FRAGMENT_THRESHOLD;
    QcReport {
        total_fragments,
        consider_optimizing_lower_cutoff: flagged,
        files_to_check: if flagged {
            most_fragmented(files, QC_FILES_REPORTED)
        } else {
            Vec::new()
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_summary.rs"]
mod tests;
