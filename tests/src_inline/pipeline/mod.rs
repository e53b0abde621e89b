use super::*;
use crate::error::AnalysisError;
use crate::model::roi::RoiRecord;
use crate::model::summary::Stat;

fn group(name: &str, treatment: bool, rows: &[(f64, f64)]) -> FileGroup {
    let rois = rows.iter().map(|&(d, a)| RoiRecord::new(d, a)).collect();
    FileGroup::new(name, treatment, rois)
}

fn scenario_files() -> Vec<FileGroup> {
    vec![
        group(
            "PMA_a.csv",
            true,
            &[(10.0, 5.0), (12.0, 6.0), (11.0, 5.5), (1000.0, 50.0)],
        ),
        group(
            "ctrl_b.csv",
            false,
            &[(9.0, 4.0), (10.0, 4.5), (11.0, 5.0), (13.0, 5.2)],
        ),
    ]
}

fn scenario_params() -> ThresholdProfile {
    let mut p = ThresholdProfile::default_v1();
    p.upper_cutoff_factor = 1.0;
    p.lower_cutoff = 0.0;
    p.treatment_token = Some("PMA".to_string());
    p
}

#[test]
fn test_two_file_scenario() {
    let out = run_pipeline(scenario_files(), &scenario_params()).unwrap();

    let a = &out.files[0];
    assert!(a.rois[3].is_outlier);
    assert_eq!(a.fragment_count, 1);
    assert_eq!(out.files[1].fragment_count, 0);
    assert!((out.normalization.baseline - 4.74).abs() < 1e-12);

    for roi in &a.rois[..3] {
        let n = roi.normalized_area().unwrap();
        assert!(n > 1.05 && n < 1.27);
    }

    let s = &out.summary;
    assert_eq!(s.combined.cells, 7);
    assert_eq!(s.treatment.cells, 3);
    assert_eq!(s.combined.percent_net, Stat::Value(0.0));
    let t = s.welch.t.value().unwrap();
    assert!((t - 2.0912900267307775).abs() < 1e-9);
    assert_eq!(s.qc.total_fragments, 1);
}

#[test]
fn test_rerun_is_bit_identical() {
    let first = run_pipeline(scenario_files(), &scenario_params()).unwrap();
    let second = run_pipeline(scenario_files(), &scenario_params()).unwrap();
    assert_eq!(first.files, second.files);
    assert_eq!(first.summary, second.summary);
    assert_eq!(
        first.normalization.baseline.to_bits(),
        second.normalization.baseline.to_bits()
    );
}

#[test]
fn test_invalid_params_abort_before_stages() {
    let mut p = scenario_params();
    p.tier_cutoffs = [6.0, 5.0, 4.0, 3.0];
    let err = run_pipeline(scenario_files(), &p).unwrap_err();
    assert!(matches!(err, AnalysisError::Configuration { .. }));
}

#[test]
fn test_baseline_failure_aborts_run() {
    let files = vec![group("a.csv", false, &[(10.0, 1.0), (11.0, 2.0), (12.0, 3.0)])];
    let err = run_pipeline(files, &scenario_params()).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData { needed: 5, .. }
    ));
}

#[test]
fn test_heavy_fragmentation_sets_qc_flag() {
    // Absolute floor of 5.0 excludes every density of 1.0.
    let mut files = Vec::new();
    for (name, low) in [("w1.csv", 4usize), ("w2.csv", 12), ("w3.csv", 9), ("w4.csv", 0)] {
        let mut rows = vec![(10.0, 3.0); 6];
        rows.extend(std::iter::repeat_n((1.0, 2.0), low));
        files.push(group(name, false, &rows));
    }
    let mut p = scenario_params();
    p.lower_cutoff = 5.0;
    p.upper_cutoff_factor = 10.0;
    let out = run_pipeline(files, &p).unwrap();

    assert_eq!(out.summary.qc.total_fragments, 25);
    assert!(out.summary.qc.consider_optimizing_lower_cutoff);
    assert_eq!(
        out.summary.qc.files_to_check,
        vec!["w2.csv", "w3.csv", "w1.csv"]
    );
}
