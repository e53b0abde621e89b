use super::*;
use crate::model::file_group::DensityCutoffs;
use crate::model::roi::RoiRecord;

fn group(name: &str, treatment: bool, rows: &[(f64, f64)]) -> FileGroup {
    let rois = rows.iter().map(|&(d, a)| RoiRecord::new(d, a)).collect();
    FileGroup::new(name, treatment, rois)
}

fn marked(mut files: Vec<FileGroup>, lower: f64, upper: f64) -> Vec<FileGroup> {
    let cutoffs = DensityCutoffs {
        mean: 0.0,
        sd: 0.0,
        lower,
        upper,
    };
    for f in &mut files {
        f.mark_outliers(&cutoffs);
    }
    files
}

fn two_files() -> Vec<FileGroup> {
    marked(
        vec![
            group(
                "a.csv",
                true,
                &[(10.0, 5.0), (12.0, 6.0), (11.0, 5.5), (1000.0, 50.0)],
            ),
            group(
                "b.csv",
                false,
                &[(9.0, 4.0), (10.0, 4.5), (11.0, 5.0), (13.0, 5.2)],
            ),
        ],
        0.0,
        484.0,
    )
}

#[test]
fn test_baseline_pools_smallest_retained_areas() {
    let files = two_files();
    let baseline = pooled_baseline(&files).unwrap();
    // 4, 4.5, 5 (b), 5 (a), 5.2
    assert!((baseline - 4.74).abs() < 1e-12);
}

#[test]
fn test_baseline_independent_of_file_split() {
    let rows = [
        (1.0, 9.0),
        (1.0, 3.0),
        (1.0, 7.0),
        (1.0, 2.0),
        (1.0, 8.0),
        (1.0, 1.0),
        (1.0, 4.0),
    ];
    let one = marked(vec![group("x.csv", false, &rows)], 0.0, 10.0);
    let split = marked(
        vec![
            group("x.csv", false, &rows[..2]),
            group("y.csv", true, &rows[2..5]),
            group("z.csv", false, &rows[5..]),
        ],
        0.0,
        10.0,
    );
    assert_eq!(
        pooled_baseline(&one).unwrap(),
        pooled_baseline(&split).unwrap()
    );
    assert_eq!(pooled_baseline(&one).unwrap(), 3.4);
}

#[test]
fn test_outlier_areas_excluded_from_baseline() {
    let files = marked(
        vec![group(
            "a.csv",
            false,
            &[
                (0.5, 0.1),
                (5.0, 2.0),
                (5.0, 2.0),
                (5.0, 2.0),
                (5.0, 2.0),
                (5.0, 2.0),
            ],
        )],
        1.0,
        10.0,
    );
    assert_eq!(pooled_baseline(&files).unwrap(), 2.0);
}

#[test]
fn test_fewer_than_five_retained_is_insufficient() {
    let files = marked(
        vec![group(
            "a.csv",
            false,
            &[(5.0, 1.0), (5.0, 2.0), (5.0, 3.0), (5.0, 4.0), (50.0, 5.0)],
        )],
        0.0,
        10.0,
    );
    let err = pooled_baseline(&files).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData {
            needed: 5,
            got: 4,
            ..
        }
    ));
}

#[test]
fn test_classify_tiers() {
    let tiers = [3.0, 4.0, 5.0, 6.0];
    assert_eq!(classify(1.0, &tiers), Decondensation::Below);
    assert_eq!(classify(3.0, &tiers), Decondensation::Below);
    assert_eq!(classify(3.5, &tiers), Decondensation::Tier1);
    assert_eq!(classify(4.5, &tiers), Decondensation::Tier2);
    assert_eq!(classify(5.5, &tiers), Decondensation::Tier3);
    assert_eq!(classify(6.0, &tiers), Decondensation::Tier3);
    assert_eq!(classify(6.01, &tiers), Decondensation::Tier4);
}

#[test]
fn test_net_flag_independent_of_tiers() {
    let mut p = ThresholdProfile::default_v1();
    p.net_cutoff = 4.72;
    let below = normalize_roi(4.72, 1.0, &p);
    assert!(!below.is_net);
    assert_eq!(below.class, Decondensation::Tier2);
    let above = normalize_roi(4.73, 1.0, &p);
    assert!(above.is_net);
    assert_eq!(above.class, Decondensation::Tier2);
}

#[test]
fn test_relative_normalization_annotates_retained_only() {
    let mut files = two_files();
    let p = ThresholdProfile::default_v1();
    let out = run_stage3(&mut files, &p).unwrap();
    assert_eq!(out.divisor, out.baseline);
    assert_eq!(out.normalized_rois, 7);

    let a = &files[0];
    assert!(a.rois[3].is_outlier);
    assert!(a.rois[3].normalized.is_none());
    let expected = [5.0 / 4.74, 6.0 / 4.74, 5.5 / 4.74];
    for (roi, want) in a.rois[..3].iter().zip(expected) {
        let got = roi.normalized_area().unwrap();
        assert!((got - want).abs() < 1e-12);
        assert!(got > 1.05 && got < 1.27);
    }
}

#[test]
fn test_absolute_normalization_uses_fixed_area() {
    let mut files = two_files();
    let mut p = ThresholdProfile::default_v1();
    p.normalization = NormalizationMode::Absolute;
    p.absolute_area = 2.0;
    let out = run_stage3(&mut files, &p).unwrap();
    assert_eq!(out.divisor, 2.0);
    assert!((out.baseline - 4.74).abs() < 1e-12);
    assert_eq!(files[1].rois[0].normalized_area(), Some(2.0));
}

#[test]
fn test_normalized_area_monotonic_in_area() {
    let mut files = two_files();
    run_stage3(&mut files, &ThresholdProfile::default_v1()).unwrap();
    let mut pairs: Vec<(f64, f64)> = files
        .iter()
        .flat_map(|f| f.retained())
        .map(|r| (r.area, r.normalized_area().unwrap()))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    for w in pairs.windows(2) {
        assert!(w[0].1 <= w[1].1);
    }
}
