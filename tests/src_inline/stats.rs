use super::*;

#[test]
fn test_mean_and_sample_sd() {
    let v = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let m = mean(&v, "v").unwrap();
    assert_eq!(m, 5.0);
    let sd = sample_sd(&v, m, "v").unwrap();
    assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    assert!((sem(sd, v.len()) - sd / 8.0f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_singleton_sd_is_insufficient() {
    let err = sample_sd(&[3.0], 3.0, "bucket").unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData {
            needed: 2,
            got: 1,
            ..
        }
    ));
}

#[test]
fn test_empty_mean_is_insufficient() {
    assert!(mean(&[], "empty").is_err());
}

#[test]
fn test_mean_of_smallest_counts_duplicates() {
    let mut v = vec![6.0, 5.0, 4.0, 5.5, 4.5, 5.0, 5.2];
    let m = mean_of_smallest(&mut v, 5, "baseline").unwrap();
    assert!((m - 4.74).abs() < 1e-12);
}

#[test]
fn test_mean_of_smallest_needs_k_values() {
    let mut v = vec![1.0, 2.0, 3.0, 4.0];
    let err = mean_of_smallest(&mut v, 5, "baseline").unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData {
            needed: 5,
            got: 4,
            ..
        }
    ));
}
