//! Sample statistics shared by the cutoff, baseline and summary stages.
//!
//! Every function sums in input order so repeated runs are bit-identical.

use crate::error::AnalysisError;

pub fn mean(values: &[f64], what: &str) -> Result<f64, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::insufficient(what, 1, 0));
    }
    let mut sum = 0.0f64;
    for &v in values {
        sum += v;
    }
    Ok(sum / values.len() as f64)
}

/// Standard deviation with the `n - 1` denominator.
pub fn sample_sd(values: &[f64], mean: f64, what: &str) -> Result<f64, AnalysisError> {
    let n = values.len();
    if n < 2 {
        return Err(AnalysisError::insufficient(what, 2, n));
    }
    let mut ss = 0.0f64;
    for &v in values {
        let d = v - mean;
        ss += d * d;
    }
    Ok((ss / (n - 1) as f64).sqrt())
}

pub fn sem(sd: f64, n: usize) -> f64 {
    sd / (n as f64).sqrt()
}

/// Mean of the `k` smallest values. Sorts `values` in place.
pub fn mean_of_smallest(values: &mut [f64], k: usize, what: &str) -> Result<f64, AnalysisError> {
    if values.len() < k || k == 0 {
        return Err(AnalysisError::insufficient(what, k.max(1), values.len()));
    }
    values.sort_by(|a, b| a.total_cmp(b));
    mean(&values[..k], what)
}

#[cfg(test)]
#[path = "../tests/src_inline/stats.rs"]
mod tests;
