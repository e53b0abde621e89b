use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Divide by the pooled five-smallest baseline.
    Relative,
    /// Divide by `absolute_area`.
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdProfile {
    pub upper_cutoff_factor: f64,
    pub lower_cutoff: f64,
    pub tier_cutoffs: [f64; 4],
    pub net_cutoff: f64,
    pub treatment_token: Option<String>,
    pub normalization: NormalizationMode,
    pub absolute_area: f64,
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl ThresholdProfile {
    pub fn default_v1() -> Self {
        Self {
            upper_cutoff_factor: 1.4,
            lower_cutoff: 1.3,
            tier_cutoffs: [3.0, 4.0, 5.0, 6.0],
            net_cutoff: 4.72,
            treatment_token: None,
            normalization: NormalizationMode::Relative,
            absolute_area: 1.0,
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AnalysisError> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| AnalysisError::config("params", format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.upper_cutoff_factor.is_finite() || self.upper_cutoff_factor < 0.0 {
            return Err(AnalysisError::config(
                "upper_cutoff_factor",
                format!("must be finite and >= 0, got {}", self.upper_cutoff_factor),
            ));
        }
        if !self.lower_cutoff.is_finite() {
            return Err(AnalysisError::config(
                "lower_cutoff",
                format!("must be finite, got {}", self.lower_cutoff),
            ));
        }
        if self.tier_cutoffs.iter().any(|c| !c.is_finite()) {
            return Err(AnalysisError::config(
                "tier_cutoffs",
                format!("must be finite, got {:?}", self.tier_cutoffs),
            ));
        }
        if self.tier_cutoffs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalysisError::config(
                "tier_cutoffs",
                format!("must be strictly increasing, got {:?}", self.tier_cutoffs),
            ));
        }
        if !self.net_cutoff.is_finite() {
            return Err(AnalysisError::config(
                "net_cutoff",
                format!("must be finite, got {}", self.net_cutoff),
            ));
        }
        if self.normalization == NormalizationMode::Absolute
            && !(self.absolute_area.is_finite() && self.absolute_area > 0.0)
        {
            return Err(AnalysisError::config(
                "absolute_area",
                format!(
                    "must be > 0 when absolute normalization is selected, got {}",
                    self.absolute_area
                ),
            ));
        }
        Ok(())
    }

    pub fn is_treatment(&self, file_name: &str) -> bool {
        match self.treatment_token.as_deref() {
            Some(token) if !token.is_empty() => file_name.contains(token),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
