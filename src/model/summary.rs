use serde::{Serialize, Serializer};

/// A reported statistic. `NotComputable` replaces values whose sample was too small.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stat {
    Value(f64),
    NotComputable,
}

impl Stat {
    pub fn value(self) -> Option<f64> {
        match self {
            Stat::Value(v) => Some(v),
            Stat::NotComputable => None,
        }
    }

    pub fn is_computable(self) -> bool {
        matches!(self, Stat::Value(_))
    }
}

impl Serialize for Stat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Stat::Value(v) if v.is_finite() => serializer.serialize_f64(*v),
            _ => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub mean: Stat,
    pub sd: Stat,
    pub sem: Stat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Treatment,
    NonTreatment,
    Combined,
}

impl GroupKind {
    pub fn label(self) -> &'static str {
        match self {
            GroupKind::Treatment => "treatment",
            GroupKind::NonTreatment => "non-treatment",
            GroupKind::Combined => "combined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub group: GroupKind,
    pub cells: usize,
    pub net_cells: usize,
    pub percent_net: Stat,
    pub normalized_area: Moments,
    pub raw_area: Moments,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WelchTest {
    pub t: Stat,
    pub df: Stat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QcReport {
    pub total_fragments: usize,
    pub consider_optimizing_lower_cutoff: bool,
    pub files_to_check: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub treatment: GroupStats,
    pub non_treatment: GroupStats,
    pub combined: GroupStats,
    pub welch: WelchTest,
    pub qc: QcReport,
    pub warnings: Vec<String>,
}

impl RunSummary {
    pub fn groups(&self) -> [&GroupStats; 3] {
        [&self.treatment, &self.non_treatment, &self.combined]
    }
}
