use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decondensation {
    Below,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl Decondensation {
    pub fn name(self) -> &'static str {
        match self {
            Decondensation::Below => "Below",
            Decondensation::Tier1 => "Tier1",
            Decondensation::Tier2 => "Tier2",
            Decondensation::Tier3 => "Tier3",
            Decondensation::Tier4 => "Tier4",
        }
    }
}

/// Fields assigned by the normalization stage. Present only on retained ROIs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedRoi {
    pub area: f64,
    pub class: Decondensation,
    pub is_net: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiRecord {
    pub raw_density: f64,
    pub area: f64,
    pub is_outlier: bool,
    pub normalized: Option<NormalizedRoi>,
}

impl RoiRecord {
    pub fn new(raw_density: f64, area: f64) -> Self {
        Self {
            raw_density,
            area,
            is_outlier: false,
            normalized: None,
        }
    }

    pub fn normalized_area(&self) -> Option<f64> {
        self.normalized.map(|n| n.area)
    }

    pub fn is_net(&self) -> bool {
        self.normalized.is_some_and(|n| n.is_net)
    }
}
