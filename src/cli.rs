use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::AnalysisError;
use crate::model::thresholds::{NormalizationMode, ThresholdProfile};

#[derive(Debug, Parser)]
#[command(
    name = "kira-netqc",
    version,
    about = "Pooled NETosis and DNA decondensation analysis of ROI tables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze every ROI table in a directory.
    Run(RunArgs),
    /// Print the effective parameter profile as JSON.
    Params(ParamArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Directory containing .csv / .csv.gz ROI tables")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false, help = "Write summary.json only")]
    pub json_only: bool,

    #[command(flatten)]
    pub params: ParamArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ParamArgs {
    #[arg(long, help = "JSON parameter profile; flags below override it")]
    pub params: Option<PathBuf>,

    #[arg(long, help = "File name substring marking treatment files")]
    pub treatment: Option<String>,

    #[arg(long, help = "Upper exclusion bound in SDs above the mean raw density")]
    pub upper_cutoff: Option<f64>,

    #[arg(long, help = "Absolute lower raw density bound")]
    pub lower_cutoff: Option<f64>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Four increasing decondensation cutoffs, e.g. 3,4,5,6"
    )]
    pub tiers: Option<Vec<f64>>,

    #[arg(long, help = "Normalized area above which a ROI counts as a NET")]
    pub net_cutoff: Option<f64>,

    #[arg(long, help = "Normalize to this fixed area instead of the pooled baseline")]
    pub absolute_area: Option<f64>,
}

impl ParamArgs {
    /// Defaults, then the profile file, then individual flags.
    pub fn resolve(&self) -> Result<ThresholdProfile, AnalysisError> {
        let mut profile = match &self.params {
            Some(path) => ThresholdProfile::from_json_file(path)?,
            None => ThresholdProfile::default_v1(),
        };
        if let Some(token) = &self.treatment {
            profile.treatment_token = Some(token.clone());
        }
        if let Some(v) = self.upper_cutoff {
            profile.upper_cutoff_factor = v;
        }
        if let Some(v) = self.lower_cutoff {
            profile.lower_cutoff = v;
        }
        if let Some(tiers) = &self.tiers {
            profile.tier_cutoffs = <[f64; 4]>::try_from(tiers.as_slice()).map_err(|_| {
                AnalysisError::config(
                    "tier_cutoffs",
                    format!("expected 4 values, got {}", tiers.len()),
                )
            })?;
        }
        if let Some(v) = self.net_cutoff {
            profile.net_cutoff = v;
        }
        if let Some(v) = self.absolute_area {
            profile.normalization = NormalizationMode::Absolute;
            profile.absolute_area = v;
        }
        profile.validate()?;
        Ok(profile)
    }
}
