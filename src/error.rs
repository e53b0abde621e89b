use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("malformed input in {file}: {detail}")]
    MalformedInput { file: String, detail: String },

    #[error("insufficient data for {what}: need at least {needed}, got {got}")]
    InsufficientData {
        what: String,
        needed: usize,
        got: usize,
    },

    #[error("invalid parameter {param}: {detail}")]
    Configuration { param: &'static str, detail: String },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub fn malformed(file: impl Into<String>, detail: impl Into<String>) -> Self {
        AnalysisError::MalformedInput {
            file: file.into(),
            detail: detail.into(),
        }
    }

    pub fn insufficient(what: impl Into<String>, needed: usize, got: usize) -> Self {
        AnalysisError::InsufficientData {
            what: what.into(),
            needed,
            got,
        }
    }

    pub fn config(param: &'static str, detail: impl Into<String>) -> Self {
        AnalysisError::Configuration {
            param,
            detail: detail.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/error.rs"]
mod tests;
