use std::path::{Path, PathBuf};

use defold_market::{SubmissionConfig, Wei};
use serde::Deserialize;

use crate::errors::CliError;

/// Settings read from the optional JSON config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Display name recorded with every submission.
    pub researcher_name: String,
    /// Listing price per record, in ether.
    pub price_ether: String,
    /// Ledger database file.
    pub database: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            researcher_name: "ResearcherExample".to_string(),
            price_ether: "0.1".to_string(),
            database: PathBuf::from("defold.db"),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or fall back to defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Self::from_json(&content)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        let config: AppConfig = serde_json::from_str(content)?;
        if config.researcher_name.trim().is_empty() {
            return Err(CliError::Config("researcherName must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn submission_config(&self) -> Result<SubmissionConfig, CliError> {
        Ok(SubmissionConfig {
            researcher_name: self.researcher_name.clone(),
            price: Wei::from_ether(&self.price_ether)?,
        })
    }
}
