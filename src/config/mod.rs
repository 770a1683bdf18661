pub mod toml_config;

#[cfg(feature = "lambda")]
pub mod lambda;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::catalog;
#[cfg(feature = "cli")]
use crate::domain::model::FilterCriteria;
#[cfg(feature = "cli")]
use crate::utils::error::{DirectoryError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "dme-directory")]
#[command(about = "Search a directory of medical equipment providers")]
pub struct CliConfig {
    #[arg(long, default_value = "", help = "Free-text search over name, description and services")]
    pub query: String,

    #[arg(long, default_value = "", help = "City, state or zip code fragment")]
    pub location: String,

    #[arg(long, default_value = "", help = "Two-letter state code")]
    pub state: String,

    #[arg(long = "service", value_delimiter = ',')]
    pub services: Vec<String>,

    #[arg(long, help = "Restrict results to verified providers (the default)")]
    pub verified: bool,

    #[arg(long, help = "Service category slug, e.g. oxygen-equipment")]
    pub category: Option<String>,

    #[arg(long, help = "Show a single company by id instead of searching")]
    pub id: Option<uuid::Uuid>,

    #[arg(long, default_value = "text")]
    pub format: String,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Listing API base URL")]
    pub endpoint: Option<String>,

    #[arg(long, help = "API key for the listing API")]
    pub api_key: Option<String>,

    #[arg(long, help = "CSV seed file for the in-memory source")]
    pub seed: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 把命令列參數組成過濾條件（--category 展開成服務標籤）
    pub fn criteria(&self) -> FilterCriteria {
        let mut services = self.services.clone();
        if let Some(category) = &self.category {
            if let Some(service) = catalog::service_for_slug(category) {
                services.push(service.to_string());
            }
        }

        FilterCriteria {
            query: self.query.clone(),
            location: self.location.clone(),
            state: self.state.clone(),
            services,
            verified_only: self.verified,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or("")
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        None
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_output_format("format", &self.format)?;
        validation::validate_state_code("state", &self.state)?;

        if let Some(endpoint) = &self.endpoint {
            validation::validate_url("endpoint", endpoint)?;
        }
        if let Some(seed) = &self.seed {
            validation::validate_path("seed", seed)?;
        }
        if let Some(config) = &self.config {
            validation::validate_path("config", config)?;
        }
        if let Some(category) = &self.category {
            if catalog::service_for_slug(category).is_none() {
                return Err(DirectoryError::InvalidConfigValueError {
                    field: "category".to_string(),
                    value: category.clone(),
                    reason: "Unknown service category".to_string(),
                });
            }
        }

        Ok(())
    }
}
