pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3SeedStore};

pub use adapters::{MemoryDirectory, RestDirectory};
pub use config::toml_config::DirectoryConfig;
pub use core::{compose, engine::SearchEngine};
pub use domain::model::{Company, FilterCriteria};
pub use domain::ports::{CompanySource, ConfigProvider};
pub use domain::query::CompanyQuery;
pub use utils::error::{DirectoryError, Result};
