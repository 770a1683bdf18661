pub mod composer;
pub mod engine;

pub use crate::domain::model::{Company, FilterCriteria};
pub use crate::domain::ports::{CompanySource, ConfigProvider};
pub use crate::utils::error::Result;
pub use composer::compose;
pub use engine::SearchEngine;
