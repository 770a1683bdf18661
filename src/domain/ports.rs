use crate::domain::model::Company;
use crate::domain::query::CompanyQuery;
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Read interface over the external companies collection. Implementations
/// must apply the whole composed query, including its sort.
#[async_trait]
pub trait CompanySource: Send + Sync {
    async fn select(&self, query: &CompanyQuery) -> Result<Vec<Company>>;
    async fn fetch(&self, id: Uuid) -> Result<Option<Company>>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> Option<u64>;
}
