use tracing::{debug, error, info};
use uuid::Uuid;

use crate::core::composer::compose;
use crate::domain::model::{Company, FilterCriteria};
use crate::domain::ports::CompanySource;
use crate::utils::error::{DirectoryError, Result};

/// 搜尋引擎：把過濾條件組成查詢，交給資料來源執行
pub struct SearchEngine<S: CompanySource> {
    source: S,
}

impl<S: CompanySource> SearchEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Compose the criteria into a query and run it against the source.
    pub async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<Company>> {
        let query = compose(criteria);
        debug!(
            predicates = query.predicates.len(),
            "Composed listing query"
        );

        let companies = self.source.select(&query).await?;
        info!("Found {} matching companies", companies.len());
        Ok(companies)
    }

    /// Display path: a failed source read becomes an empty result set and the
    /// failure is handed back to the caller for reporting. One attempt, no retry.
    pub async fn search_or_empty(
        &self,
        criteria: &FilterCriteria,
    ) -> (Vec<Company>, Option<DirectoryError>) {
        match self.search(criteria).await {
            Ok(companies) => (companies, None),
            Err(e) => {
                error!("Listing query failed: {}", e);
                (Vec::new(), Some(e))
            }
        }
    }

    /// Fetch a single listing for the detail view.
    pub async fn lookup(&self, id: Uuid) -> Result<Option<Company>> {
        debug!("Looking up company {}", id);
        self.source.fetch(id).await
    }
}
