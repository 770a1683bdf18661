use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use crate::domain::model::Company;
use crate::domain::ports::{CompanySource, ConfigProvider};
use crate::domain::query::{Comparison, CompanyQuery, Predicate, SortDirection};
use crate::utils::error::{DirectoryError, Result};

/// REST directory speaking the PostgREST filter dialect.
///
/// Every comparison maps onto one query-string parameter; OR-groups become a
/// single `or=(...)` parameter. The server ANDs top-level parameters, which
/// is exactly the composed query's semantics.
pub struct RestDirectory {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
}

fn encode_comparison(comparison: &Comparison) -> (String, String) {
    match comparison {
        Comparison::Equals(field, value) => {
            (field.column_name().to_string(), format!("eq.{}", value))
        }
        Comparison::EqualsBool(field, value) => {
            (field.column_name().to_string(), format!("eq.{}", value))
        }
        Comparison::Contains(field, value) => {
            (field.column_name().to_string(), format!("ilike.*{}*", value))
        }
        Comparison::HasTag(field, tag) => {
            (field.column_name().to_string(), format!("cs.{{{}}}", tag))
        }
        Comparison::Overlaps(field, tags) => (
            field.column_name().to_string(),
            format!("ov.{{{}}}", tags.join(",")),
        ),
    }
}

/// 把組好的查詢翻成 PostgREST 的查詢參數
pub(crate) fn encode_query(query: &CompanyQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for predicate in &query.predicates {
        match predicate {
            Predicate::Single(comparison) => {
                params.push(encode_comparison(comparison));
            }
            Predicate::AnyOf(comparisons) => {
                let clauses: Vec<String> = comparisons
                    .iter()
                    .map(|comparison| {
                        let (column, condition) = encode_comparison(comparison);
                        format!("{}.{}", column, condition)
                    })
                    .collect();
                params.push(("or".to_string(), format!("({})", clauses.join(","))));
            }
        }
    }

    let direction = match query.direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    };
    params.push((
        "order".to_string(),
        format!("{}.{}", query.order_by.column_name(), direction),
    ));

    params
}

impl RestDirectory {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: endpoint.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: None,
            headers: Vec::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            client: Client::new(),
            base_url: config.endpoint().trim_end_matches('/').to_string(),
            api_key: config.api_key().map(|key| key.to_string()),
            timeout: config.timeout_seconds().map(Duration::from_secs),
            headers: Vec::new(),
        }
    }

    /// 額外的請求標頭（例如配置檔指定的）
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    fn companies_url(&self) -> String {
        format!("{}/companies", self.base_url)
    }

    async fn get_companies(&self, params: &[(String, String)]) -> Result<Vec<Company>> {
        // 構建請求
        let mut request = self.client.get(self.companies_url()).query(params);

        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key));
        }

        // 添加自定義標頭
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        // 設定超時
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Requesting companies from {}", self.companies_url());
        let response = request
            .send()
            .await
            .map_err(|e| DirectoryError::QueryFailed {
                message: format!("Listing request failed: {}", e),
            })?;

        tracing::debug!("Listing response status: {}", response.status());
        if !response.status().is_success() {
            return Err(DirectoryError::QueryFailed {
                message: format!("Listing request failed with status: {}", response.status()),
            });
        }

        response
            .json::<Vec<Company>>()
            .await
            .map_err(|e| DirectoryError::QueryFailed {
                message: format!("Listing response was not valid JSON: {}", e),
            })
    }
}

#[async_trait]
impl CompanySource for RestDirectory {
    async fn select(&self, query: &CompanyQuery) -> Result<Vec<Company>> {
        let params = encode_query(query);
        self.get_companies(&params).await
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Company>> {
        let params = vec![
            ("select".to_string(), "*".to_string()),
            ("id".to_string(), format!("eq.{}", id)),
        ];
        let companies = self.get_companies(&params).await?;
        Ok(companies.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compose;
    use crate::domain::model::FilterCriteria;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_empty_criteria_encode_to_verified_and_order() {
        let params = encode_query(&compose(&FilterCriteria::default()));

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("verified".to_string(), "eq.true".to_string()),
                ("order".to_string(), "name.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_query_encodes_as_one_or_parameter() {
        let criteria = FilterCriteria {
            query: "wheelchair".to_string(),
            ..Default::default()
        };
        let params = encode_query(&compose(&criteria));

        assert_eq!(
            param(&params, "or"),
            vec![
                "(name.ilike.*wheelchair*,description.ilike.*wheelchair*,services.cs.{wheelchair})"
            ]
        );
    }

    #[test]
    fn test_query_and_location_produce_two_or_parameters() {
        let criteria = FilterCriteria {
            query: "oxygen".to_string(),
            location: "Portland".to_string(),
            ..Default::default()
        };
        let params = encode_query(&compose(&criteria));

        assert_eq!(
            param(&params, "or"),
            vec![
                "(name.ilike.*oxygen*,description.ilike.*oxygen*,services.cs.{oxygen})",
                "(city.ilike.*Portland*,state.ilike.*Portland*,zip_code.ilike.*Portland*)",
            ]
        );
    }

    #[test]
    fn test_state_and_services_encode_as_plain_filters() {
        let criteria = FilterCriteria {
            state: "CA".to_string(),
            services: vec!["Wheelchairs".to_string(), "Hospital Beds".to_string()],
            ..Default::default()
        };
        let params = encode_query(&compose(&criteria));

        assert_eq!(param(&params, "state"), vec!["eq.CA"]);
        assert_eq!(
            param(&params, "services"),
            vec!["ov.{Wheelchairs,Hospital Beds}"]
        );
    }

    #[test]
    fn test_order_is_always_last_and_ascending_by_name() {
        let criteria = FilterCriteria {
            query: "cpap".to_string(),
            state: "TX".to_string(),
            ..Default::default()
        };
        let params = encode_query(&compose(&criteria));

        assert_eq!(params.last().map(|(k, _)| k.as_str()), Some("order"));
        assert_eq!(param(&params, "order"), vec!["name.asc"]);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let directory = RestDirectory::new("https://example.test/rest/v1/");
        assert_eq!(
            directory.companies_url(),
            "https://example.test/rest/v1/companies"
        );
    }
}
