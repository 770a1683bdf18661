use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::model::Company;
use crate::domain::ports::CompanySource;
use crate::domain::query::CompanyQuery;
use crate::utils::error::{DirectoryError, Result};

/// In-memory directory seeded from rows or a CSV file.
///
/// Serves local runs and the Lambda handler (which seeds it from S3); the
/// whole query runs against the seeded rows, so behaviour matches the REST
/// source clause for clause.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    rows: Vec<Company>,
}

/// 種子檔的一列。services / certifications 用分號分隔
#[derive(Debug, Deserialize)]
struct SeedRow {
    #[serde(default)]
    id: Option<Uuid>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    address: String,
    city: String,
    state: String,
    zip_code: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    logo_url: Option<String>,
    #[serde(default)]
    services: String,
    #[serde(default)]
    certifications: String,
    verified: bool,
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}

impl SeedRow {
    fn into_company(self) -> Company {
        let now = Utc::now();
        Company {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            description: self.description,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            phone: self.phone,
            email: self.email,
            website: self.website,
            logo_url: self.logo_url,
            services: split_tags(&self.services),
            certifications: split_tags(&self.certifications),
            verified: self.verified,
            created_at: now,
            updated_at: now,
        }
    }
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Company>) -> Self {
        Self { rows }
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let directory = Self::from_csv_reader(file)?;
        tracing::info!(
            "Seeded {} companies from {}",
            directory.len(),
            path.as_ref().display()
        );
        Ok(directory)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();

        for record in csv_reader.deserialize::<SeedRow>() {
            let seed = record?;
            if seed.name.trim().is_empty() {
                return Err(DirectoryError::SeedError {
                    message: format!("Seed row {} has an empty name", rows.len() + 1),
                });
            }
            rows.push(seed.into_company());
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl CompanySource for MemoryDirectory {
    async fn select(&self, query: &CompanyQuery) -> Result<Vec<Company>> {
        Ok(query.apply(self.rows.clone()))
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Company>> {
        Ok(self.rows.iter().find(|c| c.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compose;
    use crate::domain::model::FilterCriteria;

    const SEED: &str = "\
id,name,description,address,city,state,zip_code,phone,email,website,logo_url,services,certifications,verified
,Acme Medical,Wheelchairs and more,1 Main St,San Diego,CA,92101,555-0100,,,,Wheelchairs;Hospital Beds,JCAHO,true
,City Oxygen,Oxygen specialists,2 Elm St,Portland,OR,97201,,,,,Oxygen Equipment,,false
,Bay Mobility,,3 Oak Ave,Oakland,CA,94601,,,,,Wheelchairs,,true
";

    #[test]
    fn test_seed_parses_rows_and_tags() {
        let directory = MemoryDirectory::from_csv_reader(SEED.as_bytes()).unwrap();

        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn test_seed_splits_semicolon_tags() {
        let directory = MemoryDirectory::from_csv_reader(SEED.as_bytes()).unwrap();
        let acme = &directory.rows[0];

        assert_eq!(acme.services, vec!["Wheelchairs", "Hospital Beds"]);
        assert_eq!(acme.certifications, vec!["JCAHO"]);
        assert!(acme.verified);
    }

    #[test]
    fn test_seed_empty_optionals_become_none() {
        let directory = MemoryDirectory::from_csv_reader(SEED.as_bytes()).unwrap();
        let bay = &directory.rows[2];

        assert_eq!(bay.description, None);
        assert_eq!(bay.phone, None);
        assert!(bay.certifications.is_empty());
    }

    #[test]
    fn test_seed_rejects_empty_name() {
        let bad = "\
id,name,description,address,city,state,zip_code,phone,email,website,logo_url,services,certifications,verified
, ,desc,1 Main St,San Diego,CA,92101,,,,,Wheelchairs,,true
";
        let result = MemoryDirectory::from_csv_reader(bad.as_bytes());
        assert!(matches!(result, Err(DirectoryError::SeedError { .. })));
    }

    #[test]
    fn test_seed_malformed_csv_is_a_csv_error() {
        let bad = "\
id,name,description,address,city,state,zip_code,phone,email,website,logo_url,services,certifications,verified
,only,a,few,fields
";
        let result = MemoryDirectory::from_csv_reader(bad.as_bytes());
        assert!(matches!(result, Err(DirectoryError::CsvError(_))));
    }

    #[tokio::test]
    async fn test_select_applies_the_composed_query() {
        let directory = MemoryDirectory::from_csv_reader(SEED.as_bytes()).unwrap();
        let criteria = FilterCriteria {
            state: "CA".to_string(),
            ..Default::default()
        };

        let results = directory.select(&compose(&criteria)).await.unwrap();
        let names: Vec<&str> = results.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Medical", "Bay Mobility"]);
    }

    #[tokio::test]
    async fn test_select_never_returns_unverified_rows() {
        let directory = MemoryDirectory::from_csv_reader(SEED.as_bytes()).unwrap();
        let criteria = FilterCriteria {
            query: "oxygen".to_string(),
            ..Default::default()
        };

        let results = directory.select(&compose(&criteria)).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_finds_seeded_id() {
        let directory = MemoryDirectory::from_csv_reader(SEED.as_bytes()).unwrap();
        let id = directory.rows[1].id;

        let found = directory.fetch(id).await.unwrap();
        assert_eq!(found.map(|c| c.name), Some("City Oxygen".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_unknown_id_is_none() {
        let directory = MemoryDirectory::from_csv_reader(SEED.as_bytes()).unwrap();

        assert!(directory.fetch(Uuid::new_v4()).await.unwrap().is_none());
    }
}
