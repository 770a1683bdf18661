#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use dme_directory::config::lambda::{LambdaConfig, S3SeedStore};
#[cfg(feature = "lambda")]
use dme_directory::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use dme_directory::{Company, FilterCriteria, MemoryDirectory, RestDirectory, SearchEngine};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    #[serde(default)]
    pub criteria: FilterCriteria,
    pub seed_bucket: Option<String>,
    pub seed_key: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub count: usize,
    pub companies: Vec<Company>,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting directory search Lambda function");

    // 設置環境變量 (如果事件中有的話)
    if let Some(bucket) = &event.payload.seed_bucket {
        std::env::set_var("SEED_BUCKET", bucket);
    }
    if let Some(key) = &event.payload.seed_key {
        std::env::set_var("SEED_KEY", key);
    }

    // 創建Lambda配置
    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let criteria = event.payload.criteria;

    // REST 來源優先，否則從 S3 種子建立記憶體目錄
    let (companies, failure) = if lambda_config.endpoint.is_some() {
        let directory = RestDirectory::from_config(&lambda_config);
        SearchEngine::new(directory).search_or_empty(&criteria).await
    } else {
        // 創建AWS配置和S3客戶端
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let region = Region::new(lambda_config.s3_region.clone());
        let config = aws_sdk_s3::config::Builder::from(&config)
            .region(region)
            .force_path_style(true)
            .build();
        let s3_client = S3Client::from_conf(config);

        let bucket = lambda_config.seed_bucket.clone().unwrap_or_default();
        let store = S3SeedStore::new(s3_client, bucket);
        let seed = store
            .fetch_seed(&lambda_config.seed_key)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        let directory = MemoryDirectory::from_csv_reader(seed.as_slice())
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

        SearchEngine::new(directory).search_or_empty(&criteria).await
    };

    // 查詢失敗時仍回傳空結果，錯誤放進訊息欄位
    let message = match &failure {
        Some(e) => format!("Search failed: {}", e),
        None => "Search completed successfully".to_string(),
    };

    let response = Response {
        message,
        count: companies.len(),
        companies,
    };

    tracing::info!("Directory search Lambda function completed");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
