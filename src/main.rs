use clap::Parser;
use dme_directory::app::render;
use dme_directory::config::toml_config::SeedConfig;
use dme_directory::utils::{logger, validation::Validate};
use dme_directory::{
    CliConfig, CompanySource, DirectoryConfig, DirectoryError, MemoryDirectory, RestDirectory,
    SearchEngine,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting dme-directory CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 載入 TOML 配置（命令列參數覆寫個別欄位）
    let file_config = match &config.config {
        Some(path) => match load_file_config(path, &config) {
            Ok(file_config) => Some(file_config),
            Err(e) => {
                tracing::error!("❌ Configuration loading failed: {}", e);
                std::process::exit(report_config_error(&e));
            }
        },
        None => None,
    };

    let format = resolve_format(&config, file_config.as_ref());

    // 選擇資料來源並執行
    let exit_code = match &file_config {
        Some(file_config) if file_config.is_rest_source() => {
            let directory =
                RestDirectory::from_config(file_config).with_headers(file_config.headers());
            run_directory(directory, &config, &format).await
        }
        Some(file_config) => {
            match MemoryDirectory::from_csv_path(file_config.seed_path().unwrap_or("")) {
                Ok(directory) => run_directory(directory, &config, &format).await,
                Err(e) => report_config_error(&e),
            }
        }
        None if config.endpoint.is_some() => {
            let directory = RestDirectory::from_config(&config);
            run_directory(directory, &config, &format).await
        }
        None => match &config.seed {
            Some(path) => match MemoryDirectory::from_csv_path(path) {
                Ok(directory) => run_directory(directory, &config, &format).await,
                Err(e) => report_config_error(&e),
            },
            None => {
                eprintln!("❌ No data source configured");
                eprintln!("💡 建議: Pass --endpoint, --seed or --config to choose a source");
                1
            }
        },
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn load_file_config(path: &str, cli: &CliConfig) -> dme_directory::Result<DirectoryConfig> {
    let mut file_config = DirectoryConfig::from_file(path)?;

    if let Some(endpoint) = &cli.endpoint {
        file_config.source.endpoint = Some(endpoint.clone());
        file_config.source.r#type = "rest".to_string();
    }
    if let Some(api_key) = &cli.api_key {
        file_config.source.api_key = Some(api_key.clone());
    }
    if let Some(seed) = &cli.seed {
        file_config.seed = Some(SeedConfig { path: seed.clone() });
    }

    file_config.validate()?;
    Ok(file_config)
}

fn resolve_format(cli: &CliConfig, file_config: Option<&DirectoryConfig>) -> String {
    if cli.format != "text" {
        return cli.format.clone();
    }
    file_config
        .and_then(|c| c.output_format())
        .unwrap_or("text")
        .to_string()
}

fn report_config_error(e: &DirectoryError) -> i32 {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    1
}

async fn run_directory<S: CompanySource>(source: S, config: &CliConfig, format: &str) -> i32 {
    let engine = SearchEngine::new(source);

    // 單一公司詳情
    if let Some(id) = config.id {
        return match engine.lookup(id).await {
            Ok(Some(company)) => match render::render_detail(&company, format) {
                Ok(output) => {
                    println!("{}", output);
                    0
                }
                Err(e) => report_config_error(&e),
            },
            Ok(None) => {
                eprintln!("❌ Company {} not found", id);
                1
            }
            Err(e) => {
                tracing::error!("❌ Lookup failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                2
            }
        };
    }

    // 搜尋：來源失敗時仍輸出空結果，錯誤另行回報
    let criteria = config.criteria();
    let (companies, failure) = engine.search_or_empty(&criteria).await;

    match render::render_results(&companies, &criteria, format) {
        Ok(output) => println!("{}", output),
        Err(e) => return report_config_error(&e),
    }

    match failure {
        Some(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            2
        }
        None => {
            tracing::info!("✅ Search completed with {} results", companies.len());
            0
        }
    }
}
