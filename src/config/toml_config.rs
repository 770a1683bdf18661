use crate::core::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub directory: DirectoryInfo,
    pub source: SourceConfig,
    pub seed: Option<SeedConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: String,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

impl DirectoryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DIRECTORY_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // 驗證資料來源類型
        let valid_types = ["rest", "memory"];
        if !valid_types.contains(&self.source.r#type.as_str()) {
            return Err(DirectoryError::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: self.source.r#type.clone(),
                reason: format!("Unsupported source. Valid types: {}", valid_types.join(", ")),
            });
        }

        // REST 來源必須有端點
        match self.source.r#type.as_str() {
            "rest" => match &self.source.endpoint {
                Some(endpoint) => {
                    crate::utils::validation::validate_url("source.endpoint", endpoint)?;
                }
                None => {
                    return Err(DirectoryError::MissingConfigError {
                        field: "source.endpoint".to_string(),
                    });
                }
            },
            _ => match &self.seed {
                Some(seed) => {
                    crate::utils::validation::validate_path("seed.path", &seed.path)?;
                }
                None => {
                    return Err(DirectoryError::MissingConfigError {
                        field: "seed.path".to_string(),
                    });
                }
            },
        }

        // 驗證超時設定
        if let Some(timeout) = self.source.timeout_seconds {
            crate::utils::validation::validate_positive_number(
                "source.timeout_seconds",
                timeout as usize,
                1,
            )?;
        }

        // 驗證輸出格式
        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            crate::utils::validation::validate_output_format("output.format", format)?;
        }

        Ok(())
    }

    /// 取得種子檔路徑
    pub fn seed_path(&self) -> Option<&str> {
        self.seed.as_ref().map(|s| s.path.as_str())
    }

    /// 取得輸出格式
    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }

    /// 取得額外的請求標頭
    pub fn headers(&self) -> Vec<(String, String)> {
        self.source
            .headers
            .as_ref()
            .map(|headers| {
                headers
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 是否使用 REST 來源
    pub fn is_rest_source(&self) -> bool {
        self.source.r#type == "rest"
    }
}

impl ConfigProvider for DirectoryConfig {
    fn endpoint(&self) -> &str {
        self.source.endpoint.as_deref().unwrap_or("")
    }

    fn api_key(&self) -> Option<&str> {
        self.source.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
