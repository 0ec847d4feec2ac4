use crate::domain::model::RaffleInfo;
use crate::utils::error::{LedgerError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LEDGER_FILE: &str = "ledger.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub raffle: RaffleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaffleConfig {
    pub title: Option<String>,
    pub prize: Option<String>,
    pub prize_features: Option<Vec<String>>,
    pub draw_date: Option<String>,
    pub draw_source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub ledger_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LedgerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LedgerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RAFFLE_DATA_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| LedgerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_dir(&self) -> &str {
        self.storage.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    pub fn ledger_file(&self) -> &str {
        self.storage.ledger_file.as_deref().unwrap_or(DEFAULT_LEDGER_FILE)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    /// 未設定的欄位沿用預設抽獎資訊
    pub fn raffle_info(&self) -> RaffleInfo {
        let defaults = RaffleInfo::default();
        RaffleInfo {
            title: self.raffle.title.clone().unwrap_or(defaults.title),
            prize: self.raffle.prize.clone().unwrap_or(defaults.prize),
            prize_features: self
                .raffle
                .prize_features
                .clone()
                .unwrap_or(defaults.prize_features),
            draw_date: self.raffle.draw_date.clone().unwrap_or(defaults.draw_date),
            draw_source: self.raffle.draw_source.clone().unwrap_or(defaults.draw_source),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_path("storage.data_dir", self.data_dir())?;
        validate_path("storage.ledger_file", self.ledger_file())?;
        validate_file_extension("storage.ledger_file", self.ledger_file(), &["json"])?;

        if let Some(title) = &self.raffle.title {
            validate_non_empty_string("raffle.title", title)?;
        }

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(LedgerError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}
