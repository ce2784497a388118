//! 统一配置中心
//!
//! 提供长帖发布工具的全局配置，包括：
//! - 发布参数（条目时间间隔）
//! - 草稿参数（草稿ID长度）
//! - 日志过滤
//! - 开发签名密钥
//!
//! 加载顺序：内置默认值 -> 可选配置文件（`THREAD_CONFIG_FILE`）-> 环境变量（`THREAD_*`）。

use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// 指定配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "THREAD_CONFIG_FILE";
/// 环境变量前缀，嵌套字段用 `__` 分隔，例如 `THREAD_PUBLISH__ITEM_SPACING_SECONDS`
pub const ENV_PREFIX: &str = "THREAD_";

/// 全局应用配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub publish: PublishSettings,
    #[serde(default)]
    pub drafts: DraftSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub signer: SignerSettings,
}

/// 发布配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSettings {
    /// 相邻条目的创建时间间隔（秒）
    pub item_spacing_seconds: i64,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            item_spacing_seconds: 5,
        }
    }
}

/// 草稿配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSettings {
    pub id_length: usize,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self { id_length: 8 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` 指令
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// 本地开发签名器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSettings {
    /// HMAC 密钥，只用于本地联调
    pub dev_secret: String,
}

impl Default for SignerSettings {
    fn default() -> Self {
        Self {
            dev_secret: "thread-publisher-dev-secret".to_string(),
        }
    }
}

impl AppConfig {
    /// 按优先级组合所有配置来源
    pub fn figment() -> Figment {
        let mut fig = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            if path.ends_with(".yml") || path.ends_with(".yaml") {
                fig = fig.merge(Yaml::file(path));
            } else if path.ends_with(".json") {
                fig = fig.merge(Json::file(path));
            } else {
                fig = fig.merge(Toml::file(path));
            }
        }
        fig.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 加载并校验配置
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(fig: Figment) -> Result<Self, ConfigError> {
        let cfg: AppConfig = fig.extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.publish.item_spacing_seconds <= 0 {
            return Err(ConfigError::InvalidPublishConfig(
                "item spacing must be greater than 0 seconds".to_string(),
            ));
        }

        if !(4..=64).contains(&self.drafts.id_length) {
            return Err(ConfigError::InvalidDraftConfig(
                "draft id length should be between 4-64".to_string(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::InvalidLoggingConfig(
                "log filter cannot be empty".to_string(),
            ));
        }

        if self.signer.dev_secret.is_empty() {
            return Err(ConfigError::InvalidSignerConfig(
                "dev secret cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("Invalid publish configuration: {0}")]
    InvalidPublishConfig(String),
    #[error("Invalid draft configuration: {0}")]
    InvalidDraftConfig(String),
    #[error("Invalid logging configuration: {0}")]
    InvalidLoggingConfig(String),
    #[error("Invalid signer configuration: {0}")]
    InvalidSignerConfig(String),
}
