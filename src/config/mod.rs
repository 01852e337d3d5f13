use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 默认的本地覆盖配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "postcraft.toml";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "gemini")]
    Gemini,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Gemini => write!(f, "gemini"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "gemini" => Ok(LLMProvider::Gemini),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 配置错误，均在发起任何网络请求之前抛出
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown LLM provider `{0}`")]
    UnknownProvider(String),

    #[error("unknown model `{0}`")]
    UnknownModel(String),

    #[error("no API configuration found for provider `{0}`")]
    MissingProviderConfig(LLMProvider),

    #[error("API key for provider `{0}` is not configured")]
    MissingApiKey(LLMProvider),

    #[error("base URL is required for provider `{0}` but not configured")]
    MissingBaseUrl(LLMProvider),
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 目录数据文件（personality/content type/content format）所在目录
    pub data_dir: PathBuf,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 发布平台配置
    pub publisher: PublisherConfig,

    /// 数据库配置
    pub database: DatabaseConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// 已配置的provider列表
    pub providers: Vec<ProviderConfig>,
}

/// 单个provider的接入配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    /// provider名称，例如 openai、gemini
    pub name: String,

    /// LLM API KEY
    #[serde(default)]
    pub api_key: String,

    /// LLM API基地址
    #[serde(default)]
    pub base_url: Option<String>,
}

/// 发布平台（X）配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PublisherConfig {
    /// 账号handle，用于拼接帖子链接
    pub username: Option<String>,

    /// OAuth 2.0 用户访问令牌
    pub access_token: Option<String>,

    /// X API基地址
    pub api_base_url: String,

    /// 帖子公开链接使用的域名
    pub public_domain: String,
}

/// 数据库配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 数据库连接地址
    pub url: String,
}

impl ProviderConfig {
    pub fn new(provider: LLMProvider) -> Self {
        Self {
            name: provider.to_string(),
            api_key: String::new(),
            base_url: None,
        }
    }

    /// 解析provider名称
    pub fn provider(&self) -> Result<LLMProvider, ConfigError> {
        self.name
            .parse::<LLMProvider>()
            .map_err(|_| ConfigError::UnknownProvider(self.name.clone()))
    }
}

impl LLMConfig {
    /// 校验所有provider名称，任何一个无法识别都视为配置错误
    pub fn validate(&self) -> Result<(), ConfigError> {
        for entry in &self.providers {
            entry.provider()?;
        }
        Ok(())
    }

    /// 查找指定provider的配置；列表中任意位置存在无法识别的名称都会报错
    pub fn provider_config(&self, provider: LLMProvider) -> Result<&ProviderConfig, ConfigError> {
        self.validate()?;
        self.providers
            .iter()
            .find(|entry| entry.provider().ok() == Some(provider))
            .ok_or(ConfigError::MissingProviderConfig(provider))
    }

    fn provider_config_mut(&mut self, provider: LLMProvider) -> &mut ProviderConfig {
        let position = self
            .providers
            .iter()
            .position(|entry| entry.provider().ok() == Some(provider));

        let index = match position {
            Some(index) => index,
            None => {
                self.providers.push(ProviderConfig::new(provider));
                self.providers.len() - 1
            }
        };
        &mut self.providers[index]
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 按 默认值 -> 配置文件 -> 环境变量 的顺序解析配置
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_CONFIG_FILE);

                if default_config_path.exists() {
                    Self::from_file(&default_config_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.llm.validate()?;
        Ok(config)
    }

    /// 用环境变量覆盖配置，空字符串视为未设置
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = var("OPENAI_API_KEY") {
            self.llm.provider_config_mut(LLMProvider::OpenAI).api_key = api_key;
        }
        if let Some(base_url) = var("OPENAI_BASE_URL") {
            self.llm.provider_config_mut(LLMProvider::OpenAI).base_url = Some(base_url);
        }
        if let Some(api_key) = var("GEMINI_API_KEY") {
            self.llm.provider_config_mut(LLMProvider::Gemini).api_key = api_key;
        }
        if let Some(base_url) = var("GEMINI_BASE_URL") {
            self.llm.provider_config_mut(LLMProvider::Gemini).base_url = Some(base_url);
        }

        if let Some(username) = var("X_USERNAME") {
            self.publisher.username = Some(username);
        }
        if let Some(access_token) = var("X_ACCESS_TOKEN") {
            self.publisher.access_token = Some(access_token);
        }
        if let Some(api_base_url) = var("X_API_BASE_URL") {
            self.publisher.api_base_url = api_base_url;
        }

        if let Some(url) = var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(data_dir) = var("POSTCRAFT_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            llm: LLMConfig::default(),
            publisher: PublisherConfig::default(),
            database: DatabaseConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            providers: vec![
                ProviderConfig::new(LLMProvider::OpenAI),
                ProviderConfig::new(LLMProvider::Gemini),
            ],
        }
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            username: None,
            access_token: None,
            api_base_url: String::from("https://api.x.com"),
            public_domain: String::from("x.com"),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("sqlite://postcraft.sqlite?mode=rwc"),
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
