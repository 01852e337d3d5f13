//! LLM Provider支持模块

use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::{Prompt, PromptError},
};

use crate::config::{ConfigError, LLMProvider, ProviderConfig};

/// 统一的Provider客户端枚举
///
/// 两个provider都通过兼容OpenAI Chat Completions的接口访问，
/// 区别仅在于基地址与鉴权信息。
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    Gemini(rig::providers::openai::Client),
}

impl ProviderClient {
    /// 根据配置创建相应的provider客户端
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let provider = config.provider()?;
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(provider));
        }
        let base_url = config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        match provider {
            LLMProvider::OpenAI => {
                let client = match base_url {
                    Some(base_url) => rig::providers::openai::Client::builder(&config.api_key)
                        .base_url(base_url)
                        .build(),
                    None => rig::providers::openai::Client::builder(&config.api_key).build(),
                };
                Ok(ProviderClient::OpenAI(client))
            }
            LLMProvider::Gemini => {
                let base_url = base_url.ok_or(ConfigError::MissingBaseUrl(provider))?;
                let client = rig::providers::openai::Client::builder(&config.api_key)
                    .base_url(base_url)
                    .build();
                Ok(ProviderClient::Gemini(client))
            }
        }
    }

    pub fn provider(&self) -> LLMProvider {
        match self {
            ProviderClient::OpenAI(_) => LLMProvider::OpenAI,
            ProviderClient::Gemini(_) => LLMProvider::Gemini,
        }
    }

    /// 创建单轮对话Agent，不带系统提示词与工具
    fn create_agent(&self, model: &str) -> Agent<rig::providers::openai::CompletionModel> {
        match self {
            ProviderClient::OpenAI(client) | ProviderClient::Gemini(client) => client
                .completion_model(model)
                .completions_api()
                .into_agent_builder()
                .build(),
        }
    }

    /// 以单条user消息发起一次chat completion请求
    pub async fn prompt(&self, model: &str, prompt: &str) -> Result<String, PromptError> {
        let agent = self.create_agent(model);
        agent.prompt(prompt).await
    }
}
