//! LLM客户端 - 提供统一的内容生成接口

use async_trait::async_trait;
use rig::completion::PromptError;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, LLMConfig, LLMProvider};
use crate::llm::models::ModelDescriptor;

mod providers;

pub use providers::ProviderClient;

/// 模型调用错误，不做重试，直接向上传播，由调用方统一记录
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request for model `{model}` failed: {source}")]
    Request {
        provider: LLMProvider,
        model: String,
        #[source]
        source: PromptError,
    },

    #[error("model `{0}` returned an empty response")]
    EmptyResponse(String),
}

/// 内容生成能力，编排流程只依赖这个接口
#[async_trait]
pub trait ContentModel: Send + Sync {
    /// 生成所用模型的API标识
    fn model_id(&self) -> &str;

    /// 发送prompt并返回去除首尾空白后的生成文本
    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// LLM客户端，绑定一个模型及其provider
#[derive(Clone)]
pub struct LLMClient {
    client: ProviderClient,
    model: &'static ModelDescriptor,
}

impl LLMClient {
    /// 为指定模型创建客户端，配置缺失时立即失败，不发起任何请求
    pub fn new(config: &LLMConfig, model: &'static ModelDescriptor) -> Result<Self, ConfigError> {
        let provider_config = config.provider_config(model.provider)?;
        let client = ProviderClient::new(provider_config)?;
        Ok(Self { client, model })
    }

    pub fn model(&self) -> &'static ModelDescriptor {
        self.model
    }
}

#[async_trait]
impl ContentModel for LLMClient {
    fn model_id(&self) -> &str {
        self.model.model_id
    }

    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError> {
        info!("🔄 正在调用模型 {} 生成内容...", self.model.name);

        let response = self
            .client
            .prompt(self.model.model_id, prompt)
            .await
            .map_err(|source| ProviderError::Request {
                provider: self.client.provider(),
                model: self.model.model_id.to_string(),
                source,
            })?;

        let text = response.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(self.model.model_id.to_string()));
        }
        Ok(text.to_string())
    }
}
