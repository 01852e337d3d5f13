use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogKind, Catalogs};
use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::llm::client::LLMClient;
use crate::llm::models::ModelDescriptor;
use crate::prompt::{PromptBuilder, PromptParams};
use crate::publisher::XPublisher;
use crate::repository::SqlitePostRepository;
use crate::types::{CONTENT_FORMAT_TEXT, GeneratedPost};

/// 一次生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// 模型API标识
    pub model: String,
    pub personality: String,
    pub content_type: String,
    pub include_hashtags: bool,
    pub include_emojis: bool,
    /// 是否真正发布，否则只预览
    pub publish: bool,
}

/// 一次生成的结果
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// 生成的帖子，发布成功时带有 posted_url
    pub post: GeneratedPost,
    /// 保存到仓库后的id；未发布或保存失败时为空
    pub record_id: Option<i64>,
}

impl GenerationOutcome {
    pub fn published(&self) -> bool {
        self.post.posted_url.is_some()
    }
}

/// 请求参数校验错误
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("the {kind} catalog is empty, check {path:?}")]
    EmptyCatalog { kind: CatalogKind, path: PathBuf },

    #[error("invalid {kind} `{value}`, expected one of: {choices}")]
    InvalidChoice {
        kind: CatalogKind,
        value: String,
        choices: String,
    },
}

/// 校验请求中的模型与目录选项，在任何其他工作之前执行
pub fn validate_request(
    request: &GenerationRequest,
    catalogs: &Catalogs,
    data_dir: &Path,
) -> Result<&'static ModelDescriptor> {
    let model = ModelDescriptor::find(&request.model)?;
    ensure_choice(&catalogs.personalities, &request.personality, data_dir)?;
    ensure_choice(&catalogs.content_types, &request.content_type, data_dir)?;
    Ok(model)
}

fn ensure_choice(catalog: &Catalog, value: &str, data_dir: &Path) -> Result<(), ValidationError> {
    if catalog.is_empty() {
        return Err(ValidationError::EmptyCatalog {
            kind: catalog.kind(),
            path: Catalogs::path_of(catalog.kind(), data_dir),
        });
    }
    if !catalog.contains(value) {
        return Err(ValidationError::InvalidChoice {
            kind: catalog.kind(),
            value: value.to_string(),
            choices: catalog.keys().collect::<Vec<_>>().join(", "),
        });
    }
    Ok(())
}

/// 启动帖子生成工作流
pub async fn launch(config: &Config, request: &GenerationRequest) -> Result<GenerationOutcome> {
    let catalogs = Catalogs::load(&config.data_dir);
    let model = validate_request(request, &catalogs, &config.data_dir)?;

    let llm_client = LLMClient::new(&config.llm, model)
        .context(format!("Failed to initialize API client for model {}", model.model_id))?;

    let repository = SqlitePostRepository::connect(&config.database.url)
        .await
        .context(format!("Failed to open database {}", config.database.url))?;

    let publisher = XPublisher::new(config.publisher.clone());

    let context = GeneratorContext::new(
        config.clone(),
        catalogs,
        Arc::new(llm_client),
        Arc::new(repository),
        Arc::new(publisher),
    );

    run_pipeline(&context, request).await
}

/// 执行 prompt构建 -> 模型调用 -> 发布 -> 保存
///
/// 任何一步失败都会终止运行；唯一的例外是发布成功之后的保存失败，
/// 此时仅记录日志，结果中的 `record_id` 为空。
pub async fn run_pipeline(
    context: &GeneratorContext,
    request: &GenerationRequest,
) -> Result<GenerationOutcome> {
    validate_request(request, &context.catalogs, &context.config.data_dir)?;

    let params = PromptParams {
        personality: request.personality.clone(),
        content_type: request.content_type.clone(),
        content_format: CONTENT_FORMAT_TEXT.to_string(),
        include_hashtags: request.include_hashtags,
        include_emojis: request.include_emojis,
    };
    let prompt = PromptBuilder::new(context.repository.as_ref())
        .build(&params)
        .await;

    info!("📝 正在生成帖子内容...");
    let text = context
        .model
        .invoke(&prompt)
        .await
        .context("Content generation failed")?;

    println!("\n--- Generated Post ---");
    println!("{}", text);
    println!("----------------------\n");

    let mut post = GeneratedPost::new(
        context.model.model_id(),
        &request.personality,
        &request.content_type,
        text,
    );

    if !request.publish {
        return Ok(GenerationOutcome {
            post,
            record_id: None,
        });
    }

    let url = context
        .publisher
        .post(&post.text)
        .await
        .context("Failed to post")?;
    if url.trim().is_empty() {
        bail!("Failed to post: the platform returned no URL");
    }
    post.posted_url = Some(url);

    info!("💾 正在保存帖子到数据库...");
    let record_id = match context.repository.insert(&post).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("⚠️ 帖子已发布，但保存到数据库失败: {}", e);
            None
        }
    };

    Ok(GenerationOutcome { post, record_id })
}
