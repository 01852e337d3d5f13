//! 发布器 - 将帖子发布到社交平台并返回公开链接

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::PublisherConfig;

/// 发布失败，不重试也不回滚之前的步骤
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("X username is not configured")]
    MissingUsername,

    #[error("X access token is not configured")]
    MissingCredentials,

    #[error("X rejected the post with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("X response did not contain a post id")]
    MissingPostId,

    #[error("request to X failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// 发布能力，编排流程只依赖这个接口
#[async_trait]
pub trait Publisher: Send + Sync {
    /// 发布文本，成功时返回帖子的公开链接
    async fn post(&self, text: &str) -> Result<String, PublishError>;
}

#[derive(Debug, Serialize)]
struct CreatePostRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: Option<CreatedPost>,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// X (Twitter) API v2 发布器
pub struct XPublisher {
    http: reqwest::Client,
    config: PublisherConfig,
}

impl XPublisher {
    pub fn new(config: PublisherConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn username(&self) -> Result<&str, PublishError> {
        self.config
            .username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(PublishError::MissingUsername)
    }

    fn access_token(&self) -> Result<&str, PublishError> {
        self.config
            .access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(PublishError::MissingCredentials)
    }

    /// 根据handle与平台分配的id拼接公开链接
    pub fn status_url(&self, username: &str, post_id: &str) -> String {
        format!(
            "https://{}/{}/status/{}",
            self.config.public_domain, username, post_id
        )
    }

    async fn create_post(&self, text: &str) -> Result<String, PublishError> {
        let username = self.username()?;
        let access_token = self.access_token()?;

        let endpoint = format!("{}/2/tweets", self.config.api_base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(access_token)
            .json(&CreatePostRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(rejection(status, response.text().await));
        }

        let created: CreatePostResponse = response.json().await?;
        let post_id = created.data.ok_or(PublishError::MissingPostId)?.id;

        Ok(self.status_url(username, &post_id))
    }
}

/// 非2xx响应；响应体读取失败时把原因写入body
fn rejection(status: StatusCode, body: Result<String, reqwest::Error>) -> PublishError {
    let body = body.unwrap_or_else(|e| format!("<failed to read response body: {}>", e));
    PublishError::Rejected { status, body }
}

#[async_trait]
impl Publisher for XPublisher {
    async fn post(&self, text: &str) -> Result<String, PublishError> {
        info!("📤 正在发布帖子到X...");
        let url = self.create_post(text).await?;
        info!("✅ 帖子发布成功: {}", url);
        Ok(url)
    }
}
