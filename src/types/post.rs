use chrono::{DateTime, Utc};
use thiserror::Error;

/// 当前唯一支持的内容呈现形式
pub const CONTENT_FORMAT_TEXT: &str = "Text";

/// 一条生成的帖子及其发布结果
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPost {
    /// 由仓库在插入时分配，持久化之前为空
    pub id: Option<i64>,
    /// 生成所用模型的标识
    pub model_name: String,
    /// personality目录中的key
    pub personality: String,
    /// content type目录中的key
    pub content_type: String,
    pub content_format: String,
    /// 帖子正文
    pub text: String,
    /// 发布成功后的公开链接
    pub posted_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq)]
pub enum PostValidationError {
    #[error("field `{0}` is required and must not be empty")]
    EmptyField(&'static str),
}

impl GeneratedPost {
    pub fn new(
        model_name: impl Into<String>,
        personality: impl Into<String>,
        content_type: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            model_name: model_name.into(),
            personality: personality.into(),
            content_type: content_type.into(),
            content_format: CONTENT_FORMAT_TEXT.to_string(),
            text: text.into(),
            posted_url: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_posted_url(mut self, url: impl Into<String>) -> Self {
        self.posted_url = Some(url.into());
        self
    }

    /// 校验持久化所需的字段
    pub fn validate(&self) -> Result<(), PostValidationError> {
        let required = [
            ("text", &self.text),
            ("model_name", &self.model_name),
            ("personality", &self.personality),
            ("content_type", &self.content_type),
            ("content_format", &self.content_format),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(PostValidationError::EmptyField(field));
            }
        }
        Ok(())
    }

    /// 截断后的正文，用于日志和列表展示
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.text.chars().take(max_chars).collect();
        if self.text.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

impl std::fmt::Display for GeneratedPost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Post(text='{}', posted_url='{}')>",
            self.preview(50),
            self.posted_url.as_deref().unwrap_or("None")
        )
    }
}
