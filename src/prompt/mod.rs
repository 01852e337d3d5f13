//! Prompt构建 - 组装生成帖子的指令文本，并附上历史帖子以避免重复

use tracing::{debug, warn};

use crate::repository::PostRepository;
use crate::types::GeneratedPost;

pub const HASHTAGS_INCLUDE: &str = "Include 1-3 relevant hashtags to increase visibility.";
pub const HASHTAGS_EXCLUDE: &str = "Do not include any hashtags.";
pub const EMOJIS_INCLUDE: &str = "Use emojis to enhance engagement and express your personality.";
pub const EMOJIS_EXCLUDE: &str = "Do not use emojis.";

/// 历史为空时使用的占位文本
pub const EMPTY_HISTORY: &str = "None";

/// 构建prompt所需的参数
#[derive(Debug, Clone, PartialEq)]
pub struct PromptParams {
    pub personality: String,
    pub content_type: String,
    pub content_format: String,
    pub include_hashtags: bool,
    pub include_emojis: bool,
}

/// Prompt构建器，唯一的副作用是读取历史帖子
pub struct PromptBuilder<'a> {
    repository: &'a dyn PostRepository,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(repository: &'a dyn PostRepository) -> Self {
        Self { repository }
    }

    pub async fn build(&self, params: &PromptParams) -> String {
        let history = match self.repository.get_all().await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("⚠️ 读取历史帖子失败，按无历史处理: {}", e);
                Vec::new()
            }
        };
        debug!("prompt中附带 {} 条历史帖子", history.len());

        render_prompt(params, &render_history(&history))
    }
}

/// 将历史帖子渲染为列表，调用方负责按创建时间倒序传入
pub fn render_history(posts: &[GeneratedPost]) -> String {
    if posts.is_empty() {
        return EMPTY_HISTORY.to_string();
    }
    posts
        .iter()
        .map(|post| format!("- {}", post.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 将参数与历史插入固定模板，结果原样返回
pub fn render_prompt(params: &PromptParams, previous_posts: &str) -> String {
    let hashtag_instructions = if params.include_hashtags {
        HASHTAGS_INCLUDE
    } else {
        HASHTAGS_EXCLUDE
    };
    let emoji_instructions = if params.include_emojis {
        EMOJIS_INCLUDE
    } else {
        EMOJIS_EXCLUDE
    };

    format!(
        r#"**Persona:** You are a virtual social media influencer on X.com with a {personality} personality.

**Objective:** Generate a single, engaging tweet (maximum 280 characters) that is:

* Original and provides value to the audience (informative, entertaining, or engaging).
* Concise, clear, and written in a natural, human-like style (avoid robotic phrasing).
* Compliant with X.com's content policies (avoid spam or harmful content).

**Content:** The tweet should be about {content_type} and formatted as {content_format}.

**Instructions:**

1.  Write ONLY the tweet text. Do not include a title, introduction, or signature.
2.  Use a conversational tone, as if speaking directly to your followers.
3.  {hashtag_instructions}
4.  {emoji_instructions}
5.  Do not generate tweets that are similar to the previous tweets.

**Previous Tweets (Do NOT repeat or directly reference these):**
{previous_posts}

**Example:**
(Provide 1-2 examples of good tweets here, tailored to the personality and content type)

**Your Tweet:**"#,
        personality = params.personality,
        content_type = params.content_type,
        content_format = params.content_format,
    )
}
