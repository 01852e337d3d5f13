//! 已保存帖子与可选项的查询、展示

use anyhow::{Context, Result};

use crate::catalog::{CatalogKind, Catalogs};
use crate::llm::models::MODEL_OPTIONS;
use crate::repository::{PostRepository, UpdateOutcome};
use crate::types::GeneratedPost;

const HISTORY_PREVIEW_CHARS: usize = 80;

/// 渲染全部可选模型与目录
pub fn render_options(catalogs: &Catalogs) -> String {
    let mut lines = vec!["Models:".to_string()];
    for model in MODEL_OPTIONS.iter() {
        lines.push(format!(
            "  {:<22} {} ({})",
            model.model_id, model.name, model.provider
        ));
    }

    for kind in CatalogKind::ALL {
        let catalog = catalogs.get(kind);
        lines.push(String::new());
        lines.push(format!("{} options:", capitalize(&kind.to_string())));
        if catalog.is_empty() {
            lines.push("  (none)".to_string());
            continue;
        }
        for (key, description) in catalog.entries() {
            lines.push(format!("  {key}: {description}"));
        }
    }

    lines.join("\n")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 每条记录一行：id、时间、模型、发布状态、正文摘要
pub fn render_history(posts: &[GeneratedPost]) -> String {
    if posts.is_empty() {
        return "No posts recorded yet.".to_string();
    }

    posts
        .iter()
        .map(|post| {
            let id = post
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let status = post.posted_url.as_deref().unwrap_or("not posted");
            format!(
                "#{} [{}] {} | {} | {}",
                id,
                post.created_at.format("%Y-%m-%d %H:%M:%S"),
                post.model_name,
                status,
                post.preview(HISTORY_PREVIEW_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 单条记录的完整展示
pub fn render_post(post: &GeneratedPost) -> String {
    let id = post
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "ID:             {}\nCreated at:     {}\nModel:          {}\nPersonality:    {}\nContent type:   {}\nContent format: {}\nPosted URL:     {}\n\n{}",
        id,
        post.created_at.to_rfc3339(),
        post.model_name,
        post.personality,
        post.content_type,
        post.content_format,
        post.posted_url.as_deref().unwrap_or("(not posted)"),
        post.text
    )
}

/// 读取全部记录并渲染
pub async fn history(repository: &dyn PostRepository) -> Result<String> {
    let posts = repository
        .get_all()
        .await
        .context("Failed to read post history")?;
    Ok(render_history(&posts))
}

/// 读取并渲染单条记录，不存在时返回提示信息
pub async fn show(repository: &dyn PostRepository, id: i64) -> Result<String> {
    let post = repository
        .get_by_id(id)
        .await
        .context(format!("Failed to read post {}", id))?;

    Ok(match post {
        Some(post) => render_post(&post),
        None => format!("No post with id {id}."),
    })
}

/// 为已保存的帖子补充发布链接
pub async fn attach_url(
    repository: &dyn PostRepository,
    id: i64,
    url: &str,
) -> Result<UpdateOutcome> {
    repository
        .update_posted_url(id, url)
        .await
        .context(format!("Failed to update post {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::repository::SqlitePostRepository;

    fn sample_catalogs() -> Catalogs {
        let personalities = vec![(
            "Enthusiastic Optimist".to_string(),
            "Always sees the bright side".to_string(),
        )];
        let formats = vec![("Text".to_string(), "Plain text post".to_string())];

        Catalogs {
            personalities: Catalog::new(CatalogKind::Personality, personalities),
            content_types: Catalog::new(CatalogKind::ContentType, Vec::new()),
            content_formats: Catalog::new(CatalogKind::ContentFormat, formats),
        }
    }

    #[test]
    fn test_render_options_lists_models_and_catalogs() {
        let rendered = render_options(&sample_catalogs());

        assert!(rendered.starts_with("Models:"));
        for model in MODEL_OPTIONS.iter() {
            assert!(rendered.contains(model.model_id));
        }
        assert!(rendered.contains("Personality options:"));
        assert!(rendered.contains("  Enthusiastic Optimist: Always sees the bright side"));
        assert!(rendered.contains("Content type options:\n  (none)"));
        assert!(rendered.contains("Content format options:\n  Text: Plain text post"));
    }

    #[test]
    fn test_render_history_empty() {
        assert_eq!(render_history(&[]), "No posts recorded yet.");
    }

    #[test]
    fn test_render_post_marks_unposted() {
        let post = GeneratedPost::new("gpt-4o", "Witty Sage", "Daily Motivation", "Keep going.");
        let rendered = render_post(&post);

        assert!(rendered.contains("ID:             -"));
        assert!(rendered.contains("Posted URL:     (not posted)"));
        assert!(rendered.ends_with("\n\nKeep going."));
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let repository = SqlitePostRepository::in_memory().await.unwrap();
        let mut older = GeneratedPost::new("gpt-4o", "Witty Sage", "Daily Motivation", "older");
        older.created_at = chrono::Utc::now() - chrono::Duration::hours(1);
        repository.insert(&older).await.unwrap();
        repository
            .insert(
                &GeneratedPost::new("gpt-4o-mini", "Witty Sage", "Daily Motivation", "newer")
                    .with_posted_url("https://x.com/example/status/7"),
            )
            .await
            .unwrap();

        let rendered = history(&repository).await.unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#2 "));
        assert!(lines[0].contains("https://x.com/example/status/7"));
        assert!(lines[0].ends_with("| newer"));
        assert!(lines[1].starts_with("#1 "));
        assert!(lines[1].contains("not posted"));
    }

    #[tokio::test]
    async fn test_show_existing_and_missing() {
        let repository = SqlitePostRepository::in_memory().await.unwrap();
        let id = repository
            .insert(&GeneratedPost::new(
                "gpt-4o",
                "Enthusiastic Optimist",
                "Informative Snippets and Facts",
                "Honey never spoils.",
            ))
            .await
            .unwrap();

        let rendered = show(&repository, id).await.unwrap();
        assert!(rendered.contains("Personality:    Enthusiastic Optimist"));
        assert!(rendered.ends_with("Honey never spoils."));

        assert_eq!(show(&repository, 999).await.unwrap(), "No post with id 999.");
    }

    #[tokio::test]
    async fn test_attach_url() {
        let repository = SqlitePostRepository::in_memory().await.unwrap();
        let id = repository
            .insert(&GeneratedPost::new("gpt-4o", "Witty Sage", "Daily Motivation", "text"))
            .await
            .unwrap();

        let outcome = attach_url(&repository, id, "https://x.com/example/status/12345")
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(
            repository
                .get_by_id(id)
                .await
                .unwrap()
                .unwrap()
                .posted_url
                .as_deref(),
            Some("https://x.com/example/status/12345")
        );

        let missing = attach_url(&repository, id + 100, "https://x.com/example/status/1")
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::NotFound);
    }
}
