use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::{PostRepository, RepositoryError, UpdateOutcome};
use crate::types::GeneratedPost;

const CREATE_TWEETS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tweets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_name TEXT NOT NULL,
    personality TEXT NOT NULL,
    content_type TEXT NOT NULL,
    content_format TEXT NOT NULL,
    tweet_text TEXT NOT NULL,
    posted_url TEXT,
    created_at TEXT NOT NULL
)
"#;

const SELECT_COLUMNS: &str = "SELECT id, model_name, personality, content_type, content_format, tweet_text, posted_url, created_at FROM tweets";

/// tweets表的一行
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    model_name: String,
    personality: String,
    content_type: String,
    content_format: String,
    tweet_text: String,
    posted_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for GeneratedPost {
    fn from(row: PostRow) -> Self {
        Self {
            id: Some(row.id),
            model_name: row.model_name,
            personality: row.personality,
            content_type: row.content_type,
            content_format: row.content_format,
            text: row.tweet_text,
            posted_url: row.posted_url,
            created_at: row.created_at,
        }
    }
}

/// 基于SQLite的帖子仓库
#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    /// 连接数据库并确保表结构存在
    pub async fn connect(url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // 单次运行只需要一个连接；内存库也依赖这个连接常驻
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TWEETS_TABLE).execute(&pool).await?;
        debug!("数据库已就绪: {}", url);

        Ok(Self { pool })
    }

    /// 内存数据库，主要用于测试
    pub async fn in_memory() -> Result<Self, RepositoryError> {
        Self::connect("sqlite::memory:").await
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn insert(&self, post: &GeneratedPost) -> Result<i64, RepositoryError> {
        post.validate()?;

        let result = sqlx::query(
            "INSERT INTO tweets (model_name, personality, content_type, content_format, tweet_text, posted_url, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&post.model_name)
        .bind(&post.personality)
        .bind(&post.content_type)
        .bind(&post.content_format)
        .bind(&post.text)
        .bind(post.posted_url.as_deref())
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!("💾 帖子已保存到数据库，id = {}", id);
        Ok(id)
    }

    async fn update_posted_url(
        &self,
        id: i64,
        url: &str,
    ) -> Result<UpdateOutcome, RepositoryError> {
        let result = sqlx::query("UPDATE tweets SET posted_url = ? WHERE id = ?")
            .bind(url)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!("⚠️ 未找到id为 {} 的帖子，跳过更新", id);
            return Ok(UpdateOutcome::NotFound);
        }

        info!("帖子 {} 的链接已更新为 {}", id, url);
        Ok(UpdateOutcome::Updated)
    }

    async fn get_all(&self) -> Result<Vec<GeneratedPost>, RepositoryError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{} ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GeneratedPost::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<GeneratedPost>, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(GeneratedPost::from))
    }
}
