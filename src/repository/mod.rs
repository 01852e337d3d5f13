//! 内容仓库 - 生成帖子的持久化接口
//!
//! 所有操作都返回 `Result`，"记录不存在" 以值的形式表达（`Ok(None)` /
//! `UpdateOutcome::NotFound`），只有底层失败才会返回 `Err`。

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{GeneratedPost, PostValidationError};

mod sqlite;

pub use sqlite::SqlitePostRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("invalid post: {0}")]
    Invalid(#[from] PostValidationError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 更新操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// 没有匹配的记录，不做任何修改
    NotFound,
}

/// 生成帖子的仓库。只追加，不提供删除
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 校验并保存帖子，返回仓库分配的id
    async fn insert(&self, post: &GeneratedPost) -> Result<i64, RepositoryError>;

    /// 为指定id的记录设置发布链接
    async fn update_posted_url(&self, id: i64, url: &str)
    -> Result<UpdateOutcome, RepositoryError>;

    /// 全部记录，按创建时间倒序
    async fn get_all(&self) -> Result<Vec<GeneratedPost>, RepositoryError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<GeneratedPost>, RepositoryError>;
}
