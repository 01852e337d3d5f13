use std::sync::Arc;

use crate::{
    catalog::Catalogs, config::Config, llm::client::ContentModel, publisher::Publisher,
    repository::PostRepository,
};

/// 单次运行的依赖集合，每次运行各自构建，不跨运行复用
#[derive(Clone)]
pub struct GeneratorContext {
    /// 配置
    pub config: Config,
    /// 启动时加载的目录
    pub catalogs: Catalogs,
    /// 内容生成模型
    pub model: Arc<dyn ContentModel>,
    /// 帖子仓库
    pub repository: Arc<dyn PostRepository>,
    /// 发布器，仅在要求发布时调用
    pub publisher: Arc<dyn Publisher>,
}

impl GeneratorContext {
    pub fn new(
        config: Config,
        catalogs: Catalogs,
        model: Arc<dyn ContentModel>,
        repository: Arc<dyn PostRepository>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            catalogs,
            model,
            repository,
            publisher,
        }
    }
}
