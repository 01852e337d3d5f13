use crate::config::Config;
use crate::generator::workflow::GenerationRequest;
use crate::llm::models::ModelDescriptor;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Postcraft - 由大模型驱动的社交媒体短帖生成与发布工具
#[derive(Parser, Debug)]
#[command(name = "postcraft")]
#[command(
    about = "Generates short social media posts with large language models, avoids repeating earlier posts, and optionally publishes them to X."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径，缺省时尝试读取当前目录下的 postcraft.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 生成一条帖子，可选发布
    Generate(GenerateArgs),

    /// 列出可选的模型与目录项
    List,

    /// 按时间倒序列出已保存的帖子
    History,

    /// 查看单条已保存的帖子
    Show {
        /// 帖子id
        id: i64,
    },

    /// 为已保存的帖子补充发布链接
    AttachUrl {
        /// 帖子id
        id: i64,
        /// 帖子的公开链接
        url: String,
    },
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// 使用的模型
    #[arg(short, long, value_parser = PossibleValuesParser::new(ModelDescriptor::ids()))]
    pub model: String,

    /// personality目录中的key
    #[arg(short, long)]
    pub personality: String,

    /// content type目录中的key
    #[arg(short = 't', long)]
    pub content_type: String,

    /// 不使用hashtag
    #[arg(long)]
    pub no_hashtags: bool,

    /// 不使用emoji
    #[arg(long)]
    pub no_emojis: bool,

    /// 发布到X，否则只预览
    #[arg(long)]
    pub post: bool,
}

impl Args {
    /// 加载配置并叠加命令行参数
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if self.verbose {
            config.verbose = true;
        }
        Ok(config)
    }
}

impl GenerateArgs {
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest {
            model: self.model.clone(),
            personality: self.personality.clone(),
            content_type: self.content_type.clone(),
            include_hashtags: !self.no_hashtags,
            include_emojis: !self.no_emojis,
            publish: self.post,
        }
    }
}
