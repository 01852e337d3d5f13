//! 目录加载 - 从静态JSON文件加载可选项（personality、content type、content format）

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 目录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Personality,
    ContentType,
    ContentFormat,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [
        CatalogKind::Personality,
        CatalogKind::ContentType,
        CatalogKind::ContentFormat,
    ];

    /// 目录对应的数据文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            CatalogKind::Personality => "personality_type.json",
            CatalogKind::ContentType => "content_type.json",
            CatalogKind::ContentFormat => "content_format.json",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Personality => write!(f, "personality"),
            CatalogKind::ContentType => write!(f, "content type"),
            CatalogKind::ContentFormat => write!(f, "content format"),
        }
    }
}

/// 只读的 key -> 描述 映射，保持文件中的顺序
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    kind: CatalogKind,
    entries: Vec<(String, String)>,
}

impl Catalog {
    pub fn new(kind: CatalogKind, entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            kind,
            entries: entries.into_iter().collect(),
        }
    }

    /// 从目录下加载指定类型的目录文件
    pub fn load(kind: CatalogKind, data_dir: &Path) -> Self {
        Self::load_from(kind, &data_dir.join(kind.file_name()))
    }

    /// 从指定文件加载目录。文件缺失或格式错误时记录日志并返回空目录
    pub fn load_from(kind: CatalogKind, path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("⚠️ 无法读取{}目录文件 {:?}: {}", kind, path, e);
                return Self::new(kind, Vec::new());
            }
        };

        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!("⚠️ 解析{}目录文件 {:?} 失败: {}", kind, path, e);
                return Self::new(kind, Vec::new());
            }
        };

        let Value::Object(map) = value else {
            warn!("⚠️ {}目录文件 {:?} 的顶层不是JSON对象", kind, path);
            return Self::new(kind, Vec::new());
        };

        let entries = map
            .into_iter()
            .map(|(key, value)| {
                let description = match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                (key, description)
            })
            .collect::<Vec<_>>();

        debug!("已加载{}目录: {} 项", kind, entries.len());
        Self::new(kind, entries)
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn contains(&self, key: &str) -> bool {
        self.describe(key).is_some()
    }

    pub fn describe(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, description)| description.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, description)| (key.as_str(), description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 启动时加载的全部目录
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub personalities: Catalog,
    pub content_types: Catalog,
    pub content_formats: Catalog,
}

impl Catalogs {
    pub fn load(data_dir: &Path) -> Self {
        Self {
            personalities: Catalog::load(CatalogKind::Personality, data_dir),
            content_types: Catalog::load(CatalogKind::ContentType, data_dir),
            content_formats: Catalog::load(CatalogKind::ContentFormat, data_dir),
        }
    }

    pub fn get(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Personality => &self.personalities,
            CatalogKind::ContentType => &self.content_types,
            CatalogKind::ContentFormat => &self.content_formats,
        }
    }

    /// 目录文件的完整路径
    pub fn path_of(kind: CatalogKind, data_dir: &Path) -> PathBuf {
        data_dir.join(kind.file_name())
    }
}
