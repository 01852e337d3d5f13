//! 可选模型的静态枚举

use crate::config::{ConfigError, LLMProvider};

/// 模型描述，进程启动时即确定且不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// 展示名称，例如 "GPT-4o"
    pub name: &'static str,
    /// API层面的模型标识，例如 "gpt-4o"
    pub model_id: &'static str,
    /// 所属provider
    pub provider: LLMProvider,
}

pub static MODEL_OPTIONS: [ModelDescriptor; 7] = [
    ModelDescriptor {
        name: "Gemini 2.5 Pro",
        model_id: "gemini-2.5-pro",
        provider: LLMProvider::Gemini,
    },
    ModelDescriptor {
        name: "Gemini 2.5 Flash",
        model_id: "gemini-2.5-flash",
        provider: LLMProvider::Gemini,
    },
    ModelDescriptor {
        name: "Gemini 2.5 Flash Lite",
        model_id: "gemini-2.5-flash-lite",
        provider: LLMProvider::Gemini,
    },
    ModelDescriptor {
        name: "O3",
        model_id: "o3-2025-04-16",
        provider: LLMProvider::OpenAI,
    },
    ModelDescriptor {
        name: "O4 Mini",
        model_id: "o4-mini-2025-04-16",
        provider: LLMProvider::OpenAI,
    },
    ModelDescriptor {
        name: "GPT-4o",
        model_id: "gpt-4o",
        provider: LLMProvider::OpenAI,
    },
    ModelDescriptor {
        name: "GPT-4o Mini",
        model_id: "gpt-4o-mini",
        provider: LLMProvider::OpenAI,
    },
];

impl ModelDescriptor {
    /// 按API标识查找模型
    pub fn find(model_id: &str) -> Result<&'static ModelDescriptor, ConfigError> {
        MODEL_OPTIONS
            .iter()
            .find(|model| model.model_id == model_id)
            .ok_or_else(|| ConfigError::UnknownModel(model_id.to_string()))
    }

    /// 所有可用的模型标识
    pub fn ids() -> impl Iterator<Item = &'static str> {
        MODEL_OPTIONS.iter().map(|model| model.model_id)
    }
}

impl std::fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_model() {
        let model = ModelDescriptor::find("gpt-4o").unwrap();
        assert_eq!(model.name, "GPT-4o");
        assert_eq!(model.provider, LLMProvider::OpenAI);

        let model = ModelDescriptor::find("gemini-2.5-flash").unwrap();
        assert_eq!(model.provider, LLMProvider::Gemini);
    }

    #[test]
    fn test_find_unknown_model() {
        assert_eq!(
            ModelDescriptor::find("gpt-2").unwrap_err(),
            ConfigError::UnknownModel("gpt-2".to_string())
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = ModelDescriptor::ids().collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 7);
    }
}
