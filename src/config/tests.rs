#[cfg(test)]
mod tests {
    use crate::config::{
        Config, ConfigError, DatabaseConfig, LLMConfig, LLMProvider, ProviderConfig,
        PublisherConfig,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.llm.providers.len(), 2);
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "OpenAI".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "gemini".parse::<LLMProvider>().unwrap(),
            LLMProvider::Gemini
        );

        assert!("anthropic".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::Gemini.to_string(), "gemini");
    }

    #[test]
    fn test_publisher_and_database_defaults() {
        let publisher = PublisherConfig::default();
        assert!(publisher.username.is_none());
        assert!(publisher.access_token.is_none());
        assert_eq!(publisher.api_base_url, "https://api.x.com");
        assert_eq!(publisher.public_domain, "x.com");

        let database = DatabaseConfig::default();
        assert_eq!(database.url, "sqlite://postcraft.sqlite?mode=rwc");
    }

    #[test]
    fn test_provider_config_lookup() {
        let config = LLMConfig::default();

        let openai = config.provider_config(LLMProvider::OpenAI).unwrap();
        assert_eq!(openai.name, "openai");
        assert!(openai.api_key.is_empty());
        assert!(openai.base_url.is_none());

        let gemini = config.provider_config(LLMProvider::Gemini).unwrap();
        assert_eq!(gemini.name, "gemini");
    }

    #[test]
    fn test_provider_config_missing() {
        let config = LLMConfig {
            providers: vec![ProviderConfig::new(LLMProvider::OpenAI)],
        };

        assert_eq!(
            config.provider_config(LLMProvider::Gemini).unwrap_err(),
            ConfigError::MissingProviderConfig(LLMProvider::Gemini)
        );
    }

    #[test]
    fn test_provider_config_unknown_name_is_rejected() {
        let config = LLMConfig {
            providers: vec![ProviderConfig {
                name: "mistral".to_string(),
                api_key: "key".to_string(),
                base_url: None,
            }],
        };

        assert_eq!(
            config.provider_config(LLMProvider::OpenAI).unwrap_err(),
            ConfigError::UnknownProvider("mistral".to_string())
        );
    }

    #[test]
    fn test_unknown_provider_after_valid_entry_is_rejected() {
        let config = LLMConfig {
            providers: vec![
                ProviderConfig {
                    name: "openai".to_string(),
                    api_key: "sk".to_string(),
                    base_url: None,
                },
                ProviderConfig {
                    name: "ollama".to_string(),
                    api_key: "k".to_string(),
                    base_url: None,
                },
            ],
        };

        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::UnknownProvider("ollama".to_string())
        );
        assert_eq!(
            config.provider_config(LLMProvider::OpenAI).unwrap_err(),
            ConfigError::UnknownProvider("ollama".to_string())
        );
    }

    #[test]
    fn test_load_rejects_unknown_provider_in_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("postcraft.toml");
        let content = r#"
[[llm.providers]]
name = "openai"
api_key = "sk"

[[llm.providers]]
name = "ollama"
"#;
        std::fs::write(&config_path, content).unwrap();

        let err = Config::load(Some(&config_path)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::UnknownProvider("ollama".to_string()))
        );
    }

    #[test]
    fn test_apply_env_overrides() {
        let env = env_from(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("GEMINI_API_KEY", "gm-key"),
            ("GEMINI_BASE_URL", "https://gemini.example/v1beta/openai/"),
            ("X_USERNAME", "example"),
            ("X_ACCESS_TOKEN", "x-token"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("POSTCRAFT_DATA_DIR", "/srv/catalogs"),
        ]);

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).cloned());

        let openai = config.llm.provider_config(LLMProvider::OpenAI).unwrap();
        assert_eq!(openai.api_key, "sk-openai");
        assert!(openai.base_url.is_none());

        let gemini = config.llm.provider_config(LLMProvider::Gemini).unwrap();
        assert_eq!(gemini.api_key, "gm-key");
        assert_eq!(
            gemini.base_url.as_deref(),
            Some("https://gemini.example/v1beta/openai/")
        );

        assert_eq!(config.publisher.username.as_deref(), Some("example"));
        assert_eq!(config.publisher.access_token.as_deref(), Some("x-token"));
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.data_dir, PathBuf::from("/srv/catalogs"));
    }

    #[test]
    fn test_apply_env_ignores_empty_values() {
        let env = env_from(&[("X_USERNAME", ""), ("OPENAI_API_KEY", "   ")]);

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).cloned());

        assert!(config.publisher.username.is_none());
        assert!(
            config
                .llm
                .provider_config(LLMProvider::OpenAI)
                .unwrap()
                .api_key
                .is_empty()
        );
    }

    #[test]
    fn test_apply_env_adds_missing_provider_entry() {
        let mut config = Config::default();
        config.llm.providers.clear();

        let env = env_from(&[("GEMINI_API_KEY", "gm-key")]);
        config.apply_env(|key| env.get(key).cloned());

        assert_eq!(config.llm.providers.len(), 1);
        assert_eq!(
            config.llm.provider_config(LLMProvider::Gemini).unwrap().api_key,
            "gm-key"
        );
    }

    #[test]
    fn test_from_file_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("postcraft.toml");

        let content = r#"
data_dir = "catalogs"

[[llm.providers]]
name = "gemini"
api_key = "from-file"
base_url = "https://gemini.example/openai/"

[publisher]
username = "example"
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("catalogs"));
        assert_eq!(config.llm.providers.len(), 1);
        assert_eq!(config.llm.providers[0].api_key, "from-file");
        assert_eq!(config.publisher.username.as_deref(), Some("example"));
        assert_eq!(config.publisher.api_base_url, "https://api.x.com");
        assert_eq!(config.database.url, "sqlite://postcraft.sqlite?mode=rwc");
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(&PathBuf::from("/nonexistent/postcraft.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("postcraft.toml");
        std::fs::write(&config_path, "data_dir = [unterminated").unwrap();

        assert!(Config::from_file(&config_path).is_err());
    }
}
