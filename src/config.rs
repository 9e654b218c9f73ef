use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub generator: GeneratorConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CacheConfig {
    pub r#type: String,
    pub max_size: u32,
    pub expiration: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneratorConfig {
    pub output_dir: String,
    pub request_delay_ms: u64,
    pub batch_size: usize,
}

impl Config {
    /// Parses the embedded `config/config.toml`.
    pub fn load() -> Result<Config, toml::de::Error> {
        let config_str = include_str!("../config/config.toml");
        toml::from_str(config_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = Config::load().expect("embedded config must parse");
        assert!(config.api.base_url.starts_with("https://"));
        assert!(!config.api.base_url.ends_with('/'));
        assert!(config.generator.batch_size > 0);
    }

    #[test]
    fn test_config_sections() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://example.test/api/v2"
            timeout = 30

            [cache]
            type = "memory"
            max_size = 500
            expiration = 600

            [generator]
            output_dir = "data/availability"
            request_delay_ms = 50
            batch_size = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.cache.r#type, "memory");
        assert_eq!(config.cache.max_size, 500);
        assert_eq!(config.generator.batch_size, 15);
        assert_eq!(config.generator.request_delay_ms, 50);
    }
}
