use serde::{Deserialize, Serialize};
use std::any::type_name;

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to write {} as YAML: {}", short_type_name::<TConfig>(), e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        if content.trim().is_empty() {
            return Err(format!("Empty YAML for {}", short_type_name::<TConfig>()));
        }
        serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to read {} from YAML: {}", short_type_name::<TConfig>(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EngineConfig;

    #[test]
    fn test_errors_name_the_config_type() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<EngineConfig, String> = serializer.deserialize("grid_size: [1, 2]");
        let error = result.unwrap_err();
        assert!(error.starts_with("Failed to read EngineConfig from YAML"), "{}", error);
    }

    #[test]
    fn test_empty_content_is_rejected() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<EngineConfig, String> = serializer.deserialize("  \n");
        assert_eq!(result.unwrap_err(), "Empty YAML for EngineConfig");
    }
}
