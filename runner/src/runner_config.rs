use serde::{Deserialize, Serialize};
use snake_engine::EngineConfig;
use snake_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};

use crate::autopilot::AutopilotKind;

pub const DEFAULT_CONFIG_FILE: &str = "snake_runner_config.yaml";

const MAX_GAMES: u32 = 1000;

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RunnerConfig {
    pub engine: EngineConfig,
    /// Games played before the runner exits; the high score carries over.
    pub games: u32,
    pub autopilot: AutopilotKind,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            games: 3,
            autopilot: AutopilotKind::Greedy,
        }
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        if self.games == 0 {
            return Err("games must be greater than 0".to_string());
        }
        if self.games > MAX_GAMES {
            return Err(format!("games must not exceed {}", MAX_GAMES));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_runner_config_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_games_bounds() {
        let mut config = RunnerConfig::default();
        config.games = 0;
        assert!(config.validate().is_err());
        config.games = MAX_GAMES + 1;
        assert!(config.validate().is_err());
        config.games = MAX_GAMES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_errors_propagate() {
        let mut config = RunnerConfig::default();
        config.engine.grid_size = 1;
        let error = config.validate().unwrap_err();
        assert!(error.contains("grid_size"), "{}", error);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = RunnerConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: RunnerConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_hand_written_yaml_is_accepted() {
        let yaml = "engine:\n  grid_size: 10\n  initial_speed: 80\n  speed_increment: 2\ngames: 5\nautopilot: Random\n";
        let serializer = YamlConfigSerializer::new();
        let config: RunnerConfig = serializer.deserialize(yaml).unwrap();
        assert_eq!(config.engine, EngineConfig::new(10, 80, 2));
        assert_eq!(config.games, 5);
        assert_eq!(config.autopilot, AutopilotKind::Random);
    }

    #[test]
    fn test_config_manager_round_trip_through_file() {
        let file_path = get_temp_file_path();
        let manager = get_config_manager(&file_path);
        assert_eq!(manager.get_config().unwrap(), RunnerConfig::default());

        let config = RunnerConfig {
            engine: EngineConfig::new(16, 120, 4),
            games: 7,
            autopilot: AutopilotKind::Random,
        };
        manager.set_config(&config).unwrap();

        let provider = FileContentConfigProvider::new(file_path.as_str());
        assert!(provider.get_config_content().unwrap().is_some());
        assert_eq!(get_config_manager(&file_path).get_config().unwrap(), config);

        std::fs::remove_file(&file_path).unwrap();
    }
}
