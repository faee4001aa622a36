use anyhow::Error;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Max rung distance from the item consensus still counted as agreement.
    pub agreement_threshold: i32,

    /// How many contrarian picks to keep per user in the eclectic ranking.
    pub contrarian_samples: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            agreement_threshold: 1,
            contrarian_samples: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;

    #[test]
    fn load_example_config() -> Result<(), Error> {
        let expected = Config {
            engine: EngineConfig {
                agreement_threshold: 1,
                contrarian_samples: 5,
            },
        };

        let loaded = Config::load("example.toml")?;
        assert_eq!(expected, loaded);

        Ok(())
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() -> Result<(), Error> {
        let parsed: Config = toml::from_str("")?;
        assert_eq!(parsed, Config::default());

        let parsed: Config = toml::from_str("[engine]\nagreement_threshold = 0\n")?;
        assert_eq!(parsed.engine.agreement_threshold, 0);
        assert_eq!(parsed.engine.contrarian_samples, 5);

        Ok(())
    }
}
