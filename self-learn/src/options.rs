use anyhow::{anyhow, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

pub const ITERATIONS: usize = 1000;
pub const CHECKPOINT_NAME: &str = "maybe-better-y";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelfLearnOptions {
    /// Number of self-play games, each followed by a training call.
    pub iterations: usize,
    /// Checkpoint overwritten after every training call.
    pub checkpoint_name: String,
    /// Restore `checkpoint_name` before the first iteration when it exists.
    pub resume: bool,
    /// Seed for shuffling examples.
    pub seed: Option<u64>,
}

impl Default for SelfLearnOptions {
    fn default() -> Self {
        Self {
            iterations: ITERATIONS,
            checkpoint_name: CHECKPOINT_NAME.to_string(),
            resume: true,
            seed: None,
        }
    }
}

impl Config for SelfLearnOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let checkpoint_name = config
            .get("checkpoint_name")
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| CHECKPOINT_NAME.to_string());

        if checkpoint_name.is_empty() {
            return Err(anyhow!("checkpoint_name must not be empty"));
        }

        Ok(Self {
            iterations: config
                .get("iterations")
                .and_then(|v| v.as_usize())
                .unwrap_or(ITERATIONS),
            checkpoint_name,
            resume: config
                .get("resume")
                .and_then(|v| v.as_bool())
                .unwrap_or(true),
            seed: config.get("seed").and_then(|v| v.as_u64()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::from_string("self_learn {}", "self_learn".to_string()).unwrap();

        let options: SelfLearnOptions = config.load().unwrap();

        assert_eq!(options, SelfLearnOptions::default());
    }

    #[test]
    fn test_load_overrides() {
        let config = ConfigLoader::from_string(
            r#"self_learn { iterations = 12, checkpoint_name = "c4", resume = false, seed = 5 }"#,
            "self_learn".to_string(),
        )
        .unwrap();

        let options: SelfLearnOptions = config.load().unwrap();

        assert_eq!(
            options,
            SelfLearnOptions {
                iterations: 12,
                checkpoint_name: "c4".to_string(),
                resume: false,
                seed: Some(5),
            }
        );
    }

    #[test]
    fn test_load_rejects_empty_checkpoint_name() {
        let config = ConfigLoader::from_string(
            r#"self_learn { checkpoint_name = "" }"#,
            "self_learn".to_string(),
        )
        .unwrap();

        assert!(config.load::<SelfLearnOptions>().is_err());
    }
}
