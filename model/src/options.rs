use anyhow::Result;
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

pub const TRAIN_BATCH_SIZE: usize = 128;
pub const LEARNING_RATE: f32 = 0.01;
pub const HIDDEN_LAYERS: [usize; 3] = [64, 48, 24];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DenseOptions {
    pub hidden_layers: Vec<usize>,
    pub learning_rate: f32,
    pub train_batch_size: usize,
    pub seed: Option<u64>,
}

impl Default for DenseOptions {
    fn default() -> Self {
        Self {
            hidden_layers: HIDDEN_LAYERS.to_vec(),
            learning_rate: LEARNING_RATE,
            train_batch_size: TRAIN_BATCH_SIZE,
            seed: None,
        }
    }
}

impl Config for DenseOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        Ok(Self {
            hidden_layers: config
                .get("hidden_layers")
                .and_then(|v| v.as_usize_list())
                .unwrap_or_else(|| HIDDEN_LAYERS.to_vec()),
            learning_rate: config
                .get("learning_rate")
                .and_then(|v| v.as_f32())
                .unwrap_or(LEARNING_RATE),
            train_batch_size: config
                .get("train_batch_size")
                .and_then(|v| v.as_usize())
                .unwrap_or(TRAIN_BATCH_SIZE),
            seed: config.get("seed").and_then(|v| v.as_u64()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::from_string("model {}", "model".to_string()).unwrap();

        let options: DenseOptions = config.load().unwrap();

        assert_eq!(options, DenseOptions::default());
    }

    #[test]
    fn test_load_overrides() {
        let config = ConfigLoader::from_string(
            "model { hidden_layers = [16], train_batch_size = 32, learning_rate = 0.1, seed = 3 }",
            "model".to_string(),
        )
        .unwrap();

        let options: DenseOptions = config.load().unwrap();

        assert_eq!(options.hidden_layers, vec![16]);
        assert_eq!(options.train_batch_size, 32);
        assert_eq!(options.seed, Some(3));
        assert!((options.learning_rate - 0.1).abs() < 1e-6);
    }
}
