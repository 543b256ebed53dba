use anyhow::{anyhow, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

pub const TEMPORAL_DECAY: f32 = 0.85;
pub const INITIAL_BEST_SCORE: f32 = 0.0;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelfPlayOptions {
    /// Factor applied to the label of each earlier ply, walking back from the terminal position.
    pub temporal_decay: f32,
    /// A successor has to score strictly above this to be picked. Set it below the evaluator's range
    /// to always accept the best legal move.
    /// When no successor beats it the game ends early and the run fails with `EngineFault::NotTerminal`.
    pub initial_best_score: f32,
}

impl Default for SelfPlayOptions {
    fn default() -> Self {
        Self {
            temporal_decay: TEMPORAL_DECAY,
            initial_best_score: INITIAL_BEST_SCORE,
        }
    }
}

impl Config for SelfPlayOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let temporal_decay = config
            .get("temporal_decay")
            .and_then(|v| v.as_f32())
            .unwrap_or(TEMPORAL_DECAY);

        if !(0.0..=1.0).contains(&temporal_decay) {
            return Err(anyhow!(
                "temporal_decay must be within [0, 1] but was {}",
                temporal_decay
            ));
        }

        Ok(Self {
            temporal_decay,
            initial_best_score: config
                .get("initial_best_score")
                .and_then(|v| v.as_f32())
                .unwrap_or(INITIAL_BEST_SCORE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::from_string("self_play {}", "self_play".to_string()).unwrap();

        let options: SelfPlayOptions = config.load().unwrap();

        assert_eq!(options, SelfPlayOptions::default());
    }

    #[test]
    fn test_load_negative_baseline() {
        let config = ConfigLoader::from_string(
            "self_play { initial_best_score = -2.0 }",
            "self_play".to_string(),
        )
        .unwrap();

        let options: SelfPlayOptions = config.load().unwrap();

        assert_eq!(options.initial_best_score, -2.0);
    }

    #[test]
    fn test_load_rejects_decay_above_one() {
        let config = ConfigLoader::from_string(
            "self_play { temporal_decay = 1.5 }",
            "self_play".to_string(),
        )
        .unwrap();

        assert!(config.load::<SelfPlayOptions>().is_err());
    }
}
