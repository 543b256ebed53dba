use anyhow::Result;
use engine::{EngineFault, GameEngine, PositionHandle};

/// Reads the feature vector of a position and checks it has the width the engine advertises.
pub fn extract_features<E: GameEngine>(engine: &E, position: &PositionHandle) -> Result<Vec<f32>> {
    let features = engine.feature_vector(position)?;
    let expected = engine.feature_width();

    if features.len() != expected {
        return Err(EngineFault::FeatureWidth {
            key: position.key(),
            expected,
            actual: features.len(),
        }
        .into());
    }

    Ok(features)
}

/// Hands every position back to the engine.
pub fn release_all<E: GameEngine, I: IntoIterator<Item = PositionHandle>>(engine: &E, positions: I) {
    for position in positions {
        engine.release(position);
    }
}
