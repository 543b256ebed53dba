use thiserror::Error;

/// The engine returned something that violates the boundary contract. Always fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineFault {
    #[error("position {0} is unknown to the engine or was already released")]
    UnknownPosition(u64),
    #[error("terminal result requested for position {0} which still has legal moves")]
    NotTerminal(u64),
    #[error("position {key} produced {actual} features, expected {expected}")]
    FeatureWidth {
        key: u64,
        expected: usize,
        actual: usize,
    },
}
