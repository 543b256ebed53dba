use thiserror::Error;

/// The evaluator was handed data it cannot work with. These indicate a configuration bug and are fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluatorFault {
    #[error("expected {expected} input features but received {actual}")]
    InputWidth { expected: usize, actual: usize },
    #[error("label {0} is outside of [-1, 1]")]
    LabelOutOfRange(f32),
    #[error("evaluation produced a non-finite value")]
    NonFinite,
    #[error("train batch size must be greater than zero")]
    EmptyBatchSize,
    #[error("checkpoint {name} has {actual} input features but the evaluator expects {expected}")]
    CheckpointShape {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("checkpoint name {0:?} must be non-empty and must not contain path separators")]
    InvalidCheckpointName(String),
}
