use anyhow::Result;

use super::{PositionHandle, TerminalResult};

/// The rules engine as seen by the trainer. Every handle returned from `initial_position` or
/// `successors` is owned by the caller until it is passed to `release`.
pub trait GameEngine {
    /// Length of every feature vector this engine produces.
    fn feature_width(&self) -> usize;

    fn initial_position(&self) -> Result<PositionHandle>;

    /// Legal successor positions in the engine's enumeration order. Empty when the position is terminal.
    fn successors(&self, position: &PositionHandle) -> Result<Vec<PositionHandle>>;

    fn feature_vector(&self, position: &PositionHandle) -> Result<Vec<f32>>;

    /// Only defined for positions without successors.
    fn terminal_result(&self, position: &PositionHandle) -> Result<TerminalResult>;

    /// Frees the engine-side state. Releasing an already released key is a no-op.
    fn release(&self, position: PositionHandle);

    fn describe(&self, position: &PositionHandle) -> Result<String> {
        Ok(position.to_string())
    }
}
