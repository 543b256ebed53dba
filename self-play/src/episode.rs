use engine::{PositionHandle, TerminalResult};

/// A finished self-play game: every position visited, oldest first and ending with the terminal position,
/// and how the game ended. The trace owns its handles until credit assignment releases them.
#[derive(Debug)]
pub struct Episode {
    trace: Vec<PositionHandle>,
    result: TerminalResult,
}

impl Episode {
    pub fn new(trace: Vec<PositionHandle>, result: TerminalResult) -> Self {
        Self { trace, result }
    }

    pub fn into_inner(self) -> (Vec<PositionHandle>, TerminalResult) {
        (self.trace, self.result)
    }

    pub fn trace(&self) -> &[PositionHandle] {
        &self.trace
    }

    pub fn result(&self) -> &TerminalResult {
        &self.result
    }

    /// Number of moves played. Zero for a game that was over at the initial position.
    pub fn plies(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }
}
