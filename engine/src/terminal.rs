use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalResult {
    /// Did the side that moved first win.
    pub winner: bool,
    /// Score differential, first player minus second player.
    pub margin: i32,
}

impl TerminalResult {
    pub fn new(winner: bool, margin: i32) -> Self {
        Self { winner, margin }
    }
}

impl Display for TerminalResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Result(winner: {}, margin: {})", self.winner, self.margin)
    }
}
