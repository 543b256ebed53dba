use std::fmt::{self, Display, Formatter};

/// An opaque reference to one game state. The key is issued and invalidated by the engine alone.
///
/// Handles are neither `Clone` nor `Copy`: whoever holds one owns the engine-side resources behind it
/// and must hand it back through `GameEngine::release`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PositionHandle(u64);

impl PositionHandle {
    pub fn from_key(key: u64) -> Self {
        Self(key)
    }

    pub fn key(&self) -> u64 {
        self.0
    }
}

impl Display for PositionHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.0)
    }
}
