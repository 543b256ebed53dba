mod board;
pub mod engine;
pub mod game_state;

pub use crate::engine::*;
pub use game_state::*;
