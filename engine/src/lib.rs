pub mod engine;
pub mod fault;
pub mod position;
pub mod scripted;
pub mod terminal;

pub use crate::engine::*;
pub use crate::fault::*;
pub use crate::position::*;
pub use crate::scripted::*;
pub use crate::terminal::*;
