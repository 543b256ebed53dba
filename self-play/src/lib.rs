pub mod credit_assignment;
pub mod episode;
pub mod features;
pub mod move_selector;
pub mod options;
pub mod play_self_one;

#[cfg(test)]
mod test_support;

pub use credit_assignment::*;
pub use episode::*;
pub use features::*;
pub use move_selector::*;
pub use options::*;
pub use play_self_one::*;
