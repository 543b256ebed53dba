pub mod checkpoint;
pub mod dense;
pub mod evaluator;
pub mod fault;
pub mod options;

pub use checkpoint::*;
pub use dense::*;
pub use evaluator::*;
pub use fault::*;
pub use options::*;
