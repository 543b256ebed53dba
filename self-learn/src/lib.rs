pub mod iteration_metrics;
pub mod options;
pub mod self_learn;
pub mod self_learn_persistance;

pub use iteration_metrics::*;
pub use options::*;
pub use self_learn::*;
pub use self_learn_persistance::*;
