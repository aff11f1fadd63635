mod label;
mod project;
mod task;

pub use label::*;
pub use project::*;
pub use task::*;
