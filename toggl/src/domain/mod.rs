mod project;
mod tag;
mod time_entry;
mod workspace;

pub use project::*;
pub use tag::*;
pub use time_entry::*;
pub use workspace::*;
