mod auth;
mod client;
pub mod domain;
mod todoist_url;

pub(crate) use todoist_url::*;

pub use auth::*;
pub use client::*;
