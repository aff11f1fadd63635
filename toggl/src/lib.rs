mod auth;
mod client;
pub mod domain;
mod toggl_url;

pub(crate) use toggl_url::*;

pub use auth::*;
pub use client::*;
