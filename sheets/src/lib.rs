pub mod auth;
mod client;
pub mod domain;
mod sheets_url;
mod timesheet;

pub(crate) use sheets_url::*;

pub use client::*;
pub use domain::*;
pub use timesheet::*;
