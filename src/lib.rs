pub mod boundary;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod publish;
pub mod ui;

pub use error::{PagesPublishError, Result};
