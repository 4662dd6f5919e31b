pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod storage;

pub use error::{GuideError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
