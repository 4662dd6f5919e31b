//! Shared application context for CLI commands.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::storage::Database;

/// Everything a command handler needs: loaded config, resolved database
/// location, output mode.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub db_path: PathBuf,
    pub robot: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let db_path = cli.db.clone().unwrap_or_else(|| config.database_path());
        Ok(Self {
            config,
            db_path,
            robot: cli.robot,
        })
    }

    pub fn open_db(&self) -> Result<Database> {
        Database::open(&self.db_path)
    }
}
