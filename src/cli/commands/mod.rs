//! Command handlers, one module per command.

pub mod guide;
pub mod import;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Guide(cmd) => guide::run(ctx, cmd),
        Commands::Import(args) => import::run(ctx, args),
    }
}
