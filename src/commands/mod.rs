//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `render.rs` — dashboard rendering and dataset validation.
//! - `inspect.rs` — summary/tables/show/rank/ratios read-only views.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod inspect;
pub mod render;

use crate::cli::{Cli, Commands};
use crate::services::theme::PageConfig;

pub fn handle(cli: &Cli, cfg: &PageConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Render { out, stdout } => render::handle_render(cli, cfg, out, *stdout),
        Commands::Validate => render::handle_validate(cli),
        Commands::Summary => inspect::handle_summary(cli),
        Commands::Tables => inspect::handle_tables(cli),
        Commands::Show { table } => inspect::handle_show(cli, *table),
        Commands::Rank { table, by } => inspect::handle_rank(cli, *table, *by),
        Commands::Ratios => inspect::handle_ratios(cli, cfg),
    }
}
