//! Service layer containing the encoder, validation, and rendering logic.
//!
//! ## Service map
//! - `encode.rs` — presentation encoder: colors, labels, rankings, ratios.
//! - `validate.rs` — fail-fast dataset invariant checks.
//! - `metrics.rs` — headline numbers derived from the tables.
//! - `charts.rs` — figure assembly (dataset + encoder → SVG).
//! - `svg.rs` — the four chart shapes as plain markup strings.
//! - `html.rs` — self-contained page assembly.
//! - `theme.rs` — explicit page/palette configuration.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers; the only I/O in this crate is the CLI writing the
//!   rendered page.
//! - Keep command handlers thin; delegate to services.

pub mod charts;
pub mod encode;
pub mod html;
pub mod metrics;
pub mod output;
pub mod svg;
pub mod theme;
pub mod validate;
