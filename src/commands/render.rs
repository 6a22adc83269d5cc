use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::Cli;
use crate::domain::models::{JsonOut, RenderReport, ValidationReport};
use crate::services::html;
use crate::services::output::print_one;
use crate::services::theme::PageConfig;
use crate::services::validate;

pub fn handle_render(cli: &Cli, cfg: &PageConfig, out: &Path, to_stdout: bool) -> anyhow::Result<()> {
    validate::ensure_valid()?;
    let page = html::render_page(cfg)?;
    if to_stdout {
        println!("{}", page.html);
        return Ok(());
    }
    std::fs::write(out, &page.html)
        .with_context(|| format!("write dashboard {}", out.display()))?;
    info!(out = %out.display(), bytes = page.html.len(), "wrote dashboard");
    let report = RenderReport {
        out: out.display().to_string(),
        bytes: page.html.len(),
        figures: page.figures,
    };
    print_one(cli.json, report, |r| {
        format!("wrote {} ({} figures, {} bytes)", r.out, r.figures, r.bytes)
    })
}

pub fn handle_validate(cli: &Cli) -> anyhow::Result<()> {
    let checks = validate::check_all();
    let failed = checks.iter().filter(|c| c.status != "ok").count();
    let overall = if failed == 0 { "ok" } else { "failed" };
    let report = ValidationReport { overall: overall.to_string(), checks };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: failed == 0, data: &report })?
        );
    } else {
        for check in &report.checks {
            if check.detail.is_empty() {
                println!("{}\t{}", check.status, check.name);
            } else {
                println!("{}\t{}\t{}", check.status, check.name, check.detail);
            }
        }
        println!("datasets {overall}");
    }

    if failed > 0 {
        anyhow::bail!("{failed} dataset check(s) failed");
    }
    Ok(())
}
