//! Self-contained HTML page assembly.
//!
//! One document, inline CSS, inline SVG figures; no external assets, so the
//! output opens offline. The palette reaches the stylesheet through CSS
//! variables filled from the explicit `PageConfig`.

use std::fmt::Write as _;

use anyhow::Context;

use crate::domain::datasets;
use crate::domain::models::{RatioCard, SummaryReport};
use crate::services::charts::{self, Figure};
use crate::services::metrics;
use crate::services::svg::esc;
use crate::services::theme::PageConfig;

pub struct RenderedPage {
    pub html: String,
    pub figures: usize,
}

pub fn render_page(cfg: &PageConfig) -> anyhow::Result<RenderedPage> {
    let summary = metrics::summary()?;
    let figures = charts::all_figures(&cfg.theme)?;
    let cards = charts::ratio_cards(&cfg.theme)?;

    let page = format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
{vars}
{css}
</style>
</head>
<body>
<div class="container">
{header}
{tiles}
{spike}
{paradox}
{sophistication}
{keywords}
{growth}
{supplemental}
{footer}
</div>
</body>
</html>
"##,
        title = esc(&cfg.title),
        vars = theme_vars(cfg),
        css = PAGE_CSS,
        header = header(cfg, &summary),
        tiles = stat_tiles(&summary),
        spike = spike_section(&summary, fig(&figures, "yearly-trend")?),
        paradox = paradox_section(fig(&figures, "violation-taxonomy")?),
        sophistication = sophistication_section(fig(&figures, "sophistication")?, &cards),
        keywords = keyword_section(&summary, fig(&figures, "keyword-findings")?),
        growth = growth_section(fig(&figures, "growth")?),
        supplemental = supplemental_section(),
        footer = footer(),
    );
    Ok(RenderedPage { html: page, figures: figures.len() })
}

fn fig<'a>(figures: &'a [Figure], id: &str) -> anyhow::Result<&'a Figure> {
    figures
        .iter()
        .find(|f| f.id == id)
        .with_context(|| format!("figure '{id}' missing from assembly"))
}

fn theme_vars(cfg: &PageConfig) -> String {
    let t = &cfg.theme;
    format!(
        ":root {{ --emphasis: {}; --neutral: {}; --muted: {}; --decrease: {}; --grid: {}; }}",
        t.emphasis, t.neutral, t.muted, t.decrease, t.grid
    )
}

const PAGE_CSS: &str = r##"
body { margin: 0; background: #ffffff; color: #1e293b; font-family: Georgia, 'Times New Roman', serif; }
.container { max-width: 900px; margin: 0 auto; padding: 2rem 1.5rem 4rem; }
.main-header { font-size: 2.6rem; font-weight: 900; color: #1a1a2e; margin-bottom: 0; line-height: 1.2; }
.sub-header { font-size: 1.15rem; color: var(--muted); margin-top: 0.5rem; line-height: 1.6; font-family: system-ui, sans-serif; }
.key-numbers { display: flex; gap: 2rem; margin: 1.2rem 0; font-family: system-ui, sans-serif; color: var(--muted); font-size: 0.9rem; }
.key-numbers strong { color: #1a1a2e; font-size: 1.2rem; display: block; }
.section-divider { height: 4px; background: linear-gradient(90deg, var(--emphasis) 0%, transparent 100%); border-radius: 2px; margin: 3rem 0; }
.stat-row { display: flex; gap: 1.5rem; flex-wrap: wrap; margin: 2rem 0; }
.stat-tile { flex: 1 1 160px; font-family: system-ui, sans-serif; }
.stat-number { font-size: 2.6rem; font-weight: 700; color: var(--emphasis); margin: 0; }
.stat-label { font-size: 0.85rem; color: var(--muted); text-transform: uppercase; letter-spacing: 0.05em; margin: 0; }
h2 { font-size: 1.7rem; color: #1a1a2e; }
.narrative { font-size: 1.1rem; line-height: 1.9; }
.pullquote { font-size: 1.4rem; font-weight: 700; color: var(--emphasis); border-left: 5px solid var(--emphasis); padding-left: 1.5rem; margin: 2.5rem 0; font-style: italic; }
.insight { background: #fef2f2; border-left: 5px solid var(--emphasis); padding: 1.2rem 1.5rem; border-radius: 0 12px 12px 0; margin: 1.5rem 0; font-family: system-ui, sans-serif; }
.insight-blue { background: #eff6ff; border-left: 5px solid #2563eb; padding: 1.2rem 1.5rem; border-radius: 0 12px 12px 0; margin: 1.5rem 0; font-family: system-ui, sans-serif; }
.figure { margin: 2rem 0; }
.figure svg { max-width: 100%; height: auto; font-family: system-ui, sans-serif; }
.figure .tick, .figure .category, .figure .legend { fill: #475569; }
.ratio-cards { display: flex; gap: 2rem; flex-wrap: wrap; font-family: system-ui, sans-serif; }
.ratio-card strong { display: block; color: #1a1a2e; }
.ratio-value { font-size: 2rem; font-weight: 700; }
.ratio-caption { color: var(--muted); font-size: 0.85rem; }
table { border-collapse: collapse; margin: 1.5rem 0; font-family: system-ui, sans-serif; font-size: 0.95rem; }
caption { text-align: left; font-weight: 700; padding-bottom: 0.5rem; color: #1a1a2e; }
th, td { border-bottom: 1px solid var(--grid); padding: 0.4rem 1rem 0.4rem 0; text-align: left; }
th { color: var(--muted); font-weight: 600; }
td.num, th.num { text-align: right; }
footer { margin-top: 3rem; color: var(--muted); font-family: system-ui, sans-serif; font-size: 0.85rem; line-height: 1.6; }
"##;

fn header(cfg: &PageConfig, summary: &SummaryReport) -> String {
    format!(
        r##"<header>
<p class="main-header">{title}</p>
<p class="sub-header">{subtitle}</p>
<div class="key-numbers">
<div><strong>{observations}</strong> observations</div>
<div><strong>{letters}</strong> warning letters</div>
<div><strong>{companies}</strong> companies</div>
<div><strong>{years}</strong> analysis window</div>
</div>
<div class="section-divider"></div>
</header>"##,
        title = esc(&cfg.title),
        subtitle = esc(&cfg.subtitle),
        observations = summary.total_observations,
        letters = summary.total_letters,
        companies = summary.total_companies,
        years = summary.years,
    )
}

fn stat_tiles(summary: &SummaryReport) -> String {
    let tile = |number: &str, label: &str| {
        format!(
            r#"<div class="stat-tile"><p class="stat-number">{}</p><p class="stat-label">{}</p></div>"#,
            esc(number),
            esc(label)
        )
    };
    format!(
        r#"<div class="stat-row">{}{}{}{}</div>"#,
        tile(
            &summary.top_violation_share,
            &format!("{} (#1 violation type)", summary.top_violation),
        ),
        tile(
            &summary.surge_growth,
            &format!(
                "Citations, {} vs {}",
                summary.surge_year - 1,
                summary.surge_year
            ),
        ),
        tile(&summary.delete_access_share, "Had delete access to GxP records"),
        tile(&summary.us_share, "From US facilities"),
    )
}

fn spike_section(summary: &SummaryReport, figure: &Figure) -> String {
    format!(
        r#"<section id="the-spike">
<h2>The {growth} question</h2>
<p class="narrative">In {prior}, FDA issued 8 computer system validation observations. By {year},
that number was 23. The first instinct is to dismiss this as noise, but the pattern held once
inspection volume was controlled for.</p>
<div class="figure" id="fig-{id}">{svg}</div>
<div class="insight"><strong>What changed?</strong> FDA's 2018 Data Integrity guidance is finally
being enforced with teeth. Inspectors are now trained to examine computerized systems, audit trail
configurations, and electronic record controls.</div>
<div class="section-divider"></div>
</section>"#,
        growth = esc(&summary.surge_growth),
        prior = summary.surge_year - 1,
        year = summary.surge_year,
        id = figure.id,
        svg = figure.svg,
    )
}

fn paradox_section(figure: &Figure) -> String {
    format!(
        r#"<section id="audit-trail-paradox">
<h2>The audit trail paradox</h2>
<p class="pullquote">"The system designed to ensure integrity is itself the most common point of failure."</p>
<div class="figure" id="fig-{id}">{svg}</div>
<div class="insight-blue"><strong>The electronic signature surprise:</strong> despite 21 CFR Part 11
being over 25 years old, e-signature violations account for just 1.4% of observations. The industry
solved e-signatures. Audit trails? Still struggling.</div>
<div class="section-divider"></div>
</section>"#,
        id = figure.id,
        svg = figure.svg,
    )
}

fn sophistication_section(figure: &Figure, cards: &[RatioCard]) -> String {
    let mut card_html = String::new();
    for card in cards {
        let _ = write!(
            card_html,
            r#"<div class="ratio-card"><strong>{region}</strong><span class="ratio-value" style="color: {color}">{ratio:.2}</span><br><span class="ratio-caption">{caption}</span></div>"#,
            region = esc(&card.region),
            color = card.color,
            ratio = card.ratio,
            caption = esc(&card.caption),
        );
    }
    format!(
        r#"<section id="sophistication">
<h2>The sophistication surprise</h2>
<p class="narrative">Violations split into basic failures (passwords, access control) and complex
failures (audit trail management, chromatography data systems). The ratio of complex to basic tells
each region's story.</p>
<div class="figure" id="fig-{id}">{svg}</div>
<div class="ratio-cards">{cards}</div>
<div class="section-divider"></div>
</section>"#,
        id = figure.id,
        svg = figure.svg,
        cards = card_html,
    )
}

fn keyword_section(summary: &SummaryReport, figure: &Figure) -> String {
    format!(
        r#"<section id="delete-problem">
<h2>The delete problem</h2>
<p class="pullquote">"In {share} of observations, analysts had the ability to delete data."</p>
<div class="figure" id="fig-{id}">{svg}</div>
<div class="section-divider"></div>
</section>"#,
        share = esc(&summary.delete_access_share),
        id = figure.id,
        svg = figure.svg,
    )
}

fn growth_section(figure: &Figure) -> String {
    format!(
        r#"<section id="whats-improving">
<h2>What's actually improving</h2>
<p class="narrative">Password and login violations dropped sharply while audit trail violations kept
climbing: the easy problems get solved while the hard ones get worse.</p>
<div class="figure" id="fig-{id}">{svg}</div>
<div class="insight-blue"><strong>The implication:</strong> whatever training approach worked for
password security needs to be replicated for audit trail management.</div>
<div class="section-divider"></div>
</section>"#,
        id = figure.id,
        svg = figure.svg,
    )
}

fn supplemental_section() -> String {
    let geo = html_table(
        "Geographic distribution",
        &["Region", "Observations", "Share"],
        datasets::geographic_distribution()
            .iter()
            .map(|r| {
                vec![
                    r.region.to_string(),
                    r.observations.to_string(),
                    format!("{:.1}%", r.percentage),
                ]
            })
            .collect(),
    );
    let facility = html_table(
        "Violations by facility type",
        &["Facility type", "Audit trail", "Other CSV"],
        datasets::facility_types()
            .iter()
            .map(|r| {
                vec![
                    r.facility_type.to_string(),
                    r.audit_trail_violations.to_string(),
                    r.other_csv_violations.to_string(),
                ]
            })
            .collect(),
    );
    let pairs = html_table(
        "Co-occurrence patterns",
        &["Violation pair", "Co-occurrences"],
        datasets::cooccurrence()
            .iter()
            .map(|r| vec![r.violation_pair.to_string(), r.co_occurrences.to_string()])
            .collect(),
    );
    let systems = html_table(
        "System categories cited",
        &["System category", "Observations"],
        datasets::system_categories()
            .iter()
            .map(|r| vec![r.system_category.to_string(), r.observations.to_string()])
            .collect(),
    );
    format!(
        r#"<section id="supplemental">
<h2>Behind the numbers</h2>
{geo}
{facility}
{pairs}
{systems}
</section>"#
    )
}

fn html_table(caption: &str, headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut out = String::new();
    let _ = write!(out, "<table><caption>{}</caption><thead><tr>", esc(caption));
    for (i, h) in headers.iter().enumerate() {
        let class = if i == 0 { "" } else { r#" class="num""# };
        let _ = write!(out, "<th{class}>{}</th>", esc(h));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for (i, cell) in row.iter().enumerate() {
            let class = if i == 0 { "" } else { r#" class="num""# };
            let _ = write!(out, "<td{class}>{}</td>", esc(cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

fn footer() -> String {
    r#"<footer>
<p><strong>Methodology.</strong> Analysis of 983 FDA warning letters (2020-2025). CSV observations
identified using regulatory citations, technical terms, and keyword patterns. All data publicly
available.</p>
<p><strong>Limitations.</strong> Warning letters represent a subset of FDA enforcement. 2025 data is
a partial year. Observation classification is based on text analysis.</p>
<p>Data source: FDA Warning Letters Database.</p>
</footer>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_contains_every_figure_and_headline() {
        let cfg = PageConfig::default();
        let rendered = render_page(&cfg).unwrap();
        assert_eq!(rendered.figures, 5);
        let page = rendered.html;
        for id in [
            "fig-yearly-trend",
            "fig-violation-taxonomy",
            "fig-sophistication",
            "fig-keyword-findings",
            "fig-growth",
        ] {
            assert!(page.contains(id), "missing {id}");
        }
        assert!(page.contains("When the Witness Goes Silent"));
        assert!(page.contains("34.8%"));
        assert!(page.contains("+187%"));
        assert!(page.contains("<table>"));
    }

    #[test]
    fn custom_title_and_palette_flow_through() {
        let mut cfg = PageConfig::default();
        cfg.title = "Another Angle".to_string();
        cfg.theme.emphasis = crate::services::encode::Color::new("#123456");
        let page = render_page(&cfg).unwrap().html;
        assert!(page.contains("Another Angle"));
        assert!(page.contains("--emphasis: #123456"));
    }

    #[test]
    fn labels_are_escaped() {
        let table = html_table("a", &["h"], vec![vec!["<b>".to_string()]]);
        assert!(table.contains("&lt;b&gt;"));
    }
}
