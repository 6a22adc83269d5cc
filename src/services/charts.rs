//! Figure assembly: one function per dashboard chart.
//!
//! Each figure borrows its dataset, asks the encoder for the value-dependent
//! pieces (colors, labels, rankings), and hands the result to the SVG layer.
//! Emphasis rules live here as declared inputs: the violation chart
//! emphasizes the rank-first row, the keyword chart a fixed label set.

use anyhow::Context;
use serde::Serialize;

use crate::domain::datasets::{self, CONCERNING_FINDINGS, GROWTH_YEAR_A, GROWTH_YEAR_B};
use crate::domain::models::RatioCard;
use crate::services::encode::{
    encode_category_color, encode_signed_color, format_percentage_label,
    format_signed_percent_label, growth_pct, interpret_ratio, rank_rows, ratio_caption,
    ratio_color, RATIO_THRESHOLD,
};
use crate::services::svg::{
    grouped_vbar_chart, hbar_chart, line_area_chart, vbar_chart, GroupedVBarChart, HBarChart,
    LineAreaChart, Series, VBarChart,
};
use crate::services::theme::Theme;

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub id: &'static str,
    pub title: String,
    pub svg: String,
}

/// Observations per year as a line over an area fill, annotated with the
/// peak year's year-over-year growth.
pub fn yearly_trend_figure(theme: &Theme) -> anyhow::Result<Figure> {
    let rows = datasets::yearly_trend();
    let values: Vec<f64> = rows.iter().map(|r| f64::from(r.observations)).collect();
    let peak = rank_rows("yearly", &values)?[0];

    let annotation = if peak > 0 {
        let prior = &rows[peak - 1];
        let growth =
            growth_pct(prior.observations, rows[peak].observations).with_context(|| {
                format!("table 'yearly' row {}: zero observations as growth base", prior.year)
            })?;
        Some((peak, format!("{} vs prior year", format_signed_percent_label(growth))))
    } else {
        None
    };

    Ok(Figure {
        id: "yearly-trend",
        title: "CSV observations per year".to_string(),
        svg: line_area_chart(&LineAreaChart {
            width: 760.0,
            height: 400.0,
            labels: rows.iter().map(|r| r.year.to_string()).collect(),
            values,
            stroke: &theme.emphasis,
            grid: &theme.grid,
            annotation,
        }),
    })
}

/// Violation taxonomy as horizontal bars; the rank-first row takes the
/// emphasis color.
pub fn violation_figure(theme: &Theme) -> anyhow::Result<Figure> {
    let rows = datasets::violation_taxonomy();
    let counts: Vec<f64> = rows.iter().map(|r| f64::from(r.count)).collect();
    let top = rank_rows("violations", &counts)?[0];
    let colors =
        encode_category_color(&rows, &theme.emphasis, &theme.neutral, |i, _| i == top);

    Ok(Figure {
        id: "violation-taxonomy",
        title: "Observations by violation type".to_string(),
        svg: hbar_chart(&HBarChart {
            width: 760.0,
            row_height: 42.0,
            labels: rows.iter().map(|r| r.violation_type.to_string()).collect(),
            values: counts,
            colors,
            bar_labels: rows
                .iter()
                .map(|r| format!("{} ({})", r.count, format_percentage_label(r.percentage, 1)))
                .collect(),
            grid: &theme.grid,
        }),
    })
}

/// Basic vs complex failure shares per region as grouped bars.
pub fn sophistication_figure(theme: &Theme) -> anyhow::Result<Figure> {
    let rows = datasets::sophistication();
    anyhow::ensure!(!rows.is_empty(), "table 'sophistication' is empty");

    let series = |name: &str, values: Vec<f64>, color| Series {
        name: name.to_string(),
        bar_labels: values.iter().map(|v| format_percentage_label(*v, 1)).collect(),
        values,
        color,
    };

    Ok(Figure {
        id: "sophistication",
        title: "Basic vs complex failures by region".to_string(),
        svg: grouped_vbar_chart(&GroupedVBarChart {
            width: 720.0,
            height: 380.0,
            groups: rows.iter().map(|r| r.region.to_string()).collect(),
            series: vec![
                series(
                    "Basic failures",
                    rows.iter().map(|r| r.basic_pct).collect(),
                    theme.series_primary.clone(),
                ),
                series(
                    "Complex failures",
                    rows.iter().map(|r| r.complex_pct).collect(),
                    theme.series_secondary.clone(),
                ),
            ],
            grid: &theme.grid,
        }),
    })
}

/// One interpreted ratio per region, for the cards next to the grouped bars
/// and for the `ratios` command.
pub fn ratio_cards(theme: &Theme) -> anyhow::Result<Vec<RatioCard>> {
    let rows = datasets::sophistication();
    anyhow::ensure!(!rows.is_empty(), "table 'sophistication' is empty");
    Ok(rows
        .iter()
        .map(|row| {
            let class = interpret_ratio(row.ratio, RATIO_THRESHOLD);
            RatioCard {
                region: row.region.to_string(),
                ratio: row.ratio,
                class,
                caption: ratio_caption(class).to_string(),
                color: ratio_color(class, &theme.ratio_above, &theme.ratio_below),
            }
        })
        .collect())
}

/// Keyword findings as vertical bars; rows in the declared concerning set
/// take the emphasis color.
pub fn keyword_figure(theme: &Theme) -> anyhow::Result<Figure> {
    let rows = datasets::keyword_findings();
    anyhow::ensure!(!rows.is_empty(), "table 'keywords' is empty");
    let colors = encode_category_color(&rows, &theme.emphasis, &theme.muted, |_, row| {
        CONCERNING_FINDINGS.contains(&row.finding)
    });

    Ok(Figure {
        id: "keyword-findings",
        title: "What investigators kept finding".to_string(),
        svg: vbar_chart(&VBarChart {
            width: 760.0,
            height: 380.0,
            labels: rows.iter().map(|r| r.finding.to_string()).collect(),
            values: rows.iter().map(|r| r.pct_of_observations).collect(),
            colors,
            bar_labels: rows
                .iter()
                .map(|r| format_percentage_label(r.pct_of_observations, 1))
                .collect(),
            grid: &theme.grid,
            baseline: None,
            rotate_labels: true,
        }),
    })
}

/// Year-over-year change per violation type, colored by sign, with a dashed
/// zero baseline.
pub fn growth_figure(theme: &Theme) -> anyhow::Result<Figure> {
    let rows = datasets::growth();
    anyhow::ensure!(!rows.is_empty(), "table 'growth' is empty");
    let colors: Vec<_> = rows
        .iter()
        .map(|r| encode_signed_color(r.growth_pct, &theme.increase, &theme.decrease))
        .collect();

    Ok(Figure {
        id: "growth",
        title: format!("Change by violation type, {GROWTH_YEAR_A} to {GROWTH_YEAR_B}"),
        svg: vbar_chart(&VBarChart {
            width: 720.0,
            height: 380.0,
            labels: rows.iter().map(|r| r.violation_type.to_string()).collect(),
            values: rows.iter().map(|r| r.growth_pct as f64).collect(),
            colors,
            bar_labels: rows
                .iter()
                .map(|r| format_signed_percent_label(r.growth_pct))
                .collect(),
            grid: &theme.grid,
            baseline: Some(&theme.baseline),
            rotate_labels: false,
        }),
    })
}

pub fn all_figures(theme: &Theme) -> anyhow::Result<Vec<Figure>> {
    Ok(vec![
        yearly_trend_figure(theme)?,
        violation_figure(theme)?,
        sophistication_figure(theme)?,
        keyword_figure(theme)?,
        growth_figure(theme)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::encode::RatioClass;

    #[test]
    fn violation_chart_emphasizes_only_the_top_row() {
        let theme = Theme::default();
        let fig = violation_figure(&theme).unwrap();
        assert_eq!(fig.svg.matches(theme.emphasis.as_str()).count(), 1);
        assert!(fig.svg.contains("Audit Trail Failures"));
        assert!(fig.svg.contains("49 (34.8%)"));
    }

    #[test]
    fn growth_chart_colors_follow_sign() {
        let theme = Theme::default();
        let fig = growth_figure(&theme).unwrap();
        // rising and flat rows take the increase color, the one falling row
        // takes the decrease color (bar rect plus its value label)
        assert!(fig.svg.contains("+33%"));
        assert!(fig.svg.contains("-57%"));
        assert!(fig.svg.contains("+0%"));
        assert_eq!(fig.svg.matches(theme.decrease.as_str()).count(), 2);
    }

    #[test]
    fn yearly_chart_annotates_the_surge() {
        let theme = Theme::default();
        let fig = yearly_trend_figure(&theme).unwrap();
        assert!(fig.svg.contains("+187% vs prior year"));
    }

    #[test]
    fn keyword_chart_emphasizes_the_declared_set() {
        let theme = Theme::default();
        let fig = keyword_figure(&theme).unwrap();
        // each emphasized row paints its bar rect and its value label
        let emphasized = fig.svg.matches(theme.emphasis.as_str()).count();
        assert_eq!(emphasized, 2 * CONCERNING_FINDINGS.len());
    }

    #[test]
    fn ratio_cards_interpret_each_region() {
        let theme = Theme::default();
        let cards = ratio_cards(&theme).unwrap();
        let by_region: Vec<_> = cards.iter().map(|c| (c.region.as_str(), c.class)).collect();
        assert_eq!(
            by_region,
            vec![
                ("United States", RatioClass::Below),
                ("India", RatioClass::Above),
                ("China", RatioClass::Below),
            ]
        );
        assert_eq!(cards[1].caption, "More complex than basic");
    }
}
