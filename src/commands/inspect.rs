use crate::cli::{Cli, Measure, TableId};
use crate::domain::datasets;
use crate::domain::models::{JsonOut, RankEntry, TableInfo};
use crate::services::output::print_out;
use crate::services::theme::PageConfig;
use crate::services::{charts, encode, metrics};

pub fn handle_summary(cli: &Cli) -> anyhow::Result<()> {
    let report = metrics::summary()?;
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data: report })?
        );
    } else {
        println!("observations: {}", report.total_observations);
        println!("warning letters: {}", report.total_letters);
        println!("companies: {}", report.total_companies);
        println!("years: {}", report.years);
        println!(
            "top violation: {} ({})",
            report.top_violation, report.top_violation_share
        );
        println!("surge: {} ({})", report.surge_year, report.surge_growth);
        println!("delete access: {}", report.delete_access_share);
        println!("us share: {}", report.us_share);
    }
    Ok(())
}

pub fn handle_tables(cli: &Cli) -> anyhow::Result<()> {
    let infos = table_infos();
    print_out(cli.json, &infos, |t| {
        format!("{}\t{} rows\t{}", t.name, t.rows, t.measures.join(", "))
    })
}

pub fn handle_show(cli: &Cli, table: TableId) -> anyhow::Result<()> {
    match table {
        TableId::Yearly => print_out(cli.json, &datasets::yearly_trend(), |r| {
            format!("{}\t{}\t{:?}", r.year, r.observations, r.period)
        }),
        TableId::Violations => print_out(cli.json, &datasets::violation_taxonomy(), |r| {
            format!("{}\t{}\t{}%", r.violation_type, r.count, r.percentage)
        }),
        TableId::Geo => print_out(cli.json, &datasets::geographic_distribution(), |r| {
            format!("{}\t{}\t{}%", r.region, r.observations, r.percentage)
        }),
        TableId::Sophistication => print_out(cli.json, &datasets::sophistication(), |r| {
            format!(
                "{}\tbasic {}%\tcomplex {}%\tratio {:.2}",
                r.region, r.basic_pct, r.complex_pct, r.ratio
            )
        }),
        TableId::Facility => print_out(cli.json, &datasets::facility_types(), |r| {
            format!(
                "{}\taudit trail {}\tother {}",
                r.facility_type, r.audit_trail_violations, r.other_csv_violations
            )
        }),
        TableId::Growth => print_out(cli.json, &datasets::growth(), |r| {
            format!(
                "{}\t{} -> {}\t{}",
                r.violation_type,
                r.year_a_count,
                r.year_b_count,
                encode::format_signed_percent_label(r.growth_pct)
            )
        }),
        TableId::Cooccurrence => print_out(cli.json, &datasets::cooccurrence(), |r| {
            format!("{}\t{}", r.violation_pair, r.co_occurrences)
        }),
        TableId::Keywords => print_out(cli.json, &datasets::keyword_findings(), |r| {
            format!("{}\t{}%", r.finding, r.pct_of_observations)
        }),
        TableId::Systems => print_out(cli.json, &datasets::system_categories(), |r| {
            format!("{}\t{}", r.system_category, r.observations)
        }),
    }
}

pub fn handle_rank(cli: &Cli, table: TableId, by: Option<Measure>) -> anyhow::Result<()> {
    let (labels, values) = rank_input(table, by)?;
    let ranked = encode::rank_rows(table.name(), &values)?;
    let entries: Vec<RankEntry> = ranked
        .iter()
        .enumerate()
        .map(|(rank, &i)| RankEntry {
            rank: rank + 1,
            label: labels[i].clone(),
            value: values[i],
        })
        .collect();
    print_out(cli.json, &entries, |e| {
        format!("{}\t{}\t{}", e.rank, e.label, format_measure(e.value))
    })
}

pub fn handle_ratios(cli: &Cli, cfg: &PageConfig) -> anyhow::Result<()> {
    let cards = charts::ratio_cards(&cfg.theme)?;
    print_out(cli.json, &cards, |c| {
        format!("{}\t{:.2}\t{}", c.region, c.ratio, c.caption)
    })
}

fn table_infos() -> Vec<TableInfo> {
    let info = |name: &str, rows: usize, measures: &[&str]| TableInfo {
        name: name.to_string(),
        rows,
        measures: measures.iter().map(|m| (*m).to_string()).collect(),
    };
    vec![
        info("yearly", datasets::yearly_trend().len(), &["observations"]),
        info(
            "violations",
            datasets::violation_taxonomy().len(),
            &["count", "percentage"],
        ),
        info(
            "geo",
            datasets::geographic_distribution().len(),
            &["observations", "percentage"],
        ),
        info(
            "sophistication",
            datasets::sophistication().len(),
            &["basic_pct", "complex_pct", "ratio"],
        ),
        info(
            "facility",
            datasets::facility_types().len(),
            &["audit_trail_violations", "other_csv_violations"],
        ),
        info(
            "growth",
            datasets::growth().len(),
            &["year_a_count", "year_b_count", "growth_pct"],
        ),
        info("cooccurrence", datasets::cooccurrence().len(), &["co_occurrences"]),
        info(
            "keywords",
            datasets::keyword_findings().len(),
            &["pct_of_observations"],
        ),
        info("systems", datasets::system_categories().len(), &["observations"]),
    ]
}

/// Labels plus the measure column to rank by. Each table has a default
/// measure; asking for one it does not carry is an input error.
fn rank_input(table: TableId, by: Option<Measure>) -> anyhow::Result<(Vec<String>, Vec<f64>)> {
    let unsupported = |measure: Measure| {
        anyhow::anyhow!(
            "table '{}' has no '{:?}' measure to rank by",
            table.name(),
            measure
        )
    };
    match table {
        TableId::Yearly => {
            let rows = datasets::yearly_trend();
            match by.unwrap_or(Measure::Count) {
                Measure::Count => Ok((
                    rows.iter().map(|r| r.year.to_string()).collect(),
                    rows.iter().map(|r| f64::from(r.observations)).collect(),
                )),
                other => Err(unsupported(other)),
            }
        }
        TableId::Violations => {
            let rows = datasets::violation_taxonomy();
            let labels: Vec<String> = rows.iter().map(|r| r.violation_type.to_string()).collect();
            match by.unwrap_or(Measure::Count) {
                Measure::Count => {
                    Ok((labels, rows.iter().map(|r| f64::from(r.count)).collect()))
                }
                Measure::Percentage => Ok((labels, rows.iter().map(|r| r.percentage).collect())),
                other => Err(unsupported(other)),
            }
        }
        TableId::Geo => {
            let rows = datasets::geographic_distribution();
            let labels: Vec<String> = rows.iter().map(|r| r.region.to_string()).collect();
            match by.unwrap_or(Measure::Count) {
                Measure::Count => Ok((
                    labels,
                    rows.iter().map(|r| f64::from(r.observations)).collect(),
                )),
                Measure::Percentage => Ok((labels, rows.iter().map(|r| r.percentage).collect())),
                other => Err(unsupported(other)),
            }
        }
        TableId::Sophistication => {
            let rows = datasets::sophistication();
            match by.unwrap_or(Measure::Ratio) {
                Measure::Ratio => Ok((
                    rows.iter().map(|r| r.region.to_string()).collect(),
                    rows.iter().map(|r| r.ratio).collect(),
                )),
                other => Err(unsupported(other)),
            }
        }
        TableId::Facility => {
            let rows = datasets::facility_types();
            match by.unwrap_or(Measure::Count) {
                Measure::Count => Ok((
                    rows.iter().map(|r| r.facility_type.to_string()).collect(),
                    rows.iter()
                        .map(|r| f64::from(r.audit_trail_violations))
                        .collect(),
                )),
                other => Err(unsupported(other)),
            }
        }
        TableId::Growth => {
            let rows = datasets::growth();
            match by.unwrap_or(Measure::Growth) {
                Measure::Growth => Ok((
                    rows.iter().map(|r| r.violation_type.to_string()).collect(),
                    rows.iter().map(|r| r.growth_pct as f64).collect(),
                )),
                other => Err(unsupported(other)),
            }
        }
        TableId::Cooccurrence => {
            let rows = datasets::cooccurrence();
            match by.unwrap_or(Measure::Count) {
                Measure::Count => Ok((
                    rows.iter().map(|r| r.violation_pair.to_string()).collect(),
                    rows.iter().map(|r| f64::from(r.co_occurrences)).collect(),
                )),
                other => Err(unsupported(other)),
            }
        }
        TableId::Keywords => {
            let rows = datasets::keyword_findings();
            match by.unwrap_or(Measure::Percentage) {
                Measure::Percentage => Ok((
                    rows.iter().map(|r| r.finding.to_string()).collect(),
                    rows.iter().map(|r| r.pct_of_observations).collect(),
                )),
                other => Err(unsupported(other)),
            }
        }
        TableId::Systems => {
            let rows = datasets::system_categories();
            match by.unwrap_or(Measure::Count) {
                Measure::Count => Ok((
                    rows.iter().map(|r| r.system_category.to_string()).collect(),
                    rows.iter().map(|r| f64::from(r.observations)).collect(),
                )),
                other => Err(unsupported(other)),
            }
        }
    }
}

fn format_measure(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_a_default_rank_measure() {
        for table in [
            TableId::Yearly,
            TableId::Violations,
            TableId::Geo,
            TableId::Sophistication,
            TableId::Facility,
            TableId::Growth,
            TableId::Cooccurrence,
            TableId::Keywords,
            TableId::Systems,
        ] {
            let (labels, values) = rank_input(table, None).unwrap();
            assert_eq!(labels.len(), values.len());
            assert!(!labels.is_empty(), "{} produced no rows", table.name());
        }
    }

    #[test]
    fn unsupported_measures_are_rejected() {
        assert!(rank_input(TableId::Yearly, Some(Measure::Ratio)).is_err());
        assert!(rank_input(TableId::Keywords, Some(Measure::Count)).is_err());
    }

    #[test]
    fn table_listing_covers_all_nine_datasets() {
        assert_eq!(table_infos().len(), 9);
    }
}
