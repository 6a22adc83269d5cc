//! Fail-fast invariant checks over the literal datasets.
//!
//! The tables are hand-edited, so every derived figure (percentage, ratio,
//! growth) is re-derived here from its base counts. A failing check means an
//! authoring mistake; `render` refuses to produce output until it is fixed.

use crate::domain::datasets::{
    self, GeoRow, GrowthRow, KeywordRow, SophisticationRow, ViolationRow, YearlyRow,
    TOTAL_OBSERVATIONS,
};
use crate::domain::models::CheckItem;
use crate::services::encode::growth_pct;

/// Max distance between a declared 1-decimal percentage and its re-derived
/// value.
const PCT_TOLERANCE: f64 = 0.05;
/// Rounding slack for a column of 1-decimal percentages that should sum to
/// 100.
const PCT_SUM_TOLERANCE: f64 = 0.5;
/// Max distance between a declared 2-decimal ratio and complex/basic.
const RATIO_TOLERANCE: f64 = 0.005;

fn ok(name: &str) -> CheckItem {
    CheckItem {
        name: name.to_string(),
        status: "ok".to_string(),
        detail: String::new(),
    }
}

fn failed(name: &str, detail: String) -> CheckItem {
    CheckItem {
        name: name.to_string(),
        status: "failed".to_string(),
        detail,
    }
}

fn check_yearly(rows: &[YearlyRow]) -> CheckItem {
    let name = "yearly_years_strictly_increasing";
    if rows.is_empty() {
        return failed(name, "table 'yearly' is empty".to_string());
    }
    for pair in rows.windows(2) {
        if pair[1].year <= pair[0].year {
            return failed(
                name,
                format!(
                    "table 'yearly' row {}: year {} does not increase past {}",
                    pair[1].year, pair[1].year, pair[0].year
                ),
            );
        }
    }
    ok(name)
}

fn check_violation_percentages(rows: &[ViolationRow]) -> CheckItem {
    let name = "violation_percentages_match_counts";
    if rows.is_empty() {
        return failed(name, "table 'violations' is empty".to_string());
    }
    for row in rows {
        let derived = f64::from(row.count) / f64::from(TOTAL_OBSERVATIONS) * 100.0;
        if !row.percentage.is_finite() || (row.percentage - derived).abs() > PCT_TOLERANCE {
            return failed(
                name,
                format!(
                    "table 'violations' row '{}': percentage {} is not {:.1} ({} / {} * 100)",
                    row.violation_type, row.percentage, derived, row.count, TOTAL_OBSERVATIONS
                ),
            );
        }
    }
    ok(name)
}

fn check_geo(rows: &[GeoRow]) -> Vec<CheckItem> {
    let sum_name = "geo_counts_sum_to_total";
    let pct_name = "geo_percentages_sum_to_100";
    if rows.is_empty() {
        let detail = "table 'geo' is empty".to_string();
        return vec![failed(sum_name, detail.clone()), failed(pct_name, detail)];
    }
    let count_sum: u32 = rows.iter().map(|r| r.observations).sum();
    let count_check = if count_sum == TOTAL_OBSERVATIONS {
        ok(sum_name)
    } else {
        failed(
            sum_name,
            format!("table 'geo': counts sum to {count_sum}, expected {TOTAL_OBSERVATIONS}"),
        )
    };
    let pct_sum: f64 = rows.iter().map(|r| r.percentage).sum();
    let pct_check = if pct_sum.is_finite() && (pct_sum - 100.0).abs() <= PCT_SUM_TOLERANCE {
        ok(pct_name)
    } else {
        failed(
            pct_name,
            format!("table 'geo': percentages sum to {pct_sum}, expected ~100"),
        )
    };
    vec![count_check, pct_check]
}

fn check_sophistication(rows: &[SophisticationRow]) -> CheckItem {
    let name = "sophistication_ratio_consistent";
    if rows.is_empty() {
        return failed(name, "table 'sophistication' is empty".to_string());
    }
    for row in rows {
        if row.basic_pct <= 0.0 || !row.basic_pct.is_finite() || !row.complex_pct.is_finite() {
            return failed(
                name,
                format!(
                    "table 'sophistication' row '{}': basic/complex percentages must be finite \
                     and positive",
                    row.region
                ),
            );
        }
        let derived = row.complex_pct / row.basic_pct;
        if !row.ratio.is_finite() || (row.ratio - derived).abs() > RATIO_TOLERANCE {
            return failed(
                name,
                format!(
                    "table 'sophistication' row '{}': ratio {} is not {:.2} ({} / {})",
                    row.region, row.ratio, derived, row.complex_pct, row.basic_pct
                ),
            );
        }
    }
    ok(name)
}

fn check_growth(rows: &[GrowthRow]) -> CheckItem {
    let name = "growth_pct_consistent";
    if rows.is_empty() {
        return failed(name, "table 'growth' is empty".to_string());
    }
    for row in rows {
        match growth_pct(row.year_a_count, row.year_b_count) {
            Some(derived) if derived == row.growth_pct => {}
            Some(derived) => {
                return failed(
                    name,
                    format!(
                        "table 'growth' row '{}': growth {} is not {} (({} - {}) * 100 / {})",
                        row.violation_type,
                        row.growth_pct,
                        derived,
                        row.year_b_count,
                        row.year_a_count,
                        row.year_a_count
                    ),
                );
            }
            None => {
                return failed(
                    name,
                    format!(
                        "table 'growth' row '{}': base-year count is zero",
                        row.violation_type
                    ),
                );
            }
        }
    }
    ok(name)
}

fn check_keywords(rows: &[KeywordRow]) -> CheckItem {
    let name = "keyword_percentages_in_range";
    if rows.is_empty() {
        return failed(name, "table 'keywords' is empty".to_string());
    }
    for row in rows {
        let pct = row.pct_of_observations;
        if !pct.is_finite() || pct <= 0.0 || pct > 100.0 {
            return failed(
                name,
                format!(
                    "table 'keywords' row '{}': percentage {} outside (0, 100]",
                    row.finding, pct
                ),
            );
        }
    }
    ok(name)
}

fn check_supplemental_non_empty() -> CheckItem {
    let name = "supplemental_tables_non_empty";
    let empties: Vec<&str> = [
        ("facility", datasets::facility_types().is_empty()),
        ("cooccurrence", datasets::cooccurrence().is_empty()),
        ("systems", datasets::system_categories().is_empty()),
    ]
    .into_iter()
    .filter(|(_, empty)| *empty)
    .map(|(table, _)| table)
    .collect();
    if empties.is_empty() {
        ok(name)
    } else {
        failed(name, format!("empty tables: {}", empties.join(", ")))
    }
}

/// Run every invariant check and report per-check status.
pub fn check_all() -> Vec<CheckItem> {
    let mut checks = vec![
        check_yearly(&datasets::yearly_trend()),
        check_violation_percentages(&datasets::violation_taxonomy()),
    ];
    checks.extend(check_geo(&datasets::geographic_distribution()));
    checks.push(check_sophistication(&datasets::sophistication()));
    checks.push(check_growth(&datasets::growth()));
    checks.push(check_keywords(&datasets::keyword_findings()));
    checks.push(check_supplemental_non_empty());
    checks
}

/// Fail fast on the first broken invariant. Called before any render.
pub fn ensure_valid() -> anyhow::Result<()> {
    for check in check_all() {
        if check.status != "ok" {
            anyhow::bail!("dataset check '{}' failed: {}", check.name, check.detail);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::datasets::Period;

    #[test]
    fn shipped_tables_pass_every_check() {
        for check in check_all() {
            assert_eq!(check.status, "ok", "{}: {}", check.name, check.detail);
        }
        assert!(ensure_valid().is_ok());
    }

    #[test]
    fn violation_percentage_drift_is_detected() {
        let mut rows = datasets::violation_taxonomy();
        rows[0].percentage = 35.0;
        let check = check_violation_percentages(&rows);
        assert_eq!(check.status, "failed");
        assert!(check.detail.contains("Audit Trail Failures"));
    }

    #[test]
    fn out_of_order_years_are_detected() {
        let rows = vec![
            YearlyRow { year: 2021, observations: 3, period: Period::PreSurge },
            YearlyRow { year: 2020, observations: 4, period: Period::PreSurge },
        ];
        assert_eq!(check_yearly(&rows).status, "failed");
    }

    #[test]
    fn growth_drift_is_detected() {
        let mut rows = datasets::growth();
        rows[0].growth_pct = 40;
        let check = check_growth(&rows);
        assert_eq!(check.status, "failed");
        assert!(check.detail.contains("Audit Trail"));
    }

    #[test]
    fn empty_tables_fail_instead_of_defaulting() {
        assert_eq!(check_keywords(&[]).status, "failed");
        assert_eq!(check_sophistication(&[]).status, "failed");
    }
}
