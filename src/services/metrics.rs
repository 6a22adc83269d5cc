//! Headline numbers derived from the datasets.
//!
//! Nothing here is hard-coded that a table can supply: the top violation,
//! the surge year and its growth, the delete-access share, and the US share
//! are all re-derived on every run.

use anyhow::{bail, Context};

use crate::domain::datasets::{
    self, TOTAL_COMPANIES, TOTAL_LETTERS, TOTAL_OBSERVATIONS,
};
use crate::domain::models::SummaryReport;
use crate::services::encode::{
    format_percentage_label, format_signed_percent_label, growth_pct, rank_rows,
};

pub fn summary() -> anyhow::Result<SummaryReport> {
    let yearly = datasets::yearly_trend();
    let violations = datasets::violation_taxonomy();
    let geo = datasets::geographic_distribution();
    let keywords = datasets::keyword_findings();

    let top = {
        let counts: Vec<f64> = violations.iter().map(|r| f64::from(r.count)).collect();
        let ranked = rank_rows("violations", &counts)?;
        &violations[ranked[0]]
    };

    let (surge_year, surge_growth) = surge(&yearly)?;

    let us = {
        let counts: Vec<f64> = geo.iter().map(|r| f64::from(r.observations)).collect();
        let ranked = rank_rows("geo", &counts)?;
        &geo[ranked[0]]
    };

    let delete_access = keywords
        .iter()
        .find(|r| r.finding == "Delete capability")
        .context("table 'keywords' is missing the 'Delete capability' row")?;

    Ok(SummaryReport {
        total_observations: TOTAL_OBSERVATIONS,
        total_letters: TOTAL_LETTERS,
        total_companies: TOTAL_COMPANIES,
        years: format!(
            "{}-{}",
            yearly.first().map(|r| r.year).unwrap_or_default(),
            yearly.last().map(|r| r.year).unwrap_or_default()
        ),
        top_violation: top.violation_type.to_string(),
        top_violation_share: format_percentage_label(top.percentage, 1),
        surge_year,
        surge_growth,
        delete_access_share: format_percentage_label(delete_access.pct_of_observations, 1),
        us_share: format_percentage_label(us.percentage, 1),
    })
}

/// The peak year and its year-over-year growth label ("+187%").
pub fn surge(yearly: &[datasets::YearlyRow]) -> anyhow::Result<(u16, String)> {
    let counts: Vec<f64> = yearly.iter().map(|r| f64::from(r.observations)).collect();
    let ranked = rank_rows("yearly", &counts)?;
    let peak = ranked[0];
    if peak == 0 {
        bail!("table 'yearly': peak year {} has no prior year to compare", yearly[0].year);
    }
    let prior = &yearly[peak - 1];
    let peak_row = &yearly[peak];
    let growth = growth_pct(prior.observations, peak_row.observations).with_context(|| {
        format!("table 'yearly' row {}: zero observations as growth base", prior.year)
    })?;
    Ok((peak_row.year, format_signed_percent_label(growth)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_rederives_published_headlines() {
        let report = summary().unwrap();
        assert_eq!(report.total_observations, 141);
        assert_eq!(report.years, "2020-2025");
        assert_eq!(report.top_violation, "Audit Trail Failures");
        assert_eq!(report.top_violation_share, "34.8%");
        assert_eq!(report.surge_year, 2024);
        assert_eq!(report.surge_growth, "+187%");
        assert_eq!(report.delete_access_share, "15.6%");
        assert_eq!(report.us_share, "50.4%");
    }
}
