//! Literal datasets behind the dashboard.
//!
//! Every table is a hand-curated, build-time constant: rows are declared once
//! and only ever borrowed. Counts and percentages were derived upstream from
//! the FDA warning-letter corpus; `services::validate` re-derives the
//! arithmetic so a table edit that breaks an invariant fails loudly.

use serde::Serialize;

/// Discrete findings counted across all tables.
pub const TOTAL_OBSERVATIONS: u32 = 141;
/// Warning letters the observations were cited in.
pub const TOTAL_LETTERS: u32 = 111;
/// Distinct companies across those letters.
pub const TOTAL_COMPANIES: u32 = 109;

/// Year span of the growth table's two compared snapshots.
pub const GROWTH_YEAR_A: u16 = 2022;
pub const GROWTH_YEAR_B: u16 = 2024;

/// Keyword findings called out with emphasis color on the keyword chart.
pub const CONCERNING_FINDINGS: &[&str] =
    &["Delete capability", "Spreadsheet use", "Administrator access"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    PreSurge,
    Surge,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearlyRow {
    pub year: u16,
    pub observations: u32,
    pub period: Period,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViolationRow {
    pub violation_type: &'static str,
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoRow {
    pub region: &'static str,
    pub observations: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SophisticationRow {
    pub region: &'static str,
    pub basic_pct: f64,
    pub complex_pct: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacilityRow {
    pub facility_type: &'static str,
    pub audit_trail_violations: u32,
    pub other_csv_violations: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthRow {
    pub violation_type: &'static str,
    pub year_a_count: u32,
    pub year_b_count: u32,
    pub growth_pct: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CooccurrenceRow {
    pub violation_pair: &'static str,
    pub co_occurrences: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordRow {
    pub finding: &'static str,
    pub pct_of_observations: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemRow {
    pub system_category: &'static str,
    pub observations: u32,
}

pub fn yearly_trend() -> Vec<YearlyRow> {
    use Period::{PreSurge, Surge};
    vec![
        YearlyRow { year: 2020, observations: 8, period: PreSurge },
        YearlyRow { year: 2021, observations: 7, period: PreSurge },
        YearlyRow { year: 2022, observations: 17, period: PreSurge },
        YearlyRow { year: 2023, observations: 8, period: PreSurge },
        YearlyRow { year: 2024, observations: 23, period: Surge },
        YearlyRow { year: 2025, observations: 22, period: Surge },
    ]
}

pub fn violation_taxonomy() -> Vec<ViolationRow> {
    vec![
        ViolationRow { violation_type: "Audit Trail Failures", count: 49, percentage: 34.8 },
        ViolationRow {
            violation_type: "Automatic Equipment Controls (211.68)",
            count: 40,
            percentage: 28.4,
        },
        ViolationRow { violation_type: "Chromatography Data Systems", count: 24, percentage: 17.0 },
        ViolationRow { violation_type: "Electronic Records", count: 24, percentage: 17.0 },
        ViolationRow { violation_type: "Password & Login Issues", count: 24, percentage: 17.0 },
        ViolationRow {
            violation_type: "Computerized Systems General",
            count: 22,
            percentage: 15.6,
        },
        ViolationRow { violation_type: "Access Control Failures", count: 21, percentage: 14.9 },
        ViolationRow { violation_type: "Software Validation", count: 19, percentage: 13.5 },
        ViolationRow { violation_type: "Data Backup Deficiencies", count: 8, percentage: 5.7 },
    ]
}

pub fn geographic_distribution() -> Vec<GeoRow> {
    vec![
        GeoRow { region: "United States", observations: 71, percentage: 50.4 },
        GeoRow { region: "India", observations: 28, percentage: 19.9 },
        GeoRow { region: "China", observations: 14, percentage: 9.9 },
        GeoRow { region: "Germany", observations: 6, percentage: 4.3 },
        GeoRow { region: "South Korea", observations: 3, percentage: 2.1 },
        GeoRow { region: "Other Regions", observations: 19, percentage: 13.4 },
    ]
}

pub fn sophistication() -> Vec<SophisticationRow> {
    vec![
        SophisticationRow {
            region: "United States",
            basic_pct: 36.4,
            complex_pct: 34.3,
            ratio: 0.94,
        },
        SophisticationRow { region: "India", basic_pct: 21.1, complex_pct: 22.8, ratio: 1.08 },
        SophisticationRow { region: "China", basic_pct: 33.3, complex_pct: 22.2, ratio: 0.67 },
    ]
}

pub fn facility_types() -> Vec<FacilityRow> {
    vec![
        FacilityRow {
            facility_type: "QC Laboratory",
            audit_trail_violations: 17,
            other_csv_violations: 12,
        },
        FacilityRow {
            facility_type: "API Manufacturing",
            audit_trail_violations: 11,
            other_csv_violations: 15,
        },
        FacilityRow {
            facility_type: "Sterile Manufacturing",
            audit_trail_violations: 3,
            other_csv_violations: 11,
        },
        FacilityRow {
            facility_type: "Finished Dosage",
            audit_trail_violations: 6,
            other_csv_violations: 9,
        },
        FacilityRow { facility_type: "Other", audit_trail_violations: 12, other_csv_violations: 45 },
    ]
}

pub fn growth() -> Vec<GrowthRow> {
    vec![
        GrowthRow { violation_type: "Audit Trail", year_a_count: 9, year_b_count: 12, growth_pct: 33 },
        GrowthRow {
            violation_type: "Password Security",
            year_a_count: 7,
            year_b_count: 3,
            growth_pct: -57,
        },
        GrowthRow {
            violation_type: "Electronic Records",
            year_a_count: 4,
            year_b_count: 4,
            growth_pct: 0,
        },
        GrowthRow {
            violation_type: "Equipment Controls",
            year_a_count: 7,
            year_b_count: 7,
            growth_pct: 0,
        },
    ]
}

pub fn cooccurrence() -> Vec<CooccurrenceRow> {
    vec![
        CooccurrenceRow { violation_pair: "Audit Trail + Password Issues", co_occurrences: 20 },
        CooccurrenceRow { violation_pair: "Audit Trail + Equipment Controls", co_occurrences: 20 },
        CooccurrenceRow {
            violation_pair: "Audit Trail + Chromatography Systems",
            co_occurrences: 16,
        },
        CooccurrenceRow { violation_pair: "Audit Trail + Access Control", co_occurrences: 16 },
        CooccurrenceRow { violation_pair: "Audit Trail + Electronic Records", co_occurrences: 14 },
    ]
}

pub fn keyword_findings() -> Vec<KeywordRow> {
    vec![
        KeywordRow { finding: "Delete capability", pct_of_observations: 15.6 },
        KeywordRow { finding: "Administrator access", pct_of_observations: 9.9 },
        KeywordRow { finding: "Shared credentials", pct_of_observations: 7.1 },
        KeywordRow { finding: "Not enabled", pct_of_observations: 6.4 },
        KeywordRow { finding: "Spreadsheet use", pct_of_observations: 7.8 },
        KeywordRow { finding: "Backup issues", pct_of_observations: 5.7 },
        KeywordRow { finding: "Manual workarounds", pct_of_observations: 4.3 },
    ]
}

pub fn system_categories() -> Vec<SystemRow> {
    vec![
        SystemRow { system_category: "Chromatography Data Systems", observations: 24 },
        SystemRow { system_category: "Laboratory Information Systems", observations: 10 },
        SystemRow { system_category: "Spreadsheet Applications", observations: 11 },
        SystemRow { system_category: "Analytical Instrument Software", observations: 8 },
    ]
}
