use crate::services::encode::{Color, RatioClass};
use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
    pub detail: String,
}

#[derive(Serialize)]
pub struct ValidationReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Serialize)]
pub struct SummaryReport {
    pub total_observations: u32,
    pub total_letters: u32,
    pub total_companies: u32,
    pub years: String,
    pub top_violation: String,
    pub top_violation_share: String,
    pub surge_year: u16,
    pub surge_growth: String,
    pub delete_access_share: String,
    pub us_share: String,
}

#[derive(Serialize, Clone)]
pub struct TableInfo {
    pub name: String,
    pub rows: usize,
    pub measures: Vec<String>,
}

#[derive(Serialize)]
pub struct RankEntry {
    pub rank: usize,
    pub label: String,
    pub value: f64,
}

#[derive(Serialize, Clone)]
pub struct RatioCard {
    pub region: String,
    pub ratio: f64,
    pub class: RatioClass,
    pub caption: String,
    pub color: Color,
}

#[derive(Serialize)]
pub struct RenderReport {
    pub out: String,
    pub bytes: usize,
    pub figures: usize,
}
