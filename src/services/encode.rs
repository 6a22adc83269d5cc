//! Presentation encoder: value-dependent visual encodings over literal tables.
//!
//! Every function here is deterministic, side-effect free, and borrows its
//! table read-only. Emphasis conditions arrive as explicit predicates or
//! declared label sets; nothing in this module inspects category strings on
//! its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A CSS color value, carried as its hex/string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The one failure class in this crate: a malformed literal table.
///
/// Raised at construction time and never recovered; a hit means the table
/// declaration itself was edited into an inconsistent state.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("table '{table}' is empty")]
    EmptyTable { table: &'static str },
    #[error("table '{table}' row {row}: measure '{measure}' is not a finite number")]
    NonFiniteMeasure {
        table: &'static str,
        row: String,
        measure: &'static str,
    },
}

/// One color per row, aligned by row index. Emphasis rows take `emphasis`,
/// the rest `neutral`. Never reorders rows.
pub fn encode_category_color<T>(
    rows: &[T],
    emphasis: &Color,
    neutral: &Color,
    is_emphasis: impl Fn(usize, &T) -> bool,
) -> Vec<Color> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if is_emphasis(i, row) {
                emphasis.clone()
            } else {
                neutral.clone()
            }
        })
        .collect()
}

/// Two-color encoding of a signed delta. Zero is non-negative: it takes the
/// `increase` color, same as any positive value.
pub fn encode_signed_color(value: i64, increase: &Color, decrease: &Color) -> Color {
    if value >= 0 {
        increase.clone()
    } else {
        decrease.clone()
    }
}

/// Fixed-precision percentage label, e.g. `34.8%`. Uses `format!` rounding
/// (round half to even), the same everywhere a percentage is printed.
pub fn format_percentage_label(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// Integer delta with an explicit leading sign, e.g. `+33%` / `-57%`.
/// Zero renders as `+0%`.
pub fn format_signed_percent_label(value: i64) -> String {
    format!("{value:+}%")
}

/// Year-over-year growth in whole percent, truncating toward zero. This is
/// the formula the published figures (`+33`, `-57`, `187`) were produced
/// with. `None` when the base count is zero.
pub fn growth_pct(a: u32, b: u32) -> Option<i64> {
    if a == 0 {
        return None;
    }
    Some((i64::from(b) - i64::from(a)) * 100 / i64::from(a))
}

/// How a sophistication ratio sits against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioClass {
    Above,
    Below,
    Equal,
}

pub const RATIO_THRESHOLD: f64 = 1.0;

/// Pure comparison against the threshold. Callers feed already-validated
/// finite ratios; see `services::validate`.
pub fn interpret_ratio(ratio: f64, threshold: f64) -> RatioClass {
    if ratio > threshold {
        RatioClass::Above
    } else if ratio < threshold {
        RatioClass::Below
    } else {
        RatioClass::Equal
    }
}

/// Caption for a ratio class. `Equal` is below-leaning: a region is only
/// called more complex when its ratio actually exceeds the threshold.
pub fn ratio_caption(class: RatioClass) -> &'static str {
    match class {
        RatioClass::Above => "More complex than basic",
        RatioClass::Below | RatioClass::Equal => "More basic than complex",
    }
}

/// Color for a ratio class, same below-leaning rule as the caption.
pub fn ratio_color(class: RatioClass, above: &Color, below: &Color) -> Color {
    match class {
        RatioClass::Above => above.clone(),
        RatioClass::Below | RatioClass::Equal => below.clone(),
    }
}

/// Row indices in descending measure order. Ties keep original table order
/// (stable sort), so rendering is deterministic across runs.
pub fn rank_rows(table: &'static str, measures: &[f64]) -> Result<Vec<usize>, DatasetError> {
    if measures.is_empty() {
        return Err(DatasetError::EmptyTable { table });
    }
    if let Some(i) = measures.iter().position(|m| !m.is_finite()) {
        return Err(DatasetError::NonFiniteMeasure {
            table,
            row: i.to_string(),
            measure: "rank measure",
        });
    }
    let mut indices: Vec<usize> = (0..measures.len()).collect();
    indices.sort_by(|&a, &b| {
        measures[b]
            .partial_cmp(&measures[a])
            .expect("finite measures compare")
    });
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::new("#dc2626")
    }

    fn green() -> Color {
        Color::new("#059669")
    }

    #[test]
    fn signed_color_treats_zero_as_increase() {
        assert_eq!(
            encode_signed_color(0, &red(), &green()),
            encode_signed_color(1, &red(), &green())
        );
        assert_eq!(encode_signed_color(0, &red(), &green()), red());
        assert_eq!(encode_signed_color(-1, &red(), &green()), green());
    }

    #[test]
    fn category_colors_align_with_rows() {
        let rows = ["a", "b", "c"];
        let colors = encode_category_color(&rows, &red(), &green(), |_, r| *r == "b");
        assert_eq!(colors, vec![green(), red(), green()]);
    }

    #[test]
    fn signed_percent_labels_carry_explicit_sign() {
        assert_eq!(format_signed_percent_label(33), "+33%");
        assert_eq!(format_signed_percent_label(-57), "-57%");
        assert_eq!(format_signed_percent_label(0), "+0%");
    }

    #[test]
    fn percentage_label_round_trips_at_fixed_precision() {
        let label = format_percentage_label(34.8, 1);
        assert_eq!(label, "34.8%");
        let parsed: f64 = label.trim_end_matches('%').parse().unwrap();
        assert_eq!(format_percentage_label(parsed, 1), "34.8%");
    }

    #[test]
    fn ratio_classes_split_on_threshold() {
        assert_eq!(interpret_ratio(1.08, RATIO_THRESHOLD), RatioClass::Above);
        assert_eq!(interpret_ratio(0.67, RATIO_THRESHOLD), RatioClass::Below);
        assert_eq!(interpret_ratio(1.0, RATIO_THRESHOLD), RatioClass::Equal);
    }

    #[test]
    fn equal_ratio_presents_below_leaning() {
        assert_eq!(
            ratio_caption(RatioClass::Equal),
            ratio_caption(RatioClass::Below)
        );
        assert_eq!(
            ratio_color(RatioClass::Equal, &green(), &red()),
            ratio_color(RatioClass::Below, &green(), &red())
        );
    }

    #[test]
    fn ranking_is_stable_and_descending() {
        let counts = [49.0, 40.0, 24.0, 24.0, 24.0, 22.0, 21.0, 19.0, 8.0];
        let ranked = rank_rows("violations", &counts).unwrap();
        assert_eq!(ranked[0], 0);
        assert_eq!(&ranked[2..5], &[2, 3, 4]);
        assert_eq!(ranked, rank_rows("violations", &counts).unwrap());
    }

    #[test]
    fn ranking_rejects_malformed_tables() {
        assert!(matches!(
            rank_rows("empty", &[]),
            Err(DatasetError::EmptyTable { table: "empty" })
        ));
        assert!(rank_rows("nan", &[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn growth_pct_truncates_toward_zero() {
        assert_eq!(growth_pct(9, 12), Some(33));
        assert_eq!(growth_pct(7, 3), Some(-57));
        assert_eq!(growth_pct(8, 23), Some(187));
        assert_eq!(growth_pct(4, 4), Some(0));
        assert_eq!(growth_pct(0, 5), None);
    }
}
