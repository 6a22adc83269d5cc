//! Inline-SVG chart rendering.
//!
//! Four chart shapes cover the whole dashboard: line/area with an optional
//! annotation, horizontal bars, vertical bars (signed values supported), and
//! grouped vertical bars. Everything is assembled as plain markup strings;
//! colors arrive pre-encoded from `services::encode`, so no value-dependent
//! styling decision is made here.

use std::fmt::Write as _;

use crate::services::encode::Color;

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 32.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 36.0;
const GRID_INTERVALS: usize = 4;

pub struct LineAreaChart<'a> {
    pub width: f64,
    pub height: f64,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub stroke: &'a Color,
    pub grid: &'a Color,
    /// Point index plus callout text, e.g. the peak year's growth label.
    pub annotation: Option<(usize, String)>,
}

pub struct HBarChart<'a> {
    pub width: f64,
    pub row_height: f64,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Color>,
    pub bar_labels: Vec<String>,
    pub grid: &'a Color,
}

pub struct VBarChart<'a> {
    pub width: f64,
    pub height: f64,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Color>,
    pub bar_labels: Vec<String>,
    pub grid: &'a Color,
    /// Dashed zero line, for signed charts.
    pub baseline: Option<&'a Color>,
    pub rotate_labels: bool,
}

pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub color: Color,
    pub bar_labels: Vec<String>,
}

pub struct GroupedVBarChart<'a> {
    pub width: f64,
    pub height: f64,
    pub groups: Vec<String>,
    pub series: Vec<Series>,
    pub grid: &'a Color,
}

pub fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Upper axis bound: the next multiple of five above the data.
fn axis_max(v: f64) -> f64 {
    if v <= 0.0 {
        return 5.0;
    }
    (v / 5.0).ceil() * 5.0
}

/// Lower axis bound: zero, or the next multiple of five below the data.
fn axis_min(v: f64) -> f64 {
    if v >= 0.0 {
        return 0.0;
    }
    (v / 5.0).floor() * 5.0
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::min)
}

fn open_svg(out: &mut String, width: f64, height: f64) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width:.0} {height:.0}" width="{width:.0}" height="{height:.0}" role="img">"#
    );
}

fn grid_lines(
    out: &mut String,
    grid: &Color,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    y_min: f64,
    y_max: f64,
) {
    for i in 0..=GRID_INTERVALS {
        let frac = i as f64 / GRID_INTERVALS as f64;
        let value = y_max - (y_max - y_min) * frac;
        let y = top + (bottom - top) * frac;
        let _ = write!(
            out,
            r#"<line x1="{left:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="{grid}" stroke-width="1"/>"#
        );
        let _ = write!(
            out,
            r#"<text class="tick" x="{x:.1}" y="{ty:.1}" text-anchor="end" font-size="11">{value:.0}</text>"#,
            x = left - 8.0,
            ty = y + 4.0,
        );
    }
}

pub fn line_area_chart(c: &LineAreaChart) -> String {
    let n = c.values.len();
    let mut out = String::new();
    open_svg(&mut out, c.width, c.height);

    let left = MARGIN_LEFT;
    let right = c.width - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = c.height - MARGIN_BOTTOM;
    let y_max = axis_max(max_of(&c.values));

    let x_at = |i: usize| {
        if n <= 1 {
            (left + right) / 2.0
        } else {
            left + (right - left) * i as f64 / (n - 1) as f64
        }
    };
    let y_at = |v: f64| bottom - (bottom - top) * (v / y_max);

    grid_lines(&mut out, c.grid, left, right, top, bottom, 0.0, y_max);

    // area fill under the line
    let mut points = String::new();
    let _ = write!(points, "{:.1},{:.1} ", left, bottom);
    for (i, v) in c.values.iter().enumerate() {
        let _ = write!(points, "{:.1},{:.1} ", x_at(i), y_at(*v));
    }
    let _ = write!(points, "{:.1},{:.1}", right, bottom);
    let _ = write!(
        out,
        r#"<polygon points="{points}" fill="{stroke}" fill-opacity="0.12" stroke="none"/>"#,
        stroke = c.stroke,
    );

    let mut line = String::new();
    for (i, v) in c.values.iter().enumerate() {
        let _ = write!(line, "{:.1},{:.1} ", x_at(i), y_at(*v));
    }
    let _ = write!(
        out,
        r#"<polyline points="{line}" fill="none" stroke="{stroke}" stroke-width="3.5"/>"#,
        line = line.trim_end(),
        stroke = c.stroke,
    );

    for (i, v) in c.values.iter().enumerate() {
        let x = x_at(i);
        let y = y_at(*v);
        let _ = write!(
            out,
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="6" fill="{stroke}" stroke="{white}" stroke-width="2"/>"#,
            stroke = c.stroke,
            white = "#ffffff",
        );
        let _ = write!(
            out,
            r#"<text class="value-label" x="{x:.1}" y="{ly:.1}" text-anchor="middle" font-size="14" fill="{stroke}">{v:.0}</text>"#,
            ly = y - 14.0,
            stroke = c.stroke,
        );
        if let Some(label) = c.labels.get(i) {
            let _ = write!(
                out,
                r#"<text class="tick" x="{x:.1}" y="{ly:.1}" text-anchor="middle" font-size="12">{label}</text>"#,
                ly = bottom + 20.0,
                label = esc(label),
            );
        }
    }

    if let Some((index, text)) = &c.annotation {
        if let Some(v) = c.values.get(*index) {
            let px = x_at(*index);
            let py = y_at(*v);
            // callout sits up and to the left so it stays inside the frame
            let bw = 9.0 * text.chars().count() as f64 + 16.0;
            let bx = (px - bw - 36.0).max(left);
            let by = py - 44.0;
            let _ = write!(
                out,
                r#"<line x1="{px:.1}" y1="{py:.1}" x2="{lx:.1}" y2="{ly:.1}" stroke="{stroke}" stroke-width="1.5"/>"#,
                lx = bx + bw,
                ly = by + 12.0,
                stroke = c.stroke,
            );
            let _ = write!(
                out,
                r#"<g class="annotation"><rect x="{bx:.1}" y="{by:.1}" width="{bw:.1}" height="24" rx="4" fill="{white}" stroke="{stroke}" stroke-width="1.5"/><text x="{tx:.1}" y="{ty:.1}" text-anchor="middle" font-size="13" fill="{stroke}">{text}</text></g>"#,
                white = "#ffffff",
                tx = bx + bw / 2.0,
                ty = by + 16.0,
                stroke = c.stroke,
                text = esc(text),
            );
        }
    }

    out.push_str("</svg>");
    out
}

pub fn hbar_chart(c: &HBarChart) -> String {
    let n = c.values.len();
    let label_col = 250.0;
    let value_col = 110.0;
    let top = 16.0;
    let height = top + c.row_height * n as f64 + MARGIN_BOTTOM;
    let left = label_col;
    let right = c.width - value_col;
    let x_max = axis_max(max_of(&c.values));

    let mut out = String::new();
    open_svg(&mut out, c.width, height);

    for i in 0..=GRID_INTERVALS {
        let frac = i as f64 / GRID_INTERVALS as f64;
        let x = left + (right - left) * frac;
        let value = x_max * frac;
        let _ = write!(
            out,
            r#"<line x1="{x:.1}" y1="{top:.1}" x2="{x:.1}" y2="{by:.1}" stroke="{grid}" stroke-width="1"/>"#,
            by = height - MARGIN_BOTTOM,
            grid = c.grid,
        );
        let _ = write!(
            out,
            r#"<text class="tick" x="{x:.1}" y="{ty:.1}" text-anchor="middle" font-size="11">{value:.0}</text>"#,
            ty = height - MARGIN_BOTTOM + 16.0,
        );
    }

    for (i, v) in c.values.iter().enumerate() {
        let y = top + c.row_height * i as f64 + 4.0;
        let bar_h = c.row_height - 8.0;
        let bar_w = (right - left) * (v / x_max);
        let color = &c.colors[i];
        let _ = write!(
            out,
            r#"<rect x="{left:.1}" y="{y:.1}" width="{bar_w:.1}" height="{bar_h:.1}" fill="{color}"/>"#
        );
        let _ = write!(
            out,
            r#"<text class="category" x="{lx:.1}" y="{ly:.1}" text-anchor="end" font-size="12">{label}</text>"#,
            lx = left - 10.0,
            ly = y + bar_h / 2.0 + 4.0,
            label = esc(&c.labels[i]),
        );
        let _ = write!(
            out,
            r#"<text class="value-label" x="{vx:.1}" y="{vy:.1}" font-size="12">{label}</text>"#,
            vx = left + bar_w + 8.0,
            vy = y + bar_h / 2.0 + 4.0,
            label = esc(&c.bar_labels[i]),
        );
    }

    out.push_str("</svg>");
    out
}

pub fn vbar_chart(c: &VBarChart) -> String {
    let n = c.values.len();
    let mut out = String::new();
    open_svg(&mut out, c.width, c.height);

    let left = MARGIN_LEFT;
    let right = c.width - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = c.height - if c.rotate_labels { 90.0 } else { MARGIN_BOTTOM };
    let y_max = axis_max(max_of(&c.values));
    let y_min = axis_min(min_of(&c.values));
    let y_at = |v: f64| bottom - (bottom - top) * ((v - y_min) / (y_max - y_min));

    grid_lines(&mut out, c.grid, left, right, top, bottom, y_min, y_max);

    let slot = (right - left) / n as f64;
    let bar_w = slot * 0.55;
    let zero_y = y_at(0.0);

    for (i, v) in c.values.iter().enumerate() {
        let x = left + slot * i as f64 + (slot - bar_w) / 2.0;
        let vy = y_at(*v);
        let (rect_y, rect_h) = if *v >= 0.0 {
            (vy, zero_y - vy)
        } else {
            (zero_y, vy - zero_y)
        };
        let color = &c.colors[i];
        let _ = write!(
            out,
            r#"<rect x="{x:.1}" y="{rect_y:.1}" width="{bar_w:.1}" height="{rect_h:.1}" fill="{color}"/>"#
        );
        let label_y = if *v >= 0.0 { vy - 8.0 } else { vy + 18.0 };
        let _ = write!(
            out,
            r#"<text class="value-label" x="{cx:.1}" y="{label_y:.1}" text-anchor="middle" font-size="13" fill="{color}">{label}</text>"#,
            cx = x + bar_w / 2.0,
            label = esc(&c.bar_labels[i]),
        );
        let cat_y = bottom + 18.0;
        let cx = x + bar_w / 2.0;
        if c.rotate_labels {
            let _ = write!(
                out,
                r#"<text class="category" x="{cx:.1}" y="{cat_y:.1}" text-anchor="start" font-size="12" transform="rotate(28 {cx:.1} {cat_y:.1})">{label}</text>"#,
                label = esc(&c.labels[i]),
            );
        } else {
            let _ = write!(
                out,
                r#"<text class="category" x="{cx:.1}" y="{cat_y:.1}" text-anchor="middle" font-size="12">{label}</text>"#,
                label = esc(&c.labels[i]),
            );
        }
    }

    if let Some(baseline) = c.baseline {
        let _ = write!(
            out,
            r#"<line x1="{left:.1}" y1="{zero_y:.1}" x2="{right:.1}" y2="{zero_y:.1}" stroke="{baseline}" stroke-width="2" stroke-dasharray="6 4"/>"#
        );
    }

    out.push_str("</svg>");
    out
}

pub fn grouped_vbar_chart(c: &GroupedVBarChart) -> String {
    let n = c.groups.len();
    let s = c.series.len();
    let mut out = String::new();
    open_svg(&mut out, c.width, c.height);

    let left = MARGIN_LEFT;
    let right = c.width - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = c.height - MARGIN_BOTTOM;
    let y_max = axis_max(
        c.series
            .iter()
            .map(|series| max_of(&series.values))
            .fold(0.0, f64::max),
    );
    let y_at = |v: f64| bottom - (bottom - top) * (v / y_max);

    // legend row above the plot
    let mut lx = left;
    for series in &c.series {
        let _ = write!(
            out,
            r#"<rect x="{lx:.1}" y="12" width="12" height="12" fill="{color}"/><text class="legend" x="{tx:.1}" y="22" font-size="12">{name}</text>"#,
            color = series.color,
            tx = lx + 18.0,
            name = esc(&series.name),
        );
        lx += 24.0 + 8.0 * series.name.chars().count() as f64;
    }

    grid_lines(&mut out, c.grid, left, right, top, bottom, 0.0, y_max);

    let slot = (right - left) / n as f64;
    let group_w = slot * 0.7;
    let bar_w = group_w / s as f64;

    for (g, group) in c.groups.iter().enumerate() {
        let gx = left + slot * g as f64 + (slot - group_w) / 2.0;
        for (k, series) in c.series.iter().enumerate() {
            let v = series.values[g];
            let x = gx + bar_w * k as f64;
            let vy = y_at(v);
            let _ = write!(
                out,
                r#"<rect x="{x:.1}" y="{vy:.1}" width="{w:.1}" height="{h:.1}" fill="{color}"/>"#,
                w = bar_w - 4.0,
                h = bottom - vy,
                color = series.color,
            );
            let _ = write!(
                out,
                r#"<text class="value-label" x="{cx:.1}" y="{ly:.1}" text-anchor="middle" font-size="11">{label}</text>"#,
                cx = x + (bar_w - 4.0) / 2.0,
                ly = vy - 6.0,
                label = esc(&series.bar_labels[g]),
            );
        }
        let _ = write!(
            out,
            r#"<text class="category" x="{cx:.1}" y="{ly:.1}" text-anchor="middle" font-size="13">{label}</text>"#,
            cx = gx + group_w / 2.0,
            ly = bottom + 20.0,
            label = esc(group),
        );
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(hex: &str) -> Color {
        Color::new(hex)
    }

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(esc("A&B <C>"), "A&amp;B &lt;C&gt;");
    }

    #[test]
    fn axis_bounds_bracket_the_data() {
        assert_eq!(axis_max(23.0), 25.0);
        assert_eq!(axis_max(0.0), 5.0);
        assert_eq!(axis_min(-57.0), -60.0);
        assert_eq!(axis_min(12.0), 0.0);
    }

    #[test]
    fn vbar_draws_one_rect_per_row_plus_baseline() {
        let grid = color("#f1f5f9");
        let base = color("#94a3b8");
        let chart = vbar_chart(&VBarChart {
            width: 720.0,
            height: 380.0,
            labels: vec!["Up".into(), "Down".into()],
            values: vec![33.0, -57.0],
            colors: vec![color("#dc2626"), color("#059669")],
            bar_labels: vec!["+33%".into(), "-57%".into()],
            grid: &grid,
            baseline: Some(&base),
            rotate_labels: false,
        });
        assert_eq!(chart.matches("<rect").count(), 2);
        assert!(chart.contains("stroke-dasharray"));
        assert!(chart.contains("+33%"));
        assert!(chart.contains("-57%"));
    }

    #[test]
    fn line_chart_places_annotation_and_markers() {
        let grid = color("#f1f5f9");
        let stroke = color("#dc2626");
        let chart = line_area_chart(&LineAreaChart {
            width: 760.0,
            height: 400.0,
            labels: vec!["2023".into(), "2024".into()],
            values: vec![8.0, 23.0],
            stroke: &stroke,
            grid: &grid,
            annotation: Some((1, "+187% vs prior year".into())),
        });
        assert_eq!(chart.matches("<circle").count(), 2);
        assert!(chart.contains("+187% vs prior year"));
        assert!(chart.contains("<polygon"));
    }

    #[test]
    fn hbar_keeps_row_order() {
        let grid = color("#f1f5f9");
        let chart = hbar_chart(&HBarChart {
            width: 760.0,
            row_height: 40.0,
            labels: vec!["First".into(), "Second".into()],
            values: vec![49.0, 40.0],
            colors: vec![color("#dc2626"), color("#475569")],
            bar_labels: vec!["49 (34.8%)".into(), "40 (28.4%)".into()],
            grid: &grid,
        });
        let first = chart.find("First").unwrap();
        let second = chart.find("Second").unwrap();
        assert!(first < second);
    }
}
