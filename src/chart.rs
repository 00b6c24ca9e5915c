use std::f64::consts::TAU;

use crate::data::aggregate::AreaTotals;
use crate::data::filter::FilteredView;
use crate::error::ChartRenderError;

type Result<T> = std::result::Result<T, ChartRenderError>;

/// Angle of the first pie wedge, counter-clockwise from the positive x axis.
pub const PIE_START_ANGLE_DEG: f64 = 140.0;

// ---------------------------------------------------------------------------
// Bar / line / scatter
// ---------------------------------------------------------------------------

/// `[year, value]` pairs of a per-year series; fails when there is nothing to draw.
pub fn year_series(yearly: &[(i64, f64)]) -> Result<Vec<[f64; 2]>> {
    if yearly.is_empty() {
        return Err(ChartRenderError::NoData);
    }
    Ok(yearly.iter().map(|&(y, v)| [y as f64, v]).collect())
}

/// One point per record with a value. May be empty.
pub fn scatter_points(view: &FilteredView<'_>) -> Vec<[f64; 2]> {
    view.iter()
        .filter(|r| !r.value.is_nan())
        .map(|r| [r.year as f64, r.value])
        .collect()
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the total, 0..=1.
    pub fraction: f64,
    /// Radians, counter-clockwise.
    pub start: f64,
    pub end: f64,
}

impl PieSlice {
    /// Percentage label, one decimal.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    /// Closed outlines covering the wedge on a circle of `radius` around the
    /// origin, each spanning at most a quarter turn so every part is convex.
    pub fn convex_parts(&self, radius: f64, segments_per_turn: usize) -> Vec<Vec<[f64; 2]>> {
        let sweep = self.end - self.start;
        let parts = (sweep / (TAU / 4.0)).ceil().max(1.0) as usize;
        let step = sweep / parts as f64;
        (0..parts)
            .map(|i| {
                let from = self.start + step * i as f64;
                wedge(from, from + step, radius, segments_per_turn)
            })
            .collect()
    }

    /// Point at `radius` on the wedge's bisector (label anchor).
    pub fn label_anchor(&self, radius: f64) -> [f64; 2] {
        let mid = (self.start + self.end) / 2.0;
        [radius * mid.cos(), radius * mid.sin()]
    }
}

fn wedge(start: f64, end: f64, radius: f64, segments_per_turn: usize) -> Vec<[f64; 2]> {
    let sweep = end - start;
    let steps = ((sweep / TAU) * segments_per_turn as f64).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = start + sweep * i as f64 / steps as f64;
        points.push([radius * a.cos(), radius * a.sin()]);
    }
    points
}

/// Split a full turn proportionally to the area totals.
///
/// Non-positive or missing totals get no wedge.
pub fn pie_slices(totals: &AreaTotals) -> Result<Vec<PieSlice>> {
    if totals.is_empty() {
        return Err(ChartRenderError::NoData);
    }
    let positive: Vec<&(String, f64)> = totals
        .entries()
        .iter()
        .filter(|(_, v)| *v > 0.0)
        .collect();
    let total: f64 = positive.iter().map(|(_, v)| v).sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(ChartRenderError::NonPositiveTotal);
    }

    let mut angle = PIE_START_ANGLE_DEG.to_radians();
    Ok(positive
        .into_iter()
        .map(|(label, value)| {
            let fraction = value / total;
            let start = angle;
            angle += fraction * TAU;
            PieSlice {
                label: label.clone(),
                value: *value,
                fraction,
                start,
                end: angle,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Choropleth
// ---------------------------------------------------------------------------

/// One shaded area cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaTile {
    pub area: String,
    pub value: f64,
    /// Position of `value` between the smallest and largest total, 0..=1.
    pub intensity: f64,
    pub column: usize,
    pub row: usize,
}

/// Lay areas out alphabetically on a grid `columns` wide and shade each by its
/// total relative to the others.
pub fn area_tiles(totals: &AreaTotals, columns: usize) -> Result<Vec<AreaTile>> {
    if totals.is_empty() {
        return Err(ChartRenderError::NoData);
    }
    let columns = columns.max(1);

    let mut entries: Vec<&(String, f64)> = totals.entries().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let (min, max) = value_range(totals);
    let span = max - min;

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(i, (area, value))| {
            let intensity = if span > 0.0 { (value - min) / span } else { 1.0 };
            AreaTile {
                area: area.clone(),
                value: *value,
                intensity,
                column: i % columns,
                row: i / columns,
            }
        })
        .collect())
}

/// Smallest and largest total.
pub fn value_range(totals: &AreaTotals) -> (f64, f64) {
    totals
        .entries()
        .iter()
        .map(|(_, v)| *v)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}
