//! SVG geometry for the dashboard charts
//!
//! Pure functions from chart data to SVG path strings and shapes. Coordinates
//! are in a fixed view box; the browser scales the `<svg>` to its container.
//! Points are `(x, y)` tuples with `y` growing downwards.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

/// Upper bound used for scaling; an empty or all-zero chart scales to one.
#[must_use]
pub fn scale_max(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 { max } else { 1.0 }
}

/// Spreads `data` evenly across `width`, scaled so `max` touches the top.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn line_points(data: &[f64], max: f64, width: f64, height: f64) -> Vec<(f64, f64)> {
    let max = scale_max(max);
    let gaps = data.len().saturating_sub(1);
    let step = if gaps == 0 { 0.0 } else { width / gaps as f64 };
    data.iter()
        .enumerate()
        .map(|(i, value)| {
            let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
            (i as f64 * step, height - value / max * height)
        })
        .collect()
}

fn push_point(path: &mut String, command: &str, (x, y): (f64, f64)) {
    let _ = write!(path, "{command}{x:.1},{y:.1}");
}

/// Path through `points`. A positive `tension` bends segments into cubic
/// curves whose control points follow the neighbouring points.
#[must_use]
pub fn line_path(points: &[(f64, f64)], tension: f64) -> String {
    let Some(&first) = points.first() else {
        return String::new();
    };
    let mut path = String::new();
    push_point(&mut path, "M", first);

    let k = tension.max(0.0) / 2.0;
    for (i, pair) in points.windows(2).enumerate() {
        let [p1, p2] = [pair.first(), pair.get(1)];
        let (Some(&p1), Some(&p2)) = (p1, p2) else {
            continue;
        };
        if k == 0.0 {
            push_point(&mut path, " L", p2);
            continue;
        }
        let p0 = i
            .checked_sub(1)
            .and_then(|j| points.get(j))
            .copied()
            .unwrap_or(p1);
        let p3 = points.get(i.saturating_add(2)).copied().unwrap_or(p2);
        let c1 = (p1.0 + (p2.0 - p0.0) * k, p1.1 + (p2.1 - p0.1) * k);
        let c2 = (p2.0 - (p3.0 - p1.0) * k, p2.1 - (p3.1 - p1.1) * k);
        push_point(&mut path, " C", c1);
        push_point(&mut path, " ", c2);
        push_point(&mut path, " ", p2);
    }
    path
}

/// [`line_path`] closed down to `baseline`, for filled areas.
#[must_use]
pub fn area_path(points: &[(f64, f64)], tension: f64, baseline: f64) -> String {
    let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) else {
        return String::new();
    };
    let mut path = line_path(points, tension);
    push_point(&mut path, " L", (last_x, baseline));
    push_point(&mut path, " L", (first_x, baseline));
    path.push_str(" Z");
    path
}

/// One bar of a bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Share of each slot left empty between bars.
const BAR_GAP: f64 = 0.3;

/// Evenly spaced bars standing on the bottom edge.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bar_rects(data: &[f64], max: f64, width: f64, height: f64) -> Vec<BarRect> {
    if data.is_empty() {
        return Vec::new();
    }
    let max = scale_max(max);
    let slot = width / data.len() as f64;
    let bar_width = slot * (1.0 - BAR_GAP);
    data.iter()
        .enumerate()
        .map(|(i, value)| {
            let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
            let bar_height = value / max * height;
            BarRect {
                x: i as f64 * slot + slot * BAR_GAP / 2.0,
                y: height - bar_height,
                width: bar_width,
                height: bar_height,
            }
        })
        .collect()
}

/// Point at `angle` on the circle; zero is straight up, growing clockwise.
fn polar((cx, cy): (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    let theta = angle - FRAC_PI_2;
    (cx + radius * theta.cos(), cy + radius * theta.sin())
}

fn push_arc(path: &mut String, radius: f64, clockwise: bool, to: (f64, f64)) {
    let sweep = u8::from(clockwise);
    let _ = write!(
        path,
        " A{radius:.1},{radius:.1} 0 0 {sweep} {:.1},{:.1}",
        to.0, to.1
    );
}

/// Ring (or pie, when `inner` is zero) sector from `start` to `end` radians.
///
/// Every arc is drawn as two halves so a full circle still renders.
#[must_use]
pub fn sector_path(center: (f64, f64), outer: f64, inner: f64, start: f64, end: f64) -> String {
    let mid = (start + end) / 2.0;
    let mut path = String::new();
    push_point(&mut path, "M", polar(center, outer, start));
    push_arc(&mut path, outer, true, polar(center, outer, mid));
    push_arc(&mut path, outer, true, polar(center, outer, end));
    if inner > 0.0 {
        push_point(&mut path, " L", polar(center, inner, end));
        push_arc(&mut path, inner, false, polar(center, inner, mid));
        push_arc(&mut path, inner, false, polar(center, inner, start));
    } else {
        push_point(&mut path, " L", center);
    }
    path.push_str(" Z");
    path
}

/// One slice of a pie or doughnut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub path: String,
    pub fraction: f64,
}

/// Slices proportional to the positive values in `data`, clockwise from the
/// top. Non-positive values get an empty slice so indexes keep lining up
/// with the labels.
#[must_use]
pub fn slices(data: &[f64], center: (f64, f64), outer: f64, inner: f64) -> Vec<Slice> {
    let positive = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let total: f64 = data.iter().copied().map(positive).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    data.iter()
        .map(|&value| {
            let fraction = positive(value) / total;
            let sweep = fraction * TAU;
            let path = if fraction > 0.0 {
                sector_path(center, outer, inner, angle, angle + sweep)
            } else {
                String::new()
            };
            angle += sweep;
            Slice { path, fraction }
        })
        .collect()
}

/// Whether a slice is large enough to carry a percentage label.
#[must_use]
pub fn slice_is_labelled(fraction: f64) -> bool {
    fraction * TAU >= PI / 12.0
}

/// Indexes of at most `max_ticks` evenly spaced labels.
#[must_use]
pub fn tick_indexes(len: usize, max_ticks: usize) -> Vec<usize> {
    if len == 0 || max_ticks == 0 {
        return Vec::new();
    }
    let step = len.div_ceil(max_ticks).max(1);
    (0..len).step_by(step).collect()
}
