//! SVG chart cards

pub mod geometry;

use std::collections::BTreeMap;

use cinnamon_core::charts::Legend;
use cinnamon_core::{ChartHandle, ChartKind, ChartName};
use leptos::prelude::*;

use geometry::{
    area_path, bar_rects, line_path, line_points, slice_is_labelled, slices, tick_indexes,
};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
/// Room under the plot for axis labels.
const AXIS: f64 = 20.0;
const PLOT_HEIGHT: f64 = HEIGHT - AXIS;
const MAX_TICKS: usize = 8;
const VIEW_BOX: &str = "0 0 600 260";

const CENTER: (f64, f64) = (HEIGHT / 2.0, HEIGHT / 2.0);
const RADIUS: f64 = HEIGHT / 2.0 - 10.0;
/// Hole of the doughnut, as a share of the radius.
const DOUGHNUT_HOLE: f64 = 0.55;

fn color(palette: &[&'static str], index: usize) -> &'static str {
    palette
        .get(index.checked_rem(palette.len()).unwrap_or(0))
        .copied()
        .unwrap_or("#000000")
}

fn coord(value: f64) -> String {
    format!("{value:.1}")
}

#[allow(clippy::cast_precision_loss)]
fn axis_labels<F: Fn(usize) -> f64>(labels: &[String], x_of: F) -> impl IntoView + use<F> {
    tick_indexes(labels.len(), MAX_TICKS)
        .into_iter()
        .filter_map(|i| labels.get(i).map(|label| (x_of(i), label.clone())))
        .map(|(x, label)| {
            view! {
                <text class="chart-tick" x=coord(x) y=coord(HEIGHT - 4.0) text-anchor="middle">
                    {label}
                </text>
            }
        })
        .collect_view()
}

#[allow(clippy::cast_precision_loss)]
fn line_chart(handle: &ChartHandle) -> impl IntoView + use<> {
    let style = handle.style();
    let max = handle.max_value();
    let count = handle.labels().len();
    let step = if count > 1 {
        WIDTH / (count - 1) as f64
    } else {
        0.0
    };

    let series = handle
        .series()
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let points = line_points(&series.data, max, WIDTH, PLOT_HEIGHT);
            let area = style.fill.map(|fill| {
                view! {
                    <path
                        class="chart-area"
                        d=area_path(&points, style.tension, PLOT_HEIGHT)
                        fill=fill
                        stroke="none"
                    />
                }
            });
            view! {
                {area}
                <path
                    class="chart-line"
                    d=line_path(&points, style.tension)
                    fill="none"
                    stroke=color(style.palette, i)
                    stroke-width="2"
                />
            }
        })
        .collect_view();

    view! {
        <svg class="chart chart-line" viewBox=VIEW_BOX preserveAspectRatio="none" role="img">
            {series}
            {axis_labels(handle.labels(), move |i| i as f64 * step)}
        </svg>
    }
}

#[allow(clippy::cast_precision_loss)]
fn bar_chart(handle: &ChartHandle) -> impl IntoView + use<> {
    let style = handle.style();
    let max = handle.max_value();
    let bars = handle
        .series()
        .first()
        .map(|series| bar_rects(&series.data, max, WIDTH, PLOT_HEIGHT))
        .unwrap_or_default();
    let slot = if bars.is_empty() {
        0.0
    } else {
        WIDTH / bars.len() as f64
    };

    let rects = bars
        .into_iter()
        .map(|bar| {
            view! {
                <rect
                    class="chart-bar"
                    x=coord(bar.x)
                    y=coord(bar.y)
                    width=coord(bar.width)
                    height=coord(bar.height)
                    fill=color(style.palette, 0)
                />
            }
        })
        .collect_view();

    view! {
        <svg class="chart chart-bar" viewBox=VIEW_BOX preserveAspectRatio="none" role="img">
            {rects}
            {axis_labels(handle.labels(), move |i| (i as f64 + 0.5) * slot)}
        </svg>
    }
}

fn circular_chart(handle: &ChartHandle) -> impl IntoView + use<> {
    let style = handle.style();
    let inner = if handle.kind() == ChartKind::Doughnut {
        RADIUS * DOUGHNUT_HOLE
    } else {
        0.0
    };
    let data = handle
        .series()
        .first()
        .map(|series| series.data.clone())
        .unwrap_or_default();
    let parts = slices(&data, CENTER, RADIUS, inner);

    let paths = parts
        .iter()
        .enumerate()
        .filter(|(_, slice)| !slice.path.is_empty())
        .map(|(i, slice)| {
            view! {
                <path class="chart-slice" d=slice.path.clone() fill=color(style.palette, i) />
            }
        })
        .collect_view();

    let legend = (style.legend == Legend::Right).then(|| {
        handle
            .labels()
            .iter()
            .zip(parts.iter().map(|slice| slice.fraction))
            .enumerate()
            .map(|(i, (label, fraction))| {
                let share = slice_is_labelled(fraction)
                    .then(|| format!("{:.0}%", fraction * 100.0))
                    .unwrap_or_default();
                view! {
                    <li class="legend-item">
                        <span class="legend-swatch" style=format!("background: {}", color(style.palette, i))></span>
                        <span class="legend-label">{label.clone()}</span>
                        <span class="legend-share">{share}</span>
                    </li>
                }
            })
            .collect_view()
    });

    view! {
        <div class="chart chart-circular">
            <svg viewBox=format!("0 0 {HEIGHT} {HEIGHT}") role="img">{paths}</svg>
            <ul class="chart-legend">{legend}</ul>
        </div>
    }
}

fn chart_view(handle: &ChartHandle) -> AnyView {
    if handle.labels().is_empty() {
        return view! { <p class="chart-empty">"No data yet"</p> }.into_any();
    }
    match handle.kind() {
        ChartKind::Line => line_chart(handle).into_any(),
        ChartKind::Bar => bar_chart(handle).into_any(),
        ChartKind::Doughnut | ChartKind::Pie => circular_chart(handle).into_any(),
    }
}

/// One titled chart, redrawn whenever its handle's revision changes.
#[component]
pub fn ChartCard(
    name: ChartName,
    charts: RwSignal<BTreeMap<ChartName, ChartHandle>>,
) -> impl IntoView {
    let revision = Memo::new(move |_| {
        charts.with(|all| all.get(&name).map(ChartHandle::revision))
    });

    view! {
        <div class="chart-card" id=name.id()>
            <h3 class="chart-title">{name.title()}</h3>
            {move || {
                revision.track();
                charts.with_untracked(|all| all.get(&name).map(chart_view))
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        let palette = &["#111111", "#222222"];
        assert_eq!(color(palette, 0), "#111111");
        assert_eq!(color(palette, 3), "#222222");
        assert_eq!(color(&[], 2), "#000000");
    }

    #[test]
    fn test_chart_card_component_exists() {
        let _component = ChartCard;
    }
}
