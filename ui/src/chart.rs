use dioxus::prelude::*;
use types::period::ChartPoint;

const WIDTH: f64 = 640.0;
const PAD_LEFT: f64 = 48.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_Y: f64 = 20.0;
const Y_TICKS: usize = 4;

/// Screen coordinates for each point, scaled into the plot area.
fn layout(points: &[ChartPoint], height: f64) -> Vec<(f64, f64)> {
    if points.is_empty() {
        return Vec::new();
    }

    let (min, max) = bounds(points);
    let span = if max > min { max - min } else { 1.0 };
    let plot_w = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_h = height - 2.0 * PAD_Y;
    let step = if points.len() > 1 {
        plot_w / (points.len() - 1) as f64
    } else {
        0.0
    };

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = if points.len() > 1 {
                PAD_LEFT + step * i as f64
            } else {
                PAD_LEFT + plot_w / 2.0
            };
            let y = PAD_Y + plot_h - (p.value - min) / span * plot_h;
            (x, y)
        })
        .collect()
}

/// Value range of the y axis; always includes zero.
fn bounds(points: &[ChartPoint]) -> (f64, f64) {
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let min = points.iter().map(|p| p.value).fold(0.0_f64, f64::min);
    (min, max)
}

#[component]
pub fn LineChartCard(
    #[props(into)] title: String,
    points: Vec<ChartPoint>,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] value_label: Option<String>,
    #[props(default = 320.0)] height: f64,
    #[props(default = "#3b82f6".to_string())] stroke: String,
    children: Element,
) -> Element {
    let coords = layout(&points, height);
    let polyline = coords
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let (min, max) = bounds(&points);
    let baseline = height - PAD_Y;
    let label_every = (points.len() / 8).max(1);

    rsx! {
        div { class: "card chart-card",
            div { class: "card-header",
                h2 { class: "card-title", "{title}" }
                div { class: "card-header-actions",
                    if let Some(subtitle) = subtitle {
                        span { class: "text-muted", "{subtitle}" }
                    }
                    {children}
                }
            }
            if points.is_empty() {
                div { class: "chart-empty", "No data for the selected filters" }
            } else {
                svg {
                    class: "line-chart",
                    view_box: "0 0 {WIDTH} {height}",
                    width: "100%",
                    height: "{height}",
                    for tick in 0..=Y_TICKS {
                        {
                            let frac = tick as f64 / Y_TICKS as f64;
                            let y = baseline - frac * (height - 2.0 * PAD_Y);
                            let value = min + frac * (max - min);
                            rsx! {
                                line {
                                    key: "grid-{tick}",
                                    x1: "{PAD_LEFT}",
                                    x2: "{WIDTH - PAD_RIGHT}",
                                    y1: "{y:.1}",
                                    y2: "{y:.1}",
                                    stroke: "#e5e7eb",
                                    stroke_dasharray: "3 3",
                                }
                                text {
                                    key: "tick-{tick}",
                                    x: "{PAD_LEFT - 6.0}",
                                    y: "{y + 4.0:.1}",
                                    text_anchor: "end",
                                    font_size: "11",
                                    "{value:.0}"
                                }
                            }
                        }
                    }
                    polyline {
                        points: "{polyline}",
                        fill: "none",
                        stroke: "{stroke}",
                        stroke_width: "2",
                    }
                    for (i, ((x, y), point)) in coords.iter().zip(points.iter()).enumerate() {
                        circle {
                            key: "pt-{i}",
                            cx: "{x:.1}",
                            cy: "{y:.1}",
                            r: "3",
                            fill: "{stroke}",
                            title {
                                {match &value_label {
                                    Some(label) => format!("{}: {label}: {}", point.label, point.value),
                                    None => format!("{}: {}", point.label, point.value),
                                }}
                            }
                        }
                        if i % label_every == 0 {
                            text {
                                key: "x-{i}",
                                x: "{x:.1}",
                                y: "{height - 4.0:.1}",
                                text_anchor: "middle",
                                font_size: "11",
                                "{point.label}"
                            }
                        }
                    }
                }
                if let Some(label) = value_label {
                    div { class: "chart-legend",
                        span { class: "chart-legend-swatch", style: "background: {stroke}" }
                        span { class: "text-muted", "{label}" }
                    }
                }
            }
        }
    }
}
