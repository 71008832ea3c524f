// Cholesterol vs blood pressure scatter plot
use super::{ChartViewport, Margin, axis};
use crate::domain::records::ScatterPoint;
use crate::domain::scale::LinearScale;
use crate::domain::scene::{Anchor, CircleMark, Hover, Scene, Stroke, TextMark, Tooltip, plain_number};
use crate::domain::theme::Theme;

pub const MARGIN: Margin = Margin {
    top: 40.0,
    right: 40.0,
    bottom: 60.0,
    left: 60.0,
};
pub const HEIGHT: f64 = 300.0;
const DOMAIN_PADDING: f64 = 0.1;
const FLAT_DOMAIN_PADDING: f64 = 10.0;
const TICKS: usize = 5;
const RADIUS: f64 = 6.0;
const HOVER_RADIUS: f64 = 8.0;
const POINT_FILL: &str = "#3b82f6";
const POINT_STROKE: &str = "#1d4ed8";
const HOVER_FILL: &str = "#60a5fa";

pub fn draw(points: &[ScatterPoint], container_width: f64, theme: &Theme) -> Option<Scene> {
    if points.is_empty() {
        return None;
    }
    let viewport = ChartViewport::fit_width(container_width, MARGIN, HEIGHT)?;
    let (width, height) = (viewport.width, viewport.height);

    let (x_min, x_max) = bounds(points.iter().map(|p| p.colesterol));
    let (y_min, y_max) = bounds(points.iter().map(|p| p.pressao));
    let x = LinearScale::padded(x_min, x_max, DOMAIN_PADDING, FLAT_DOMAIN_PADDING, (0.0, width));
    let y = LinearScale::padded(y_min, y_max, DOMAIN_PADDING, FLAT_DOMAIN_PADDING, (height, 0.0));

    let mut scene = viewport.scene();
    scene.extend(axis::vertical_grid(&x, TICKS, height, theme));
    scene.extend(axis::horizontal_grid(&y, TICKS, width, theme));
    scene.extend(axis::bottom_linear(&x, TICKS, height, axis::tick_format(&x, TICKS), theme));
    scene.extend(axis::left_linear(&y, TICKS, axis::tick_format(&y, TICKS), theme));

    scene.push(
        TextMark::new("axis-title", width / 2.0, height + 40.0, "Colesterol (mg/dL)", theme.text_muted, 14.0)
            .anchor(Anchor::Middle),
    );
    scene.push(
        TextMark::new("axis-title", -45.0, height / 2.0, "Pressão Arterial (mmHg)", theme.text_muted, 14.0)
            .anchor(Anchor::Middle)
            .rotated(-90.0),
    );

    for point in points {
        let cx = x.apply(point.colesterol);
        let cy = y.apply(point.pressao);
        scene.push(CircleMark {
            class: "point",
            cx,
            cy,
            r: RADIUS,
            fill: POINT_FILL.to_string(),
            stroke: Some(Stroke::new(POINT_STROKE, 2.0)),
            hover: Some(Hover {
                fill: Some(HOVER_FILL.to_string()),
                radius: Some(HOVER_RADIUS),
                tooltip: Some(Tooltip {
                    x: cx,
                    y: cy - 15.0,
                    lines: vec![format!(
                        "{} mg/dL, {} mmHg",
                        plain_number(point.colesterol),
                        plain_number(point.pressao)
                    )],
                    color: theme.text_primary.to_string(),
                    font_size: 12.0,
                    background: None,
                }),
                ..Hover::default()
            }),
        });
    }

    Some(scene)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
