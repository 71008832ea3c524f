// Hourly efficiency bar chart
use super::{ChartViewport, Margin, axis};
use crate::domain::records::EfficiencyRecord;
use crate::domain::scale::{BandScale, LinearScale, interpolate_rainbow};
use crate::domain::scene::{Anchor, Hover, Paint, RectMark, Scene, TextMark, Tooltip};
use crate::domain::theme::Theme;

pub const MARGIN: Margin = Margin {
    top: 20.0,
    right: 20.0,
    bottom: 40.0,
    left: 50.0,
};
pub const HEIGHT: f64 = 200.0;
const BAND_PADDING: f64 = 0.2;
const HEADROOM: f64 = 1.1;
const Y_TICKS: usize = 5;

pub fn draw(records: &[EfficiencyRecord], container_width: f64, theme: &Theme) -> Option<Scene> {
    if records.is_empty() {
        return None;
    }
    let viewport = ChartViewport::fit_width(container_width, MARGIN, HEIGHT)?;

    let x = BandScale::new(records.iter().map(|r| r.hora.as_str()), (0.0, viewport.width), BAND_PADDING);
    let peak = records
        .iter()
        .map(|r| r.percentual_rendimento)
        .fold(f64::NEG_INFINITY, f64::max);
    let y = LinearScale::new((0.0, peak * HEADROOM), (viewport.height, 0.0));
    let baseline = y.apply(0.0);

    let mut scene = viewport.scene();
    scene.extend(axis::bottom_band(&x, viewport.height, viewport.width, theme));
    scene.extend(axis::left_linear(&y, Y_TICKS, |v| format!("{:.1}%", v), theme));

    let count = records.len() as f64;
    for (index, record) in records.iter().enumerate() {
        let Some(left) = x.position(&record.hora) else {
            continue;
        };
        let value = record.percentual_rendimento;
        let top = y.apply(value).min(baseline);
        let center = left + x.bandwidth() / 2.0;

        scene.push(RectMark {
            class: "bar",
            x: left,
            y: top,
            width: x.bandwidth(),
            height: (baseline - y.apply(value)).abs(),
            fill: Paint::Color(interpolate_rainbow(index as f64 / count).hex()),
            stroke: None,
            rx: 4.0,
            hover: Some(Hover {
                opacity: Some(0.7),
                tooltip: Some(Tooltip {
                    x: center,
                    y: top - 20.0,
                    lines: vec![format!("{}h", record.hora)],
                    color: theme.text_primary.to_string(),
                    font_size: 12.0,
                    background: None,
                }),
                ..Hover::default()
            }),
        });
        scene.push(
            TextMark::new("value-label", center, top - 5.0, format!("{:.1}%", value), theme.text_primary, 11.0)
                .anchor(Anchor::Middle),
        );
    }

    Some(scene)
}
