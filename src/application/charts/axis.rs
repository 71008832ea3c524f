// Axis and grid marks shared by the chart routines
use crate::domain::scale::{BandScale, LinearScale};
use crate::domain::scene::{Anchor, Baseline, LineMark, Mark, Stroke, TextMark};
use crate::domain::theme::Theme;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_FONT: f64 = 12.0;

/// Category axis along the bottom edge at `y`.
pub fn bottom_band(scale: &BandScale, y: f64, width: f64, theme: &Theme) -> Vec<Mark> {
    let stroke = Stroke::new(theme.text_muted, 1.0);
    let mut marks: Vec<Mark> = vec![LineMark::new((0.0, y), (width, y), stroke.clone()).into()];

    for key in scale.domain() {
        let Some(position) = scale.position(key) else {
            continue;
        };
        let x = position + scale.bandwidth() / 2.0;
        marks.push(LineMark::new((x, y), (x, y + TICK_SIZE), stroke.clone()).into());
        marks.push(
            TextMark::new("tick", x, y + TICK_SIZE + TICK_PADDING, key.clone(), theme.text_muted, TICK_FONT)
                .anchor(Anchor::Middle)
                .baseline(Baseline::Hanging)
                .into(),
        );
    }

    marks
}

/// Value axis along the bottom edge at `y`.
pub fn bottom_linear<F>(scale: &LinearScale, count: usize, y: f64, format: F, theme: &Theme) -> Vec<Mark>
where
    F: Fn(f64) -> String,
{
    let stroke = Stroke::new(theme.text_muted, 1.0);
    let (r0, r1) = scale.range();
    let mut marks: Vec<Mark> = vec![LineMark::new((r0, y), (r1, y), stroke.clone()).into()];

    for tick in scale.ticks(count) {
        let x = scale.apply(tick);
        marks.push(LineMark::new((x, y), (x, y + TICK_SIZE), stroke.clone()).into());
        marks.push(
            TextMark::new("tick", x, y + TICK_SIZE + TICK_PADDING, format(tick), theme.text_muted, TICK_FONT)
                .anchor(Anchor::Middle)
                .baseline(Baseline::Hanging)
                .into(),
        );
    }

    marks
}

/// Value axis along the left edge.
pub fn left_linear<F>(scale: &LinearScale, count: usize, format: F, theme: &Theme) -> Vec<Mark>
where
    F: Fn(f64) -> String,
{
    let stroke = Stroke::new(theme.text_muted, 1.0);
    let (r0, r1) = scale.range();
    let mut marks: Vec<Mark> = vec![LineMark::new((0.0, r0), (0.0, r1), stroke.clone()).into()];

    for tick in scale.ticks(count) {
        let y = scale.apply(tick);
        marks.push(LineMark::new((-TICK_SIZE, y), (0.0, y), stroke.clone()).into());
        marks.push(
            TextMark::new("tick", -(TICK_SIZE + TICK_PADDING), y, format(tick), theme.text_muted, TICK_FONT)
                .anchor(Anchor::End)
                .baseline(Baseline::Middle)
                .into(),
        );
    }

    marks
}

/// Faint vertical lines at each x tick, spanning `height`.
pub fn vertical_grid(scale: &LinearScale, count: usize, height: f64, theme: &Theme) -> Vec<Mark> {
    let stroke = Stroke::new(theme.text_muted, 1.0).with_opacity(0.1);
    scale
        .ticks(count)
        .into_iter()
        .map(|tick| {
            let x = scale.apply(tick);
            LineMark::new((x, 0.0), (x, height), stroke.clone()).into()
        })
        .collect()
}

/// Faint horizontal lines at each y tick, spanning `width`.
pub fn horizontal_grid(scale: &LinearScale, count: usize, width: f64, theme: &Theme) -> Vec<Mark> {
    let stroke = Stroke::new(theme.text_muted, 1.0).with_opacity(0.1);
    scale
        .ticks(count)
        .into_iter()
        .map(|tick| {
            let y = scale.apply(tick);
            LineMark::new((0.0, y), (width, y), stroke.clone()).into()
        })
        .collect()
}

/// Default tick text with just enough decimals for the tick step.
pub fn tick_format(scale: &LinearScale, count: usize) -> impl Fn(f64) -> String {
    let precision = scale.tick_precision(count);
    move |value| format!("{:.*}", precision, value)
}
