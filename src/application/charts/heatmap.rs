// Correlation heat map, lower triangle only
use super::{ChartViewport, Margin};
use crate::domain::correlation::CorrelationMatrix;
use crate::domain::scale::{BandScale, SequentialScale, interpolate_reds};
use crate::domain::scene::{
    Anchor, Baseline, Hover, LinearGradient, Paint, RectMark, Scene, Stroke, TextMark, Tooltip, TooltipBox,
};
use crate::domain::theme::Theme;

pub const MARGIN: Margin = Margin {
    top: 40.0,
    right: 80.0,
    bottom: 40.0,
    left: 40.0,
};
const MAX_CELL: f64 = 80.0;
const BAND_PADDING: f64 = 0.1;
/// Fixed sub-range so that differences among strong correlations stay visible.
pub const COLOR_DOMAIN: (f64, f64) = (0.85, 1.0);
const LIGHT_TEXT_ABOVE: f64 = 0.93;
const LEGEND_STOPS: usize = 10;
const LEGEND_WIDTH: f64 = 20.0;
const GRADIENT_ID: &str = "heatmap-gradient";

pub fn draw(matrix: &CorrelationMatrix, container_width: f64, theme: &Theme) -> Option<Scene> {
    if matrix.is_empty() {
        return None;
    }

    let variables = matrix.variables();
    let n = matrix.len() as f64;
    let cell_size = ((container_width - MARGIN.left - MARGIN.right) / n).min(MAX_CELL);
    let side = cell_size * n;
    if side.is_nan() || side <= 0.0 {
        return None;
    }
    let viewport = ChartViewport::new(MARGIN, side, side);

    let x = BandScale::new(variables.iter().copied(), (0.0, side), BAND_PADDING);
    let y = BandScale::new(variables.iter().copied(), (0.0, side), BAND_PADDING);
    let color = SequentialScale::new(COLOR_DOMAIN, interpolate_reds);

    let mut scene = viewport.scene();
    scene.gradients.push(legend_gradient(&color));

    for cell in matrix.lower_triangle() {
        let (Some(left), Some(top)) = (x.position(&cell.col), y.position(&cell.row)) else {
            continue;
        };
        let center_x = left + x.bandwidth() / 2.0;
        let center_y = top + y.bandwidth() / 2.0;

        scene.push(RectMark {
            class: "cell",
            x: left,
            y: top,
            width: x.bandwidth(),
            height: y.bandwidth(),
            fill: Paint::Color(color.color(cell.value).hex()),
            stroke: Some(Stroke::new(theme.text_muted, 0.5)),
            rx: 0.0,
            hover: Some(Hover {
                stroke: Some(Stroke::new(theme.text_primary, 2.0)),
                tooltip: Some(Tooltip {
                    x: center_x,
                    y: top - 10.0,
                    lines: vec![
                        format!("{} × {}", cell.row, cell.col),
                        format!("Correlação: {:.3}", cell.value),
                    ],
                    color: theme.text_primary.to_string(),
                    font_size: 12.0,
                    background: Some(TooltipBox {
                        fill: theme.bg_secondary.to_string(),
                        stroke: Stroke::new(theme.text_muted, 1.0),
                    }),
                }),
                ..Hover::default()
            }),
        });

        let text_color = if cell.value > LIGHT_TEXT_ABOVE {
            "#fff"
        } else {
            theme.text_primary
        };
        scene.push(
            TextMark::new(
                "cell-value",
                center_x,
                center_y,
                format!("{:.2}", cell.value),
                text_color,
                (cell_size / 4.0).min(12.0),
            )
            .anchor(Anchor::Middle)
            .baseline(Baseline::Middle)
            .weight(700),
        );
    }

    for variable in &variables {
        let label = capitalize(variable);
        if let Some(left) = x.position(variable) {
            scene.push(
                TextMark::new("x-label", left + x.bandwidth() / 2.0, side + 30.0, label.clone(), theme.text_primary, 14.0)
                    .anchor(Anchor::Middle)
                    .weight(600),
            );
        }
        if let Some(top) = y.position(variable) {
            scene.push(
                TextMark::new("y-label", -20.0, top + y.bandwidth() / 2.0, label, theme.text_primary, 14.0)
                    .anchor(Anchor::Middle)
                    .baseline(Baseline::Middle)
                    .weight(600)
                    .rotated(-90.0),
            );
        }
    }

    push_legend(&mut scene, side, theme);
    Some(scene)
}

fn legend_gradient(color: &SequentialScale) -> LinearGradient {
    let (low, high) = COLOR_DOMAIN;
    let stops = (0..=LEGEND_STOPS)
        .map(|i| {
            let fraction = i as f64 / LEGEND_STOPS as f64;
            (fraction, color.color(low + (high - low) * fraction).hex())
        })
        .collect();

    LinearGradient {
        id: GRADIENT_ID.to_string(),
        stops,
    }
}

fn push_legend(scene: &mut Scene, side: f64, theme: &Theme) {
    let height = side * 0.8;
    let left = side + 20.0;
    let top = (side - height) / 2.0;

    scene.push(RectMark {
        class: "legend",
        x: left,
        y: top,
        width: LEGEND_WIDTH,
        height,
        fill: Paint::Gradient(GRADIENT_ID.to_string()),
        stroke: Some(Stroke::new(theme.text_muted, 0.5)),
        rx: 0.0,
        hover: None,
    });

    let label_x = left + LEGEND_WIDTH + 5.0;
    scene.push(
        TextMark::new("legend-label", label_x, top + height, format!("{:.2}", COLOR_DOMAIN.0), theme.text_muted, 11.0)
            .baseline(Baseline::Middle),
    );
    scene.push(
        TextMark::new("legend-label", label_x, top, format!("{:.2}", COLOR_DOMAIN.1), theme.text_muted, 11.0)
            .baseline(Baseline::Middle),
    );

    scene.push(
        TextMark::new(
            "legend-title",
            left + LEGEND_WIDTH + 35.0,
            top + height / 2.0,
            "Coeficiente de Correlação",
            theme.text_primary,
            11.0,
        )
        .anchor(Anchor::Middle)
        .baseline(Baseline::Middle)
        .weight(600)
        .rotated(-90.0),
    );
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(json: &str) -> CorrelationMatrix {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_two_variables_draw_one_cell() {
        let matrix = matrix(r#"{"A":{"A":1,"B":0.9},"B":{"A":0.9,"B":1}}"#);
        let scene = draw(&matrix, 640.0, &Theme::light()).unwrap();

        assert_eq!(scene.rects("cell").count(), 1);
        let values: Vec<&str> = scene.texts("cell-value").map(|t| t.content.as_str()).collect();
        assert_eq!(values, vec!["0.90"]);

        let tooltip = scene.rects("cell").next().unwrap().hover.as_ref().unwrap().tooltip.as_ref().unwrap();
        assert_eq!(tooltip.lines, vec!["B × A".to_string(), "Correlação: 0.900".to_string()]);
    }

    #[test]
    fn test_cells_sit_below_the_diagonal() {
        let matrix = matrix(
            r#"{"idade":{"idade":1,"peso":0.88,"pressao":0.95},
                "peso":{"idade":0.88,"peso":1,"pressao":0.91},
                "pressao":{"idade":0.95,"peso":0.91,"pressao":1}}"#,
        );
        let scene = draw(&matrix, 640.0, &Theme::light()).unwrap();
        let cells: Vec<_> = scene.rects("cell").collect();

        assert_eq!(cells.len(), 3);
        for cell in cells {
            assert!(cell.y > cell.x);
        }
    }

    #[test]
    fn test_strong_correlations_get_light_text() {
        let matrix = matrix(r#"{"A":{"A":1,"B":0.95},"B":{"A":0.95,"B":1}}"#);
        let scene = draw(&matrix, 640.0, &Theme::light()).unwrap();
        assert_eq!(scene.texts("cell-value").next().unwrap().fill, "#fff");
    }

    #[test]
    fn test_cells_are_capped_in_size() {
        let matrix = matrix(r#"{"A":{"A":1,"B":0.9},"B":{"A":0.9,"B":1}}"#);
        let scene = draw(&matrix, 2000.0, &Theme::light()).unwrap();
        assert_eq!(scene.width, 2.0 * MAX_CELL + MARGIN.left + MARGIN.right);
    }

    #[test]
    fn test_weak_correlations_clamp_to_palest_color() {
        let weak = matrix(r#"{"A":{"A":1,"B":0.2},"B":{"A":0.2,"B":1}}"#);
        let floor = matrix(r#"{"A":{"A":1,"B":0.85},"B":{"A":0.85,"B":1}}"#);
        let fill_of = |m: &CorrelationMatrix| {
            let scene = draw(m, 640.0, &Theme::light()).unwrap();
            scene.rects("cell").next().unwrap().fill.clone()
        };
        assert_eq!(fill_of(&weak), fill_of(&floor));
    }

    #[test]
    fn test_legend_and_labels() {
        let matrix = matrix(r#"{"colesterol":{"colesterol":1,"pressao":0.9},"pressao":{"colesterol":0.9,"pressao":1}}"#);
        let scene = draw(&matrix, 640.0, &Theme::light()).unwrap();

        assert_eq!(scene.gradients[0].stops.len(), LEGEND_STOPS + 1);
        let labels: Vec<&str> = scene.texts("x-label").map(|t| t.content.as_str()).collect();
        assert_eq!(labels, vec!["Colesterol", "Pressao"]);
        let legend: Vec<&str> = scene.texts("legend-label").map(|t| t.content.as_str()).collect();
        assert_eq!(legend, vec!["0.85", "1.00"]);
    }

    #[test]
    fn test_nothing_to_draw() {
        assert!(draw(&CorrelationMatrix::default(), 640.0, &Theme::light()).is_none());
        let matrix = matrix(r#"{"A":{"A":1,"B":0.9},"B":{"A":0.9,"B":1}}"#);
        assert!(draw(&matrix, 100.0, &Theme::light()).is_none());
    }
}
