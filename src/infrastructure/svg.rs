// SVG writer for chart scenes
use crate::domain::scene::{Anchor, Baseline, CircleMark, Hover, Mark, Paint, RectMark, Scene, Stroke, TextMark, Tooltip};
use askama_escape::Html;
use std::fmt::Write;

const TOOLTIP_LINE_HEIGHT: f64 = 16.0;

/// Serializes a scene into a standalone SVG document. `id_prefix` keeps
/// element ids unique when several charts share one page.
pub fn render_svg(scene: &Scene, id_prefix: &str) -> String {
    let mut body = String::new();
    let mut hover_rules = String::new();

    for (index, mark) in scene.marks.iter().enumerate() {
        let id = format!("{}-m{}", id_prefix, index);
        match mark {
            Mark::Rect(rect) => write_hoverable(&mut body, &mut hover_rules, &id, "rect", rect.hover.as_ref(), |out| {
                write_rect(out, rect)
            }),
            Mark::Circle(circle) => {
                write_hoverable(&mut body, &mut hover_rules, &id, "circle", circle.hover.as_ref(), |out| {
                    write_circle(out, circle)
                })
            }
            Mark::Line(line) => {
                let _ = writeln!(
                    body,
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
                    num(line.x1),
                    num(line.y1),
                    num(line.x2),
                    num(line.y2),
                    stroke_attrs(Some(&line.stroke)),
                );
            }
            Mark::Text(text) => write_text(&mut body, text),
        }
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" preserveAspectRatio=\"xMidYMid meet\" role=\"img\">",
        w = num(scene.width),
        h = num(scene.height),
    );
    let _ = writeln!(
        svg,
        "<style>.tip{{visibility:hidden;pointer-events:none}}.mark{{cursor:pointer}}.mark:hover .tip{{visibility:visible}}{}</style>",
        hover_rules
    );

    if !scene.gradients.is_empty() {
        let _ = writeln!(svg, "<defs>");
        for gradient in &scene.gradients {
            let _ = writeln!(
                svg,
                "<linearGradient id=\"{}\" x1=\"0%\" y1=\"100%\" x2=\"0%\" y2=\"0%\">",
                escape(&gradient.id)
            );
            for (offset, color) in &gradient.stops {
                let _ = writeln!(
                    svg,
                    "<stop offset=\"{}%\" stop-color=\"{}\"/>",
                    num(offset * 100.0),
                    escape(color)
                );
            }
            let _ = writeln!(svg, "</linearGradient>");
        }
        let _ = writeln!(svg, "</defs>");
    }

    let _ = writeln!(
        svg,
        "<g transform=\"translate({},{})\">",
        num(scene.offset.0),
        num(scene.offset.1)
    );
    svg.push_str(&body);
    let _ = writeln!(svg, "</g>");
    let _ = writeln!(svg, "</svg>");
    svg
}

fn write_hoverable<F>(body: &mut String, rules: &mut String, id: &str, shape: &str, hover: Option<&Hover>, draw: F)
where
    F: FnOnce(&mut String),
{
    let Some(hover) = hover else {
        draw(body);
        return;
    };

    let _ = write!(body, "<g class=\"mark\" id=\"{}\">", id);
    draw(body);
    if let Some(tooltip) = &hover.tooltip {
        write_tooltip(body, tooltip);
    }
    let _ = writeln!(body, "</g>");

    let mut declarations = String::new();
    if let Some(fill) = &hover.fill {
        let _ = write!(declarations, "fill:{};", fill);
    }
    if let Some(stroke) = &hover.stroke {
        let _ = write!(declarations, "stroke:{};stroke-width:{};", stroke.color, num(stroke.width));
    }
    if let Some(radius) = hover.radius {
        let _ = write!(declarations, "r:{}px;", num(radius));
    }
    if let Some(opacity) = hover.opacity {
        let _ = write!(declarations, "opacity:{};", num(opacity));
    }
    if !declarations.is_empty() {
        let _ = write!(rules, "#{}:hover>{}{{{}}}", id, shape, declarations);
    }
}

fn write_rect(out: &mut String, rect: &RectMark) {
    let fill = match &rect.fill {
        Paint::Color(color) => escape(color),
        Paint::Gradient(id) => format!("url(#{})", escape(id)),
    };
    let _ = write!(
        out,
        "<rect class=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
        rect.class,
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
        fill
    );
    if rect.rx > 0.0 {
        let _ = write!(out, " rx=\"{}\"", num(rect.rx));
    }
    let _ = writeln!(out, "{}/>", stroke_attrs(rect.stroke.as_ref()));
}

fn write_circle(out: &mut String, circle: &CircleMark) {
    let _ = writeln!(
        out,
        "<circle class=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"{}/>",
        circle.class,
        num(circle.cx),
        num(circle.cy),
        num(circle.r),
        escape(&circle.fill),
        stroke_attrs(circle.stroke.as_ref())
    );
}

fn write_text(out: &mut String, text: &TextMark) {
    let anchor = match text.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    let _ = write!(
        out,
        "<text class=\"{}\" x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"{}px\" text-anchor=\"{}\"",
        text.class,
        num(text.x),
        num(text.y),
        escape(&text.fill),
        num(text.font_size),
        anchor
    );
    match text.baseline {
        Baseline::Auto => {}
        Baseline::Middle => out.push_str(" dominant-baseline=\"middle\""),
        Baseline::Hanging => out.push_str(" dominant-baseline=\"hanging\""),
    }
    if let Some(weight) = text.font_weight {
        let _ = write!(out, " font-weight=\"{}\"", weight);
    }
    if let Some(degrees) = text.rotate {
        let _ = write!(
            out,
            " transform=\"rotate({} {} {})\"",
            num(degrees),
            num(text.x),
            num(text.y)
        );
    }
    let _ = writeln!(out, ">{}</text>", escape(&text.content));
}

// Lines stack upwards so the last one sits at the anchor.
fn write_tooltip(out: &mut String, tooltip: &Tooltip) {
    let _ = write!(out, "<g class=\"tip\">");
    let count = tooltip.lines.len() as f64;

    if let Some(background) = &tooltip.background {
        let longest = tooltip.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
        let width = longest * tooltip.font_size * 0.6 + 12.0;
        let height = (count - 1.0) * TOOLTIP_LINE_HEIGHT + tooltip.font_size + 8.0;
        let top = tooltip.y - (count - 1.0) * TOOLTIP_LINE_HEIGHT - tooltip.font_size - 4.0;
        let _ = write!(
            out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"4\" fill=\"{}\"{}/>",
            num(tooltip.x - width / 2.0),
            num(top),
            num(width),
            num(height),
            escape(&background.fill),
            stroke_attrs(Some(&background.stroke))
        );
    }

    for (index, line) in tooltip.lines.iter().enumerate() {
        let y = tooltip.y - (count - 1.0 - index as f64) * TOOLTIP_LINE_HEIGHT;
        let _ = write!(
            out,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"{}px\" font-weight=\"bold\">{}</text>",
            num(tooltip.x),
            num(y),
            escape(&tooltip.color),
            num(tooltip.font_size),
            escape(line)
        );
    }
    let _ = write!(out, "</g>");
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        None => String::new(),
        Some(stroke) if stroke.opacity < 1.0 => format!(
            " stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\"",
            escape(&stroke.color),
            num(stroke.width),
            num(stroke.opacity)
        ),
        Some(stroke) => format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape(&stroke.color),
            num(stroke.width)
        ),
    }
}

/// Coordinates rounded to hundredths, without trailing zeros.
fn num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

fn escape(text: &str) -> String {
    askama_escape::escape(text, Html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::charts::ChartData;
    use crate::domain::records::EfficiencyRecord;
    use crate::domain::theme::Theme;

    fn bar_scene() -> Scene {
        ChartData::Efficiency(vec![EfficiencyRecord::new("00", 80.0), EfficiencyRecord::new("01", 90.0)])
            .draw(640.0, &Theme::light())
            .unwrap()
    }

    #[test]
    fn test_one_rect_per_bar() {
        let svg = render_svg(&bar_scene(), "rendimento");
        assert_eq!(svg.matches("<rect class=\"bar\"").count(), 2);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_redraw_produces_identical_document() {
        let scene = bar_scene();
        assert_eq!(render_svg(&scene, "a"), render_svg(&scene, "a"));
    }

    #[test]
    fn test_hover_rules_follow_marks() {
        let svg = render_svg(&bar_scene(), "rendimento");
        assert!(svg.contains(">rect{opacity:0.7;}"));
        assert_eq!(svg.matches("class=\"tip\"").count(), 2);
    }

    #[test]
    fn test_heat_map_gradient_and_escaping() {
        let matrix = serde_json::from_str(r#"{"A<1>":{"A<1>":1,"B":0.9},"B":{"A<1>":0.9,"B":1}}"#).unwrap();
        let scene = ChartData::HeatMap(matrix).draw(640.0, &Theme::dark()).unwrap();
        let svg = render_svg(&scene, "mapa-calor");

        assert!(svg.contains("<linearGradient id=\"heatmap-gradient\""));
        assert_eq!(svg.matches("<stop ").count(), 11);
        assert!(svg.contains("fill=\"url(#heatmap-gradient)\""));
        assert!(svg.contains("B × A&lt;1&gt;"));
        assert!(!svg.contains("A<1>"));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
    }
}
