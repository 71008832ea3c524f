// Declarative chart scene: what to draw, independent of how it is drawn

/// Everything needed to draw one chart.
///
/// Marks are positioned relative to the plot origin, which sits `offset`
/// pixels from the top-left corner of a `width` × `height` surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub offset: (f64, f64),
    pub gradients: Vec<LinearGradient>,
    pub marks: Vec<Mark>,
}

impl Scene {
    pub fn new(width: f64, height: f64, offset: (f64, f64)) -> Self {
        Self {
            width,
            height,
            offset,
            gradients: Vec::new(),
            marks: Vec::new(),
        }
    }

    pub fn push(&mut self, mark: impl Into<Mark>) {
        self.marks.push(mark.into());
    }

    pub fn extend<I, M>(&mut self, marks: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<Mark>,
    {
        self.marks.extend(marks.into_iter().map(Into::into));
    }

    pub fn rects<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a RectMark> + 'a {
        self.marks.iter().filter_map(move |mark| match mark {
            Mark::Rect(rect) if rect.class == class => Some(rect),
            _ => None,
        })
    }

    pub fn circles<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a CircleMark> + 'a {
        self.marks.iter().filter_map(move |mark| match mark {
            Mark::Circle(circle) if circle.class == class => Some(circle),
            _ => None,
        })
    }

    pub fn texts<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a TextMark> + 'a {
        self.marks.iter().filter_map(move |mark| match mark {
            Mark::Text(text) if text.class == class => Some(text),
            _ => None,
        })
    }
}

/// Vertical gradient running bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub id: String,
    pub stops: Vec<(f64, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Rect(RectMark),
    Circle(CircleMark),
    Line(LineMark),
    Text(TextMark),
}

impl From<RectMark> for Mark {
    fn from(mark: RectMark) -> Self {
        Mark::Rect(mark)
    }
}

impl From<CircleMark> for Mark {
    fn from(mark: CircleMark) -> Self {
        Mark::Circle(mark)
    }
}

impl From<LineMark> for Mark {
    fn from(mark: LineMark) -> Self {
        Mark::Line(mark)
    }
}

impl From<TextMark> for Mark {
    fn from(mark: TextMark) -> Self {
        Mark::Text(mark)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Color(String),
    Gradient(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectMark {
    pub class: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Paint,
    pub stroke: Option<Stroke>,
    pub rx: f64,
    pub hover: Option<Hover>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleMark {
    pub class: &'static str,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub stroke: Option<Stroke>,
    pub hover: Option<Hover>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineMark {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

impl LineMark {
    pub fn new(from: (f64, f64), to: (f64, f64), stroke: Stroke) -> Self {
        Self {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            stroke,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Auto,
    Middle,
    Hanging,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub class: &'static str,
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub fill: String,
    pub font_size: f64,
    pub font_weight: Option<u16>,
    pub anchor: Anchor,
    pub baseline: Baseline,
    /// Degrees, around (x, y).
    pub rotate: Option<f64>,
}

impl TextMark {
    pub fn new(class: &'static str, x: f64, y: f64, content: impl Into<String>, fill: impl Into<String>, font_size: f64) -> Self {
        Self {
            class,
            x,
            y,
            content: content.into(),
            fill: fill.into(),
            font_size,
            font_weight: None,
            anchor: Anchor::Start,
            baseline: Baseline::Auto,
            rotate: None,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

/// Pointer-hover state of a mark. Unset fields keep the resting value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hover {
    pub fill: Option<String>,
    pub stroke: Option<Stroke>,
    pub radius: Option<f64>,
    pub opacity: Option<f64>,
    pub tooltip: Option<Tooltip>,
}

/// Transient label shown next to a hovered mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
    pub color: String,
    pub font_size: f64,
    pub background: Option<TooltipBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipBox {
    pub fill: String,
    pub stroke: Stroke,
}

/// Text as JavaScript would print a number: no trailing `.0`.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(200.0), "200");
        assert_eq!(plain_number(120.5), "120.5");
        assert_eq!(plain_number(-3.0), "-3");
    }

    #[test]
    fn test_mark_lookup_by_class() {
        let mut scene = Scene::new(100.0, 100.0, (0.0, 0.0));
        scene.push(TextMark::new("label", 0.0, 0.0, "a", "#000", 12.0));
        scene.push(CircleMark {
            class: "point",
            cx: 1.0,
            cy: 2.0,
            r: 6.0,
            fill: "#3b82f6".to_string(),
            stroke: None,
            hover: None,
        });

        assert_eq!(scene.texts("label").count(), 1);
        assert_eq!(scene.circles("point").count(), 1);
        assert_eq!(scene.rects("point").count(), 0);
    }
}
