// Chart routines: (data, container width, theme) -> scene
pub mod axis;
pub mod bar;
pub mod heatmap;
pub mod scatter;

use crate::domain::correlation::CorrelationMatrix;
use crate::domain::records::{EfficiencyRecord, ScatterPoint};
use crate::domain::scene::Scene;
use crate::domain::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Plot area for one draw pass, rebuilt every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartViewport {
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
}

impl ChartViewport {
    pub fn new(margin: Margin, width: f64, height: f64) -> Self {
        Self { margin, width, height }
    }

    /// Fills the container horizontally; `None` when nothing fits.
    pub fn fit_width(container_width: f64, margin: Margin, total_height: f64) -> Option<Self> {
        let width = container_width - margin.left - margin.right;
        if width.is_nan() || width <= 0.0 {
            return None;
        }
        Some(Self::new(margin, width, total_height - margin.top - margin.bottom))
    }

    pub fn outer_width(&self) -> f64 {
        self.width + self.margin.left + self.margin.right
    }

    pub fn outer_height(&self) -> f64 {
        self.height + self.margin.top + self.margin.bottom
    }

    pub fn scene(&self) -> Scene {
        Scene::new(
            self.outer_width(),
            self.outer_height(),
            (self.margin.left, self.margin.top),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Efficiency,
    HeatMap,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Efficiency, ChartKind::HeatMap, ChartKind::Scatter];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Efficiency => "rendimento",
            ChartKind::HeatMap => "mapa-calor",
            ChartKind::Scatter => "dispersao",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Efficiency => "Rendimento Médio por Horário",
            ChartKind::HeatMap => "Mapa de Calor de Correlação",
            ChartKind::Scatter => "Colesterol x Pressão Arterial",
        }
    }
}

/// Data behind one chart, as fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Efficiency(Vec<EfficiencyRecord>),
    HeatMap(CorrelationMatrix),
    Scatter(Vec<ScatterPoint>),
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Efficiency(_) => ChartKind::Efficiency,
            ChartData::HeatMap(_) => ChartKind::HeatMap,
            ChartData::Scatter(_) => ChartKind::Scatter,
        }
    }

    /// The one draw routine every redraw trigger goes through.
    pub fn draw(&self, container_width: f64, theme: &Theme) -> Option<Scene> {
        let scene = match self {
            ChartData::Efficiency(records) => bar::draw(records, container_width, theme),
            ChartData::HeatMap(matrix) => heatmap::draw(matrix, container_width, theme),
            ChartData::Scatter(points) => scatter::draw(points, container_width, theme),
        };
        if scene.is_none() {
            tracing::debug!("{} chart skipped at width {}", self.kind().slug(), container_width);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rejects_narrow_containers() {
        let margin = Margin {
            top: 10.0,
            right: 20.0,
            bottom: 10.0,
            left: 20.0,
        };
        assert!(ChartViewport::fit_width(40.0, margin, 100.0).is_none());
        assert!(ChartViewport::fit_width(0.0, margin, 100.0).is_none());

        let viewport = ChartViewport::fit_width(240.0, margin, 100.0).unwrap();
        assert_eq!((viewport.width, viewport.height), (200.0, 80.0));
        assert_eq!((viewport.outer_width(), viewport.outer_height()), (240.0, 100.0));
    }

    #[test]
    fn test_chart_slugs_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ChartKind::from_slug("pizza"), None);
    }

    #[test]
    fn test_draw_is_idempotent() {
        let data = ChartData::Scatter(vec![ScatterPoint::new(180.0, 120.0), ScatterPoint::new(240.0, 140.0)]);
        let theme = Theme::dark();
        assert_eq!(data.draw(500.0, &theme), data.draw(500.0, &theme));
    }
}
