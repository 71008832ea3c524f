// Dashboard domain model
use super::scene::Scene;
use super::view::ViewState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTone {
    Blue,
    Green,
    Yellow,
    Red,
}

impl CardTone {
    pub fn color(self) -> &'static str {
        match self {
            CardTone::Blue => "#3b82f6",
            CardTone::Green => "#4ade80",
            CardTone::Yellow => "#facc15",
            CardTone::Red => "#f87171",
        }
    }
}

/// One labelled summary figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub tone: CardTone,
}

impl MetricCard {
    pub fn new(title: impl Into<String>, value: String, context: Option<String>, tone: CardTone) -> Self {
        Self {
            title: title.into(),
            value,
            context,
            tone,
        }
    }
}

/// Hourly efficiency chart with its summary. `scene` is `None` when there
/// is nothing to draw at the requested size.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyView {
    pub scene: Option<Scene>,
    pub cards: Vec<MetricCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyDashboard {
    pub efficiency: ViewState<EfficiencyView>,
    pub metrics: ViewState<Vec<MetricCard>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthDashboard {
    pub heat_map: ViewState<Option<Scene>>,
    pub scatter: ViewState<Option<Scene>>,
}
