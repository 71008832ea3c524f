// Dashboard service - Use cases for assembling dashboard views
use crate::application::charts::{ChartData, ChartKind};
use crate::application::error::DashboardError;
use crate::application::metrics_source::MetricsSource;
use crate::application::summary::{efficiency_cards, energy_cards};
use crate::application::view_scope::ViewScope;
use crate::domain::dashboard::{EfficiencyView, EnergyDashboard, HealthDashboard, MetricCard};
use crate::domain::scene::Scene;
use crate::domain::statistics::{EnergySummary, StatisticsSummary};
use crate::domain::theme::Theme;
use crate::domain::view::ViewState;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn MetricsSource>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self { source }
    }

    /// Efficiency chart with its summary, next to the full-dataset metrics.
    /// Both views fetch independently; one failing leaves the other intact.
    pub async fn energy_dashboard(&self, scope: &ViewScope, width: f64, theme: &Theme) -> EnergyDashboard {
        let (efficiency, metrics) = futures::join!(
            scope.activate("rendimento", self.efficiency_view(width, theme)),
            scope.activate("metricas", self.energy_metrics()),
        );

        EnergyDashboard {
            efficiency: efficiency.unwrap_or_default(),
            metrics: metrics.unwrap_or_default(),
        }
    }

    pub async fn health_dashboard(&self, scope: &ViewScope, width: f64, theme: &Theme) -> HealthDashboard {
        let (heat_map, scatter) = futures::join!(
            scope.activate("mapa-calor", self.chart(ChartKind::HeatMap, width, theme)),
            scope.activate("dispersao", self.chart(ChartKind::Scatter, width, theme)),
        );

        HealthDashboard {
            heat_map: heat_map.unwrap_or_default(),
            scatter: scatter.unwrap_or_default(),
        }
    }

    /// A single chart drawn at `width`.
    pub async fn chart_view(
        &self,
        scope: &ViewScope,
        kind: ChartKind,
        width: f64,
        theme: &Theme,
    ) -> ViewState<Option<Scene>> {
        scope
            .activate(kind.slug(), self.chart(kind, width, theme))
            .await
            .unwrap_or_default()
    }

    pub async fn energy_metrics(&self) -> Result<Vec<MetricCard>, DashboardError> {
        let records = self.source.energy_dataset().await?;
        let summary = EnergySummary::from_records(&records)?;
        Ok(energy_cards(&summary))
    }

    pub async fn chart_data(&self, kind: ChartKind) -> Result<ChartData, DashboardError> {
        Ok(match kind {
            ChartKind::Efficiency => ChartData::Efficiency(self.source.efficiency().await?.dados_brutos),
            ChartKind::HeatMap => ChartData::HeatMap(self.source.correlation_matrix().await?),
            ChartKind::Scatter => ChartData::Scatter(self.source.scatter_pairs().await?),
        })
    }

    async fn chart(&self, kind: ChartKind, width: f64, theme: &Theme) -> Result<Option<Scene>, DashboardError> {
        let data = self.chart_data(kind).await?;
        Ok(data.draw(width, theme))
    }

    async fn efficiency_view(&self, width: f64, theme: &Theme) -> Result<EfficiencyView, DashboardError> {
        let payload = self.source.efficiency().await?;
        let records = payload.dados_brutos;
        let summary = StatisticsSummary::from_records(&records, |r| r.percentual_rendimento)?;

        Ok(EfficiencyView {
            cards: efficiency_cards(&summary),
            scene: ChartData::Efficiency(records).draw(width, theme),
        })
    }
}
