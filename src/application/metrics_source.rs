// Source trait for dashboard metrics
use crate::application::error::DashboardError;
use crate::domain::correlation::CorrelationMatrix;
use crate::domain::records::{EfficiencyPayload, EnergyRecord, ScatterPoint};
use async_trait::async_trait;

/// One read-only fetch per metric category. Every call issues its own
/// request; nothing is cached between calls.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Hourly efficiency readings (plus any precomputed statistics)
    async fn efficiency(&self) -> Result<EfficiencyPayload, DashboardError>;

    /// Full hourly energy dataset
    async fn energy_dataset(&self) -> Result<Vec<EnergyRecord>, DashboardError>;

    /// Correlation coefficients between health variables
    async fn correlation_matrix(&self) -> Result<CorrelationMatrix, DashboardError>;

    /// Cholesterol / blood pressure pairs
    async fn scatter_pairs(&self) -> Result<Vec<ScatterPoint>, DashboardError>;
}
