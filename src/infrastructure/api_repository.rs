// Statistics API implementation of the metrics source
use crate::application::error::DashboardError;
use crate::application::metrics_source::MetricsSource;
use crate::domain::correlation::{CorrelationMatrix, CorrelationPayload};
use crate::domain::records::{EfficiencyPayload, EnergyDatasetPayload, EnergyRecord, ScatterPoint};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

const EFFICIENCY_PATH: &str = "/api/energia/rendimento/";
const ENERGY_DATASET_PATH: &str = "/api/energia/dados/";
const CORRELATION_PATH: &str = "/api/saude/mapa-calor-correlacao/";
const SCATTER_PATH: &str = "/api/saude/dispersao-colesterol-pressao/";

#[derive(Debug, Clone)]
pub struct ApiRepository {
    client: reqwest::Client,
    base_url: String,
}

impl ApiRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let url = self.endpoint(path);
        tracing::debug!("GET {}", url);

        let transport = |source| DashboardError::Transport {
            url: url.clone(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status { url, status });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| DashboardError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl MetricsSource for ApiRepository {
    async fn efficiency(&self) -> Result<EfficiencyPayload, DashboardError> {
        self.get_json(EFFICIENCY_PATH).await
    }

    async fn energy_dataset(&self) -> Result<Vec<EnergyRecord>, DashboardError> {
        let payload: EnergyDatasetPayload = self.get_json(ENERGY_DATASET_PATH).await?;
        Ok(payload.dados_completos)
    }

    async fn correlation_matrix(&self) -> Result<CorrelationMatrix, DashboardError> {
        let payload: CorrelationPayload = self.get_json(CORRELATION_PATH).await?;
        Ok(payload.matriz_correlacao)
    }

    async fn scatter_pairs(&self) -> Result<Vec<ScatterPoint>, DashboardError> {
        self.get_json(SCATTER_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_efficiency_payload() {
        let server = serve(
            EFFICIENCY_PATH,
            ResponseTemplate::new(200).set_body_json(json!({
                "dados_brutos": [
                    {"hora": "00", "percentual_rendimento": 80.0},
                    {"hora": "01", "percentual_rendimento": 90.0}
                ]
            })),
        )
        .await;

        let payload = ApiRepository::new(server.uri()).efficiency().await.unwrap();
        assert_eq!(payload.dados_brutos.len(), 2);
        assert_eq!(payload.dados_brutos[0].hora, "00");
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let server = serve(SCATTER_PATH, ResponseTemplate::new(200).set_body_json(json!([
            {"colesterol": 200, "pressao": 120},
            {"colesterol": 240.5, "pressao": 135}
        ])))
        .await;

        let pairs = ApiRepository::new(format!("{}/", server.uri())).scatter_pairs().await.unwrap();
        assert_eq!(pairs, vec![ScatterPoint::new(200.0, 120.0), ScatterPoint::new(240.5, 135.0)]);
    }

    #[tokio::test]
    async fn test_correlation_matrix_unwrapped() {
        let server = serve(
            CORRELATION_PATH,
            ResponseTemplate::new(200).set_body_json(json!({
                "matriz_correlacao": {"A": {"A": 1, "B": 0.9}, "B": {"A": 0.9, "B": 1}}
            })),
        )
        .await;

        let matrix = ApiRepository::new(server.uri()).correlation_matrix().await.unwrap();
        assert_eq!(matrix.get("B", "A"), Some(0.9));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let server = serve(ENERGY_DATASET_PATH, ResponseTemplate::new(500)).await;

        let err = ApiRepository::new(server.uri()).energy_dataset().await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                ..
            }
        ));
        assert_eq!(err.user_message(), "Erro ao carregar dados");
    }

    #[tokio::test]
    async fn test_unexpected_shape() {
        let server = serve(
            ENERGY_DATASET_PATH,
            ResponseTemplate::new(200).set_body_json(json!({"dados": []})),
        )
        .await;

        let err = ApiRepository::new(server.uri()).energy_dataset().await.unwrap_err();
        assert!(matches!(err, DashboardError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let err = ApiRepository::new("http://127.0.0.1:9").efficiency().await.unwrap_err();
        assert!(matches!(err, DashboardError::Transport { .. }));
    }
}
