// Failures a view can end up in
use crate::domain::statistics::StatsError;
use reqwest::StatusCode;
use thiserror::Error;

const LOAD_FAILED: &str = "Erro ao carregar dados";
const NO_DATA: &str = "Sem dados disponíveis";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("unexpected payload from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl DashboardError {
    /// Short message shown in place of the view.
    pub fn user_message(&self) -> &'static str {
        match self {
            DashboardError::Stats(_) => NO_DATA,
            _ => LOAD_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let status = DashboardError::Status {
            url: "http://localhost:8000/api/energia/dados/".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(status.user_message(), "Erro ao carregar dados");
        assert!(status.to_string().contains("500"));

        let empty = DashboardError::from(StatsError::Empty);
        assert_eq!(empty.user_message(), "Sem dados disponíveis");
    }
}
