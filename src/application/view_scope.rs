// Fetch lifetime of a mounted view
use crate::application::error::DashboardError;
use crate::domain::view::ViewState;
use std::future::Future;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Lives as long as the view it belongs to. Dropping it cancels every
/// fetch started through it, so late responses never reach a disposed view.
pub struct ViewScope {
    token: CancellationToken,
    _guard: DropGuard,
}

impl ViewScope {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self { token, _guard: guard }
    }

    /// Handle for work running outside the owner, e.g. a spawned fetch.
    pub fn handle(&self) -> ViewHandle {
        ViewHandle {
            token: self.token.child_token(),
        }
    }

    pub async fn activate<T, F>(&self, view: &'static str, fetch: F) -> Option<ViewState<T>>
    where
        F: Future<Output = Result<T, DashboardError>>,
    {
        self.handle().activate(view, fetch).await
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct ViewHandle {
    token: CancellationToken,
}

impl ViewHandle {
    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs the view's single fetch. Returns `None` if the view was disposed
    /// before the response arrived.
    pub async fn activate<T, F>(&self, view: &'static str, fetch: F) -> Option<ViewState<T>>
    where
        F: Future<Output = Result<T, DashboardError>>,
    {
        tracing::debug!("activating view {}", view);

        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            result = fetch => Some(result),
        };

        let Some(result) = result.filter(|_| !self.is_disposed()) else {
            tracing::debug!("view {} disposed before its data arrived", view);
            return None;
        };

        Some(match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => {
                tracing::warn!(error = %e, "view {} failed", view);
                ViewState::Failed(e.user_message().to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::statistics::StatsError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_success_becomes_ready() {
        let scope = ViewScope::new();
        let state = scope.activate("test", async { Ok::<_, DashboardError>(42) }).await;
        assert_eq!(state, Some(ViewState::Ready(42)));
    }

    #[tokio::test]
    async fn test_failure_carries_user_message() {
        let scope = ViewScope::new();
        let state = scope
            .activate("test", async { Err::<u32, _>(DashboardError::from(StatsError::Empty)) })
            .await;
        assert_eq!(state, Some(ViewState::Failed("Sem dados disponíveis".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disposed_view_discards_late_response() {
        let scope = ViewScope::new();
        let handle = scope.handle();

        let task = tokio::spawn(async move {
            handle
                .activate("slow", async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok::<_, DashboardError>("late")
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(scope);

        assert_eq!(task.await.unwrap(), None);
    }

    #[test]
    fn test_handles_observe_disposal() {
        let scope = ViewScope::new();
        let handle = scope.handle();
        assert!(!handle.is_disposed());
        drop(scope);
        assert!(handle.is_disposed());
    }
}
