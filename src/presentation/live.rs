// Live chart connection: fetch once, redraw on resize and theme changes
use crate::application::charts::ChartKind;
use crate::application::redraw::{run_redraw_loop, ChartView, RedrawTrigger};
use crate::application::view_scope::ViewScope;
use crate::domain::theme::ThemeName;
use crate::domain::view::ViewState;
use crate::infrastructure::config::is_drawable_width;
use crate::presentation::app_state::AppState;
use crate::presentation::pages;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Messages a live chart client may send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientEvent {
    Resize { width: f64 },
    Theme { theme: ThemeName },
}

impl From<ClientEvent> for RedrawTrigger {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::Resize { width } => RedrawTrigger::Resize(width),
            ClientEvent::Theme { theme } => RedrawTrigger::ThemeChanged(theme),
        }
    }
}

/// Query of a live connection. `loading` asks for the loading message
/// before the first draw; page slots already hold a server-rendered chart.
#[derive(Debug, Default, Deserialize)]
pub struct LiveQuery {
    pub width: Option<f64>,
    pub theme: Option<ThemeName>,
    #[serde(default)]
    pub loading: bool,
}

pub async fn live_chart(
    ws: WebSocketUpgrade,
    Path(slug): Path<String>,
    Query(query): Query<LiveQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(kind) = ChartKind::from_slug(&slug) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let view = ChartView::new(
        state.charts.container_width(query.width),
        query.theme.unwrap_or(state.charts.theme),
    );

    ws.on_upgrade(move |socket| serve_live_chart(socket, state, kind, view, query.loading))
}

async fn serve_live_chart(socket: WebSocket, state: Arc<AppState>, kind: ChartKind, view: ChartView, loading: bool) {
    tracing::info!("live {} chart connected", kind.slug());

    // Disposed when this function returns, whichever way the connection ends.
    let scope = ViewScope::new();
    let (mut sender, mut receiver) = socket.split();

    if loading && send_fragment(&mut sender, pages::pending_fragment()).await.is_err() {
        return;
    }

    // Unbounded so reading the socket never waits on a draw; the redraw
    // loop folds whatever piled up into one draw.
    let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();
    let (scene_tx, mut scene_rx) = mpsc::channel(4);
    tokio::spawn(run_redraw_loop(view, trigger_rx, scene_tx, state.charts.resize_debounce()));

    let handle = scope.handle();
    let service = state.dashboard_service.clone();
    let mut fetch = tokio::spawn(async move { handle.activate(kind.slug(), service.chart_data(kind)).await });
    let mut fetched = false;

    loop {
        tokio::select! {
            joined = &mut fetch, if !fetched => {
                fetched = true;
                match joined {
                    Ok(Some(ViewState::Ready(data))) => {
                        if trigger_tx.send(RedrawTrigger::Loaded(data)).is_err() {
                            break;
                        }
                    }
                    Ok(Some(ViewState::Failed(message))) => {
                        let _ = send_fragment(&mut sender, pages::failure_fragment(&message)).await;
                        break;
                    }
                    Ok(_) => break,
                    Err(e) => {
                        tracing::error!("live {} fetch task failed: {}", kind.slug(), e);
                        break;
                    }
                }
            }
            Some(scene) = scene_rx.recv() => {
                if send_fragment(&mut sender, pages::chart_fragment(kind, scene.as_ref())).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(ClientEvent::Resize { width }) if !is_drawable_width(width) => {
                        tracing::warn!("ignoring live {} resize to {}", kind.slug(), width);
                    }
                    Ok(event) => {
                        tracing::debug!("live {} event {:?}", kind.slug(), event);
                        if trigger_tx.send(event.into()).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("ignoring live {} message: {}", kind.slug(), e),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!("live {} socket error: {}", kind.slug(), e);
                    break;
                }
            },
        }
    }

    if !fetched {
        fetch.abort();
    }
    tracing::info!("live {} chart disconnected", kind.slug());
}

async fn send_fragment(
    sender: &mut SplitSink<WebSocket, Message>,
    fragment: askama::Result<String>,
) -> Result<(), ()> {
    let fragment = fragment.map_err(|e| tracing::error!("Failed to render live fragment: {}", e))?;
    sender.send(Message::Text(fragment)).await.map_err(|e| tracing::debug!("live send failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::tests::{sample_source, FakeSource};
    use crate::application::dashboard_service::DashboardService;
    use crate::domain::theme::Theme;
    use crate::infrastructure::config::ChartSettings;
    use crate::presentation::router;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::net::{TcpListener, TcpStream};
    use tokio::time::timeout;
    use tokio_tungstenite::tungstenite::Message as WsMessage;
    use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

    type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

    async fn serve(source: FakeSource) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::new(AppState {
            dashboard_service: DashboardService::new(Arc::new(source)),
            charts: ChartSettings::default(),
        }));
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        addr
    }

    async fn connect(addr: SocketAddr, path: &str) -> Client {
        let (client, _) = connect_async(format!("ws://{}{}", addr, path)).await.unwrap();
        client
    }

    async fn next_text(client: &mut Client) -> Option<String> {
        timeout(Duration::from_secs(5), async {
            loop {
                match client.next().await {
                    Some(Ok(WsMessage::Text(text))) => return Some(text),
                    Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => return None,
                    Some(Ok(_)) => {}
                }
            }
        })
        .await
        .unwrap()
    }

    async fn send_event(client: &mut Client, event: &str) {
        client.send(WsMessage::Text(event.to_string())).await.unwrap();
    }

    #[test]
    fn test_client_events() {
        let resize: ClientEvent = serde_json::from_str(r#"{"type":"resize","width":720}"#).unwrap();
        assert_eq!(RedrawTrigger::from(resize), RedrawTrigger::Resize(720.0));

        let theme: ClientEvent = serde_json::from_str(r#"{"type":"theme","theme":"dark"}"#).unwrap();
        assert_eq!(RedrawTrigger::from(theme), RedrawTrigger::ThemeChanged(ThemeName::Dark));
    }

    #[test]
    fn test_unknown_events_rejected() {
        assert!(serde_json::from_str::<ClientEvent>(r#"{"type":"scroll","y":10}"#).is_err());
        assert!(serde_json::from_str::<ClientEvent>(r#"{"type":"theme","theme":"sepia"}"#).is_err());
    }

    #[tokio::test]
    async fn test_first_message_is_the_drawn_chart() {
        let addr = serve(sample_source()).await;
        let mut client = connect(addr, "/live/mapa-calor?width=640").await;

        let first = next_text(&mut client).await.unwrap();
        assert!(first.starts_with("<div class=\"chart\"><svg"));
        assert_eq!(first.matches("<rect class=\"cell\"").count(), 1);
    }

    #[tokio::test]
    async fn test_loading_message_only_on_request() {
        let addr = serve(sample_source()).await;
        let mut client = connect(addr, "/live/rendimento?loading=true").await;

        assert!(next_text(&mut client).await.unwrap().contains(pages::LOADING_MESSAGE));
        assert!(next_text(&mut client).await.unwrap().contains("<rect class=\"bar\""));
    }

    #[tokio::test]
    async fn test_narrow_container_gets_an_empty_chart() {
        let addr = serve(sample_source()).await;
        let mut client = connect(addr, "/live/rendimento?width=10").await;

        assert_eq!(next_text(&mut client).await.unwrap(), "<div class=\"chart\"></div>");

        send_event(&mut client, r#"{"type":"resize","width":480}"#).await;
        assert!(next_text(&mut client).await.unwrap().contains("viewBox=\"0 0 480 200\""));
    }

    #[tokio::test]
    async fn test_resize_and_theme_redraw() {
        let addr = serve(sample_source()).await;
        let mut client = connect(addr, "/live/rendimento?width=640&theme=light").await;
        assert!(next_text(&mut client).await.unwrap().contains("viewBox=\"0 0 640 200\""));

        send_event(&mut client, r#"{"type":"resize","width":480}"#).await;
        let resized = next_text(&mut client).await.unwrap();
        assert!(resized.contains("viewBox=\"0 0 480 200\""));
        assert!(resized.contains(Theme::light().text_muted));

        send_event(&mut client, r#"{"type":"theme","theme":"dark"}"#).await;
        let themed = next_text(&mut client).await.unwrap();
        assert!(themed.contains("viewBox=\"0 0 480 200\""));
        assert!(themed.contains(Theme::dark().text_muted));
        assert!(!themed.contains(Theme::light().text_muted));
    }

    #[tokio::test]
    async fn test_unusable_resize_is_ignored() {
        let addr = serve(sample_source()).await;
        let mut client = connect(addr, "/live/rendimento?width=640").await;
        next_text(&mut client).await.unwrap();

        send_event(&mut client, r#"{"type":"resize","width":1e12}"#).await;
        send_event(&mut client, r#"{"type":"theme","theme":"dark"}"#).await;

        let themed = next_text(&mut client).await.unwrap();
        assert!(themed.contains("viewBox=\"0 0 640 200\""));
    }

    #[tokio::test]
    async fn test_failed_fetch_sends_message_and_closes() {
        let source = FakeSource {
            matrix: None,
            ..sample_source()
        };
        let addr = serve(source).await;
        let mut client = connect(addr, "/live/mapa-calor").await;

        assert_eq!(
            next_text(&mut client).await.unwrap().trim(),
            "<p class=\"error\">Erro: Erro ao carregar dados</p>"
        );
        assert!(next_text(&mut client).await.is_none());
    }

    #[tokio::test]
    async fn test_event_flood_keeps_connection_responsive() {
        let addr = serve(sample_source()).await;
        let client = connect(addr, "/live/rendimento?width=640").await;
        let (mut outgoing, mut incoming) = client.split();

        let (text_tx, mut text_rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(Ok(message)) = incoming.next().await {
                if let WsMessage::Text(text) = message {
                    if text_tx.send(text).is_err() {
                        break;
                    }
                }
            }
        });

        for i in 0..3000 {
            let theme = if i % 2 == 0 { "dark" } else { "light" };
            let event = format!(r#"{{"type":"theme","theme":"{}"}}"#, theme);
            outgoing.send(WsMessage::Text(event)).await.unwrap();
        }
        outgoing
            .send(WsMessage::Text(r#"{"type":"resize","width":500}"#.to_string()))
            .await
            .unwrap();

        let redrawn = timeout(Duration::from_secs(10), async {
            while let Some(text) = text_rx.recv().await {
                if text.contains("viewBox=\"0 0 500 200\"") && text.contains(Theme::light().text_muted) {
                    return true;
                }
            }
            false
        })
        .await
        .unwrap();
        assert!(redrawn);
    }
}
