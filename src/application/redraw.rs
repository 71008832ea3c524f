// Redraw loop for a live chart: every trigger goes through the same draw
use crate::application::charts::ChartData;
use crate::domain::scene::Scene;
use crate::domain::theme::{Theme, ThemeName};
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Sleep};

#[derive(Debug, Clone, PartialEq)]
pub enum RedrawTrigger {
    /// The view's fetch completed.
    Loaded(ChartData),
    /// The container was measured at a new width.
    Resize(f64),
    ThemeChanged(ThemeName),
}

/// Inputs of the draw routine for one chart.
#[derive(Debug, Clone)]
pub struct ChartView {
    data: Option<ChartData>,
    container_width: f64,
    theme: Theme,
}

impl ChartView {
    pub fn new(container_width: f64, theme: ThemeName) -> Self {
        Self {
            data: None,
            container_width,
            theme: theme.into(),
        }
    }

    /// Records the trigger's input. Drawing is left to the caller.
    pub fn update(&mut self, trigger: RedrawTrigger) {
        match trigger {
            RedrawTrigger::Loaded(data) => self.data = Some(data),
            RedrawTrigger::Resize(width) => self.container_width = width,
            RedrawTrigger::ThemeChanged(name) => self.theme = name.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn redraw(&self) -> Option<Scene> {
        self.data.as_ref()?.draw(self.container_width, &self.theme)
    }
}

// Resizes wait for the debounce deadline; everything else asks for a draw now.
fn absorb(
    view: &mut ChartView,
    trigger: RedrawTrigger,
    pending_width: &mut Option<f64>,
    deadline: Pin<&mut Sleep>,
    debounce: Duration,
) -> bool {
    match trigger {
        RedrawTrigger::Resize(width) => {
            *pending_width = Some(width);
            deadline.reset(Instant::now() + debounce);
            false
        }
        trigger => {
            view.update(trigger);
            true
        }
    }
}

/// Applies triggers until the trigger channel closes. Resizes are coalesced:
/// only the last width seen within `debounce` is drawn. Triggers already
/// queued when a draw is due are folded into that one draw.
///
/// Once data is loaded every draw is sent, `None` included, so the consumer
/// can clear a chart that no longer fits.
pub async fn run_redraw_loop(
    mut view: ChartView,
    mut triggers: mpsc::UnboundedReceiver<RedrawTrigger>,
    scenes: mpsc::Sender<Option<Scene>>,
    debounce: Duration,
) {
    let mut pending_width: Option<f64> = None;
    let deadline = tokio::time::sleep(debounce);
    tokio::pin!(deadline);

    loop {
        let mut due = tokio::select! {
            received = triggers.recv() => match received {
                Some(trigger) => absorb(&mut view, trigger, &mut pending_width, deadline.as_mut(), debounce),
                None => break,
            },
            _ = &mut deadline, if pending_width.is_some() => match pending_width.take() {
                Some(width) => {
                    view.update(RedrawTrigger::Resize(width));
                    true
                }
                None => false,
            },
        };

        while let Ok(trigger) = triggers.try_recv() {
            due |= absorb(&mut view, trigger, &mut pending_width, deadline.as_mut(), debounce);
        }

        if due && view.is_loaded() && scenes.send(view.redraw()).await.is_err() {
            break;
        }
    }

    tracing::debug!("redraw loop finished");
}
