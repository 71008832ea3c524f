// HTML pages and live fragments, rendered from the templates/ directory
use crate::application::charts::ChartKind;
use crate::domain::dashboard::{EnergyDashboard, HealthDashboard, MetricCard};
use crate::domain::scene::Scene;
use crate::domain::theme::Theme;
use crate::domain::view::ViewState;
use crate::infrastructure::svg::render_svg;
use askama::Template;

pub const LOADING_MESSAGE: &str = "Carregando dados...";

/// What a dashboard section shows for its view's state.
pub enum SectionBody<'a> {
    Pending,
    Failed(&'a str),
    Ready(Vec<&'a MetricCard>, Option<ChartSlot>),
}

pub struct Section<'a> {
    pub title: &'a str,
    pub body: SectionBody<'a>,
}

/// Live chart placeholder. `svg` is empty when nothing fits the container;
/// the slot still goes live so a later resize can draw into it.
pub struct ChartSlot {
    pub slug: &'static str,
    pub svg: String,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage<'a> {
    title: &'a str,
    theme: &'a Theme,
    updated_at: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    title: &'a str,
    theme: &'a Theme,
    updated_at: String,
    sections: Vec<Section<'a>>,
}

#[derive(Template)]
#[template(path = "fragment.html")]
struct Fragment<'a> {
    section: Section<'a>,
}

#[derive(Template)]
#[template(path = "chart.html")]
struct ChartFragment {
    svg: String,
}

pub fn home_page(theme: &Theme) -> askama::Result<String> {
    HomePage {
        title: "Início",
        theme,
        updated_at: updated_at(),
    }
    .render()
}

pub fn energy_page(dashboard: &EnergyDashboard, theme: &Theme) -> askama::Result<String> {
    let sections = vec![
        Section {
            title: ChartKind::Efficiency.title(),
            body: section_body(&dashboard.efficiency, |view| {
                let slot = chart_slot(ChartKind::Efficiency, view.scene.as_ref());
                SectionBody::Ready(view.cards.iter().collect(), Some(slot))
            }),
        },
        Section {
            title: "Métricas de Energia",
            body: section_body(&dashboard.metrics, |cards| SectionBody::Ready(cards.iter().collect(), None)),
        },
    ];

    DashboardPage {
        title: "Energia",
        theme,
        updated_at: updated_at(),
        sections,
    }
    .render()
}

pub fn health_page(dashboard: &HealthDashboard, theme: &Theme) -> askama::Result<String> {
    let sections = [
        (ChartKind::HeatMap, &dashboard.heat_map),
        (ChartKind::Scatter, &dashboard.scatter),
    ]
    .into_iter()
    .map(|(kind, state)| Section {
        title: kind.title(),
        body: section_body(state, |scene| SectionBody::Ready(Vec::new(), Some(chart_slot(kind, scene.as_ref())))),
    })
    .collect();

    DashboardPage {
        title: "Saúde",
        theme,
        updated_at: updated_at(),
        sections,
    }
    .render()
}

/// Chart as sent to a live slot; an empty container when nothing was drawn.
pub fn chart_fragment(kind: ChartKind, scene: Option<&Scene>) -> askama::Result<String> {
    ChartFragment {
        svg: chart_slot(kind, scene).svg,
    }
    .render()
}

pub fn pending_fragment() -> askama::Result<String> {
    fragment(SectionBody::Pending)
}

/// Never contains a chart container.
pub fn failure_fragment(message: &str) -> askama::Result<String> {
    fragment(SectionBody::Failed(message))
}

fn fragment(body: SectionBody<'_>) -> askama::Result<String> {
    Fragment {
        section: Section { title: "", body },
    }
    .render()
}

fn section_body<'a, T, F>(state: &'a ViewState<T>, ready: F) -> SectionBody<'a>
where
    F: FnOnce(&'a T) -> SectionBody<'a>,
{
    match state {
        ViewState::Pending => SectionBody::Pending,
        ViewState::Failed(message) => SectionBody::Failed(message),
        ViewState::Ready(value) => ready(value),
    }
}

fn chart_slot(kind: ChartKind, scene: Option<&Scene>) -> ChartSlot {
    ChartSlot {
        slug: kind.slug(),
        svg: scene.map(|scene| render_svg(scene, kind.slug())).unwrap_or_default(),
    }
}

fn updated_at() -> String {
    chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string()
}
