// Summary cards composed from derived statistics
use crate::domain::dashboard::{CardTone, MetricCard};
use crate::domain::records::EfficiencyRecord;
use crate::domain::statistics::{EnergySummary, StatisticsSummary};

pub fn efficiency_cards(summary: &StatisticsSummary<EfficiencyRecord>) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Rendimento médio", percent(summary.mean), None, CardTone::Blue),
        MetricCard::new(
            "Rendimento máximo",
            percent(summary.max.percentual_rendimento),
            Some(at_hour(&summary.max.hora)),
            CardTone::Green,
        ),
        MetricCard::new(
            "Rendimento mínimo",
            percent(summary.min.percentual_rendimento),
            Some(at_hour(&summary.min.hora)),
            CardTone::Yellow,
        ),
    ]
}

pub fn energy_cards(summary: &EnergySummary) -> Vec<MetricCard> {
    let efficiency = &summary.efficiency;
    vec![
        MetricCard::new("Rendimento médio total", percent(efficiency.mean), None, CardTone::Blue),
        MetricCard::new(
            "Rendimento máximo",
            percent(efficiency.max.percentual_rendimento),
            Some(at_hour(&efficiency.max.hora)),
            CardTone::Green,
        ),
        MetricCard::new(
            "Rendimento mínimo",
            percent(efficiency.min.percentual_rendimento),
            Some(at_hour(&efficiency.min.hora)),
            CardTone::Yellow,
        ),
        MetricCard::new(
            "Potência Máxima",
            format!("{:.1} kW", summary.peak_power.potencia_kw),
            Some(at_hour(&summary.peak_power.hora)),
            CardTone::Red,
        ),
    ]
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn at_hour(hora: &str) -> String {
    format!("às {}h", hora)
}
