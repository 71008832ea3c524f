// Summary statistics derived from metric records
use super::records::EnergyRecord;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no records to summarize")]
    Empty,
}

/// Mean plus the records holding the extreme values of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSummary<T> {
    pub mean: f64,
    pub max: T,
    pub min: T,
}

impl<T: Clone> StatisticsSummary<T> {
    pub fn from_records<F>(records: &[T], field: F) -> Result<Self, StatsError>
    where
        F: Fn(&T) -> f64,
    {
        Ok(Self {
            mean: mean_by(records, &field)?,
            max: max_by(records, &field)?.clone(),
            min: min_by(records, &field)?.clone(),
        })
    }
}

/// Statistics shown for the full energy dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergySummary {
    pub efficiency: StatisticsSummary<EnergyRecord>,
    pub peak_power: EnergyRecord,
}

impl EnergySummary {
    pub fn from_records(records: &[EnergyRecord]) -> Result<Self, StatsError> {
        Ok(Self {
            efficiency: StatisticsSummary::from_records(records, |r| r.percentual_rendimento)?,
            peak_power: max_by(records, |r| r.potencia_kw)?.clone(),
        })
    }
}

pub fn mean_by<T, F>(records: &[T], field: F) -> Result<f64, StatsError>
where
    F: Fn(&T) -> f64,
{
    if records.is_empty() {
        return Err(StatsError::Empty);
    }
    let sum: f64 = records.iter().map(field).sum();
    Ok(sum / records.len() as f64)
}

/// Record with the highest value; earlier records win ties.
pub fn max_by<T, F>(records: &[T], field: F) -> Result<&T, StatsError>
where
    F: Fn(&T) -> f64,
{
    extreme_by(records, field, |candidate, best| candidate > best)
}

/// Record with the lowest value; earlier records win ties.
pub fn min_by<T, F>(records: &[T], field: F) -> Result<&T, StatsError>
where
    F: Fn(&T) -> f64,
{
    extreme_by(records, field, |candidate, best| candidate < best)
}

fn extreme_by<T, F, C>(records: &[T], field: F, replaces: C) -> Result<&T, StatsError>
where
    F: Fn(&T) -> f64,
    C: Fn(f64, f64) -> bool,
{
    let (first, rest) = records.split_first().ok_or(StatsError::Empty)?;
    Ok(rest.iter().fold(first, |best, item| {
        if replaces(field(item), field(best)) {
            item
        } else {
            best
        }
    }))
}
