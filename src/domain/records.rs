// Metric record domain models, as served by the statistics API
use serde::{Deserialize, Deserializer, Serialize};

/// One hourly efficiency reading.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EfficiencyRecord {
    #[serde(deserialize_with = "hour_label")]
    pub hora: String,
    pub percentual_rendimento: f64,
}

impl EfficiencyRecord {
    pub fn new(hora: impl Into<String>, percentual_rendimento: f64) -> Self {
        Self {
            hora: hora.into(),
            percentual_rendimento,
        }
    }
}

/// One hourly reading from the full energy dataset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnergyRecord {
    #[serde(deserialize_with = "hour_label")]
    pub hora: String,
    pub percentual_rendimento: f64,
    pub potencia_kw: f64,
}

impl EnergyRecord {
    pub fn new(hora: impl Into<String>, percentual_rendimento: f64, potencia_kw: f64) -> Self {
        Self {
            hora: hora.into(),
            percentual_rendimento,
            potencia_kw,
        }
    }
}

/// A correlated pair of health readings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScatterPoint {
    pub colesterol: f64,
    pub pressao: f64,
}

impl ScatterPoint {
    pub fn new(colesterol: f64, pressao: f64) -> Self {
        Self { colesterol, pressao }
    }
}

/// Payload of the efficiency detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EfficiencyPayload {
    pub dados_brutos: Vec<EfficiencyRecord>,
    /// Precomputed by the API; its shape is not fixed, so it is carried as-is.
    #[serde(default)]
    pub estatisticas: Option<serde_json::Value>,
}

/// Payload of the full energy dataset endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EnergyDatasetPayload {
    pub dados_completos: Vec<EnergyRecord>,
}

// Upstream sends hours either as "07" or as 7; both are shown as sent
fn hour_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Hour {
        Text(String),
        Number(i64),
    }

    Ok(match Hour::deserialize(deserializer)? {
        Hour::Text(text) => text,
        Hour::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficiency_payload_with_text_hours() {
        let json = r#"{"dados_brutos":[{"hora":"00","percentual_rendimento":80.0},{"hora":"01","percentual_rendimento":90.0}]}"#;
        let payload: EfficiencyPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.dados_brutos.len(), 2);
        assert_eq!(payload.dados_brutos[1], EfficiencyRecord::new("01", 90.0));
        assert!(payload.estatisticas.is_none());
    }

    #[test]
    fn test_numeric_hours_keep_their_digits() {
        let json = r#"{"dados_completos":[{"hora":7,"percentual_rendimento":81.5,"potencia_kw":3.2}]}"#;
        let payload: EnergyDatasetPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.dados_completos[0].hora, "7");
    }

    #[test]
    fn test_statistics_object_is_kept() {
        let json = r#"{"dados_brutos":[],"estatisticas":{"media":85.0}}"#;
        let payload: EfficiencyPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.estatisticas.unwrap()["media"], 85.0);
    }
}
