// Correlation matrix domain model
use indexmap::IndexMap;
use serde::Deserialize;

/// Variable-by-variable correlation coefficients, in upstream key order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct CorrelationMatrix {
    rows: IndexMap<String, IndexMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorrelationPayload {
    pub matriz_correlacao: CorrelationMatrix,
}

/// One rendered heat-map entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub row: String,
    pub col: String,
    pub value: f64,
}

impl CorrelationMatrix {
    pub fn variables(&self) -> Vec<&str> {
        self.rows.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Entries strictly below the diagonal, row-major.
    pub fn lower_triangle(&self) -> Vec<HeatCell> {
        let variables = self.variables();
        let mut cells = Vec::with_capacity(variables.len() * variables.len().saturating_sub(1) / 2);

        for (row_index, row) in variables.iter().enumerate() {
            for col in &variables[..row_index] {
                match self.get(row, col) {
                    Some(value) => cells.push(HeatCell {
                        row: (*row).to_string(),
                        col: (*col).to_string(),
                        value,
                    }),
                    None => tracing::warn!("correlation matrix has no entry for {} × {}", row, col),
                }
            }
        }

        cells
    }
}
