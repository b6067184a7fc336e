use serde::{Deserialize, Serialize};

/// Aggregate view over every stored account, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: i64,
    pub sum: f64,
    pub average: f64,
}

impl Statistics {
    /// Average is exactly zero for an empty table.
    pub fn from_totals(count: i64, sum: f64) -> Self {
        let average = if count > 0 { sum / count as f64 } else { 0.0 };
        Self {
            count,
            sum,
            average,
        }
    }
}
