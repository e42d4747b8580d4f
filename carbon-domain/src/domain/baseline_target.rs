use serde::{Deserialize, Serialize};

/// One baseline/target row per calendar year.
///
/// `target_reduction_pct` is only present on target-year rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineTarget {
    pub year: i32,
    pub total_kwh: f64,
    pub target_reduction_pct: Option<f64>,
}
