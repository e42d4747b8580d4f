use std::collections::HashMap;

use carbon_domain::domain::{BaselineTarget, EnergyReading};
use serde::Serialize;
use time::Date;

/// Kilowatt-hour totals derived from the full reading set in one pass.
///
/// Recomputed from scratch whenever the dataset is (re)loaded, never patched
/// incrementally. Map iteration order is unspecified; consumers that need
/// floors ascending or days chronological sort at the edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedMetrics {
    pub total_kwh: f64,
    pub kwh_by_floor: HashMap<String, f64>,
    pub kwh_by_category: HashMap<String, f64>,
    pub kwh_by_day: HashMap<Date, f64>,
}

/// Scope 2 emissions for a consumption total, before and after the on-site
/// PLTS offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emissions {
    pub gross_ton: f64,
    pub net_ton: f64,
}

/// Reduction-target arithmetic against the baseline year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetProgress {
    pub baseline_emission_ton: f64,
    pub target_emission_ton: f64,
    pub progress_pct: f64,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("no baseline/target row for year {0}")]
    LookupMiss(i32),
    #[error("multiple baseline/target rows for year {0}")]
    DuplicateYear(i32),
    #[error("degenerate division: {0}")]
    DegenerateDivision(&'static str),
}

/// Single linear pass over the readings.
///
/// Every row contributes its kwh to the grand total and to exactly one floor
/// and one category bucket (absent labels land under the empty key), so the
/// per-floor and per-category sums always equal `total_kwh`. Rows whose
/// timestamp yields no calendar date skip only the daily map.
pub fn aggregate(readings: &[EnergyReading]) -> AggregatedMetrics {
    let mut metrics = AggregatedMetrics::default();

    for reading in readings {
        let kwh = reading.kwh;

        metrics.total_kwh += kwh;
        *metrics
            .kwh_by_floor
            .entry(reading.floor.clone())
            .or_insert(0.0) += kwh;
        *metrics
            .kwh_by_category
            .entry(reading.category.clone())
            .or_insert(0.0) += kwh;

        if let Some(day) = reading.day() {
            *metrics.kwh_by_day.entry(day).or_insert(0.0) += kwh;
        }
    }

    metrics
}

/// kWh -> kgCO2 -> tCO2, with the offset floored at zero net.
///
/// No rounding happens here; formatting is a presentation concern.
pub fn derive_emissions(
    total_kwh: f64,
    factor_kg_per_kwh: f64,
    offset_ton_per_year: f64,
) -> Emissions {
    let gross_ton = total_kwh * factor_kg_per_kwh / 1000.0;
    // The offset can never drive the net figure negative.
    let net_ton = (gross_ton - offset_ton_per_year).max(0.0);
    Emissions { gross_ton, net_ton }
}

fn lookup_year(targets: &[BaselineTarget], year: i32) -> Result<&BaselineTarget, EngineError> {
    let mut matches = targets.iter().filter(|t| t.year == year);
    let first = matches.next().ok_or(EngineError::LookupMiss(year))?;
    if matches.next().is_some() {
        return Err(EngineError::DuplicateYear(year));
    }
    Ok(first)
}

/// Progress toward the target-year reduction, clamped to `[0, 100]`.
///
/// A target requesting no reduction (zero or absent pct) makes progress
/// undefined and is reported as a degenerate division, never coerced to a
/// number that could reach a display.
pub fn compute_target_progress(
    targets: &[BaselineTarget],
    net_ton: f64,
    baseline_year: i32,
    target_year: i32,
    factor_kg_per_kwh: f64,
) -> Result<TargetProgress, EngineError> {
    let baseline = lookup_year(targets, baseline_year)?;
    let target = lookup_year(targets, target_year)?;

    let baseline_emission_ton = baseline.total_kwh * factor_kg_per_kwh / 1000.0;
    let reduction_pct = target.target_reduction_pct.unwrap_or(0.0);
    let target_reduction_ton = baseline_emission_ton * (reduction_pct / 100.0);
    let target_emission_ton = baseline_emission_ton - target_reduction_ton;

    if target_reduction_ton == 0.0 {
        return Err(EngineError::DegenerateDivision("target reduction is zero"));
    }

    let current_reduction_ton = baseline_emission_ton - net_ton;
    let progress_pct = (current_reduction_ton / target_reduction_ton * 100.0).clamp(0.0, 100.0);

    if !progress_pct.is_finite() || !target_emission_ton.is_finite() {
        return Err(EngineError::DegenerateDivision(
            "non-finite target arithmetic",
        ));
    }

    Ok(TargetProgress {
        baseline_emission_ton,
        target_emission_ton,
        progress_pct,
    })
}
