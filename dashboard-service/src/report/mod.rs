//! Presentation shaping over the aggregated metrics.
//!
//! Everything here is a pure formatting transform: the engine hands out
//! unordered maps and unrounded numbers, this module sorts, windows,
//! percentages and renders them. The only failure mode it adds is the
//! guarded zero-total share computation.

use std::fmt::Write as _;

use serde::Serialize;
use time::Date;

use crate::config::DashboardConfig;
use crate::engine::{AggregatedMetrics, Emissions, EngineError, TargetProgress};
use crate::fixtures;
use crate::store::CarbonStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorPoint {
    pub floor: String,
    pub kwh: f64,
    pub emission_ton: f64,
}

/// Floors sorted for display: numeric labels ascending by value (so "2"
/// comes before "10"), anything non-numeric after them, lexicographically.
pub fn floor_series(metrics: &AggregatedMetrics, factor_kg_per_kwh: f64) -> Vec<FloorPoint> {
    let mut series: Vec<FloorPoint> = metrics
        .kwh_by_floor
        .iter()
        .map(|(floor, &kwh)| FloorPoint {
            floor: floor.clone(),
            kwh,
            emission_ton: kwh * factor_kg_per_kwh / 1000.0,
        })
        .collect();
    series.sort_by(|a, b| floor_sort_key(&a.floor).cmp(&floor_sort_key(&b.floor)));
    series
}

fn floor_sort_key(floor: &str) -> (u8, i64, String) {
    match floor.trim().parse::<i64>() {
        Ok(n) => (0, n, String::new()),
        Err(_) => (1, 0, floor.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: Date,
    pub kwh: f64,
    pub emission_ton: f64,
}

/// The most recent `last_n` days, chronological.
pub fn daily_series(
    metrics: &AggregatedMetrics,
    factor_kg_per_kwh: f64,
    last_n: usize,
) -> Vec<DailyPoint> {
    let mut days: Vec<(Date, f64)> = metrics
        .kwh_by_day
        .iter()
        .map(|(&date, &kwh)| (date, kwh))
        .collect();
    days.sort_by_key(|&(date, _)| date);

    let skip = days.len().saturating_sub(last_n);
    days.into_iter()
        .skip(skip)
        .map(|(date, kwh)| DailyPoint {
            date,
            kwh,
            emission_ton: kwh * factor_kg_per_kwh / 1000.0,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub kwh: f64,
    pub emission_ton: f64,
    pub share_pct: f64,
}

/// Per-category consumption with its share of the total, sorted descending
/// by kwh. A zero total would divide by zero and is reported instead.
pub fn category_breakdown(
    metrics: &AggregatedMetrics,
    factor_kg_per_kwh: f64,
) -> Result<Vec<CategoryShare>, EngineError> {
    if metrics.total_kwh == 0.0 {
        return Err(EngineError::DegenerateDivision("total kwh is zero"));
    }

    let mut breakdown: Vec<CategoryShare> = metrics
        .kwh_by_category
        .iter()
        .map(|(category, &kwh)| CategoryShare {
            category: category.clone(),
            kwh,
            emission_ton: kwh * factor_kg_per_kwh / 1000.0,
            share_pct: kwh / metrics.total_kwh * 100.0,
        })
        .collect();
    breakdown.sort_by(|a, b| b.kwh.partial_cmp(&a.kwh).unwrap_or(std::cmp::Ordering::Equal));
    Ok(breakdown)
}

/// The dashboard KPI cards plus the target-progress block.
///
/// A failed target computation blocks only that block; the consumption and
/// emission KPIs render from whatever data is available.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_kwh: f64,
    pub emissions: Emissions,
    pub offset_ton_per_year: f64,
    pub target: Option<TargetProgress>,
    pub target_error: Option<String>,
}

pub fn dashboard_summary(store: &CarbonStore) -> DashboardSummary {
    let (target, target_error) = match store.target_progress() {
        Ok(p) => (Some(p), None),
        Err(e) => (None, Some(e.to_string())),
    };

    DashboardSummary {
        total_kwh: store.metrics().total_kwh,
        emissions: store.emissions(),
        offset_ton_per_year: store.carbon().plts_offset_ton_per_year,
        target,
        target_error,
    }
}

pub fn render_no_data() -> String {
    "BAF Plaza Carbon Tracker\n\nNo data available. The dashboard stays empty until the next load.\n"
        .to_string()
}

/// All pages, in the sidebar order of the original dashboard.
pub fn render_pages(store: &CarbonStore, cfg: &DashboardConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "BAF Plaza Carbon Tracker");
    let _ = writeln!(out, "========================");
    out.push('\n');
    out.push_str(&render_dashboard(store, cfg));
    out.push_str(&render_energy(store, cfg));
    out.push_str(&render_solar(store));
    out.push_str(&render_action_plan());
    out.push_str(&render_waste());
    out.push_str(&render_transport(15.0));
    out.push_str(&render_report(store));
    out
}

fn render_dashboard(store: &CarbonStore, cfg: &DashboardConfig) -> String {
    let summary = dashboard_summary(store);
    let carbon = store.carbon();

    let mut out = String::new();
    let _ = writeln!(out, "-- Dashboard --");
    let _ = writeln!(out, "Total energy:      {:.1} kWh", summary.total_kwh);
    let _ = writeln!(out, "Gross emissions:   {:.2} tCO2", summary.emissions.gross_ton);
    let _ = writeln!(out, "PLTS offset:       {:.1} tCO2/yr", summary.offset_ton_per_year);
    let _ = writeln!(out, "Net emissions:     {:.2} tCO2", summary.emissions.net_ton);
    if let Some(p) = &summary.target {
        let _ = writeln!(out, "Reduction target {}:", carbon.target_year);
        let _ = writeln!(
            out,
            "  Baseline ({}):  {:.1} tCO2",
            carbon.baseline_year, p.baseline_emission_ton
        );
        let _ = writeln!(out, "  Target:          {:.1} tCO2", p.target_emission_ton);
        let _ = writeln!(out, "  Progress:        {:.1}%", p.progress_pct);
    } else {
        let reason = summary.target_error.as_deref().unwrap_or("unknown");
        let _ = writeln!(out, "Reduction target:  unavailable ({reason})");
    }

    match category_breakdown(store.metrics(), carbon.emission_factor_kg_per_kwh) {
        Ok(breakdown) => {
            let _ = writeln!(out, "Top emission contributors:");
            for share in breakdown.iter().take(cfg.top_categories) {
                let _ = writeln!(
                    out,
                    "  {:<12} {:>8.0} kWh  ({:.1}%)",
                    share.category, share.kwh, share.share_pct
                );
            }
        }
        Err(e) => {
            let _ = writeln!(out, "Top emission contributors: unavailable ({e})");
        }
    }
    out.push('\n');
    out
}

fn render_energy(store: &CarbonStore, cfg: &DashboardConfig) -> String {
    let carbon = store.carbon();
    let factor = carbon.emission_factor_kg_per_kwh;

    let mut out = String::new();
    let _ = writeln!(out, "-- Energy Monitoring --");
    let _ = writeln!(out, "By floor:");
    for point in floor_series(store.metrics(), factor) {
        let label = if point.floor.is_empty() {
            "(unlabeled)"
        } else {
            point.floor.as_str()
        };
        let _ = writeln!(
            out,
            "  Floor {:<8} {:>10.1} kWh  {:>8.3} tCO2",
            label, point.kwh, point.emission_ton
        );
    }
    let _ = writeln!(out, "Daily (last {} days):", cfg.daily_window_days);
    for point in daily_series(store.metrics(), factor, cfg.daily_window_days) {
        let _ = writeln!(
            out,
            "  {}  {:>10.1} kWh  {:>8.3} tCO2",
            point.date, point.kwh, point.emission_ton
        );
    }
    out.push('\n');
    out
}

fn render_solar(store: &CarbonStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- Solar PV & Offset --");
    let _ = writeln!(
        out,
        "Offset capacity: {:.1} tCO2/yr",
        store.carbon().plts_offset_ton_per_year
    );
    let _ = writeln!(out, "Weekly production (actual vs expected):");
    for day in fixtures::SOLAR_WEEKLY_PRODUCTION {
        let _ = writeln!(
            out,
            "  {:<4} {:>6.0} / {:>6.0} kWh",
            day.day, day.actual_kwh, day.expected_kwh
        );
    }
    let _ = writeln!(out, "Inverters:");
    for inv in fixtures::INVERTERS {
        let _ = writeln!(
            out,
            "  {:<8} {:<6} {:>5.1} kW  {:<7} {:>5.1}%",
            inv.id, inv.model, inv.current_power_kw, inv.status, inv.efficiency_pct
        );
    }
    out.push('\n');
    out
}

fn render_action_plan() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- Carbon Action Plan --");
    for item in fixtures::ACTION_PLANS {
        let _ = writeln!(
            out,
            "  [{:>3}%] {:<44} {:<10} {}  ({:.1} tCO2, {} cost, {})",
            item.progress_pct,
            item.program,
            item.timeline,
            item.status,
            item.impact_ton_co2,
            item.cost,
            item.category
        );
    }
    out.push('\n');
    out
}

fn render_waste() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- Waste Management --");
    let _ = writeln!(out, "Monthly trend (total / recycled / non-recycled, kg):");
    for month in fixtures::WASTE_TREND {
        let _ = writeln!(
            out,
            "  {:<4} {:>5.0} / {:>4.0} / {:>5.0}",
            month.month, month.total_kg, month.recycled_kg, month.non_recycled_kg
        );
    }
    let _ = writeln!(out, "Initiatives:");
    for ini in fixtures::WASTE_INITIATIVES {
        let _ = writeln!(
            out,
            "  {:<38} target {:<15} {:<12} {}",
            ini.initiative, ini.target, ini.status, ini.impact
        );
    }
    out.push('\n');
    out
}

fn render_transport(distance_km: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- Transportation --");
    let _ = writeln!(out, "Simulated commute over {distance_km:.0} km:");
    for mode in fixtures::TRANSPORT_MODES {
        let _ = writeln!(
            out,
            "  {:<22} {:>7.3} kg CO2",
            mode.label,
            fixtures::mode_emission_kg(distance_km, mode)
        );
    }
    if let (Some(car), Some(train), Some(online)) = (
        fixtures::transport_mode("car"),
        fixtures::transport_mode("train"),
        fixtures::transport_mode("online"),
    ) {
        let car_kg = fixtures::mode_emission_kg(distance_km, car);
        let _ = writeln!(
            out,
            "Savings rail vs car:   {:>7.3} kg CO2",
            car_kg - fixtures::mode_emission_kg(distance_km, train)
        );
        let _ = writeln!(
            out,
            "Savings online vs car: {:>7.3} kg CO2",
            car_kg - fixtures::mode_emission_kg(distance_km, online)
        );
    }
    out.push('\n');
    out
}

fn render_report(store: &CarbonStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- Report --");
    let _ = writeln!(out, "PDF export is not implemented. Machine-readable summary:");
    match serde_json::to_string_pretty(&dashboard_summary(store)) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
        }
        Err(e) => {
            let _ = writeln!(out, "summary serialization failed: {e}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarbonConfig;
    use carbon_domain::domain::{BaselineTarget, EnergyReading};
    use time::macros::date;

    fn reading(timestamp: &str, floor: &str, category: &str, kwh: f64) -> EnergyReading {
        EnergyReading {
            timestamp: timestamp.to_string(),
            floor: floor.to_string(),
            category: category.to_string(),
            kwh,
        }
    }

    fn sample_metrics() -> AggregatedMetrics {
        crate::engine::aggregate(&[
            reading("2025-03-01 08:00:00", "2", "AC", 100.0),
            reading("2025-03-02 08:00:00", "10", "Lighting", 50.0),
            reading("2025-03-03 08:00:00", "1", "IT", 25.0),
            reading("2025-03-04 08:00:00", "B1", "AC", 25.0),
        ])
    }

    #[test]
    fn floor_series_sorts_numerically_then_lexicographically() {
        let series = floor_series(&sample_metrics(), 0.85);
        let floors: Vec<&str> = series.iter().map(|p| p.floor.as_str()).collect();
        assert_eq!(floors, vec!["1", "2", "10", "B1"]);
    }

    #[test]
    fn daily_series_is_chronological_and_windowed() {
        let series = daily_series(&sample_metrics(), 0.85, 2);
        let dates: Vec<Date> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date!(2025 - 03 - 03), date!(2025 - 03 - 04)]);
    }

    #[test]
    fn daily_series_window_larger_than_data_returns_everything() {
        let series = daily_series(&sample_metrics(), 0.85, 30);
        assert_eq!(series.len(), 4);
        assert_eq!(series.first().unwrap().date, date!(2025 - 03 - 01));
    }

    #[test]
    fn category_breakdown_sorts_descending_and_shares_sum_to_100() {
        let breakdown = category_breakdown(&sample_metrics(), 0.85).unwrap();
        assert_eq!(breakdown[0].category, "AC");
        assert_eq!(breakdown[0].kwh, 125.0);
        let share_sum: f64 = breakdown.iter().map(|s| s.share_pct).sum();
        assert!((share_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn category_breakdown_guards_the_zero_total() {
        let res = category_breakdown(&AggregatedMetrics::default(), 0.85);
        assert!(matches!(res, Err(EngineError::DegenerateDivision(_))));
    }

    fn sample_store(targets: Vec<BaselineTarget>) -> CarbonStore {
        CarbonStore::new(
            vec![
                reading("2025-03-01 08:00:00", "1", "AC", 100.0),
                reading("2025-03-01 09:00:00", "2", "Lighting", 50.0),
            ],
            targets,
            CarbonConfig::default(),
        )
    }

    #[test]
    fn summary_blocks_only_the_target_kpi_on_lookup_miss() {
        let summary = dashboard_summary(&sample_store(vec![]));
        assert_eq!(summary.total_kwh, 150.0);
        assert!(summary.target.is_none());
        assert!(summary.target_error.is_some());
    }

    #[test]
    fn pages_render_with_degraded_target_block() {
        let out = render_pages(&sample_store(vec![]), &DashboardConfig::default());
        assert!(out.contains("Total energy:      150.0 kWh"));
        assert!(out.contains("unavailable"));
        assert!(out.contains("-- Transportation --"));
    }

    #[test]
    fn pages_render_full_target_block_when_rows_exist() {
        let targets = vec![
            BaselineTarget {
                year: 2023,
                total_kwh: 100_000.0,
                target_reduction_pct: None,
            },
            BaselineTarget {
                year: 2025,
                total_kwh: 90_000.0,
                target_reduction_pct: Some(10.0),
            },
        ];
        let out = render_pages(&sample_store(targets), &DashboardConfig::default());
        assert!(out.contains("Reduction target 2025:"));
        assert!(out.contains("Progress:        100.0%"));
    }
}
