//! Static tables backing the peripheral dashboard pages.
//!
//! These mirror the building's published sustainability program data. They
//! are fixture data consumed by the report layer, not engine output, and the
//! only computation over them is the transport commute simulation.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanStatus {
    Completed,
    OnTrack,
    Delayed,
    Blocked,
    Planned,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanStatus::Completed => "Completed",
            PlanStatus::OnTrack => "On Track",
            PlanStatus::Delayed => "Delayed",
            PlanStatus::Blocked => "Blocked",
            PlanStatus::Planned => "Planned",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionPlanItem {
    pub program: &'static str,
    pub status: PlanStatus,
    pub timeline: &'static str,
    pub impact_ton_co2: f64,
    pub progress_pct: u8,
    pub cost: &'static str,
    pub category: &'static str,
}

pub static ACTION_PLANS: &[ActionPlanItem] = &[
    ActionPlanItem {
        program: "Rooftop solar PV installation (50 kW)",
        status: PlanStatus::Completed,
        timeline: "2023 Q4",
        impact_ton_co2: 15.2,
        progress_pct: 100,
        cost: "Low",
        category: "Energy",
    },
    ActionPlanItem {
        program: "Digital energy monitoring rollout",
        status: PlanStatus::OnTrack,
        timeline: "2024 Q2",
        impact_ton_co2: 7.0,
        progress_pct: 85,
        cost: "Medium",
        category: "Efficiency",
    },
    ActionPlanItem {
        program: "Paperless document program",
        status: PlanStatus::Completed,
        timeline: "2023 Q3",
        impact_ton_co2: 1.8,
        progress_pct: 100,
        cost: "Very Low",
        category: "Waste",
    },
    ActionPlanItem {
        program: "AC replacement with inverter + IoT units",
        status: PlanStatus::Delayed,
        timeline: "2025 Q1",
        impact_ton_co2: 11.0,
        progress_pct: 20,
        cost: "High",
        category: "Energy",
    },
    ActionPlanItem {
        program: "Lighting audit and LED replacement",
        status: PlanStatus::Blocked,
        timeline: "2024 Q4",
        impact_ton_co2: 3.5,
        progress_pct: 10,
        cost: "Medium",
        category: "Efficiency",
    },
    ActionPlanItem {
        program: "Waste separation and recycling education",
        status: PlanStatus::OnTrack,
        timeline: "2024 Q3",
        impact_ton_co2: 60.0,
        progress_pct: 60,
        cost: "Very Low",
        category: "Waste",
    },
    ActionPlanItem {
        program: "Rainwater harvesting",
        status: PlanStatus::Planned,
        timeline: "2026 Q1",
        impact_ton_co2: 3.0,
        progress_pct: 0,
        cost: "Medium",
        category: "Water",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct InverterStatus {
    pub id: &'static str,
    pub model: &'static str,
    pub current_power_kw: f64,
    pub status: &'static str,
    pub efficiency_pct: f64,
}

pub static INVERTERS: &[InverterStatus] = &[
    InverterStatus {
        id: "INV-001",
        model: "A3000",
        current_power_kw: 12.5,
        status: "Online",
        efficiency_pct: 98.2,
    },
    InverterStatus {
        id: "INV-002",
        model: "A3000",
        current_power_kw: 12.3,
        status: "Online",
        efficiency_pct: 97.9,
    },
    InverterStatus {
        id: "INV-003",
        model: "B5000",
        current_power_kw: 15.1,
        status: "Online",
        efficiency_pct: 98.5,
    },
    InverterStatus {
        id: "INV-004",
        model: "B5000",
        current_power_kw: 0.0,
        status: "Error",
        efficiency_pct: 0.0,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct SolarDailyProduction {
    pub day: &'static str,
    pub actual_kwh: f64,
    pub expected_kwh: f64,
}

pub static SOLAR_WEEKLY_PRODUCTION: &[SolarDailyProduction] = &[
    SolarDailyProduction { day: "Mon", actual_kwh: 450.0, expected_kwh: 480.0 },
    SolarDailyProduction { day: "Tue", actual_kwh: 480.0, expected_kwh: 500.0 },
    SolarDailyProduction { day: "Wed", actual_kwh: 390.0, expected_kwh: 450.0 },
    SolarDailyProduction { day: "Thu", actual_kwh: 510.0, expected_kwh: 500.0 },
    SolarDailyProduction { day: "Fri", actual_kwh: 520.0, expected_kwh: 510.0 },
    SolarDailyProduction { day: "Sat", actual_kwh: 470.0, expected_kwh: 490.0 },
    SolarDailyProduction { day: "Sun", actual_kwh: 420.0, expected_kwh: 450.0 },
];

#[derive(Debug, Clone, Serialize)]
pub struct WasteMonth {
    pub month: &'static str,
    pub total_kg: f64,
    pub recycled_kg: f64,
    pub non_recycled_kg: f64,
}

pub static WASTE_TREND: &[WasteMonth] = &[
    WasteMonth { month: "Jan", total_kg: 180.0, recycled_kg: 45.0, non_recycled_kg: 135.0 },
    WasteMonth { month: "Feb", total_kg: 175.0, recycled_kg: 50.0, non_recycled_kg: 125.0 },
    WasteMonth { month: "Mar", total_kg: 160.0, recycled_kg: 40.0, non_recycled_kg: 120.0 },
    WasteMonth { month: "Apr", total_kg: 155.0, recycled_kg: 45.0, non_recycled_kg: 110.0 },
    WasteMonth { month: "May", total_kg: 150.0, recycled_kg: 55.0, non_recycled_kg: 95.0 },
    WasteMonth { month: "Jun", total_kg: 145.0, recycled_kg: 60.0, non_recycled_kg: 85.0 },
];

#[derive(Debug, Clone, Serialize)]
pub struct WasteInitiative {
    pub initiative: &'static str,
    pub target: &'static str,
    pub status: &'static str,
    pub impact: &'static str,
}

pub static WASTE_INITIATIVES: &[WasteInitiative] = &[
    WasteInitiative {
        initiative: "Office waste separation",
        target: "90%",
        status: "On Track",
        impact: "25% recycled ratio",
    },
    WasteInitiative {
        initiative: "Single-use plastic reduction",
        target: "80% reduction",
        status: "Completed",
        impact: "110 kg plastic avoided",
    },
    WasteInitiative {
        initiative: "E-waste collection drive",
        target: "Twice annually",
        status: "In Progress",
        impact: "Awaiting vendor pickup",
    },
    WasteInitiative {
        initiative: "Food waste management",
        target: "10% reduction",
        status: "Delayed",
        impact: "Further education needed",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct TransportMode {
    pub mode: &'static str,
    pub label: &'static str,
    pub emission_kg_per_km: f64,
}

/// Per-passenger emission factors, kg CO2 per km. Shared modes already carry
/// the per-passenger split; an online meeting counts as zero for the direct
/// comparison.
pub static TRANSPORT_MODES: &[TransportMode] = &[
    TransportMode { mode: "car", label: "Private car (petrol)", emission_kg_per_km: 0.192 },
    TransportMode { mode: "motorcycle", label: "Motorcycle", emission_kg_per_km: 0.072 },
    TransportMode { mode: "bus", label: "Bus", emission_kg_per_km: 0.045 },
    TransportMode { mode: "train", label: "Commuter rail", emission_kg_per_km: 0.014 },
    TransportMode { mode: "electric_car", label: "Electric car", emission_kg_per_km: 0.015 },
    TransportMode { mode: "online", label: "Online meeting", emission_kg_per_km: 0.0 },
];

static MODE_INDEX: Lazy<HashMap<&'static str, &'static TransportMode>> =
    Lazy::new(|| TRANSPORT_MODES.iter().map(|m| (m.mode, m)).collect());

pub fn transport_mode(mode: &str) -> Option<&'static TransportMode> {
    MODE_INDEX.get(mode).copied()
}

/// Emission of a single trip over `distance_km` with the given mode.
pub fn mode_emission_kg(distance_km: f64, mode: &TransportMode) -> f64 {
    distance_km * mode.emission_kg_per_km
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_index_resolves_every_mode() {
        for mode in TRANSPORT_MODES {
            assert!(transport_mode(mode.mode).is_some());
        }
        assert!(transport_mode("teleport").is_none());
    }

    #[test]
    fn commute_simulation_matches_the_factors() {
        let car = transport_mode("car").unwrap();
        let train = transport_mode("train").unwrap();
        let online = transport_mode("online").unwrap();

        assert!((mode_emission_kg(15.0, car) - 2.88).abs() < 1e-9);
        assert!((mode_emission_kg(15.0, train) - 0.21).abs() < 1e-9);
        assert_eq!(mode_emission_kg(15.0, online), 0.0);
        // Rail always beats the private car for the same distance.
        assert!(mode_emission_kg(15.0, train) < mode_emission_kg(15.0, car));
    }

    #[test]
    fn waste_trend_splits_add_up_or_under() {
        for month in WASTE_TREND {
            assert!(month.recycled_kg + month.non_recycled_kg <= month.total_kg);
        }
    }
}
