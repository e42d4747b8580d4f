use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub energy_readings_path: String,
    pub baseline_targets_path: String,
}

/// Carbon accounting constants. Defaults match the building's published
/// figures: 0.85 kg CO2/kWh grid factor, 15.2 t/yr PLTS offset, 2023
/// baseline, 2025 target.
#[derive(Debug, Clone, Deserialize)]
pub struct CarbonConfig {
    #[serde(default = "default_emission_factor")]
    pub emission_factor_kg_per_kwh: f64,
    #[serde(default = "default_plts_offset")]
    pub plts_offset_ton_per_year: f64,
    #[serde(default = "default_baseline_year")]
    pub baseline_year: i32,
    #[serde(default = "default_target_year")]
    pub target_year: i32,
}

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            emission_factor_kg_per_kwh: default_emission_factor(),
            plts_offset_ton_per_year: default_plts_offset(),
            baseline_year: default_baseline_year(),
            target_year: default_target_year(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_daily_window_days")]
    pub daily_window_days: usize,
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            daily_window_days: default_daily_window_days(),
            top_categories: default_top_categories(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    #[serde(default)]
    pub carbon: CarbonConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

fn default_emission_factor() -> f64 {
    0.85
}

fn default_plts_offset() -> f64 {
    15.2
}

fn default_baseline_year() -> i32 {
    2023
}

fn default_target_year() -> i32 {
    2025
}

fn default_daily_window_days() -> usize {
    7
}

fn default_top_categories() -> usize {
    5
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path =
            env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| "dashboard-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_falls_back_to_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [data]
            energy_readings_path = "data/energy_readings.csv"
            baseline_targets_path = "data/baseline_targets.csv"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.carbon.emission_factor_kg_per_kwh, 0.85);
        assert_eq!(cfg.carbon.plts_offset_ton_per_year, 15.2);
        assert_eq!(cfg.carbon.baseline_year, 2023);
        assert_eq!(cfg.carbon.target_year, 2025);
        assert_eq!(cfg.dashboard.daily_window_days, 7);
        assert_eq!(cfg.dashboard.top_categories, 5);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [data]
            energy_readings_path = "r.csv"
            baseline_targets_path = "t.csv"

            [carbon]
            emission_factor_kg_per_kwh = 0.7
            baseline_year = 2022

            [dashboard]
            daily_window_days = 30
            "#,
        )
        .unwrap();

        assert_eq!(cfg.carbon.emission_factor_kg_per_kwh, 0.7);
        assert_eq!(cfg.carbon.baseline_year, 2022);
        // Untouched keys keep their defaults.
        assert_eq!(cfg.carbon.target_year, 2025);
        assert_eq!(cfg.dashboard.daily_window_days, 30);
        assert_eq!(cfg.dashboard.top_categories, 5);
    }
}
