use carbon_domain::domain::{BaselineTarget, EnergyReading};

use crate::{
    config::CarbonConfig,
    engine::{self, AggregatedMetrics, Emissions, EngineError, TargetProgress},
};

/// The loaded datasets plus the metrics derived from them.
///
/// Built once per successful load; the row sets are immutable from here on.
/// A new load means a new store, never an in-place patch, so the aggregates
/// can be computed at construction and handed out by reference.
pub struct CarbonStore {
    readings: Vec<EnergyReading>,
    targets: Vec<BaselineTarget>,
    carbon: CarbonConfig,
    metrics: AggregatedMetrics,
}

impl CarbonStore {
    pub fn new(
        readings: Vec<EnergyReading>,
        targets: Vec<BaselineTarget>,
        carbon: CarbonConfig,
    ) -> Self {
        let metrics = engine::aggregate(&readings);
        Self {
            readings,
            targets,
            carbon,
            metrics,
        }
    }

    pub fn readings(&self) -> &[EnergyReading] {
        &self.readings
    }

    pub fn targets(&self) -> &[BaselineTarget] {
        &self.targets
    }

    pub fn carbon(&self) -> &CarbonConfig {
        &self.carbon
    }

    pub fn metrics(&self) -> &AggregatedMetrics {
        &self.metrics
    }

    /// Gross and net emissions for the loaded readings, using the configured
    /// grid factor and PLTS offset.
    pub fn emissions(&self) -> Emissions {
        engine::derive_emissions(
            self.metrics.total_kwh,
            self.carbon.emission_factor_kg_per_kwh,
            self.carbon.plts_offset_ton_per_year,
        )
    }

    /// Progress toward the configured reduction target.
    ///
    /// Fails when a required year row is missing/duplicated or the target
    /// requests no reduction; the caller renders that KPI as unavailable and
    /// keeps the independent ones.
    pub fn target_progress(&self) -> Result<TargetProgress, EngineError> {
        engine::compute_target_progress(
            &self.targets,
            self.emissions().net_ton,
            self.carbon.baseline_year,
            self.carbon.target_year,
            self.carbon.emission_factor_kg_per_kwh,
        )
    }
}
