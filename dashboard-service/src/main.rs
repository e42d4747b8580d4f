use std::sync::Arc;

use anyhow::Result;
use carbon_domain::domain::{BaselineTarget, EnergyReading};
use dashboard_service::{
    config::AppConfig,
    observability,
    pipeline::Pipeline,
    report,
    sources::{BaselineTargetCsvFileSource, EnergyReadingCsvFileSource},
    store::CarbonStore,
    transform,
};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    let readings_pipeline: Pipeline<_, EnergyReading> = Pipeline {
        source: EnergyReadingCsvFileSource::new(&cfg.data.energy_readings_path),
        transforms: vec![Arc::new(transform::ReadingSanitize)],
    };
    let targets_pipeline: Pipeline<_, BaselineTarget> = Pipeline {
        source: BaselineTargetCsvFileSource::new(&cfg.data.baseline_targets_path),
        transforms: vec![],
    };

    // Both loads run concurrently and both must complete before anything is
    // aggregated. A single failure leaves the dashboard in the no-data state;
    // there is no retry.
    let (readings, targets) =
        match tokio::try_join!(readings_pipeline.collect(), targets_pipeline.collect()) {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!(error = %e, "data load failed");
                print!("{}", report::render_no_data());
                return Ok(());
            }
        };

    let store = CarbonStore::new(readings, targets, cfg.carbon.clone());
    tracing::info!(
        readings = store.readings().len(),
        target_rows = store.targets().len(),
        total_kwh = store.metrics().total_kwh,
        "datasets loaded"
    );

    print!("{}", report::render_pages(&store, &cfg.dashboard));

    Ok(())
}
