use std::{fs::File, path::PathBuf, time::SystemTime};

use carbon_domain::domain::BaselineTarget;
use csv::StringRecord;
use futures::Stream;

use crate::pipeline::{Envelope, PipelineError, Source};

/// CSV source for `BaselineTarget`.
///
/// Expected header columns (by name):
/// - year
/// - total_kwh
/// - target_reduction_pct (optional, present on target-year rows)
///
/// Unlike the readings source, a non-numeric year or total is a hard load
/// error rather than a degraded row.
pub struct BaselineTargetCsvFileSource {
    path: PathBuf,
}

impl BaselineTargetCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

fn parse_optional_f64(s: &str) -> Option<f64> {
    if s.trim().is_empty() {
        None
    } else {
        s.parse().ok()
    }
}

fn record_to_baseline_target(
    record: &StringRecord,
    headers: &csv::StringRecord,
) -> Result<BaselineTarget, PipelineError> {
    let get = |name: &str| -> Result<&str, PipelineError> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
            .ok_or_else(|| PipelineError::Source(format!("missing column '{name}' in CSV record")))
    };

    let year_str = get("year")?;
    let year: i32 = year_str
        .trim()
        .parse()
        .map_err(|e| PipelineError::Source(format!("invalid year '{year_str}': {e}")))?;

    let total_kwh_str = get("total_kwh")?;
    let total_kwh: f64 = total_kwh_str
        .trim()
        .parse()
        .map_err(|e| PipelineError::Source(format!("invalid total_kwh '{total_kwh_str}': {e}")))?;

    let target_reduction_pct = get("target_reduction_pct").ok().and_then(parse_optional_f64);

    Ok(BaselineTarget {
        year,
        total_kwh,
        target_reduction_pct,
    })
}

#[async_trait::async_trait]
impl Source<BaselineTarget> for BaselineTargetCsvFileSource {
    async fn stream(
        &self,
    ) -> std::pin::Pin<Box<dyn Stream<Item = Result<Envelope<BaselineTarget>, PipelineError>> + Send>>
    {
        let path = self.path.clone();
        let s = async_stream::try_stream! {
            let file = File::open(&path)
                .map_err(|e| PipelineError::Source(format!("failed to open CSV file: {e}")))?;
            let mut rdr = csv::Reader::from_reader(file);
            let headers = rdr
                .headers()
                .map_err(|e| PipelineError::Source(format!("failed to read CSV headers: {e}")))?
                .clone();

            for result in rdr.records() {
                let record = result.map_err(|e| PipelineError::Source(format!(
                    "failed to read CSV record: {e}"
                )))?;

                let target = match record_to_baseline_target(&record, &headers) {
                    Ok(t) => t,
                    Err(e) => {
                        metrics::counter!("baseline_target_csv_parse_errors_total").increment(1);
                        Err(e)?
                    }
                };

                yield Envelope {
                    payload: target,
                    received_at: SystemTime::now(),
                };
            }
        };

        Box::pin(s)
    }
}
