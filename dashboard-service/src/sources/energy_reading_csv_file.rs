use std::{fs::File, path::PathBuf, time::SystemTime};

use carbon_domain::domain::EnergyReading;
use csv::StringRecord;
use futures::Stream;

use crate::pipeline::{Envelope, PipelineError, Source};

/// CSV source for `EnergyReading`.
///
/// Expected header columns (by name):
/// - timestamp ("YYYY-MM-DD HH:MM:SS" or similar, consumed at day granularity)
/// - floor
/// - category
/// - kwh
///
/// A missing or non-numeric kwh cell degrades the row to a zero contribution
/// instead of failing the load; absent floor/category cells group under the
/// literal empty key. Both are counted, never propagated.
pub struct EnergyReadingCsvFileSource {
    path: PathBuf,
}

impl EnergyReadingCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

fn parse_kwh_cell(cell: Option<&str>) -> f64 {
    match cell.map(str::trim) {
        Some(s) if !s.is_empty() => match s.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                metrics::counter!("energy_reading_malformed_kwh_total").increment(1);
                0.0
            }
        },
        _ => {
            metrics::counter!("energy_reading_malformed_kwh_total").increment(1);
            0.0
        }
    }
}

fn record_to_energy_reading(
    record: &StringRecord,
    headers: &csv::StringRecord,
) -> Result<EnergyReading, PipelineError> {
    let get = |name: &str| -> Option<&str> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
    };

    let timestamp = get("timestamp")
        .ok_or_else(|| {
            PipelineError::Source("missing column 'timestamp' in CSV record".to_string())
        })?
        .trim()
        .to_string();

    let floor = get("floor").map(str::trim).unwrap_or("").to_string();
    let category = get("category").map(str::trim).unwrap_or("").to_string();
    let kwh = parse_kwh_cell(get("kwh"));

    Ok(EnergyReading {
        timestamp,
        floor,
        category,
        kwh,
    })
}

#[async_trait::async_trait]
impl Source<EnergyReading> for EnergyReadingCsvFileSource {
    async fn stream(
        &self,
    ) -> std::pin::Pin<Box<dyn Stream<Item = Result<Envelope<EnergyReading>, PipelineError>> + Send>>
    {
        // This source uses a blocking CSV reader but is wrapped in a single
        // async task; the file is read exactly once, at startup.
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

                let reading = match record_to_energy_reading(&record, &headers) {
                    Ok(r) => r,
                    Err(e) => {
                        metrics::counter!("energy_reading_csv_parse_errors_total").increment(1);
                        Err(e)?
                    }
                };

                yield Envelope {
                    payload: reading,
                    received_at: SystemTime::now(),
                };
            }
        };

        Box::pin(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use std::io::Write as _;

    async fn collect_csv(contents: &str) -> Result<Vec<EnergyReading>, PipelineError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();

        let pipeline: Pipeline<_, EnergyReading> = Pipeline {
            source: EnergyReadingCsvFileSource::new(file.path()),
            transforms: vec![],
        };
        pipeline.collect().await
    }

    #[tokio::test]
    async fn parses_well_formed_rows() {
        let rows = collect_csv(
            "timestamp,floor,category,kwh\n\
             2025-03-01 08:00:00,1,AC,100\n\
             2025-03-01 09:00:00,2,Lighting,50\n",
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].floor, "1");
        assert_eq!(rows[0].category, "AC");
        assert_eq!(rows[0].kwh, 100.0);
        assert_eq!(rows[1].kwh, 50.0);
    }

    #[tokio::test]
    async fn malformed_kwh_degrades_to_zero() {
        let rows = collect_csv(
            "timestamp,floor,category,kwh\n\
             2025-03-01 08:00:00,1,AC,abc\n\
             2025-03-01 09:00:00,1,AC,\n",
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kwh, 0.0);
        assert_eq!(rows[1].kwh, 0.0);
    }

    #[tokio::test]
    async fn absent_floor_and_category_group_under_empty_key() {
        let rows = collect_csv(
            "timestamp,floor,category,kwh\n\
             2025-03-01 08:00:00,,,25\n",
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].floor, "");
        assert_eq!(rows[0].category, "");
        assert_eq!(rows[0].kwh, 25.0);
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let rows = collect_csv(
            "timestamp,floor,category,kwh\n\
             2025-03-01 08:00:00,1,AC,100\n\
             \n\
             2025-03-01 09:00:00,2,Lighting,50\n",
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn missing_timestamp_column_fails_the_whole_load() {
        let res = collect_csv(
            "floor,category,kwh\n\
             1,AC,100\n",
        )
        .await;

        assert!(matches!(res, Err(PipelineError::Source(_))));
    }

    #[tokio::test]
    async fn missing_file_is_a_source_error() {
        let pipeline: Pipeline<_, EnergyReading> = Pipeline {
            source: EnergyReadingCsvFileSource::new("/nonexistent/readings.csv"),
            transforms: vec![],
        };
        let res = pipeline.collect().await;
        assert!(matches!(res, Err(PipelineError::Source(_))));
    }
}
