use carbon_domain::domain::EnergyReading;

use crate::pipeline::{Envelope, PipelineError, Transform};

/// Pure sanitation of an `EnergyReading` row.
///
/// Rules:
/// - kWh must be non-negative; a negative value is a meter glitch and is
///   clamped to zero rather than dropping the row, so the row still counts
///   toward every grouping with a zero contribution.
pub fn sanitize_energy_reading(mut env: Envelope<EnergyReading>) -> Envelope<EnergyReading> {
    if env.payload.kwh < 0.0 {
        env.payload.kwh = 0.0;
    }
    env
}

#[derive(Clone, Default)]
pub struct ReadingSanitize;

#[async_trait::async_trait]
impl Transform<EnergyReading, EnergyReading> for ReadingSanitize {
    async fn apply(
        &self,
        input: Envelope<EnergyReading>,
    ) -> Result<Envelope<EnergyReading>, PipelineError> {
        if input.payload.kwh < 0.0 {
            metrics::counter!("energy_reading_negative_kwh_clamped_total").increment(1);
        }
        Ok(sanitize_energy_reading(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(kwh: f64) -> Envelope<EnergyReading> {
        Envelope {
            payload: EnergyReading {
                timestamp: "2025-03-01 08:00:00".to_string(),
                floor: "1".to_string(),
                category: "AC".to_string(),
                kwh,
            },
            received_at: std::time::SystemTime::now(),
        }
    }

    #[test]
    fn sanitize_keeps_valid_reading_unchanged() {
        let env = sanitize_energy_reading(envelope(12.5));
        assert_eq!(env.payload.kwh, 12.5);
    }

    #[test]
    fn sanitize_clamps_negative_kwh_to_zero() {
        let env = sanitize_energy_reading(envelope(-3.0));
        assert_eq!(env.payload.kwh, 0.0);
    }

    #[test]
    fn sanitize_keeps_zero_as_is() {
        let env = sanitize_energy_reading(envelope(0.0));
        assert_eq!(env.payload.kwh, 0.0);
    }
}
