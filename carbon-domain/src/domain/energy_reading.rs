use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description, Date};

const DAY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// One sub-meter sample.
///
/// `timestamp` keeps the raw cell text ("YYYY-MM-DD HH:MM:SS" or similar);
/// the dashboard only ever consumes it at day granularity via
/// [`EnergyReading::day`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub timestamp: String,
    pub floor: String,
    pub category: String,
    pub kwh: f64,
}

impl EnergyReading {
    /// Calendar date of the sample: the part of `timestamp` before the first
    /// space or `T`, parsed as `YYYY-MM-DD`.
    ///
    /// Returns `None` when no date can be extracted; such rows still count
    /// toward every non-daily total.
    pub fn day(&self) -> Option<Date> {
        let prefix = self
            .timestamp
            .split(|c: char| c == ' ' || c == 'T')
            .next()?
            .trim();
        Date::parse(prefix, DAY_FORMAT).ok()
    }
}
