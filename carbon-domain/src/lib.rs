pub mod domain;

pub use domain::{BaselineTarget, EnergyReading};
