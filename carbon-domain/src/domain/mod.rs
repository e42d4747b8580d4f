mod baseline_target;
mod energy_reading;

pub use baseline_target::BaselineTarget;
pub use energy_reading::EnergyReading;
