pub mod baseline_target_csv_file;
pub mod energy_reading_csv_file;

pub use baseline_target_csv_file::BaselineTargetCsvFileSource;
pub use energy_reading_csv_file::EnergyReadingCsvFileSource;
