pub mod awards;
pub mod config;
pub mod error;
pub mod imports;
pub mod telemetry;
