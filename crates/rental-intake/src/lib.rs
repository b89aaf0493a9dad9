pub mod config;
pub mod error;
pub mod intake;
pub mod integrations;
pub mod telemetry;
