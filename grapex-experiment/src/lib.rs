pub mod config;
pub mod export;
pub mod runner;
pub mod schedule;

pub use config::{ConfigError, ExperimentConfig};
pub use runner::{RunnerError, SubmitOutcome, TrialRunner};
pub use schedule::generate_schedule;
