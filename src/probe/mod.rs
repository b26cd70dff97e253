// Mon Aug 03 2026 - Alex

pub mod error;
pub mod runner;

pub use error::ProbeError;
pub use runner::{invoke_extract, ProbePhase, ProbeRunner};

use crate::config::ProbeConfig;

pub fn create_probe(config: ProbeConfig) -> ProbeRunner {
    ProbeRunner::new(config)
}
