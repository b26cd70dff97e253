// Mon Aug 03 2026 - Alex

#![allow(dead_code)]
#![allow(unreachable_patterns)]

pub mod buffer;
pub mod config;
pub mod module;
pub mod output;
pub mod probe;
pub mod ui;
pub mod utils;

pub use buffer::{OutputBuffer, WrittenLength};
pub use config::ProbeConfig;
pub use module::{HeroExtractFn, ProbeModule};
pub use output::ProbeReport;
pub use probe::{ProbePhase, ProbeRunner};
