// Wed Aug 05 2026 - Alex

pub mod report;

pub use report::{save_json_report, save_payload, ProbeReport};
