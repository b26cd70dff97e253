// Mon Aug 03 2026 - Alex

use crate::buffer::BufferError;
use crate::module::ModuleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Module error: {0}")]
    Module(#[from] ModuleError),
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Probe is in phase {found}, expected {expected}")]
    OutOfOrder {
        found: &'static str,
        expected: &'static str,
    },
}
