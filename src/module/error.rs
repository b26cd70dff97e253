// Mon Aug 03 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Failed to load module: {0}")]
    LoadFailed(String),
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
    #[error("Failed to unload module: {0}")]
    UnloadFailed(String),
}
