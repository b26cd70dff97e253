// Mon Aug 03 2026 - Alex

pub mod error;
pub mod loader;

pub use error::ModuleError;
pub use loader::{HeroExtractFn, ProbeModule};

use std::path::Path;

pub fn load_module<P: AsRef<Path>>(path: P) -> Result<ProbeModule, ModuleError> {
    ProbeModule::load(path)
}
