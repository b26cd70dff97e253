// Mon Aug 03 2026 - Alex

use crate::module::ModuleError;
use libloading::{Library, Symbol};
use std::path::{Path, PathBuf};

/// Signature of the extraction export. The exporting side declares
/// `long GetPngFromHero(LPWStr id, IntPtr buf)` with stdcall linkage, so
/// the key is a NUL-terminated UTF-16 string and the return is a signed
/// 64-bit byte count.
pub type HeroExtractFn = unsafe extern "system" fn(*const u16, *mut u8) -> i64;

/// Owns a loaded dynamic module. Resolved symbols borrow from it, so the
/// borrow checker keeps them from outliving the handle; the handle itself
/// is released on drop rather than leaked to process teardown.
#[derive(Debug)]
pub struct ProbeModule {
    library: Library,
    path: PathBuf,
}

impl ProbeModule {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModuleError> {
        let path_buf = path.as_ref().to_path_buf();
        let library = unsafe { Library::new(path.as_ref()) }
            .map_err(|e| ModuleError::LoadFailed(format!("{}: {}", path_buf.display(), e)))?;
        log::debug!("Loaded module {}", path_buf.display());
        Ok(Self {
            library,
            path: path_buf,
        })
    }

    /// Name-only lookup; the caller asserts the calling signature through
    /// the type parameter. The lookup itself is checked: a missing export
    /// surfaces here instead of at the call site.
    pub fn entry<T>(&self, name: &str) -> Result<Symbol<'_, T>, ModuleError> {
        unsafe { self.library.get::<T>(name.as_bytes()) }
            .map_err(|e| ModuleError::SymbolNotFound(format!("{}: {}", name, e)))
    }

    pub fn extract_entry(&self, name: &str) -> Result<Symbol<'_, HeroExtractFn>, ModuleError> {
        self.entry::<HeroExtractFn>(name)
    }

    pub fn close(self) -> Result<(), ModuleError> {
        let path = self.path;
        self.library
            .close()
            .map_err(|e| ModuleError::UnloadFailed(format!("{}: {}", path.display(), e)))?;
        log::debug!("Unloaded module {}", path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
