// Mon Aug 03 2026 - Alex

use crate::buffer::{OutputBuffer, WrittenLength};
use crate::config::ProbeConfig;
use crate::module::{HeroExtractFn, ProbeModule};
use crate::output::{self, ProbeReport};
use crate::probe::ProbeError;
use crate::utils::logging::scoped_timer;
use crate::utils::string::to_wide_null;
use std::time::Instant;

/// The probe's lifecycle is strictly linear: no branching, no retries,
/// no concurrent phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePhase {
    Unloaded,
    Loaded,
    Resolved,
    Invoked,
    Reported,
}

impl ProbePhase {
    pub fn name(&self) -> &'static str {
        match self {
            ProbePhase::Unloaded => "unloaded",
            ProbePhase::Loaded => "loaded",
            ProbePhase::Resolved => "resolved",
            ProbePhase::Invoked => "invoked",
            ProbePhase::Reported => "reported",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProbePhase::Reported)
    }
}

/// Calls the extraction export with a NUL-terminated wide key and the
/// buffer's write pointer. The buffer stays mutably borrowed for the whole
/// call, so it cannot move or be freed while the callee writes into it.
pub fn invoke_extract(entry: HeroExtractFn, key: &str, buffer: &mut OutputBuffer) -> i64 {
    let wide_key = to_wide_null(key);
    unsafe { entry(wide_key.as_ptr(), buffer.as_mut_ptr()) }
}

pub struct ProbeRunner {
    config: ProbeConfig,
    phase: ProbePhase,
    module: Option<ProbeModule>,
    buffer: OutputBuffer,
    returned: Option<i64>,
    written: usize,
    started: Instant,
}

impl ProbeRunner {
    pub fn new(config: ProbeConfig) -> Self {
        let buffer = OutputBuffer::with_capacity(config.buffer_capacity);
        Self {
            config,
            phase: ProbePhase::Unloaded,
            module: None,
            buffer,
            returned: None,
            written: 0,
            started: Instant::now(),
        }
    }

    pub fn phase(&self) -> ProbePhase {
        self.phase
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    fn expect_phase(&self, expected: ProbePhase) -> Result<(), ProbeError> {
        if self.phase != expected {
            return Err(ProbeError::OutOfOrder {
                found: self.phase.name(),
                expected: expected.name(),
            });
        }
        Ok(())
    }

    fn enter(&mut self, phase: ProbePhase) {
        log::debug!("Probe phase: {} -> {}", self.phase.name(), phase.name());
        self.phase = phase;
    }

    pub fn load(&mut self) -> Result<(), ProbeError> {
        self.expect_phase(ProbePhase::Unloaded)?;
        self.started = Instant::now();
        let module = ProbeModule::load(&self.config.module_path)?;
        self.module = Some(module);
        self.enter(ProbePhase::Loaded);
        Ok(())
    }

    /// Resolves the export and invokes it once. Returns the callee's raw
    /// signed size; by the time this returns the size has been checked
    /// against the buffer capacity, so an overrun surfaces as an error
    /// instead of a success-looking count.
    pub fn extract(&mut self) -> Result<i64, ProbeError> {
        self.expect_phase(ProbePhase::Loaded)?;
        let entry: HeroExtractFn = {
            let module = self.module.as_ref().ok_or(ProbeError::OutOfOrder {
                found: "unloaded",
                expected: "loaded",
            })?;
            *module.extract_entry(&self.config.symbol_name)?
        };
        self.enter(ProbePhase::Resolved);
        log::debug!("Resolved export {}", self.config.symbol_name);

        let returned = {
            let _timer = scoped_timer("invoke");
            invoke_extract(entry, &self.config.asset_key, &mut self.buffer)
        };
        self.enter(ProbePhase::Invoked);

        match self.buffer.verify_written(returned)? {
            WrittenLength::Bytes(0) => {
                self.written = 0;
                log::warn!("Callee wrote no bytes for key {}", self.config.asset_key);
            }
            WrittenLength::Bytes(count) => {
                self.written = count;
                log::debug!("Callee wrote {} bytes", count);
            }
            WrittenLength::Failure(code) => {
                self.written = 0;
                log::warn!("Callee reported failure: {}", code);
            }
        }
        self.returned = Some(returned);
        Ok(returned)
    }

    /// Dumps the payload if requested, releases the module, and produces
    /// the final report.
    pub fn finish(&mut self) -> Result<ProbeReport, ProbeError> {
        self.expect_phase(ProbePhase::Invoked)?;
        let returned = self.returned.ok_or(ProbeError::OutOfOrder {
            found: "loaded",
            expected: "invoked",
        })?;

        if let Some(path) = self.config.payload_output.clone() {
            output::save_payload(self.buffer.written(self.written), &path)?;
            log::info!("Payload saved to {}", path.display());
        }

        if let Some(module) = self.module.take() {
            module.close()?;
        }

        let report = ProbeReport {
            module: self.config.module_path.clone(),
            symbol: self.config.symbol_name.clone(),
            key: self.config.asset_key.clone(),
            buffer_capacity: self.buffer.capacity(),
            returned,
            bytes_written: self.written,
            duration_secs: self.started.elapsed().as_secs_f64(),
        };
        self.enter(ProbePhase::Reported);
        Ok(report)
    }

    /// One-shot programmatic entry point: load, extract, finish.
    pub fn run(mut self) -> Result<ProbeReport, ProbeError> {
        self.load()?;
        self.extract()?;
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleError;
    use crate::utils::string::from_wide;
    use std::path::PathBuf;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    unsafe fn read_key(ptr: *const u16) -> String {
        let mut len = 0usize;
        while *ptr.add(len) != 0 {
            len += 1;
        }
        from_wide(std::slice::from_raw_parts(ptr, len))
    }

    unsafe extern "system" fn stub_extract(key: *const u16, buf: *mut u8) -> i64 {
        if read_key(key) != "2470" {
            return 0;
        }
        std::ptr::copy_nonoverlapping(PNG_MAGIC.as_ptr(), buf, PNG_MAGIC.len());
        PNG_MAGIC.len() as i64
    }

    unsafe extern "system" fn stub_failing(_key: *const u16, _buf: *mut u8) -> i64 {
        -1
    }

    unsafe extern "system" fn stub_full_asset(_key: *const u16, buf: *mut u8) -> i64 {
        for i in 0..12345usize {
            *buf.add(i) = (i % 251) as u8;
        }
        12345
    }

    #[test]
    fn test_invoke_extract_known_key() {
        let mut buffer = OutputBuffer::with_capacity(64);
        let returned = invoke_extract(stub_extract, "2470", &mut buffer);
        assert_eq!(returned, PNG_MAGIC.len() as i64);
        let length = buffer.verify_written(returned).unwrap();
        assert_eq!(buffer.written(length.byte_count()), PNG_MAGIC);
    }

    #[test]
    fn test_invoke_extract_unknown_key_returns_zero() {
        let mut buffer = OutputBuffer::with_capacity(64);
        assert_eq!(invoke_extract(stub_extract, "9999", &mut buffer), 0);
    }

    #[test]
    fn test_invoke_extract_failure_passes_through_raw() {
        let mut buffer = OutputBuffer::with_capacity(64);
        let returned = invoke_extract(stub_failing, "2470", &mut buffer);
        assert_eq!(returned, -1);
        assert!(buffer.verify_written(returned).unwrap().is_failure());
    }

    #[test]
    fn test_invoke_extract_reports_full_size() {
        let mut buffer = OutputBuffer::default();
        let returned = invoke_extract(stub_full_asset, "2470", &mut buffer);
        assert_eq!(returned, 12345);
        assert_eq!(
            buffer.verify_written(returned).unwrap(),
            WrittenLength::Bytes(12345)
        );
    }

    #[test]
    fn test_load_missing_module_stays_unloaded() {
        let config =
            ProbeConfig::new().with_module_path(PathBuf::from("no/such/UnityAssets.dll"));
        let mut runner = ProbeRunner::new(config);
        let err = runner.load().unwrap_err();
        assert!(matches!(
            err,
            ProbeError::Module(ModuleError::LoadFailed(_))
        ));
        assert_eq!(runner.phase(), ProbePhase::Unloaded);
    }

    #[test]
    fn test_run_missing_module_never_reaches_resolve() {
        let config = ProbeConfig::new().with_module_path(PathBuf::from("no/such/module.so"));
        let err = ProbeRunner::new(config).run().unwrap_err();
        assert!(matches!(err, ProbeError::Module(ModuleError::LoadFailed(_))));
    }

    #[test]
    fn test_extract_before_load_is_rejected() {
        let mut runner = ProbeRunner::new(ProbeConfig::default());
        assert!(matches!(
            runner.extract(),
            Err(ProbeError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_finish_before_invoke_is_rejected() {
        let mut runner = ProbeRunner::new(ProbeConfig::default());
        assert!(matches!(
            runner.finish(),
            Err(ProbeError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(ProbePhase::Unloaded.name(), "unloaded");
        assert_eq!(ProbePhase::Reported.name(), "reported");
        assert!(ProbePhase::Reported.is_terminal());
        assert!(!ProbePhase::Invoked.is_terminal());
    }
}
