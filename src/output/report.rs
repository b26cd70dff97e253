// Wed Aug 05 2026 - Alex

use crate::utils::string::fixed_length;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything the probe learned from one invocation. `returned` is the
/// callee's raw signed size; `bytes_written` is the verified count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub module: PathBuf,
    pub symbol: String,
    pub key: String,
    pub buffer_capacity: usize,
    pub returned: i64,
    pub bytes_written: usize,
    pub duration_secs: f64,
}

impl ProbeReport {
    pub fn succeeded(&self) -> bool {
        self.returned > 0
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("{} {}", fixed_length("Module:", 10), self.module.display()),
            format!("{} {}", fixed_length("Symbol:", 10), self.symbol),
            format!("{} {}", fixed_length("Key:", 10), self.key),
            format!("{} {}", fixed_length("Capacity:", 10), self.buffer_capacity),
            format!("{} {}", fixed_length("Returned:", 10), self.returned),
            format!("{} {}", fixed_length("Written:", 10), self.bytes_written),
            format!("{} {:.2}s", fixed_length("Elapsed:", 10), self.duration_secs),
        ]
    }

    pub fn to_json(&self) -> Result<String, std::io::Error> {
        serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

pub fn save_json_report(report: &ProbeReport, path: &Path) -> Result<(), std::io::Error> {
    let json_string = report.to_json()?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

pub fn save_payload(bytes: &[u8], path: &Path) -> Result<(), std::io::Error> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}
