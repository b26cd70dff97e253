// Mon Aug 03 2026 - Alex

use crate::buffer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub module_path: PathBuf,
    pub symbol_name: String,
    pub asset_key: String,
    pub buffer_capacity: usize,
    pub payload_output: Option<PathBuf>,
    pub report_output: Option<PathBuf>,
    pub enable_verbose_output: bool,
    pub enable_spinner: bool,
    pub show_banner: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            module_path: PathBuf::from("UnityAssets.dll"),
            symbol_name: "GetPngFromHero".to_string(),
            asset_key: "2470".to_string(),
            buffer_capacity: buffer::DEFAULT_CAPACITY,
            payload_output: None,
            report_output: None,
            enable_verbose_output: false,
            enable_spinner: true,
            show_banner: true,
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module_path(mut self, path: PathBuf) -> Self {
        self.module_path = path;
        self
    }

    pub fn with_symbol_name(mut self, name: String) -> Self {
        self.symbol_name = name;
        self
    }

    pub fn with_asset_key(mut self, key: String) -> Self {
        self.asset_key = key;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_payload_output(mut self, path: PathBuf) -> Self {
        self.payload_output = Some(path);
        self
    }

    pub fn with_report_output(mut self, path: PathBuf) -> Self {
        self.report_output = Some(path);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.module_path.as_os_str().is_empty() {
            return Err("module_path must not be empty".to_string());
        }
        if self.symbol_name.is_empty() {
            return Err("symbol_name must not be empty".to_string());
        }
        if self.symbol_name.as_bytes().contains(&0) {
            return Err("symbol_name must not contain interior NUL bytes".to_string());
        }
        if self.asset_key.is_empty() {
            return Err("asset_key must not be empty".to_string());
        }
        if self.buffer_capacity == 0 {
            return Err("buffer_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_harness() {
        let config = ProbeConfig::default();
        assert_eq!(config.module_path, PathBuf::from("UnityAssets.dll"));
        assert_eq!(config.symbol_name, "GetPngFromHero");
        assert_eq!(config.asset_key, "2470");
        assert_eq!(config.buffer_capacity, 5 * 1024 * 1024);
        assert!(config.payload_output.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(ProbeConfig::new().with_symbol_name(String::new()).validate().is_err());
        assert!(ProbeConfig::new().with_asset_key(String::new()).validate().is_err());
        assert!(ProbeConfig::new().with_buffer_capacity(0).validate().is_err());
        assert!(ProbeConfig::new().with_module_path(PathBuf::new()).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_interior_nul() {
        let config = ProbeConfig::new().with_symbol_name("Get\0Png".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_chain() {
        let config = ProbeConfig::new()
            .with_module_path(PathBuf::from("Other.dll"))
            .with_asset_key("1234".to_string())
            .with_payload_output(PathBuf::from("hero.png"));
        assert_eq!(config.module_path, PathBuf::from("Other.dll"));
        assert_eq!(config.asset_key, "1234");
        assert_eq!(config.payload_output, Some(PathBuf::from("hero.png")));
        assert!(config.validate().is_ok());
    }
}
