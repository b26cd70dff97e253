// Wed Aug 05 2026 - Alex

use colored::*;

pub struct Banner {
    title: String,
    version: Option<String>,
    width: usize,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            version: None,
            width: 50,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Drawn on stderr; stdout carries only the probe's result lines.
    pub fn print(&self) {
        let rule = "=".repeat(self.width);
        eprintln!("{}", rule.cyan());
        eprintln!("{}", self.title.cyan().bold());
        if let Some(version) = &self.version {
            eprintln!("{}", format!("v{}", version).dimmed());
        }
        eprintln!("{}", rule.cyan());
    }
}
