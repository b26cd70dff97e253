// Mon Aug 03 2026 - Alex

pub mod logging;
pub mod string;

pub use string::{fixed_length, from_wide, to_wide, to_wide_null};
