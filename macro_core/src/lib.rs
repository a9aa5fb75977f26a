#![forbid(unsafe_code)]

//! Core domain model and calculation for macrocalc.
//!
//! This crate provides:
//! - Domain types (macros, percentages, calorie targets, results)
//! - The macro allocator
//! - Report rendering (table, JSON, CSV)
//! - Configuration file and logging setup

pub mod types;
pub mod error;
pub mod allocator;
pub mod report;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use allocator::allocate;
pub use report::{render_table, tdee_summary, write_report, OutputFormat};
pub use config::Config;
