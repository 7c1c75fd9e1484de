//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, log) and shared utilities (open_db)
//! - `import` - Timesheet CSV import
//! - `insights` - Insight generation and rendering
//! - `records` - Work record / project / objective management
//! - `serve` - Web server command
//! - `status` - Database status command

pub mod core;
pub mod import;
pub mod insights;
pub mod records;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use core::*;
pub use import::*;
pub use insights::*;
pub use records::*;
pub use serve::*;
pub use status::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
