//! API handlers
//!
//! Handlers are organized by domain:
//! - `insights` - Insight generation
//! - `objectives` - Objective CRUD
//! - `projects` - Project CRUD
//! - `status` - Health and record counts
//! - `work_records` - Work record CRUD

pub mod insights;
pub mod objectives;
pub mod projects;
pub mod status;
pub mod work_records;

pub use insights::*;
pub use objectives::*;
pub use projects::*;
pub use status::*;
pub use work_records::*;
