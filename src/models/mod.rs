//! Database models backing the fleet repository.

pub mod audit_log;
#[cfg(feature = "server")]
pub mod config;
pub mod driver;
pub mod lease;
pub mod maintenance;
pub mod vehicle;
