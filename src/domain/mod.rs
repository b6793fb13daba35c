//! Domain records exposed by the fleet service layer.

pub mod audit_log;
pub mod driver;
pub mod lease;
pub mod maintenance;
pub mod types;
pub mod vehicle;
