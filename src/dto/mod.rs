//! DTO modules that bridge services with templates and APIs.

pub mod api;
pub mod audit_logs;
pub mod drivers;
pub mod leases;
pub mod list;
pub mod main;
pub mod maintenance;
pub mod vehicles;
