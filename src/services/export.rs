//! Downloadable snapshots of the filtered audit log and driver lists.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::audit_log::AuditLog;
use crate::domain::driver::Driver;
use crate::domain::types::Choice;
use crate::services::{ServiceError, ServiceResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ServiceError::Form(format!(
                "Unsupported export format `{other}`"
            ))),
        }
    }
}

/// A rendered export ready to be sent as an attachment.
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Column order of the audit log CSV.
const AUDIT_LOG_HEADER: [&str; 9] = [
    "id",
    "occurred_at",
    "level",
    "category",
    "actor",
    "action",
    "resource",
    "ip_address",
    "details",
];

#[derive(Serialize)]
struct AuditLogRecord<'a> {
    id: i32,
    occurred_at: String,
    level: &'static str,
    category: &'static str,
    actor: &'a str,
    action: &'a str,
    resource: &'a str,
    ip_address: &'a str,
    details: &'a str,
}

impl<'a> From<&'a AuditLog> for AuditLogRecord<'a> {
    fn from(log: &'a AuditLog) -> Self {
        Self {
            id: log.id.get(),
            occurred_at: log.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            level: log.level.as_str(),
            category: log.category.as_str(),
            actor: &log.actor,
            action: &log.action,
            resource: &log.resource,
            ip_address: log.ip_address.as_deref().unwrap_or_default(),
            details: &log.details,
        }
    }
}

/// Column order of the driver CSV.
const DRIVER_HEADER: [&str; 8] = [
    "id",
    "full_name",
    "email",
    "phone",
    "license_number",
    "license_expiry",
    "status",
    "hired_on",
];

#[derive(Serialize)]
struct DriverRecord<'a> {
    id: i32,
    full_name: &'a str,
    email: &'a str,
    phone: &'a str,
    license_number: &'a str,
    license_expiry: String,
    status: &'static str,
    hired_on: String,
}

impl<'a> From<&'a Driver> for DriverRecord<'a> {
    fn from(driver: &'a Driver) -> Self {
        Self {
            id: driver.id.get(),
            full_name: &driver.full_name,
            email: &driver.email,
            phone: driver.phone.as_deref().unwrap_or_default(),
            license_number: &driver.license_number,
            license_expiry: driver.license_expiry.to_string(),
            status: driver.status.as_str(),
            hired_on: driver.hired_on.to_string(),
        }
    }
}

fn csv_failure(err: impl std::fmt::Display) -> ServiceError {
    ServiceError::Internal(format!("CSV export failed: {err}"))
}

/// Header row first, then one row per record. The header is written even
/// when there are no records.
fn write_csv<T: Serialize>(
    header: &[&str],
    records: impl IntoIterator<Item = T>,
) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(header).map_err(csv_failure)?;
    for record in records {
        writer.serialize(record).map_err(csv_failure)?;
    }
    writer.into_inner().map_err(csv_failure)
}

fn filename(stem: &str, day: NaiveDate, format: ExportFormat) -> String {
    format!("{stem}_{}.{}", day.format("%Y-%m-%d"), format.extension())
}

pub fn audit_logs(logs: &[AuditLog], format: ExportFormat, day: NaiveDate) -> ServiceResult<ExportFile> {
    let body = match format {
        ExportFormat::Csv => write_csv(&AUDIT_LOG_HEADER, logs.iter().map(AuditLogRecord::from))?,
        ExportFormat::Json => serde_json::to_vec_pretty(logs)
            .map_err(|e| ServiceError::Internal(format!("JSON export failed: {e}")))?,
    };

    Ok(ExportFile {
        filename: filename("audit_logs", day, format),
        content_type: format.content_type(),
        body,
    })
}

pub fn drivers_csv(drivers: &[Driver], day: NaiveDate) -> ServiceResult<ExportFile> {
    let format = ExportFormat::Csv;
    Ok(ExportFile {
        filename: filename("drivers", day, format),
        content_type: format.content_type(),
        body: write_csv(&DRIVER_HEADER, drivers.iter().map(DriverRecord::from))?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::types::{AuditCategory, AuditLevel, AuditLogId, DriverId, DriverStatus};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn driver(id: i32, name: &str, phone: Option<&str>) -> Driver {
        let at = NaiveDateTime::parse_from_str("2024-01-02 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Driver {
            id: DriverId::new(id).unwrap(),
            full_name: name.to_string(),
            email: format!("driver{id}@fleet.example"),
            phone: phone.map(str::to_string),
            license_number: format!("LIC-{id}"),
            license_expiry: NaiveDate::from_ymd_opt(2027, 5, 1).unwrap(),
            status: DriverStatus::Active,
            hired_on: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn driver_csv_has_header_and_fixed_columns() {
        let file = drivers_csv(&[driver(1, "Ann Lee", Some("+14155552671"))], day()).unwrap();
        let body = String::from_utf8(file.body).unwrap();

        assert_eq!(file.filename, "drivers_2025-03-14.csv");
        assert_eq!(file.content_type, "text/csv; charset=utf-8");
        assert_eq!(
            body,
            "id,full_name,email,phone,license_number,license_expiry,status,hired_on\n\
             1,Ann Lee,driver1@fleet.example,+14155552671,LIC-1,2027-05-01,active,2023-09-01\n"
        );
    }

    #[test]
    fn driver_csv_quotes_special_characters() {
        let file = drivers_csv(&[driver(2, "Doe, \"JJ\"\nJunior", None)], day()).unwrap();
        let body = String::from_utf8(file.body).unwrap();

        assert!(body.contains("2,\"Doe, \"\"JJ\"\"\nJunior\",driver2@fleet.example,,LIC-2"));
    }

    #[test]
    fn empty_export_still_has_a_header() {
        let file = drivers_csv(&[], day()).unwrap();
        assert_eq!(
            String::from_utf8(file.body).unwrap(),
            format!("{}\n", DRIVER_HEADER.join(","))
        );
    }

    #[test]
    fn audit_logs_export_as_pretty_json() {
        let log = AuditLog {
            id: AuditLogId::new(7).unwrap(),
            occurred_at: NaiveDateTime::parse_from_str("2025-03-01 10:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            actor: "admin".into(),
            action: "login".into(),
            resource: "session/1".into(),
            level: AuditLevel::Critical,
            category: AuditCategory::Auth,
            ip_address: None,
            details: "failed".into(),
        };

        let file = audit_logs(std::slice::from_ref(&log), ExportFormat::Json, day()).unwrap();
        assert_eq!(file.filename, "audit_logs_2025-03-14.json");
        assert_eq!(file.content_type, "application/json");
        let parsed: Vec<AuditLog> = serde_json::from_slice(&file.body).unwrap();
        assert_eq!(parsed, vec![log.clone()]);
        assert!(String::from_utf8(file.body).unwrap().contains("\n  {"));

        let csv = audit_logs(&[log], ExportFormat::Csv, day()).unwrap();
        let body = String::from_utf8(csv.body).unwrap();
        assert!(body.ends_with("7,2025-03-01 10:00:00,critical,auth,admin,login,session/1,,failed\n"));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
