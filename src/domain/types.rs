//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, enumerated statuses) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::ops::Deref;
use std::str::FromStr;

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Date range ends before it starts.
    #[error("invalid date range")]
    InvalidDateRange,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(VehicleId, "Unique identifier for a vehicle.");
id_newtype!(DriverId, "Unique identifier for a driver.");
id_newtype!(LeaseId, "Unique identifier for a lease or rental contract.");
id_newtype!(MaintenanceId, "Unique identifier for a maintenance record.");
id_newtype!(AuditLogId, "Unique identifier for an audit log entry.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    PlateNumber,
    "Vehicle registration plate enforcing non-empty values."
);
non_empty_string_newtype!(PersonName, "Driver or customer name enforcing non-empty values.");
non_empty_string_newtype!(LicenseNumber, "Driving license number.");
non_empty_string_newtype!(ContractNumber, "Lease or rental contract number.");

/// Free-text description sanitized of any markup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Description {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

/// Lower-cased and validated email address of a driver.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct DriverEmail(String);

impl DriverEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for DriverEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DriverEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DriverEmail> for String {
    fn from(value: DriverEmail) -> Self {
        value.0
    }
}

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Closed set of string-keyed values (statuses, categories, levels).
///
/// Parsing goes through [`FromStr`] so unknown keys are rejected at the
/// boundary instead of being cast into the enum.
pub trait Choice:
    Copy + Eq + Hash + Ord + FromStr<Err = TypeConstraintError> + Send + Sync + 'static
{
    /// Every variant in display order.
    fn all() -> &'static [Self];
    /// Stable key used in storage, query strings and JSON.
    fn as_str(&self) -> &'static str;
    /// Human readable label.
    fn label(&self) -> &'static str;
    /// Bootstrap badge color used by the templates.
    fn badge(&self) -> &'static str;
}

macro_rules! choice_enum {
    ($name:ident, $doc:expr, { $($variant:ident => ($key:literal, $label:literal, $badge:literal)),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn badge(&self) -> &'static str {
                match self {
                    $(Self::$variant => $badge),+
                }
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_lowercase().as_str() {
                    $($key => Ok(Self::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "unknown {} `{other}`",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, TypeConstraintError> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(VehicleStatus, "Operational state of a vehicle.", {
    Available => ("available", "Available", "success"),
    Leased => ("leased", "Leased", "primary"),
    Maintenance => ("maintenance", "In maintenance", "warning"),
    Retired => ("retired", "Retired", "secondary"),
});

choice_enum!(VehicleCategory, "Body type used to group the fleet.", {
    Sedan => ("sedan", "Sedan", "info"),
    Suv => ("suv", "SUV", "info"),
    Van => ("van", "Van", "info"),
    Truck => ("truck", "Truck", "info"),
    Electric => ("electric", "Electric", "success"),
});

choice_enum!(DriverStatus, "Whether a driver may be assigned to vehicles.", {
    Active => ("active", "Active", "success"),
    Inactive => ("inactive", "Inactive", "secondary"),
});

impl DriverStatus {
    /// Flips active to inactive and back.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

choice_enum!(ContractKind, "Long-term lease or short-term rental.", {
    Lease => ("lease", "Lease", "primary"),
    Rental => ("rental", "Rental", "info"),
});

choice_enum!(LeaseStatus, "Lifecycle state of a contract.", {
    Draft => ("draft", "Draft", "secondary"),
    Active => ("active", "Active", "success"),
    Completed => ("completed", "Completed", "dark"),
    Terminated => ("terminated", "Terminated", "danger"),
});

choice_enum!(ServiceType, "Kind of maintenance work.", {
    OilChange => ("oil_change", "Oil change", "info"),
    Tires => ("tires", "Tires", "info"),
    Brakes => ("brakes", "Brakes", "warning"),
    Inspection => ("inspection", "Inspection", "primary"),
    Repair => ("repair", "Repair", "danger"),
    Other => ("other", "Other", "secondary"),
});

choice_enum!(MaintenanceStatus, "Progress of a maintenance record.", {
    Scheduled => ("scheduled", "Scheduled", "primary"),
    InProgress => ("in_progress", "In progress", "warning"),
    Completed => ("completed", "Completed", "success"),
    Cancelled => ("cancelled", "Cancelled", "secondary"),
});

choice_enum!(AuditLevel, "Severity of an audit log entry.", {
    Info => ("info", "Info", "info"),
    Warning => ("warning", "Warning", "warning"),
    Error => ("error", "Error", "danger"),
    Critical => ("critical", "Critical", "dark"),
});

choice_enum!(AuditCategory, "Area of the system an audit entry belongs to.", {
    Auth => ("auth", "Authentication", "secondary"),
    Vehicle => ("vehicle", "Vehicles", "primary"),
    Driver => ("driver", "Drivers", "primary"),
    Lease => ("lease", "Contracts", "primary"),
    Maintenance => ("maintenance", "Maintenance", "primary"),
    System => ("system", "System", "dark"),
});

/// Category type for records that cannot be filtered by category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Uncategorized {}

impl Choice for Uncategorized {
    fn all() -> &'static [Self] {
        &[]
    }

    fn as_str(&self) -> &'static str {
        match *self {}
    }

    fn label(&self) -> &'static str {
        match *self {}
    }

    fn badge(&self) -> &'static str {
        match *self {}
    }
}

impl FromStr for Uncategorized {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Err(TypeConstraintError::InvalidValue(format!(
            "category filter is not supported (`{value}`)"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert!(VehicleId::new(1).is_ok());
        assert_eq!(VehicleId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(DriverId::new(-5), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn choices_parse_known_keys_only() {
        assert_eq!("critical".parse::<AuditLevel>(), Ok(AuditLevel::Critical));
        assert_eq!(" In_Progress ".parse::<MaintenanceStatus>(), Ok(MaintenanceStatus::InProgress));
        assert!(matches!(
            "crashed".parse::<VehicleStatus>(),
            Err(TypeConstraintError::InvalidValue(_))
        ));
        assert!("anything".parse::<Uncategorized>().is_err());
    }

    #[test]
    fn audit_level_converts_from_owned_strings() {
        assert_eq!(AuditLevel::try_from("error".to_string()), Ok(AuditLevel::Error));
        assert!(AuditLevel::try_from("fatal".to_string()).is_err());
    }

    #[test]
    fn choices_round_trip_through_json() {
        let json = serde_json::to_string(&ServiceType::OilChange).unwrap();
        assert_eq!(json, "\"oil_change\"");
        let parsed: ServiceType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ServiceType::OilChange);
        assert!(serde_json::from_str::<ServiceType>("\"car_wash\"").is_err());
    }

    #[test]
    fn every_choice_has_label_and_badge() {
        for level in AuditLevel::all() {
            assert!(!level.label().is_empty());
            assert!(!level.badge().is_empty());
        }
        assert_eq!(VehicleStatus::all().len(), 4);
    }

    #[test]
    fn driver_status_toggles() {
        assert_eq!(DriverStatus::Active.toggled(), DriverStatus::Inactive);
        assert_eq!(DriverStatus::Inactive.toggled(), DriverStatus::Active);
    }

    #[test]
    fn email_is_normalized() {
        let email = DriverEmail::new("  Jane.Doe@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "jane.doe@example.com");
        assert!(DriverEmail::new("not-an-email").is_err());
    }

    #[test]
    fn description_is_sanitized() {
        let text = Description::new("<script>x</script>Brake pads").unwrap();
        assert_eq!(text.as_str(), "Brake pads");
        assert!(Description::new("<script>x</script>").is_err());
    }
}
