//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record shared by repository and service.
//! - Validate field-level invariants before any persistence happens.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another employee.
//! - `first_name`, `last_name` and `email` are never blank.
//! - `email` has exactly one `@` with non-empty local and domain parts.
//! - Email uniqueness is a cross-record rule owned by the service/storage,
//!   not by this type.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned surrogate identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

/// Field-level validation failures for [`Employee`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Required text field is empty or whitespace only.
    EmptyField(&'static str),
    /// Email is not shaped like `local@domain`.
    InvalidEmail(String),
    /// Assigned identifiers are always positive.
    NonPositiveId(EmployeeId),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::NonPositiveId(id) => write!(f, "employee id must be positive, got {id}"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// Canonical employee record.
///
/// Serialized with camelCase field names; `id` is omitted until storage
/// assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawEmployee")]
pub struct Employee {
    /// `None` until the first successful save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all employees.
    pub email: String,
}

impl Employee {
    /// Creates an unsaved employee and validates its fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, EmployeeValidationError> {
        let employee = Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        };
        employee.validate()?;
        Ok(employee)
    }

    /// Returns a copy carrying the given identifier.
    ///
    /// Used by update paths where identity already exists in storage.
    pub fn with_id(mut self, id: EmployeeId) -> Result<Self, EmployeeValidationError> {
        self.id = Some(id);
        self.validate()?;
        Ok(self)
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if let Some(id) = self.id {
            if id <= 0 {
                return Err(EmployeeValidationError::NonPositiveId(id));
            }
        }
        if self.first_name.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyField("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyField("last_name"));
        }
        if self.email.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyField("email"));
        }
        if !is_valid_email(&self.email) {
            return Err(EmployeeValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Returns whether storage has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEmployee {
    #[serde(default)]
    id: Option<EmployeeId>,
    first_name: String,
    last_name: String,
    email: String,
}

impl TryFrom<RawEmployee> for Employee {
    type Error = EmployeeValidationError;

    fn try_from(raw: RawEmployee) -> Result<Self, Self::Error> {
        let employee = Self {
            id: raw.id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
        };
        employee.validate()?;
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("travis@gmail.com"));
        assert!(is_valid_email("a@b"));
        assert!(!is_valid_email("travis"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("travis@"));
        assert!(!is_valid_email("a@b@c"));
        assert!(!is_valid_email("tra vis@gmail.com"));
    }
}
