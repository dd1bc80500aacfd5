//! Employee use-case service.
//!
//! # Responsibility
//! - Provide create/list/get/update/delete entry points for core callers.
//! - Enforce email uniqueness on create.
//!
//! # Invariants
//! - Create never calls `save` once an existing email has been found.
//! - Absence on get is returned as `None`; the service never raises
//!   "not found" for reads.
//! - Update does not re-check uniqueness; the storage index reports
//!   collisions, which are surfaced as `Conflict` like on create.
//! - Log events carry ids and status only, never names or emails.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, EmployeeServiceError>;

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum EmployeeServiceError {
    /// Another employee already uses this email.
    Conflict { email: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict { email } => {
                write!(f, "employee with email {email} already exists")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Conflict { .. } => None,
        }
    }
}

impl From<RepoError> for EmployeeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateEmail(email) => Self::Conflict { email },
            other => Self::Repo(other),
        }
    }
}

/// Employee service facade over repository implementations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an employee unless its email is already taken.
    ///
    /// # Errors
    /// - `Conflict` when the email exists, checked before the write and
    ///   again by the storage unique index.
    pub fn save_employee(&self, employee: &Employee) -> ServiceResult<Employee> {
        if self.repo.find_by_email(&employee.email)?.is_some() {
            warn!("event=employee_create module=service status=conflict source=lookup");
            return Err(EmployeeServiceError::Conflict {
                email: employee.email.clone(),
            });
        }

        match self.repo.save(employee) {
            Ok(saved) => {
                info!(
                    "event=employee_create module=service status=ok id={}",
                    saved.id.unwrap_or_default()
                );
                Ok(saved)
            }
            Err(RepoError::DuplicateEmail(email)) => {
                warn!("event=employee_create module=service status=conflict source=storage");
                Err(EmployeeServiceError::Conflict { email })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Lists every employee.
    pub fn get_all_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.repo.find_all()?)
    }

    pub fn get_employee_by_id(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Replaces all fields of a stored employee.
    pub fn update_employee(&self, employee: &Employee) -> ServiceResult<Employee> {
        let updated = self.repo.save(employee)?;
        info!(
            "event=employee_update module=service status=ok id={}",
            updated.id.unwrap_or_default()
        );
        Ok(updated)
    }

    /// Deletes by id. Missing ids are a no-op.
    pub fn delete_employee(&self, id: EmployeeId) -> ServiceResult<()> {
        self.repo.delete_by_id(id)?;
        info!("event=employee_delete module=service status=ok id={id}");
        Ok(())
    }
}
