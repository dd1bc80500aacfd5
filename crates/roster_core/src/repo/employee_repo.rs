//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the persistence gateway for `employees` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Employee::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - A missing row on lookup is `None`, never an error.
//! - Email uniqueness violations surface as `RepoError::DuplicateEmail`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError};
use rusqlite::{named_params, params, Connection, ErrorCode, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email
FROM employees";

const REQUIRED_COLUMNS: [&str; 6] = [
    "id",
    "first_name",
    "last_name",
    "email",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Db(DbError),
    /// Update targeted an id with no stored row.
    NotFound(EmployeeId),
    /// Storage unique index on `email` rejected the write.
    DuplicateEmail(String),
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::DuplicateEmail(email) => {
                write!(f, "employee with email {email} already exists")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "employee repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "employee repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "employee repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence gateway for employee records.
#[cfg_attr(test, mockall::automock)]
pub trait EmployeeRepository {
    /// Inserts when `id` is unset, otherwise updates the row with that id.
    /// Returns the stored record with its id populated.
    fn save(&self, employee: &Employee) -> RepoResult<Employee>;
    /// Saves every element in one transaction; output order follows input.
    fn save_all(&self, employees: &[Employee]) -> RepoResult<Vec<Employee>>;
    /// Returns every record ordered by id.
    fn find_all(&self) -> RepoResult<Vec<Employee>>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>>;
    /// Exact match on both names; the lowest id wins when several match.
    fn find_by_names(&self, first_name: &str, last_name: &str) -> RepoResult<Option<Employee>>;
    /// Removes the row if present. Missing ids are not an error.
    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()>;
    /// Removes by the record's id. Unsaved records are ignored.
    fn delete(&self, employee: &Employee) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_employee_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn insert(&self, employee: &Employee) -> RepoResult<Employee> {
        self.conn
            .execute(
                "INSERT INTO employees (
                    first_name,
                    last_name,
                    email
                ) VALUES (?1, ?2, ?3);",
                params![
                    employee.first_name.as_str(),
                    employee.last_name.as_str(),
                    employee.email.as_str(),
                ],
            )
            .map_err(|err| map_write_error(err, &employee.email))?;

        Ok(Employee {
            id: Some(self.conn.last_insert_rowid()),
            ..employee.clone()
        })
    }

    fn update(&self, id: EmployeeId, employee: &Employee) -> RepoResult<Employee> {
        let changed = self
            .conn
            .execute(
                "UPDATE employees
                 SET
                    first_name = ?1,
                    last_name = ?2,
                    email = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?4;",
                params![
                    employee.first_name.as_str(),
                    employee.last_name.as_str(),
                    employee.email.as_str(),
                    id,
                ],
            )
            .map_err(|err| map_write_error(err, &employee.email))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(employee.clone())
    }

    fn find_one<P: Params>(&self, filter: &str, params: P) -> RepoResult<Option<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE {filter}
             ORDER BY id ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params)?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        employee.validate()?;

        match employee.id {
            Some(id) => self.update(id, employee),
            None => self.insert(employee),
        }
    }

    fn save_all(&self, employees: &[Employee]) -> RepoResult<Vec<Employee>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut saved = Vec::with_capacity(employees.len());
        for employee in employees {
            saved.push(self.save(employee)?);
        }
        tx.commit()?;

        Ok(saved)
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.find_one("id = ?1", [id])
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        self.find_one("email = ?1", [email])
    }

    fn find_by_names(&self, first_name: &str, last_name: &str) -> RepoResult<Option<Employee>> {
        self.find_one(
            "first_name = :first_name AND last_name = :last_name",
            named_params! {
                ":first_name": first_name,
                ":last_name": last_name,
            },
        )
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        self.conn.execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn delete(&self, employee: &Employee) -> RepoResult<()> {
        match employee.id {
            Some(id) => self.delete_by_id(id),
            None => Ok(()),
        }
    }
}

fn map_write_error(err: rusqlite::Error, email: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == ErrorCode::ConstraintViolation
            && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        {
            return RepoError::DuplicateEmail(email.to_string());
        }
    }
    err.into()
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;
    let employee = Employee {
        id: Some(id),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    };
    employee
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("employees row {id}: {err}")))?;
    Ok(employee)
}

fn ensure_employee_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "employees")? {
        return Err(RepoError::MissingRequiredTable("employees"));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "employees", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "employees",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
