//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Employee::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateEmail`) in
//!   addition to DB transport errors.

pub mod employee_repo;
