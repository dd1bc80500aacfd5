//! Domain model for the employee roster.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every persisted employee is identified by a positive `EmployeeId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod employee;
