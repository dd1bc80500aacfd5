//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own cross-record business rules (email uniqueness).

pub mod employee_service;
