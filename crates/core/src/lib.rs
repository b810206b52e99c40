//! Core business rules for SRAS.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All input contracts, the action pipeline and authorization live here.
//!
//! # Modules
//!
//! - `validation` - Reusable field validators and the `Contract` trait
//! - `action` - Action results and the validating action wrapper
//! - `auth` - Roles, permissions and guards
//! - `academic` - School year, grade level, curriculum and subject contracts
//! - `accounting` - Account, fee item and fee schedule contracts
//! - `students` - Student and enrollment contracts

pub mod academic;
pub mod accounting;
pub mod action;
pub mod auth;
pub mod students;
pub mod validation;
