// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod password_policy;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::{DomainError, ErrorKind, Field, ValidationErrors};
pub use password_policy::PasswordPolicy;
pub use types::{
    Employee, EmployeeCode, EmployeePatch, NewEmployee, Report, ReportDraft, ReportFields, Role,
};
pub use validation::{
    CONTENT_MAX_LENGTH, TITLE_MAX_LENGTH, validate_employee_name, validate_password,
    validate_registration, validate_report_fields,
};
