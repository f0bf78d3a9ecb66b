// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Represents the role of an employee account.
///
/// Roles decide visibility and management rights:
/// - `Admin` sees and manages every report and employee account
/// - `General` sees and manages only their own reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full visibility and management.
    Admin,
    /// Restricted to own records.
    #[default]
    General,
}

impl Role {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::General => "GENERAL",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "GENERAL" => Ok(Self::General),
            _ => Err(format!("Invalid role: {s}. Must be 'ADMIN' or 'GENERAL'")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents an employee code, the primary key of an employee account.
///
/// Codes are compared exactly; no case folding or trimming is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeCode(String);

impl EmployeeCode {
    /// Creates a new employee code.
    ///
    /// # Arguments
    ///
    /// * `value` - The code value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An employee account.
///
/// `password_hash` always holds the output of the credential service, never
/// the raw password. The `Debug` implementation redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Employee {
    /// Unique, immutable employee code.
    pub code: EmployeeCode,
    /// Display name.
    pub name: String,
    /// Hashed credential.
    pub password_hash: String,
    /// Account role.
    pub role: Role,
    /// Soft-delete flag.
    pub deleted: bool,
    /// When the account was registered.
    pub created_at: OffsetDateTime,
    /// When the account was last modified.
    pub updated_at: OffsetDateTime,
}

impl Employee {
    /// Creates a new, active employee record.
    ///
    /// # Arguments
    ///
    /// * `registration` - The registration details
    /// * `password_hash` - The already-hashed credential
    /// * `now` - The registration timestamp
    #[must_use]
    pub fn new(registration: NewEmployee, password_hash: String, now: OffsetDateTime) -> Self {
        Self {
            code: registration.code,
            name: registration.name,
            password_hash,
            role: registration.role,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks this employee as deleted.
    pub fn mark_deleted(&mut self, now: OffsetDateTime) {
        self.deleted = true;
        self.updated_at = now;
    }
}

impl std::fmt::Debug for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Employee")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("deleted", &self.deleted)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Registration details for a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// The code to register.
    pub code: EmployeeCode,
    /// The display name.
    pub name: String,
    /// The account role.
    pub role: Role,
}

/// Changes applied to an existing employee.
///
/// Name and role are always applied. The password is only re-hashed when
/// `password` is `Some` and non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct EmployeePatch {
    /// The new display name.
    pub name: String,
    /// The new role.
    pub role: Role,
    /// An optional replacement password, in plain text.
    pub password: Option<String>,
}

impl EmployeePatch {
    /// Returns the replacement password if one was actually supplied.
    #[must_use]
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|password| !password.is_empty())
    }
}

impl std::fmt::Debug for EmployeePatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeePatch")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Unvalidated report input, as submitted by a caller.
///
/// Any field may be missing; validation reports every missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    /// The day the report covers.
    pub report_date: Option<Date>,
    /// The report title.
    pub title: Option<String>,
    /// The report body.
    pub content: Option<String>,
}

impl ReportDraft {
    /// Creates a draft with every field present.
    #[must_use]
    pub fn new(report_date: Date, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            report_date: Some(report_date),
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }
}

/// Report fields that have passed validation.
///
/// Only constructed by `validate_report_fields`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFields {
    pub(crate) report_date: Date,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl ReportFields {
    /// Returns the validated report date.
    #[must_use]
    pub const fn report_date(&self) -> Date {
        self.report_date
    }

    /// Returns the validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the validated content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A daily work report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The storage-assigned identifier.
    /// `None` indicates the report has not been persisted yet.
    pub id: Option<i64>,
    /// The day the report covers.
    pub report_date: Date,
    /// The report title.
    pub title: String,
    /// The report body.
    pub content: String,
    /// The employee who created the report. Never changes.
    pub owner: EmployeeCode,
    /// Soft-delete flag.
    pub deleted: bool,
    /// When the report was created.
    pub created_at: OffsetDateTime,
    /// When the report was last modified.
    pub updated_at: OffsetDateTime,
}

impl Report {
    /// Creates a new, unpersisted report owned by `owner`.
    ///
    /// # Arguments
    ///
    /// * `owner` - The creating employee
    /// * `fields` - Validated report fields
    /// * `now` - The creation timestamp
    #[must_use]
    pub fn new(owner: EmployeeCode, fields: ReportFields, now: OffsetDateTime) -> Self {
        Self {
            id: None,
            report_date: fields.report_date,
            title: fields.title,
            content: fields.content,
            owner,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the date, title and content. The owner is left untouched.
    pub fn apply_fields(&mut self, fields: ReportFields, now: OffsetDateTime) {
        self.report_date = fields.report_date;
        self.title = fields.title;
        self.content = fields.content;
        self.updated_at = now;
    }

    /// Marks this report as deleted.
    pub fn mark_deleted(&mut self, now: OffsetDateTime) {
        self.deleted = true;
        self.updated_at = now;
    }

    /// Returns `true` if `code` owns this report.
    #[must_use]
    pub fn is_owned_by(&self, code: &EmployeeCode) -> bool {
        &self.owner == code
    }
}
