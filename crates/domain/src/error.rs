// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::types::EmployeeCode;

/// The closed set of rule outcomes a caller can branch on.
///
/// Every domain rejection maps to exactly one kind. Presentation layers
/// translate kinds into field-specific or form-level messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A required field is missing, empty, or whitespace-only.
    #[serde(rename = "BLANK_ERROR")]
    Blank,
    /// Password contains a character outside `[A-Za-z0-9]`.
    #[serde(rename = "HALFSIZE_ERROR")]
    HalfSize,
    /// Password length is outside `[8, 16]`.
    #[serde(rename = "RANGECHECK_ERROR")]
    RangeCheck,
    /// Report title is longer than allowed.
    #[serde(rename = "TITLE_LENGTH_ERROR")]
    TitleLength,
    /// Report content is longer than allowed.
    #[serde(rename = "CONTENT_LENGTH_ERROR")]
    ContentLength,
    /// A unique key already exists.
    #[serde(rename = "DUPLICATE_ERROR")]
    Duplicate,
    /// The owner already has an active report on that date.
    #[serde(rename = "DATECHECK_ERROR")]
    DateCheck,
    /// The acting user tried to delete their own account.
    #[serde(rename = "LOGINCHECK_ERROR")]
    LoginCheck,
    /// The referenced entity is absent or soft-deleted.
    #[serde(rename = "NOT_FOUND_ERROR")]
    NotFound,
    /// The acting user may not perform the action.
    #[serde(rename = "ACCESS_DENIED_ERROR")]
    AccessDenied,
}

impl ErrorKind {
    /// Returns the stable wire name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blank => "BLANK_ERROR",
            Self::HalfSize => "HALFSIZE_ERROR",
            Self::RangeCheck => "RANGECHECK_ERROR",
            Self::TitleLength => "TITLE_LENGTH_ERROR",
            Self::ContentLength => "CONTENT_LENGTH_ERROR",
            Self::Duplicate => "DUPLICATE_ERROR",
            Self::DateCheck => "DATECHECK_ERROR",
            Self::LoginCheck => "LOGINCHECK_ERROR",
            Self::NotFound => "NOT_FOUND_ERROR",
            Self::AccessDenied => "ACCESS_DENIED_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input fields that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Code,
    Name,
    Password,
    ReportDate,
    Title,
    Content,
}

impl Field {
    /// Returns the input name of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Name => "name",
            Self::Password => "password",
            Self::ReportDate => "report_date",
            Self::Title => "title",
            Self::Content => "content",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during domain validation and rule checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or blank.
    BlankField(Field),
    /// Report title exceeds the maximum length.
    TitleTooLong {
        /// Length of the rejected title, in characters.
        length: usize,
        /// The maximum permitted length.
        max: usize,
    },
    /// Report content exceeds the maximum length.
    ContentTooLong {
        /// Length of the rejected content, in characters.
        length: usize,
        /// The maximum permitted length.
        max: usize,
    },
    /// Password contains characters outside the half-width alphanumeric set.
    PasswordNotHalfWidthAlphanumeric,
    /// Password length is outside the permitted range.
    PasswordLengthOutOfRange {
        /// Length of the rejected password, in characters.
        length: usize,
        /// The minimum permitted length.
        min: usize,
        /// The maximum permitted length.
        max: usize,
    },
    /// An employee with this code already exists, active or deleted.
    DuplicateEmployeeCode(EmployeeCode),
    /// Storage rejected a report because the owner already has one on that date.
    DuplicateReport {
        /// The owning employee.
        owner: EmployeeCode,
        /// The conflicting date.
        report_date: Date,
    },
    /// The owner already has an active report on that date.
    ReportDateTaken {
        /// The owning employee.
        owner: EmployeeCode,
        /// The conflicting date.
        report_date: Date,
    },
    /// The acting user attempted to delete their own account.
    SelfDeletion(EmployeeCode),
    /// No active employee with this code exists.
    EmployeeNotFound(EmployeeCode),
    /// No active report with this id exists.
    ReportNotFound(i64),
    /// The acting user is not permitted to perform the action.
    AccessDenied {
        /// The action that was attempted.
        action: &'static str,
        /// The acting employee.
        actor: EmployeeCode,
    },
}

impl DomainError {
    /// Classifies this error into the shared taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BlankField(_) => ErrorKind::Blank,
            Self::TitleTooLong { .. } => ErrorKind::TitleLength,
            Self::ContentTooLong { .. } => ErrorKind::ContentLength,
            Self::PasswordNotHalfWidthAlphanumeric => ErrorKind::HalfSize,
            Self::PasswordLengthOutOfRange { .. } => ErrorKind::RangeCheck,
            Self::DuplicateEmployeeCode(_) | Self::DuplicateReport { .. } => ErrorKind::Duplicate,
            Self::ReportDateTaken { .. } => ErrorKind::DateCheck,
            Self::SelfDeletion(_) => ErrorKind::LoginCheck,
            Self::EmployeeNotFound(_) | Self::ReportNotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied { .. } => ErrorKind::AccessDenied,
        }
    }

    /// Returns the input field this error is attached to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::BlankField(field) => Some(*field),
            Self::TitleTooLong { .. } => Some(Field::Title),
            Self::ContentTooLong { .. } => Some(Field::Content),
            Self::PasswordNotHalfWidthAlphanumeric | Self::PasswordLengthOutOfRange { .. } => {
                Some(Field::Password)
            }
            Self::DuplicateEmployeeCode(_) => Some(Field::Code),
            Self::DuplicateReport { .. } | Self::ReportDateTaken { .. } => Some(Field::ReportDate),
            Self::SelfDeletion(_)
            | Self::EmployeeNotFound(_)
            | Self::ReportNotFound(_)
            | Self::AccessDenied { .. } => None,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "Field '{field}' must not be blank"),
            Self::TitleTooLong { length, max } => {
                write!(f, "Title is {length} characters long; at most {max} allowed")
            }
            Self::ContentTooLong { length, max } => {
                write!(
                    f,
                    "Content is {length} characters long; at most {max} allowed"
                )
            }
            Self::PasswordNotHalfWidthAlphanumeric => {
                write!(f, "Password may only contain the characters A-Z, a-z and 0-9")
            }
            Self::PasswordLengthOutOfRange { length, min, max } => {
                write!(
                    f,
                    "Password is {length} characters long; it must be between {min} and {max}"
                )
            }
            Self::DuplicateEmployeeCode(code) => {
                write!(f, "Employee code '{code}' is already in use")
            }
            Self::DuplicateReport { owner, report_date } => {
                write!(
                    f,
                    "A report for employee '{owner}' on {report_date} already exists"
                )
            }
            Self::ReportDateTaken { owner, report_date } => {
                write!(
                    f,
                    "Employee '{owner}' already has a report dated {report_date}"
                )
            }
            Self::SelfDeletion(code) => {
                write!(f, "Employee '{code}' cannot delete their own account")
            }
            Self::EmployeeNotFound(code) => write!(f, "Employee '{code}' not found"),
            Self::ReportNotFound(id) => write!(f, "Report {id} not found"),
            Self::AccessDenied { action, actor } => {
                write!(f, "Employee '{actor}' is not permitted to {action}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Field-level errors collected from a single validation pass.
///
/// Never empty: validation returns `Ok` instead of an empty collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<DomainError>,
}

impl ValidationErrors {
    /// Converts a list of collected errors, returning `None` when nothing failed.
    #[must_use]
    pub fn from_collected(errors: Vec<DomainError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Wraps a single error.
    #[must_use]
    pub fn single(error: DomainError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Returns the collected errors in the order they were detected.
    #[must_use]
    pub fn errors(&self) -> &[DomainError] {
        &self.errors
    }

    /// Returns the kind of the first detected error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        // from_collected never builds an empty collection
        self.errors
            .first()
            .map_or(ErrorKind::Blank, DomainError::kind)
    }

    /// Returns the kinds of all collected errors, in detection order.
    #[must_use]
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.errors.iter().map(DomainError::kind).collect()
    }

    /// Returns `true` if any collected error has the given kind.
    #[must_use]
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|err| err.kind() == kind)
    }

    /// Returns the errors attached to a particular field.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &DomainError> {
        self.errors
            .iter()
            .filter(move |err| err.field() == Some(field))
    }

    /// Appends the errors of another validation pass.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
