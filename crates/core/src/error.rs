// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_report_domain::{DomainError, EmployeeCode, ErrorKind, ValidationErrors};
use thiserror::Error;

/// Failures reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A primary key or unique index rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    /// Any other backend failure.
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Failures reported by the credential-hashing service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Credential service failure: {0}")]
pub struct CredentialError(pub String);

/// Errors returned by the directory and ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// One or more input fields failed validation.
    #[error("Validation failed: {0}")]
    Rejected(ValidationErrors),
    /// A business rule was violated.
    #[error("Domain violation: {0}")]
    Domain(DomainError),
    /// The employee was deleted but some of their reports were not.
    #[error(
        "Employee '{code}' was deleted but {count} report(s) could not be removed: {first_error}",
        count = .failed_report_ids.len()
    )]
    CascadeIncomplete {
        /// The deleted employee.
        code: EmployeeCode,
        /// Reports still active after the cascade.
        failed_report_ids: Vec<i64>,
        /// The first failure encountered.
        first_error: Box<CoreError>,
    },
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
    /// The credential service failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl CoreError {
    /// Returns the rule outcome this error represents.
    ///
    /// Storage and credential faults have no kind.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rejected(errors) => Some(errors.kind()),
            Self::Domain(err) => Some(err.kind()),
            Self::CascadeIncomplete { first_error, .. } => first_error.kind(),
            Self::Storage(_) | Self::Credential(_) => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Rejected(errors)
    }
}

/// Errors that can occur while resolving an acting user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The code and password did not identify an active employee.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}
