// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON shapes printed by the command-line tool.

use daily_report::{CoreError, ReportDetail};
use daily_report_domain::{DomainError, Employee, ErrorKind, Field, Report, Role};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::CliError;

/// An employee as printed. The password hash is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeOutput {
    pub code: String,
    pub name: String,
    pub role: Role,
    pub deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl EmployeeOutput {
    pub fn from_employee(employee: &Employee) -> Result<Self, CliError> {
        Ok(Self {
            code: employee.code.value().to_string(),
            name: employee.name.clone(),
            role: employee.role,
            deleted: employee.deleted,
            created_at: format_timestamp(employee.created_at)?,
            updated_at: format_timestamp(employee.updated_at)?,
        })
    }
}

/// A report as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutput {
    pub id: Option<i64>,
    pub report_date: String,
    pub title: String,
    pub content: String,
    pub owner_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ReportOutput {
    pub fn from_report(report: &Report) -> Result<Self, CliError> {
        Ok(Self {
            id: report.id,
            report_date: report.report_date.to_string(),
            title: report.title.clone(),
            content: report.content.clone(),
            owner_code: report.owner.value().to_string(),
            owner_name: None,
            created_at: format_timestamp(report.created_at)?,
            updated_at: format_timestamp(report.updated_at)?,
        })
    }

    pub fn from_detail(detail: &ReportDetail) -> Result<Self, CliError> {
        let mut output: Self = Self::from_report(&detail.report)?;
        output.owner_name = Some(detail.owner_name.clone());
        Ok(output)
    }
}

/// One rejected field, or a form-level rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationOutput {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
    pub message: String,
}

impl ViolationOutput {
    fn from_domain(err: &DomainError) -> Self {
        Self {
            kind: err.kind(),
            field: err.field(),
            message: err.to_string(),
        }
    }
}

/// A failed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorOutput {
    /// The rule outcome, absent for infrastructure failures.
    pub kind: Option<ErrorKind>,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ViolationOutput>,
}

impl ErrorOutput {
    pub fn from_error(err: &CliError) -> Self {
        let violations: Vec<ViolationOutput> = match err {
            CliError::Core(CoreError::Rejected(errors)) => errors
                .errors()
                .iter()
                .map(ViolationOutput::from_domain)
                .collect(),
            CliError::Core(CoreError::Domain(domain)) => vec![ViolationOutput::from_domain(domain)],
            _ => Vec::new(),
        };
        Self {
            kind: err.kind(),
            message: err.to_string(),
            violations,
        }
    }
}

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, CliError> {
    Ok(timestamp.format(&Rfc3339)?)
}
