// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, Field, ValidationErrors};
use crate::password_policy::PasswordPolicy;
use crate::types::{NewEmployee, ReportDraft, ReportFields};

/// Maximum report title length, in characters.
pub const TITLE_MAX_LENGTH: usize = 100;

/// Maximum report content length, in characters.
pub const CONTENT_MAX_LENGTH: usize = 600;

/// Returns `true` if the value is empty or made only of whitespace.
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates report input for both creation and update.
///
/// Every rule is evaluated; all failures are returned together.
/// This function does NOT check date uniqueness (that requires storage).
///
/// # Arguments
///
/// * `draft` - The unvalidated report input
///
/// # Returns
///
/// * `Ok(ReportFields)` if every field is present and within limits
/// * `Err(ValidationErrors)` listing each failing field
///
/// # Errors
///
/// Returns an error if:
/// - The report date, title or content is missing
/// - The title or content is blank
/// - The title exceeds 100 characters
/// - The content exceeds 600 characters
pub fn validate_report_fields(draft: &ReportDraft) -> Result<ReportFields, ValidationErrors> {
    let mut errors: Vec<DomainError> = Vec::new();

    if draft.report_date.is_none() {
        errors.push(DomainError::BlankField(Field::ReportDate));
    }

    let title: &str = draft.title.as_deref().unwrap_or_default();
    if is_blank(title) {
        errors.push(DomainError::BlankField(Field::Title));
    }
    // Rule: length is checked even when the field was also reported blank
    let title_length: usize = title.chars().count();
    if title_length > TITLE_MAX_LENGTH {
        errors.push(DomainError::TitleTooLong {
            length: title_length,
            max: TITLE_MAX_LENGTH,
        });
    }

    let content: &str = draft.content.as_deref().unwrap_or_default();
    if is_blank(content) {
        errors.push(DomainError::BlankField(Field::Content));
    }
    let content_length: usize = content.chars().count();
    if content_length > CONTENT_MAX_LENGTH {
        errors.push(DomainError::ContentTooLong {
            length: content_length,
            max: CONTENT_MAX_LENGTH,
        });
    }

    if let Some(errors) = ValidationErrors::from_collected(errors) {
        return Err(errors);
    }

    let report_date = draft
        .report_date
        .ok_or_else(|| ValidationErrors::single(DomainError::BlankField(Field::ReportDate)))?;

    Ok(ReportFields {
        report_date,
        title: title.to_string(),
        content: content.to_string(),
    })
}

/// Validates a raw password against a policy.
///
/// # Arguments
///
/// * `policy` - The password policy to apply
/// * `password` - The raw password
///
/// # Errors
///
/// Returns an error if the password contains characters outside
/// `[A-Za-z0-9]` or its length is outside the policy range.
pub fn validate_password(policy: &PasswordPolicy, password: &str) -> Result<(), ValidationErrors> {
    ValidationErrors::from_collected(policy.violations(password)).map_or(Ok(()), Err)
}

/// Validates the fields of an employee registration, including the password.
///
/// Blank code and name are reported alongside any password violations.
///
/// # Arguments
///
/// * `registration` - The registration details
/// * `policy` - The password policy to apply
/// * `password` - The raw password
///
/// # Errors
///
/// Returns an error if:
/// - The code or name is blank
/// - The password violates the policy
pub fn validate_registration(
    registration: &NewEmployee,
    policy: &PasswordPolicy,
    password: &str,
) -> Result<(), ValidationErrors> {
    let mut errors: Vec<DomainError> = Vec::new();

    if is_blank(registration.code.value()) {
        errors.push(DomainError::BlankField(Field::Code));
    }
    if is_blank(&registration.name) {
        errors.push(DomainError::BlankField(Field::Name));
    }
    errors.extend(policy.violations(password));

    ValidationErrors::from_collected(errors).map_or(Ok(()), Err)
}

/// Validates the display name supplied with an employee update.
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn validate_employee_name(name: &str) -> Result<(), ValidationErrors> {
    if is_blank(name) {
        return Err(ValidationErrors::single(DomainError::BlankField(Field::Name)));
    }
    Ok(())
}
