// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and column conversions.
//!
//! Dates are stored as `YYYY-MM-DD` text. Timestamps are stored in UTC as
//! fixed-width RFC 3339 text with nanosecond precision, so that text order
//! matches chronological order.

use std::str::FromStr;

use daily_report_domain::{Employee, EmployeeCode, Report, Role};
use diesel::prelude::*;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::diesel_schema::{employees, reports};
use crate::error::PersistenceError;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
);

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub code: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub delete_flg: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl EmployeeRow {
    /// Converts a stored row into a domain employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the role or a timestamp column is malformed.
    pub fn into_employee(self) -> Result<Employee, PersistenceError> {
        let role: Role = Role::from_str(&self.role).map_err(PersistenceError::SerializationError)?;
        Ok(Employee {
            code: EmployeeCode::new(self.code),
            name: self.name,
            password_hash: self.password_hash,
            role,
            deleted: self.delete_flg != 0,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Diesel Queryable struct for report rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reports)]
pub struct ReportRow {
    pub id: i64,
    pub report_date: String,
    pub title: String,
    pub content: String,
    pub employee_code: String,
    pub delete_flg: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl ReportRow {
    /// Converts a stored row into a domain report.
    ///
    /// # Errors
    ///
    /// Returns an error if the date or a timestamp column is malformed.
    pub fn into_report(self) -> Result<Report, PersistenceError> {
        Ok(Report {
            id: Some(self.id),
            report_date: parse_date(&self.report_date)?,
            title: self.title,
            content: self.content,
            owner: EmployeeCode::new(self.employee_code),
            deleted: self.delete_flg != 0,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Converts a soft-delete flag to its column value.
pub fn delete_flag(deleted: bool) -> i32 {
    i32::from(deleted)
}

/// Formats a date for the `report_date` column.
///
/// # Errors
///
/// Returns an error if the date cannot be represented.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    Ok(date.format(DATE_FORMAT)?)
}

/// Parses a `report_date` column value.
///
/// # Errors
///
/// Returns an error if the value is not a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Ok(Date::parse(value, DATE_FORMAT)?)
}

/// Formats a timestamp for storage, converting it to UTC first.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(timestamp.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT)?)
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns an error if the value was not written by [`format_timestamp`].
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)?.assume_utc())
}
