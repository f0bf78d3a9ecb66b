// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_report_domain::{EmployeeCode, Report};
use diesel::SqliteConnection;
use diesel::dsl::exists;
use diesel::prelude::*;
use time::Date;
use tracing::debug;

use crate::data_models::{ReportRow, format_date};
use crate::diesel_schema::reports;
use crate::error::PersistenceError;

/// Retrieves a report by id, including soft-deleted rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no report has this id.
pub fn find_report(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Report>, PersistenceError> {
    debug!("Looking up report by ID: {}", id);

    let row: Option<ReportRow> = reports::table
        .filter(reports::id.eq(id))
        .select(ReportRow::as_select())
        .first(conn)
        .optional()?;

    row.map(ReportRow::into_report).transpose()
}

/// Retrieves the active report of an employee on a date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_active_report_by_owner_and_date(
    conn: &mut SqliteConnection,
    owner: &EmployeeCode,
    report_date: Date,
) -> Result<Option<Report>, PersistenceError> {
    let report_date: String = format_date(report_date)?;
    debug!(
        owner = %owner,
        report_date = %report_date,
        "Looking up active report by owner and date"
    );

    let row: Option<ReportRow> = reports::table
        .filter(reports::employee_code.eq(owner.value()))
        .filter(reports::report_date.eq(&report_date))
        .filter(reports::delete_flg.eq(0))
        .select(ReportRow::as_select())
        .first(conn)
        .optional()?;

    row.map(ReportRow::into_report).transpose()
}

/// Checks whether an employee has an active report on a date, ignoring one id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn exists_active_report_excluding_id(
    conn: &mut SqliteConnection,
    owner: &EmployeeCode,
    report_date: Date,
    excluded_id: i64,
) -> Result<bool, PersistenceError> {
    let report_date: String = format_date(report_date)?;
    debug!(
        owner = %owner,
        report_date = %report_date,
        excluded_id,
        "Checking for a conflicting active report"
    );

    let found: bool = diesel::select(exists(
        reports::table
            .filter(reports::employee_code.eq(owner.value()))
            .filter(reports::report_date.eq(&report_date))
            .filter(reports::delete_flg.eq(0))
            .filter(reports::id.ne(excluded_id)),
    ))
    .get_result(conn)?;

    Ok(found)
}

/// Lists all active reports ordered by report date, then id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_reports(conn: &mut SqliteConnection) -> Result<Vec<Report>, PersistenceError> {
    debug!("Listing all active reports");

    let rows: Vec<ReportRow> = reports::table
        .filter(reports::delete_flg.eq(0))
        .order((reports::report_date.asc(), reports::id.asc()))
        .select(ReportRow::as_select())
        .load(conn)?;

    rows.into_iter().map(ReportRow::into_report).collect()
}

/// Lists the active reports of one employee ordered by report date, then id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_reports_by_owner(
    conn: &mut SqliteConnection,
    owner: &EmployeeCode,
) -> Result<Vec<Report>, PersistenceError> {
    debug!("Listing active reports for employee: {}", owner);

    let rows: Vec<ReportRow> = reports::table
        .filter(reports::employee_code.eq(owner.value()))
        .filter(reports::delete_flg.eq(0))
        .order((reports::report_date.asc(), reports::id.asc()))
        .select(ReportRow::as_select())
        .load(conn)?;

    rows.into_iter().map(ReportRow::into_report).collect()
}
