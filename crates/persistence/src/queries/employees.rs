// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_report_domain::{Employee, EmployeeCode};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::EmployeeRow;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Retrieves an employee by code, including soft-deleted rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no employee has this code.
pub fn find_employee(
    conn: &mut SqliteConnection,
    code: &EmployeeCode,
) -> Result<Option<Employee>, PersistenceError> {
    debug!("Looking up employee by code: {}", code);

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::code.eq(code.value()))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    row.map(EmployeeRow::into_employee).transpose()
}

/// Lists all non-deleted employees ordered by creation time, then code.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_employees(
    conn: &mut SqliteConnection,
) -> Result<Vec<Employee>, PersistenceError> {
    debug!("Listing active employees");

    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::delete_flg.eq(0))
        .order((employees::created_at.asc(), employees::code.asc()))
        .select(EmployeeRow::as_select())
        .load(conn)?;

    rows.into_iter().map(EmployeeRow::into_employee).collect()
}
