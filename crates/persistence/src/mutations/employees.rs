// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_report_domain::Employee;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{delete_flag, format_timestamp};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Inserts a new employee row.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the code already exists.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    info!(
        "Inserting employee with code: {}, role: {}",
        employee.code, employee.role
    );

    diesel::insert_into(employees::table)
        .values((
            employees::code.eq(employee.code.value()),
            employees::name.eq(&employee.name),
            employees::password_hash.eq(&employee.password_hash),
            employees::role.eq(employee.role.as_str()),
            employees::delete_flg.eq(delete_flag(employee.deleted)),
            employees::created_at.eq(format_timestamp(employee.created_at)?),
            employees::updated_at.eq(format_timestamp(employee.updated_at)?),
        ))
        .execute(conn)?;

    Ok(())
}

/// Overwrites the mutable columns of an employee row.
///
/// The code and `created_at` are never changed.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row has the employee's code.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    info!(
        "Updating employee with code: {}, deleted: {}",
        employee.code, employee.deleted
    );

    let rows_affected: usize =
        diesel::update(employees::table.filter(employees::code.eq(employee.code.value())))
            .set((
                employees::name.eq(&employee.name),
                employees::password_hash.eq(&employee.password_hash),
                employees::role.eq(employee.role.as_str()),
                employees::delete_flg.eq(delete_flag(employee.deleted)),
                employees::updated_at.eq(format_timestamp(employee.updated_at)?),
            ))
            .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Employee {}",
            employee.code
        )));
    }

    Ok(())
}
