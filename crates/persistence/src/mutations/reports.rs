// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_report_domain::Report;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{delete_flag, format_date, format_timestamp};
use crate::diesel_schema::reports;
use crate::error::PersistenceError;

/// Inserts a new report row and returns its id.
///
/// Any id already set on `report` is ignored.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the owner already has an
/// active report on the same date.
pub fn insert_report(
    conn: &mut SqliteConnection,
    report: &Report,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(reports::table)
        .values((
            reports::report_date.eq(format_date(report.report_date)?),
            reports::title.eq(&report.title),
            reports::content.eq(&report.content),
            reports::employee_code.eq(report.owner.value()),
            reports::delete_flg.eq(delete_flag(report.deleted)),
            reports::created_at.eq(format_timestamp(report.created_at)?),
            reports::updated_at.eq(format_timestamp(report.updated_at)?),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;

    info!(id, owner = %report.owner, "Inserted report");
    Ok(id)
}

/// Overwrites the mutable columns of a report row.
///
/// The owner and `created_at` are never changed.
///
/// # Errors
///
/// Returns an error if:
/// - No row has this id
/// - The update would give the owner a second active report on the same date
pub fn update_report(
    conn: &mut SqliteConnection,
    id: i64,
    report: &Report,
) -> Result<(), PersistenceError> {
    info!(id, deleted = report.deleted, "Updating report");

    let rows_affected: usize = diesel::update(reports::table.filter(reports::id.eq(id)))
        .set((
            reports::report_date.eq(format_date(report.report_date)?),
            reports::title.eq(&report.title),
            reports::content.eq(&report.content),
            reports::delete_flg.eq(delete_flag(report.deleted)),
            reports::updated_at.eq(format_timestamp(report.updated_at)?),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Report {id}")));
    }

    Ok(())
}
