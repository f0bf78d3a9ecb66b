// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the daily report system.
//!
//! This crate implements the storage traits of the `daily-report` crate on
//! top of Diesel and `SQLite`, and provides a bcrypt credential hasher.
//!
//! ## Schema
//!
//! The schema is embedded and applied on every open:
//!
//! - `employees`: keyed by employee code, soft-deleted via `delete_flg`
//! - `reports`: integer ids, referencing `employees.code`
//!
//! A partial unique index on `reports (employee_code, report_date)` over
//! non-deleted rows backs the one-report-per-day rule. Writes it rejects are
//! surfaced as `StoreError::UniqueViolation`.
//!
//! ## Transactions
//!
//! `Transactional::in_transaction` drives Diesel's `AnsiTransactionManager`
//! directly. Nested calls become savepoints.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` opens an isolated shared-cache in-memory
//! database per call.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use daily_report::{CoreError, EmployeeStore, ReportStore, StoreError, Transactional};
use daily_report_domain::{Employee, EmployeeCode, Report};
use diesel::SqliteConnection;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use time::Date;
use tracing::warn;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod hasher;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use hasher::BcryptHasher;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite`-backed store for employees and reports.
///
/// Methods take `&mut self`; callers sharing one instance across threads
/// must serialize access themselves.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }
}

impl EmployeeStore for Persistence {
    fn find_employee(&mut self, code: &EmployeeCode) -> Result<Option<Employee>, StoreError> {
        Ok(queries::employees::find_employee(&mut self.conn, code)?)
    }

    fn insert_employee(&mut self, employee: &Employee) -> Result<(), StoreError> {
        Ok(mutations::employees::insert_employee(&mut self.conn, employee)?)
    }

    fn update_employee(&mut self, employee: &Employee) -> Result<(), StoreError> {
        Ok(mutations::employees::update_employee(&mut self.conn, employee)?)
    }

    fn list_active_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(queries::employees::list_active_employees(&mut self.conn)?)
    }
}

impl ReportStore for Persistence {
    fn find_report(&mut self, id: i64) -> Result<Option<Report>, StoreError> {
        Ok(queries::reports::find_report(&mut self.conn, id)?)
    }

    fn find_active_report_by_owner_and_date(
        &mut self,
        owner: &EmployeeCode,
        report_date: Date,
    ) -> Result<Option<Report>, StoreError> {
        Ok(queries::reports::find_active_report_by_owner_and_date(
            &mut self.conn,
            owner,
            report_date,
        )?)
    }

    fn exists_active_report_excluding_id(
        &mut self,
        owner: &EmployeeCode,
        report_date: Date,
        excluded_id: i64,
    ) -> Result<bool, StoreError> {
        Ok(queries::reports::exists_active_report_excluding_id(
            &mut self.conn,
            owner,
            report_date,
            excluded_id,
        )?)
    }

    fn save_report(&mut self, report: &Report) -> Result<i64, StoreError> {
        match report.id {
            Some(id) => {
                mutations::reports::update_report(&mut self.conn, id, report)?;
                Ok(id)
            }
            None => Ok(mutations::reports::insert_report(&mut self.conn, report)?),
        }
    }

    fn list_active_reports(&mut self) -> Result<Vec<Report>, StoreError> {
        Ok(queries::reports::list_active_reports(&mut self.conn)?)
    }

    fn list_active_reports_by_owner(
        &mut self,
        owner: &EmployeeCode,
    ) -> Result<Vec<Report>, StoreError> {
        Ok(queries::reports::list_active_reports_by_owner(
            &mut self.conn,
            owner,
        )?)
    }
}

impl Transactional for Persistence {
    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self) -> Result<T, CoreError>,
    {
        AnsiTransactionManager::begin_transaction(&mut self.conn)
            .map_err(transaction_error)?;

        match f(self) {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(&mut self.conn)
                    .map_err(transaction_error)?;
                Ok(value)
            }
            Err(err) => {
                let rollback = AnsiTransactionManager::rollback_transaction(&mut self.conn);
                if let Err(rollback_err) = rollback {
                    warn!(error = %rollback_err, "Failed to roll back transaction");
                }
                Err(err)
            }
        }
    }
}

fn transaction_error(err: diesel::result::Error) -> StoreError {
    StoreError::from(PersistenceError::from(err))
}
