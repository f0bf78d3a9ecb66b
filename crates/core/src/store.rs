// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage and credential interfaces consumed by the directory and ledger.

use daily_report_domain::{Employee, EmployeeCode, Report};
use time::Date;

use crate::error::{CoreError, CredentialError, StoreError};

/// Persistent storage for employee accounts.
pub trait EmployeeStore {
    /// Looks up an employee by code, including soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_employee(&mut self, code: &EmployeeCode) -> Result<Option<Employee>, StoreError>;

    /// Inserts a new employee.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` if the code already exists.
    fn insert_employee(&mut self, employee: &Employee) -> Result<(), StoreError>;

    /// Overwrites the mutable columns of an existing employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn update_employee(&mut self, employee: &Employee) -> Result<(), StoreError>;

    /// Lists every non-deleted employee in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_active_employees(&mut self) -> Result<Vec<Employee>, StoreError>;
}

/// Persistent storage for reports.
pub trait ReportStore {
    /// Looks up a report by id, including soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_report(&mut self, id: i64) -> Result<Option<Report>, StoreError>;

    /// Finds the non-deleted report of `owner` on `report_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_active_report_by_owner_and_date(
        &mut self,
        owner: &EmployeeCode,
        report_date: Date,
    ) -> Result<Option<Report>, StoreError>;

    /// Returns `true` if `owner` has a non-deleted report on `report_date`
    /// other than `excluded_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn exists_active_report_excluding_id(
        &mut self,
        owner: &EmployeeCode,
        report_date: Date,
        excluded_id: i64,
    ) -> Result<bool, StoreError>;

    /// Persists a report and returns its id.
    ///
    /// A report without an id is inserted and receives a new one; otherwise the
    /// existing row is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` if the write would give the owner a
    /// second active report on the same date.
    fn save_report(&mut self, report: &Report) -> Result<i64, StoreError>;

    /// Lists every non-deleted report, ordered by report date then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_active_reports(&mut self) -> Result<Vec<Report>, StoreError>;

    /// Lists the non-deleted reports of `owner`, ordered by report date then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_active_reports_by_owner(
        &mut self,
        owner: &EmployeeCode,
    ) -> Result<Vec<Report>, StoreError>;
}

/// A store that can group several writes into one atomic unit.
pub trait Transactional {
    /// Runs `f` inside a transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a storage error if the
    /// transaction could not be started or committed.
    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self) -> Result<T, CoreError>;
}

/// Everything the directory and ledger need from a backend.
pub trait Store: EmployeeStore + ReportStore + Transactional {}

impl<S> Store for S where S: EmployeeStore + ReportStore + Transactional {}

/// One-way credential hashing.
pub trait CredentialHasher {
    /// Hashes a raw password.
    ///
    /// # Errors
    ///
    /// Returns an error if the hashing service fails.
    fn hash(&self, raw: &str) -> Result<String, CredentialError>;

    /// Checks a raw password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash cannot be interpreted.
    fn verify(&self, raw: &str, hash: &str) -> Result<bool, CredentialError>;
}
