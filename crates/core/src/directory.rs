// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The employee directory.
//!
//! Registration, updates and soft deletion of employee accounts. Deleting an
//! employee cascades to their reports through [`ReportLedger::force_delete`].
//! The cascade is not atomic with the employee update: each report deletion
//! commits on its own, and re-running the delete resumes where it failed.

use daily_report_domain::{
    DomainError, Employee, EmployeeCode, EmployeePatch, NewEmployee, PasswordPolicy, Report,
    ValidationErrors, validate_employee_name, validate_password, validate_registration,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{CoreError, StoreError};
use crate::ledger::ReportLedger;
use crate::store::{CredentialHasher, Store};

/// Employee account operations over a store.
pub struct EmployeeDirectory<'a, S, H> {
    store: &'a mut S,
    hasher: &'a H,
    policy: PasswordPolicy,
    clock: fn() -> OffsetDateTime,
}

impl<'a, S: Store, H: CredentialHasher> EmployeeDirectory<'a, S, H> {
    /// Creates a directory with the default password policy and system clock.
    ///
    /// # Arguments
    ///
    /// * `store` - The backing store
    /// * `hasher` - The credential service used to hash passwords
    #[must_use]
    pub fn new(store: &'a mut S, hasher: &'a H) -> Self {
        Self {
            store,
            hasher,
            policy: PasswordPolicy::default(),
            clock: OffsetDateTime::now_utc,
        }
    }

    /// Replaces the password policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the clock used for `created_at` and `updated_at`.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Registers a new employee.
    ///
    /// # Arguments
    ///
    /// * `registration` - The code, name and role of the new employee
    /// * `password` - The raw password; only its hash is stored
    ///
    /// # Returns
    ///
    /// The stored employee.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The code or name is blank, or the password violates the policy
    /// - The code is already in use, including by a deleted employee
    /// - The credential service or the store fails
    pub fn register(
        &mut self,
        registration: NewEmployee,
        password: &str,
    ) -> Result<Employee, CoreError> {
        let code: EmployeeCode = registration.code.clone();
        let result: Result<Employee, CoreError> = self.insert_registration(registration, password);

        match &result {
            Ok(employee) => info!(
                code = %employee.code,
                role = %employee.role,
                "Registered employee"
            ),
            Err(err) => warn!(code = %code, error = %err, "Employee registration rejected"),
        }
        result
    }

    fn insert_registration(
        &mut self,
        registration: NewEmployee,
        password: &str,
    ) -> Result<Employee, CoreError> {
        validate_registration(&registration, &self.policy, password)?;
        let password_hash: String = self.hasher.hash(password)?;
        let now: OffsetDateTime = (self.clock)();

        self.store.in_transaction(|store| {
            if store.find_employee(&registration.code)?.is_some() {
                return Err(DomainError::DuplicateEmployeeCode(registration.code).into());
            }

            let employee: Employee = Employee::new(registration, password_hash, now);
            store.insert_employee(&employee).map_err(|err| match err {
                StoreError::UniqueViolation(_) => {
                    CoreError::from(DomainError::DuplicateEmployeeCode(employee.code.clone()))
                }
                StoreError::Backend(_) => CoreError::from(err),
            })?;
            Ok(employee)
        })
    }

    /// Updates an employee's name and role, and optionally their password.
    ///
    /// The stored hash is only replaced when `patch` carries a non-empty
    /// password.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The employee does not exist or is deleted
    /// - The name is blank, or the new password violates the policy
    /// - The credential service or the store fails
    pub fn update(
        &mut self,
        code: &EmployeeCode,
        patch: EmployeePatch,
    ) -> Result<Employee, CoreError> {
        let now: OffsetDateTime = (self.clock)();
        let hasher: &H = self.hasher;
        let policy: PasswordPolicy = self.policy;

        let result: Result<Employee, CoreError> = self.store.in_transaction(|store| {
            let mut employee: Employee = store
                .find_employee(code)?
                .filter(|employee| !employee.deleted)
                .ok_or_else(|| DomainError::EmployeeNotFound(code.clone()))?;

            let name_check: Result<(), ValidationErrors> = validate_employee_name(&patch.name);
            let password_check: Result<(), ValidationErrors> = patch
                .new_password()
                .map_or(Ok(()), |password| validate_password(&policy, password));
            match (name_check, password_check) {
                (Ok(()), Ok(())) => {}
                (Err(mut errors), Err(more)) => {
                    errors.merge(more);
                    return Err(errors.into());
                }
                (Err(errors), Ok(())) | (Ok(()), Err(errors)) => return Err(errors.into()),
            }

            if let Some(password) = patch.new_password() {
                employee.password_hash = hasher.hash(password)?;
            }
            employee.name = patch.name;
            employee.role = patch.role;
            employee.updated_at = now;

            store.update_employee(&employee)?;
            Ok(employee)
        });

        match &result {
            Ok(employee) => info!(code = %employee.code, role = %employee.role, "Updated employee"),
            Err(err) => warn!(code = %code, error = %err, "Employee update rejected"),
        }
        result
    }

    /// Soft-deletes an employee and every one of their active reports.
    ///
    /// The employee row is committed first. Each report is then removed in
    /// its own transaction; failures are collected rather than rolled back.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `code` is the actor's own code
    /// - The actor is not an ADMIN
    /// - No employee with `code` exists
    /// - Any report could not be removed (`CoreError::CascadeIncomplete`)
    /// - The store fails
    pub fn delete(
        &mut self,
        code: &EmployeeCode,
        actor: &AuthenticatedActor,
    ) -> Result<(), CoreError> {
        let result: Result<usize, CoreError> = self.delete_and_cascade(code, actor);

        match &result {
            Ok(removed) => info!(
                code = %code,
                actor = %actor.code,
                reports_removed = removed,
                "Deleted employee"
            ),
            Err(err) => warn!(
                code = %code,
                actor = %actor.code,
                error = %err,
                "Employee deletion failed"
            ),
        }
        result.map(|_| ())
    }

    fn delete_and_cascade(
        &mut self,
        code: &EmployeeCode,
        actor: &AuthenticatedActor,
    ) -> Result<usize, CoreError> {
        if code == &actor.code {
            return Err(DomainError::SelfDeletion(code.clone()).into());
        }
        AuthorizationService::authorize_manage_employees(actor, "delete employees")?;

        let now: OffsetDateTime = (self.clock)();
        self.store.in_transaction(|store| {
            let mut employee: Employee = store
                .find_employee(code)?
                .ok_or_else(|| DomainError::EmployeeNotFound(code.clone()))?;
            employee.mark_deleted(now);
            store.update_employee(&employee)?;
            Ok(())
        })?;

        let reports: Vec<Report> = self.store.list_active_reports_by_owner(code)?;
        let mut ledger: ReportLedger<'_, S> =
            ReportLedger::new(&mut *self.store).with_clock(self.clock);
        let mut failed_report_ids: Vec<i64> = Vec::new();
        let mut first_error: Option<CoreError> = None;
        let mut removed: usize = 0;

        for id in reports.iter().filter_map(|report| report.id) {
            match ledger.force_delete(id) {
                Ok(()) => removed += 1,
                Err(err) => {
                    warn!(code = %code, id, error = %err, "Cascaded report deletion failed");
                    failed_report_ids.push(id);
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            None => Ok(removed),
            Some(first_error) => Err(CoreError::CascadeIncomplete {
                code: code.clone(),
                failed_report_ids,
                first_error: Box::new(first_error),
            }),
        }
    }

    /// Looks up an employee by code, including deleted employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn find_by_code(&mut self, code: &EmployeeCode) -> Result<Option<Employee>, CoreError> {
        debug!(code = %code, "Looking up employee");
        Ok(self.store.find_employee(code)?)
    }

    /// Looks up a non-deleted employee by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn find_active_by_code(
        &mut self,
        code: &EmployeeCode,
    ) -> Result<Option<Employee>, CoreError> {
        let employee: Option<Employee> = self.find_by_code(code)?;
        Ok(employee.filter(|employee| !employee.deleted))
    }

    /// Lists every non-deleted employee in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn list_all(&mut self) -> Result<Vec<Employee>, CoreError> {
        let employees: Vec<Employee> = self.store.list_active_employees()?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }
}
