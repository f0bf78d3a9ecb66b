// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::{BTreeMap, HashSet};

use daily_report_domain::{Employee, EmployeeCode, NewEmployee, Report, ReportDraft, Role};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

use crate::{
    AuthenticatedActor, CoreError, CredentialError, CredentialHasher, EmployeeDirectory,
    EmployeeStore, ReportLedger, ReportStore, StoreError, Transactional,
};

pub const TEST_PASSWORD: &str = "password1";

/// An in-memory store with snapshot-based transactions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub employees: Vec<Employee>,
    pub reports: BTreeMap<i64, Report>,
    next_report_id: i64,
    /// Makes the date-uniqueness lookups report no conflicts, so that only
    /// the unique constraint in `save_report` catches duplicates.
    pub blind_date_checks: bool,
    /// Makes `find_employee` see no employees, so that only the unique
    /// constraint in `insert_employee` catches duplicate codes.
    pub blind_employee_lookups: bool,
    /// Reports whose writes fail with a backend error.
    pub failing_report_ids: HashSet<i64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, id: i64) -> &Report {
        self.reports.get(&id).unwrap()
    }

    pub fn employee(&self, code: &str) -> &Employee {
        self.employees
            .iter()
            .find(|employee| employee.code.value() == code)
            .unwrap()
    }

    fn conflicts(&self, report: &Report) -> bool {
        !report.deleted
            && self.reports.values().any(|other| {
                !other.deleted
                    && other.id != report.id
                    && other.owner == report.owner
                    && other.report_date == report.report_date
            })
    }
}

impl EmployeeStore for InMemoryStore {
    fn find_employee(&mut self, code: &EmployeeCode) -> Result<Option<Employee>, StoreError> {
        if self.blind_employee_lookups {
            return Ok(None);
        }
        Ok(self
            .employees
            .iter()
            .find(|employee| &employee.code == code)
            .cloned())
    }

    fn insert_employee(&mut self, employee: &Employee) -> Result<(), StoreError> {
        if self
            .employees
            .iter()
            .any(|existing| existing.code == employee.code)
        {
            return Err(StoreError::UniqueViolation(String::from("employees.code")));
        }
        self.employees.push(employee.clone());
        Ok(())
    }

    fn update_employee(&mut self, employee: &Employee) -> Result<(), StoreError> {
        let existing: &mut Employee = self
            .employees
            .iter_mut()
            .find(|existing| existing.code == employee.code)
            .ok_or_else(|| StoreError::Backend(String::from("no such employee")))?;
        *existing = employee.clone();
        Ok(())
    }

    fn list_active_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        let mut employees: Vec<Employee> = self
            .employees
            .iter()
            .filter(|employee| !employee.deleted)
            .cloned()
            .collect();
        employees.sort_by(|a, b| (a.created_at, &a.code).cmp(&(b.created_at, &b.code)));
        Ok(employees)
    }
}

impl ReportStore for InMemoryStore {
    fn find_report(&mut self, id: i64) -> Result<Option<Report>, StoreError> {
        Ok(self.reports.get(&id).cloned())
    }

    fn find_active_report_by_owner_and_date(
        &mut self,
        owner: &EmployeeCode,
        report_date: Date,
    ) -> Result<Option<Report>, StoreError> {
        if self.blind_date_checks {
            return Ok(None);
        }
        Ok(self
            .reports
            .values()
            .find(|report| {
                !report.deleted && &report.owner == owner && report.report_date == report_date
            })
            .cloned())
    }

    fn exists_active_report_excluding_id(
        &mut self,
        owner: &EmployeeCode,
        report_date: Date,
        excluded_id: i64,
    ) -> Result<bool, StoreError> {
        if self.blind_date_checks {
            return Ok(false);
        }
        Ok(self.reports.values().any(|report| {
            !report.deleted
                && report.id != Some(excluded_id)
                && &report.owner == owner
                && report.report_date == report_date
        }))
    }

    fn save_report(&mut self, report: &Report) -> Result<i64, StoreError> {
        if report
            .id
            .is_some_and(|id| self.failing_report_ids.contains(&id))
        {
            return Err(StoreError::Backend(String::from("disk I/O error")));
        }
        if self.conflicts(report) {
            return Err(StoreError::UniqueViolation(String::from(
                "reports.employee_code, reports.report_date",
            )));
        }

        let id: i64 = match report.id {
            Some(id) => id,
            None => {
                self.next_report_id += 1;
                self.next_report_id
            }
        };
        let mut stored: Report = report.clone();
        stored.id = Some(id);
        self.reports.insert(id, stored);
        Ok(id)
    }

    fn list_active_reports(&mut self) -> Result<Vec<Report>, StoreError> {
        let mut reports: Vec<Report> = self
            .reports
            .values()
            .filter(|report| !report.deleted)
            .cloned()
            .collect();
        reports.sort_by_key(|report| (report.report_date, report.id));
        Ok(reports)
    }

    fn list_active_reports_by_owner(
        &mut self,
        owner: &EmployeeCode,
    ) -> Result<Vec<Report>, StoreError> {
        Ok(self
            .list_active_reports()?
            .into_iter()
            .filter(|report| &report.owner == owner)
            .collect())
    }
}

impl Transactional for InMemoryStore {
    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self) -> Result<T, CoreError>,
    {
        let snapshot: Self = self.clone();
        let result: Result<T, CoreError> = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}

/// A reversible stand-in for a real password hasher.
pub struct FakeHasher;

impl CredentialHasher for FakeHasher {
    fn hash(&self, raw: &str) -> Result<String, CredentialError> {
        Ok(format!("hashed:{raw}"))
    }

    fn verify(&self, raw: &str, hash: &str) -> Result<bool, CredentialError> {
        Ok(hash == format!("hashed:{raw}"))
    }
}

/// A hasher whose backend is unavailable.
pub struct BrokenHasher;

impl CredentialHasher for BrokenHasher {
    fn hash(&self, _raw: &str) -> Result<String, CredentialError> {
        Err(CredentialError(String::from("hasher offline")))
    }

    fn verify(&self, _raw: &str, _hash: &str) -> Result<bool, CredentialError> {
        Err(CredentialError(String::from("hasher offline")))
    }
}

pub fn fixed_now() -> OffsetDateTime {
    datetime!(2026-01-05 09:00 UTC)
}

pub fn later_now() -> OffsetDateTime {
    datetime!(2026-01-06 17:30 UTC)
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(EmployeeCode::new("A001"), Role::Admin)
}

pub fn create_test_general(code: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(EmployeeCode::new(code), Role::General)
}

pub fn create_test_registration(code: &str, name: &str, role: Role) -> NewEmployee {
    NewEmployee {
        code: EmployeeCode::new(code),
        name: String::from(name),
        role,
    }
}

pub fn create_test_draft(report_date: Date, title: &str) -> ReportDraft {
    ReportDraft::new(report_date, title, "Worked on the quarterly plan")
}

/// Returns a store holding admin `A001` and general employees `E001` and `E002`.
pub fn create_seeded_store() -> InMemoryStore {
    let mut store: InMemoryStore = InMemoryStore::new();
    {
        let mut directory: EmployeeDirectory<'_, InMemoryStore, FakeHasher> =
            EmployeeDirectory::new(&mut store, &FakeHasher).with_clock(fixed_now);
        directory
            .register(
                create_test_registration("A001", "Admin Suzuki", Role::Admin),
                TEST_PASSWORD,
            )
            .unwrap();
        directory
            .register(
                create_test_registration("E001", "Sato Ichiro", Role::General),
                TEST_PASSWORD,
            )
            .unwrap();
        directory
            .register(
                create_test_registration("E002", "Tanaka Hanako", Role::General),
                TEST_PASSWORD,
            )
            .unwrap();
    }
    store
}

/// Creates a report for `actor` and returns its id.
pub fn add_test_report(
    store: &mut InMemoryStore,
    actor: &AuthenticatedActor,
    report_date: Date,
    title: &str,
) -> i64 {
    ReportLedger::new(store)
        .with_clock(fixed_now)
        .create(&create_test_draft(report_date, title), actor)
        .unwrap()
        .id
        .unwrap()
}
