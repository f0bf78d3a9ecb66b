// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The report ledger.
//!
//! Owns the report lifecycle: validated creation, owner-scoped date
//! uniqueness, authorized updates and soft deletion, and role-scoped listing.

use std::collections::HashMap;

use daily_report_domain::{
    DomainError, Employee, EmployeeCode, Report, ReportDraft, ReportFields, validate_report_fields,
};
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService, ReportScope};
use crate::error::{CoreError, StoreError};
use crate::store::{EmployeeStore, Store};

/// A report together with its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDetail {
    /// The report.
    pub report: Report,
    /// The owning employee's name, resolved at read time.
    pub owner_name: String,
}

/// Report operations over a store.
pub struct ReportLedger<'a, S> {
    store: &'a mut S,
    clock: fn() -> OffsetDateTime,
}

impl<'a, S: Store> ReportLedger<'a, S> {
    /// Creates a ledger over `store` using the system clock.
    #[must_use]
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            clock: OffsetDateTime::now_utc,
        }
    }

    /// Replaces the clock used for `created_at` and `updated_at`.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Lists the reports visible to `actor`.
    ///
    /// ADMIN actors see every non-deleted report, GENERAL actors only their
    /// own. Entries are ordered by report date, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn list(&mut self, actor: &AuthenticatedActor) -> Result<Vec<ReportDetail>, CoreError> {
        let reports: Vec<Report> = match AuthorizationService::report_scope(actor) {
            ReportScope::All => self.store.list_active_reports()?,
            ReportScope::OwnedBy(code) => self.store.list_active_reports_by_owner(code)?,
        };
        debug!(actor = %actor.code, count = reports.len(), "Listed reports");

        attach_owner_names(self.store, reports)
    }

    /// Retrieves a single report.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The report does not exist or is deleted
    /// - The actor is neither ADMIN nor the owner
    /// - The store fails
    pub fn find_by_id(
        &mut self,
        id: i64,
        actor: &AuthenticatedActor,
    ) -> Result<ReportDetail, CoreError> {
        debug!(id, actor = %actor.code, "Looking up report");

        let report: Report = find_active_report(self.store, id)?;
        AuthorizationService::authorize_report_action(actor, &report, "view this report")
            .inspect_err(|err| warn!(id, error = %err, "Report lookup denied"))?;

        let detail: Option<ReportDetail> = attach_owner_names(self.store, vec![report])?.pop();
        let message: String = format!("Report {id} vanished during lookup");
        detail.ok_or_else(|| StoreError::Backend(message).into())
    }

    /// Creates a report owned by `actor`.
    ///
    /// # Returns
    ///
    /// The stored report, with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any field fails validation
    /// - The actor already has an active report on that date
    /// - Storage rejects the insert as a duplicate
    /// - The store fails
    pub fn create(
        &mut self,
        draft: &ReportDraft,
        actor: &AuthenticatedActor,
    ) -> Result<Report, CoreError> {
        let now: OffsetDateTime = (self.clock)();
        let owner: EmployeeCode = actor.code.clone();

        let result: Result<Report, CoreError> = validate_report_fields(draft)
            .map_err(CoreError::from)
            .and_then(|fields: ReportFields| {
                self.store.in_transaction(|store| {
                    let report_date: Date = fields.report_date();
                    if store
                        .find_active_report_by_owner_and_date(&owner, report_date)?
                        .is_some()
                    {
                        return Err(DomainError::ReportDateTaken {
                            owner: owner.clone(),
                            report_date,
                        }
                        .into());
                    }

                    let mut report: Report = Report::new(owner.clone(), fields, now);
                    let id: i64 = store.save_report(&report).map_err(|err| match err {
                        StoreError::UniqueViolation(_) => {
                            CoreError::from(DomainError::DuplicateReport {
                                owner: owner.clone(),
                                report_date,
                            })
                        }
                        StoreError::Backend(_) => CoreError::from(err),
                    })?;
                    report.id = Some(id);
                    Ok(report)
                })
            });

        match &result {
            Ok(report) => info!(
                id = report.id,
                owner = %report.owner,
                report_date = %report.report_date,
                "Created report"
            ),
            Err(err) => warn!(owner = %actor.code, error = %err, "Report creation rejected"),
        }
        result
    }

    /// Updates the date, title and content of a report.
    ///
    /// The owner never changes. Date uniqueness is checked against the
    /// report owner's other active reports, not the actor's.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The report does not exist or is deleted
    /// - The actor is neither ADMIN nor the owner
    /// - Any field fails validation
    /// - The owner already has another active report on the new date
    /// - The store fails
    pub fn update(
        &mut self,
        id: i64,
        draft: &ReportDraft,
        actor: &AuthenticatedActor,
    ) -> Result<Report, CoreError> {
        let now: OffsetDateTime = (self.clock)();

        let result: Result<Report, CoreError> = self.store.in_transaction(|store| {
            let mut report: Report = find_active_report(store, id)?;
            AuthorizationService::authorize_report_action(actor, &report, "update this report")?;

            let fields: ReportFields = validate_report_fields(draft)?;
            let report_date: Date = fields.report_date();
            if store.exists_active_report_excluding_id(&report.owner, report_date, id)? {
                return Err(DomainError::ReportDateTaken {
                    owner: report.owner.clone(),
                    report_date,
                }
                .into());
            }

            report.apply_fields(fields, now);
            store.save_report(&report).map_err(|err| match err {
                StoreError::UniqueViolation(_) => CoreError::from(DomainError::ReportDateTaken {
                    owner: report.owner.clone(),
                    report_date,
                }),
                StoreError::Backend(_) => CoreError::from(err),
            })?;
            Ok(report)
        });

        match &result {
            Ok(report) => info!(id, owner = %report.owner, actor = %actor.code, "Updated report"),
            Err(err) => warn!(id, actor = %actor.code, error = %err, "Report update rejected"),
        }
        result
    }

    /// Soft-deletes a report on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The report does not exist or is already deleted
    /// - The actor is neither ADMIN nor the owner
    /// - The store fails
    pub fn delete(&mut self, id: i64, actor: &AuthenticatedActor) -> Result<(), CoreError> {
        let now: OffsetDateTime = (self.clock)();

        let result: Result<(), CoreError> = self.store.in_transaction(|store| {
            let mut report: Report = find_active_report(store, id)?;
            AuthorizationService::authorize_report_action(actor, &report, "delete this report")?;

            report.mark_deleted(now);
            store.save_report(&report)?;
            Ok(())
        });

        match &result {
            Ok(()) => info!(id, actor = %actor.code, "Deleted report"),
            Err(err) => warn!(id, actor = %actor.code, error = %err, "Report deletion rejected"),
        }
        result
    }

    /// Soft-deletes a report without any authorization check.
    ///
    /// Used by the employee-deletion cascade. Deleting an already-deleted
    /// report succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns an error if no report with `id` exists or the store fails.
    pub fn force_delete(&mut self, id: i64) -> Result<(), CoreError> {
        let now: OffsetDateTime = (self.clock)();

        self.store.in_transaction(|store| {
            let mut report: Report = store
                .find_report(id)?
                .ok_or(DomainError::ReportNotFound(id))?;

            if report.deleted {
                debug!(id, "Report already deleted");
                return Ok(());
            }

            report.mark_deleted(now);
            store.save_report(&report)?;
            info!(id, owner = %report.owner, "Force-deleted report");
            Ok(())
        })
    }
}

/// Loads a report, treating soft-deleted rows as absent.
fn find_active_report<S: Store>(store: &mut S, id: i64) -> Result<Report, CoreError> {
    store
        .find_report(id)?
        .filter(|report| !report.deleted)
        .ok_or_else(|| DomainError::ReportNotFound(id).into())
}

/// Resolves owner names for a batch of reports, looking each owner up once.
fn attach_owner_names<S: EmployeeStore>(
    store: &mut S,
    reports: Vec<Report>,
) -> Result<Vec<ReportDetail>, CoreError> {
    let mut names: HashMap<EmployeeCode, String> = HashMap::new();
    let mut details: Vec<ReportDetail> = Vec::with_capacity(reports.len());

    for report in reports {
        let owner_name: String = if let Some(name) = names.get(&report.owner) {
            name.clone()
        } else {
            let owner: Employee = store.find_employee(&report.owner)?.ok_or_else(|| {
                StoreError::Backend(format!(
                    "Owner '{}' of report {:?} is missing",
                    report.owner, report.id
                ))
            })?;
            names.insert(owner.code, owner.name.clone());
            owner.name
        };
        details.push(ReportDetail { report, owner_name });
    }

    Ok(details)
}
