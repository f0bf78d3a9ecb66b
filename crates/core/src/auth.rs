// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Acting-user identity, authorization policy and authentication.

use daily_report_domain::{DomainError, Employee, EmployeeCode, Report, Role};
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::store::{CredentialHasher, EmployeeStore};

/// The identity on whose behalf an operation runs.
///
/// Every directory and ledger operation takes the acting user explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The acting employee's code.
    pub code: EmployeeCode,
    /// The acting employee's role.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `code` - The acting employee's code
    /// * `role` - The acting employee's role
    #[must_use]
    pub const fn new(code: EmployeeCode, role: Role) -> Self {
        Self { code, role }
    }

    /// Returns `true` if this actor holds the ADMIN role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Which reports a listing may include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope<'a> {
    /// Every non-deleted report.
    All,
    /// Only the reports owned by this employee.
    OwnedBy(&'a EmployeeCode),
}

/// Authorization service for enforcing role and ownership rules.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may act on a report.
    ///
    /// An action is permitted iff the actor is an ADMIN or owns the report.
    ///
    /// # Arguments
    ///
    /// * `actor` - The acting user
    /// * `report` - The target report
    /// * `action` - A short description of the attempted action
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AccessDenied` if the actor is neither ADMIN nor owner.
    pub fn authorize_report_action(
        actor: &AuthenticatedActor,
        report: &Report,
        action: &'static str,
    ) -> Result<(), DomainError> {
        if actor.is_admin() || report.is_owned_by(&actor.code) {
            Ok(())
        } else {
            Err(DomainError::AccessDenied {
                action,
                actor: actor.code.clone(),
            })
        }
    }

    /// Checks if an actor may manage employee accounts.
    ///
    /// Only ADMIN actors may manage employee accounts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AccessDenied` if the actor is not an ADMIN.
    pub fn authorize_manage_employees(
        actor: &AuthenticatedActor,
        action: &'static str,
    ) -> Result<(), DomainError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::General => Err(DomainError::AccessDenied {
                action,
                actor: actor.code.clone(),
            }),
        }
    }

    /// Returns the listing scope for an actor.
    #[must_use]
    pub const fn report_scope(actor: &AuthenticatedActor) -> ReportScope<'_> {
        match actor.role {
            Role::Admin => ReportScope::All,
            Role::General => ReportScope::OwnedBy(&actor.code),
        }
    }
}

/// Authentication service resolving credentials into an acting user.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates an employee by code and password.
    ///
    /// # Arguments
    ///
    /// * `store` - The employee store
    /// * `hasher` - The credential service used to verify the password
    /// * `code` - The employee code
    /// * `password` - The raw password
    ///
    /// # Returns
    ///
    /// The acting user for the employee.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The employee does not exist or is deleted
    /// - The password does not match
    /// - The store or the credential service fails
    pub fn login<S: EmployeeStore, H: CredentialHasher>(
        store: &mut S,
        hasher: &H,
        code: &EmployeeCode,
        password: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        debug!(code = %code, "Authenticating employee");

        let employee: Employee = store
            .find_employee(code)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Unknown employee: {code}"),
            })?;

        if employee.deleted {
            warn!(code = %code, "Login attempt for deleted employee");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Employee account is deleted"),
            });
        }

        let matches: bool = hasher
            .verify(password, &employee.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification error: {e}"),
            })?;

        if !matches {
            warn!(code = %code, "Login attempt with invalid password");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid password"),
            });
        }

        info!(code = %code, role = %employee.role, "Employee authenticated");
        Ok(AuthenticatedActor::new(employee.code, employee.role))
    }
}
