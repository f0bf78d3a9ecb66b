// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_report::{
    AuthenticatedActor, AuthenticationService, AuthorizationService, CoreError, CredentialHasher,
    EmployeeDirectory, ReportDetail, ReportLedger, Store,
};
use daily_report_domain::{Employee, EmployeeCode, EmployeePatch, NewEmployee, Report, ReportDraft};
use serde_json::{Value, json};
use tracing::info;

use crate::error::CliError;
use crate::output::{EmployeeOutput, ReportOutput};
use crate::{Command, Credentials};

/// Runs one command against `store` and returns its JSON result.
///
/// # Errors
///
/// Returns an error if sign-in fails, the operation is rejected, or the
/// result cannot be rendered.
pub fn execute<S: Store, H: CredentialHasher>(
    store: &mut S,
    hasher: &H,
    command: &Command,
) -> Result<Value, CliError> {
    match command {
        Command::RegisterEmployee {
            code,
            name,
            role,
            employee_password,
            credentials,
        } => {
            authorize_registration(store, hasher, credentials.credentials().as_ref())?;
            let registration: NewEmployee = NewEmployee {
                code: EmployeeCode::new(code.as_str()),
                name: name.clone(),
                role: *role,
            };
            let employee: Employee = EmployeeDirectory::new(store, hasher)
                .register(registration, employee_password)?;
            let output: EmployeeOutput = EmployeeOutput::from_employee(&employee)?;
            Ok(serde_json::to_value(output)?)
        }
        Command::UpdateEmployee {
            code,
            name,
            role,
            new_password,
            credentials,
        } => {
            let actor: AuthenticatedActor = sign_in(store, hasher, credentials)?;
            authorize_management(&actor, "update employees")?;
            let patch: EmployeePatch = EmployeePatch {
                name: name.clone(),
                role: *role,
                password: new_password.clone(),
            };
            let employee: Employee = EmployeeDirectory::new(store, hasher)
                .update(&EmployeeCode::new(code.as_str()), patch)?;
            let output: EmployeeOutput = EmployeeOutput::from_employee(&employee)?;
            Ok(serde_json::to_value(output)?)
        }
        Command::DeleteEmployee { code, credentials } => {
            let actor: AuthenticatedActor = sign_in(store, hasher, credentials)?;
            EmployeeDirectory::new(store, hasher)
                .delete(&EmployeeCode::new(code.as_str()), &actor)?;
            Ok(json!({ "deleted": code }))
        }
        Command::ListEmployees => {
            let employees: Vec<Employee> = EmployeeDirectory::new(store, hasher).list_all()?;
            let output: Vec<EmployeeOutput> = employees
                .iter()
                .map(EmployeeOutput::from_employee)
                .collect::<Result<_, _>>()?;
            Ok(serde_json::to_value(output)?)
        }
        Command::AddReport {
            date,
            title,
            content,
            credentials,
        } => {
            let actor: AuthenticatedActor = sign_in(store, hasher, credentials)?;
            let draft: ReportDraft = ReportDraft::new(*date, title.as_str(), content.as_str());
            let report: Report = ReportLedger::new(store).create(&draft, &actor)?;
            Ok(serde_json::to_value(ReportOutput::from_report(&report)?)?)
        }
        Command::UpdateReport {
            id,
            date,
            title,
            content,
            credentials,
        } => {
            let actor: AuthenticatedActor = sign_in(store, hasher, credentials)?;
            let draft: ReportDraft = ReportDraft::new(*date, title.as_str(), content.as_str());
            let report: Report = ReportLedger::new(store).update(*id, &draft, &actor)?;
            Ok(serde_json::to_value(ReportOutput::from_report(&report)?)?)
        }
        Command::DeleteReport { id, credentials } => {
            let actor: AuthenticatedActor = sign_in(store, hasher, credentials)?;
            ReportLedger::new(store).delete(*id, &actor)?;
            Ok(json!({ "deleted": id }))
        }
        Command::ShowReport { id, credentials } => {
            let actor: AuthenticatedActor = sign_in(store, hasher, credentials)?;
            let detail: ReportDetail = ReportLedger::new(store).find_by_id(*id, &actor)?;
            Ok(serde_json::to_value(ReportOutput::from_detail(&detail)?)?)
        }
        Command::ListReports { credentials } => {
            let actor: AuthenticatedActor = sign_in(store, hasher, credentials)?;
            let details: Vec<ReportDetail> = ReportLedger::new(store).list(&actor)?;
            let output: Vec<ReportOutput> = details
                .iter()
                .map(ReportOutput::from_detail)
                .collect::<Result<_, _>>()?;
            Ok(serde_json::to_value(output)?)
        }
    }
}

/// Registration needs an ADMIN, unless no active employee exists yet.
fn authorize_registration<S: Store, H: CredentialHasher>(
    store: &mut S,
    hasher: &H,
    credentials: Option<&Credentials>,
) -> Result<(), CliError> {
    if let Some(credentials) = credentials {
        let actor: AuthenticatedActor = sign_in(store, hasher, credentials)?;
        return authorize_management(&actor, "register employees");
    }

    if EmployeeDirectory::new(store, hasher).list_all()?.is_empty() {
        info!("Registering first employee without sign-in");
        Ok(())
    } else {
        Err(CliError::SignInRequired("register employees"))
    }
}

fn authorize_management(actor: &AuthenticatedActor, action: &'static str) -> Result<(), CliError> {
    AuthorizationService::authorize_manage_employees(actor, action)
        .map_err(CoreError::from)?;
    Ok(())
}

fn sign_in<S: Store, H: CredentialHasher>(
    store: &mut S,
    hasher: &H,
    credentials: &Credentials,
) -> Result<AuthenticatedActor, CliError> {
    Ok(AuthenticationService::login(
        store,
        hasher,
        &EmployeeCode::new(credentials.login.as_str()),
        &credentials.password,
    )?)
}
