// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use clap::Parser;
use daily_report_domain::{ErrorKind, Field, Role};
use daily_report_persistence::{BcryptHasher, Persistence};
use serde_json::{Value, json};
use std::path::PathBuf;
use time::macros::date;

use crate::commands::execute;
use crate::error::CliError;
use crate::output::ErrorOutput;
use crate::{Args, Command};

const PASSWORD: &str = "Abc12345";

fn parse(argv: &[&str]) -> Args {
    let mut full: Vec<&str> = vec!["daily-report-cli"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full).unwrap()
}

fn create_test_hasher() -> BcryptHasher {
    BcryptHasher::new(4)
}

fn run_command(persistence: &mut Persistence, argv: &[&str]) -> Result<Value, CliError> {
    let args: Args = parse(argv);
    execute(persistence, &create_test_hasher(), &args.command)
}

fn register_employee(
    persistence: &mut Persistence,
    code: &str,
    role: &str,
    login: Option<&str>,
) -> Result<Value, CliError> {
    let mut argv: Vec<&str> = vec![
        "register-employee",
        "--code",
        code,
        "--name",
        "New Hire",
        "--role",
        role,
        "--employee-password",
        PASSWORD,
    ];
    if let Some(login) = login {
        argv.extend_from_slice(&["--login", login, "--password", PASSWORD]);
    }
    run_command(persistence, &argv)
}

fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    run_command(
        &mut persistence,
        &[
            "register-employee",
            "--code",
            "A001",
            "--name",
            "Admin Suzuki",
            "--role",
            "ADMIN",
            "--employee-password",
            PASSWORD,
        ],
    )
    .unwrap();
    for (code, name) in [("E1", "Sato Ichiro"), ("E2", "Tanaka Hanako")] {
        run_command(
            &mut persistence,
            &[
                "register-employee",
                "--code",
                code,
                "--name",
                name,
                "--employee-password",
                PASSWORD,
                "--login",
                "A001",
                "--password",
                PASSWORD,
            ],
        )
        .unwrap();
    }
    persistence
}

fn add_report(
    persistence: &mut Persistence,
    login: &str,
    report_date: &str,
    title: &str,
) -> Result<Value, CliError> {
    run_command(
        persistence,
        &[
            "add-report",
            "--login",
            login,
            "--password",
            PASSWORD,
            "--date",
            report_date,
            "--title",
            title,
            "--content",
            "Worked on tickets",
        ],
    )
}

#[test]
fn test_global_defaults() {
    let args: Args = parse(&["list-employees"]);

    assert_eq!(args.database, PathBuf::from("daily_report.db"));
    assert_eq!(args.bcrypt_cost, BcryptHasher::default().cost());
    assert_eq!(args.command, Command::ListEmployees);
}

#[test]
fn test_register_defaults_to_general_role() {
    let args: Args = parse(&[
        "register-employee",
        "--code",
        "E9",
        "--name",
        "New Hire",
        "--employee-password",
        PASSWORD,
    ]);

    match args.command {
        Command::RegisterEmployee {
            role,
            credentials,
            ..
        } => {
            assert_eq!(role, Role::General);
            assert_eq!(credentials.credentials(), None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_delete_employee_keeps_target_and_login_apart() {
    let args: Args = parse(&[
        "delete-employee",
        "--code",
        "E2",
        "--login",
        "A001",
        "--password",
        PASSWORD,
    ]);

    match args.command {
        Command::DeleteEmployee { code, credentials } => {
            assert_eq!(code, "E2");
            assert_eq!(credentials.login, "A001");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_register_login_requires_password() {
    let result = Args::try_parse_from([
        "daily-report-cli",
        "register-employee",
        "--code",
        "E9",
        "--name",
        "New Hire",
        "--employee-password",
        PASSWORD,
        "--login",
        "A001",
    ]);

    assert!(result.is_err());
}

#[test]
fn test_report_date_is_parsed() {
    let args: Args = parse(&[
        "add-report",
        "--login",
        "E1",
        "--password",
        PASSWORD,
        "--date",
        "2024-01-01",
        "--title",
        "Standup",
        "--content",
        "Notes",
    ]);

    match args.command {
        Command::AddReport {
            date: report_date,
            credentials,
            ..
        } => {
            assert_eq!(report_date, date!(2024 - 01 - 01));
            assert_eq!(credentials.login, "E1");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_invalid_arguments_are_rejected() {
    let bad_date = Args::try_parse_from([
        "daily-report-cli",
        "add-report",
        "--login",
        "E1",
        "--password",
        PASSWORD,
        "--date",
        "01/01/2024",
        "--title",
        "Standup",
        "--content",
        "Notes",
    ]);
    assert!(bad_date.is_err());

    let bad_role = Args::try_parse_from([
        "daily-report-cli",
        "register-employee",
        "--code",
        "E9",
        "--name",
        "New Hire",
        "--role",
        "OWNER",
        "--employee-password",
        PASSWORD,
    ]);
    assert!(bad_role.is_err());
}

#[test]
fn test_list_employees_hides_password_hash() {
    let mut persistence: Persistence = create_seeded_persistence();

    let value: Value = run_command(&mut persistence, &["list-employees"]).unwrap();

    let employees: &Vec<Value> = value.as_array().unwrap();
    assert_eq!(employees.len(), 3);
    assert_eq!(employees[0]["code"], json!("A001"));
    assert_eq!(employees[0]["role"], json!("ADMIN"));
    assert!(employees.iter().all(|employee| employee.get("password_hash").is_none()));
}

#[test]
fn test_reports_are_listed_with_owner_names() {
    let mut persistence: Persistence = create_seeded_persistence();
    add_report(&mut persistence, "E1", "2024-01-02", "Second").unwrap();
    add_report(&mut persistence, "E1", "2024-01-01", "First").unwrap();
    add_report(&mut persistence, "E2", "2024-01-01", "Other").unwrap();

    let own: Value = run_command(
        &mut persistence,
        &["list-reports", "--login", "E1", "--password", PASSWORD],
    )
    .unwrap();
    let titles: Vec<&str> = own
        .as_array()
        .unwrap()
        .iter()
        .map(|report| report["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
    assert_eq!(own[0]["owner_name"], json!("Sato Ichiro"));
    assert_eq!(own[0]["report_date"], json!("2024-01-01"));

    let all: Value = run_command(
        &mut persistence,
        &["list-reports", "--login", "A001", "--password", PASSWORD],
    )
    .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[test]
fn test_duplicate_report_date_reports_datecheck() {
    let mut persistence: Persistence = create_seeded_persistence();
    add_report(&mut persistence, "E1", "2024-01-01", "First").unwrap();

    let err: CliError = add_report(&mut persistence, "E1", "2024-01-01", "Again").unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::DateCheck));
    let output: Value = serde_json::to_value(ErrorOutput::from_error(&err)).unwrap();
    assert_eq!(output["kind"], json!("DATECHECK_ERROR"));
}

#[test]
fn test_rejected_report_lists_every_violation() {
    let mut persistence: Persistence = create_seeded_persistence();
    let long_content: String = "c".repeat(601);

    let err: CliError = run_command(
        &mut persistence,
        &[
            "add-report",
            "--login",
            "E1",
            "--password",
            PASSWORD,
            "--date",
            "2024-01-01",
            "--title",
            "   ",
            "--content",
            &long_content,
        ],
    )
    .unwrap_err();

    let output: ErrorOutput = ErrorOutput::from_error(&err);
    let fields: Vec<Option<Field>> = output.violations.iter().map(|v| v.field).collect();
    assert_eq!(fields, vec![Some(Field::Title), Some(Field::Content)]);
    assert_eq!(output.violations[0].kind, ErrorKind::Blank);
    assert_eq!(output.violations[1].kind, ErrorKind::ContentLength);
}

#[test]
fn test_other_employees_report_is_denied() {
    let mut persistence: Persistence = create_seeded_persistence();
    let created: Value = add_report(&mut persistence, "E2", "2024-01-01", "Mine").unwrap();
    let id: String = created["id"].as_i64().unwrap().to_string();

    let err: CliError = run_command(
        &mut persistence,
        &["delete-report", "--id", &id, "--login", "E1", "--password", PASSWORD],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::AccessDenied));

    let shown: Value = run_command(
        &mut persistence,
        &["show-report", "--id", &id, "--login", "A001", "--password", PASSWORD],
    )
    .unwrap();
    assert_eq!(shown["owner_name"], json!("Tanaka Hanako"));
}

#[test]
fn test_wrong_password_fails_sign_in() {
    let mut persistence: Persistence = create_seeded_persistence();

    let err: CliError = run_command(
        &mut persistence,
        &["list-reports", "--login", "E1", "--password", "Wrong123"],
    )
    .unwrap_err();

    assert!(matches!(err, CliError::Auth(_)));
    assert_eq!(ErrorOutput::from_error(&err).kind, None);
}

#[test]
fn test_employee_deletion_through_cli() {
    let mut persistence: Persistence = create_seeded_persistence();
    add_report(&mut persistence, "E1", "2024-01-01", "One").unwrap();

    let err: CliError = run_command(
        &mut persistence,
        &["delete-employee", "--code", "E1", "--login", "E1", "--password", PASSWORD],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::LoginCheck));

    let value: Value = run_command(
        &mut persistence,
        &["delete-employee", "--code", "E1", "--login", "A001", "--password", PASSWORD],
    )
    .unwrap();
    assert_eq!(value, json!({ "deleted": "E1" }));

    let reports: Value = run_command(
        &mut persistence,
        &["list-reports", "--login", "A001", "--password", PASSWORD],
    )
    .unwrap();
    assert!(reports.as_array().unwrap().is_empty());
}

#[test]
fn test_update_employee_keeps_password_when_omitted() {
    let mut persistence: Persistence = create_seeded_persistence();

    let value: Value = run_command(
        &mut persistence,
        &[
            "update-employee",
            "--code",
            "E1",
            "--name",
            "Sato Jiro",
            "--role",
            "ADMIN",
            "--login",
            "A001",
            "--password",
            PASSWORD,
        ],
    )
    .unwrap();
    assert_eq!(value["name"], json!("Sato Jiro"));
    assert_eq!(value["role"], json!("ADMIN"));

    assert!(
        run_command(
            &mut persistence,
            &["list-reports", "--login", "E1", "--password", PASSWORD],
        )
        .is_ok()
    );
}

#[test]
fn test_first_employee_registers_without_sign_in() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let value: Value = register_employee(&mut persistence, "A001", "ADMIN", None).unwrap();
    assert_eq!(value["role"], json!("ADMIN"));

    let err: CliError = register_employee(&mut persistence, "A002", "ADMIN", None).unwrap_err();
    assert!(matches!(err, CliError::SignInRequired(_)));
    assert_eq!(ErrorOutput::from_error(&err).kind, None);
}

#[test]
fn test_general_employee_cannot_register_employees() {
    let mut persistence: Persistence = create_seeded_persistence();

    let err: CliError =
        register_employee(&mut persistence, "E3", "ADMIN", Some("E1")).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::AccessDenied));

    let value: Value = register_employee(&mut persistence, "E3", "GENERAL", Some("A001")).unwrap();
    assert_eq!(value["code"], json!("E3"));
}

#[test]
fn test_general_employee_cannot_promote_themselves() {
    let mut persistence: Persistence = create_seeded_persistence();
    add_report(&mut persistence, "E2", "2024-01-01", "Private").unwrap();

    let err: CliError = run_command(
        &mut persistence,
        &[
            "update-employee",
            "--code",
            "E1",
            "--name",
            "Sato Ichiro",
            "--role",
            "ADMIN",
            "--login",
            "E1",
            "--password",
            PASSWORD,
        ],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::AccessDenied));

    let visible: Value = run_command(
        &mut persistence,
        &["list-reports", "--login", "E1", "--password", PASSWORD],
    )
    .unwrap();
    assert!(visible.as_array().unwrap().is_empty());

    let unsigned = Args::try_parse_from([
        "daily-report-cli",
        "update-employee",
        "--code",
        "E1",
        "--name",
        "Sato Ichiro",
        "--role",
        "ADMIN",
    ]);
    assert!(unsigned.is_err());
}
