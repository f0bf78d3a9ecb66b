// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line administration for the daily report system.
//!
//! Every command opens the database, runs one operation and prints the
//! result as JSON on stdout. Failures are printed as JSON on stderr with the
//! rule outcome, and the process exits non-zero.

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

mod commands;
mod error;
mod output;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use daily_report_domain::Role;
use daily_report_persistence::{BcryptHasher, Persistence};
use time::Date;
use time::macros::format_description;
use tracing::{error, info};

use crate::error::CliError;
use crate::output::ErrorOutput;

/// Daily report administration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file
    #[arg(
        short,
        long,
        env = "DAILY_REPORT_DATABASE",
        default_value = "daily_report.db"
    )]
    database: PathBuf,

    /// bcrypt cost factor used when hashing new passwords
    #[arg(long, default_value_t = BcryptHasher::default().cost())]
    bcrypt_cost: u32,

    #[command(subcommand)]
    command: Command,
}

/// Credentials of the employee performing the command.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
struct Credentials {
    /// Employee code to sign in as
    #[arg(long, env = "DAILY_REPORT_LOGIN")]
    login: String,

    /// Password to sign in with
    #[arg(long, env = "DAILY_REPORT_PASSWORD", hide_env_values = true)]
    password: String,
}

/// Credentials that may be omitted while no employee exists yet.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
struct BootstrapCredentials {
    /// Employee code to sign in as; optional for the first registration
    #[arg(long, env = "DAILY_REPORT_LOGIN", requires = "password")]
    login: Option<String>,

    /// Password to sign in with
    #[arg(
        long,
        env = "DAILY_REPORT_PASSWORD",
        hide_env_values = true,
        requires = "login"
    )]
    password: Option<String>,
}

impl BootstrapCredentials {
    fn credentials(&self) -> Option<Credentials> {
        match (&self.login, &self.password) {
            (Some(login), Some(password)) => Some(Credentials {
                login: login.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Register a new employee account
    ///
    /// Requires an ADMIN sign-in, except for the first account.
    RegisterEmployee {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_role, default_value = "GENERAL")]
        role: Role,
        /// Password of the new employee
        #[arg(long)]
        employee_password: String,
        #[command(flatten)]
        credentials: BootstrapCredentials,
    },
    /// Update an employee's name and role, and optionally their password
    UpdateEmployee {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
        /// Leave unset to keep the current password
        #[arg(long)]
        new_password: Option<String>,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Delete an employee and all of their reports
    DeleteEmployee {
        #[arg(long)]
        code: String,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// List active employees
    ListEmployees,
    /// Create a report owned by the signed-in employee
    AddReport {
        #[arg(long, value_parser = parse_date)]
        date: Date,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Update the date, title and content of a report
    UpdateReport {
        #[arg(long)]
        id: i64,
        #[arg(long, value_parser = parse_date)]
        date: Date,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Delete a report
    DeleteReport {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Show a single report
    ShowReport {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// List the reports visible to the signed-in employee
    ListReports {
        #[command(flatten)]
        credentials: Credentials,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse()
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|err| format!("Invalid date '{value}': expected YYYY-MM-DD ({err})"))
}

fn run(args: &Args) -> Result<serde_json::Value, CliError> {
    info!("Using file-based database at: {}", args.database.display());
    let mut persistence: Persistence = Persistence::new_with_file(&args.database)?;
    let hasher: BcryptHasher = BcryptHasher::new(args.bcrypt_cost);

    commands::execute(&mut persistence, &hasher, &args.command)
}

fn main() -> ExitCode {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Initializing daily report CLI");

    match run(&args) {
        Ok(value) => {
            println!("{value:#}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Command failed");
            let output: ErrorOutput = ErrorOutput::from_error(&err);
            match serde_json::to_string_pretty(&output) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{err}"),
            }
            ExitCode::FAILURE
        }
    }
}
