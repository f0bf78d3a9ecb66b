// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_report::{AuthError, CoreError};
use daily_report_domain::ErrorKind;
use daily_report_persistence::PersistenceError;
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The database could not be opened.
    #[error("Failed to open database: {0}")]
    Persistence(#[from] PersistenceError),
    /// The acting user could not be authenticated.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The command needs `--login` and `--password`.
    #[error("Sign-in required to {0}")]
    SignInRequired(&'static str),
    /// The operation was rejected or failed.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// A timestamp could not be rendered.
    #[error("Failed to format timestamp: {0}")]
    Format(#[from] time::error::Format),
    /// The result could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the rule outcome, if this is a domain failure.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Core(err) => err.kind(),
            _ => None,
        }
    }
}
