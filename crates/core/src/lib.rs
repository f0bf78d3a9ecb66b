// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod auth;
mod directory;
mod error;
mod ledger;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and services
pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, ReportScope};
pub use directory::EmployeeDirectory;
pub use error::{AuthError, CoreError, CredentialError, StoreError};
pub use ledger::{ReportDetail, ReportLedger};
pub use store::{CredentialHasher, EmployeeStore, ReportStore, Store, Transactional};
