// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use daily_report::{CredentialError, CredentialHasher};

/// Credential hasher backed by bcrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Creates a hasher with the given bcrypt cost factor.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Returns the configured cost factor.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, raw: &str) -> Result<String, CredentialError> {
        bcrypt::hash(raw, self.cost)
            .map_err(|e| CredentialError(format!("Failed to hash password: {e}")))
    }

    fn verify(&self, raw: &str, hash: &str) -> Result<bool, CredentialError> {
        bcrypt::verify(raw, hash)
            .map_err(|e| CredentialError(format!("Failed to verify password: {e}")))
    }
}
