// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces the credential rules for employee accounts. Raw
//! passwords only pass through here on their way to the credential service.

use crate::error::DomainError;

/// Password policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
    /// Maximum password length, in characters.
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 16,
        }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// Both rules are always evaluated, so a password can fail with the
    /// character-set error and the length error at once. The character-set
    /// error is reported first.
    ///
    /// # Arguments
    ///
    /// * `password` - The raw password to validate
    ///
    /// # Returns
    ///
    /// Every rule violation found, in reporting order. Empty when the password
    /// is acceptable.
    #[must_use]
    pub fn violations(&self, password: &str) -> Vec<DomainError> {
        let mut violations: Vec<DomainError> = Vec::new();

        if !Self::is_half_width_alphanumeric(password) {
            violations.push(DomainError::PasswordNotHalfWidthAlphanumeric);
        }

        let length: usize = password.chars().count();
        if length < self.min_length || length > self.max_length {
            violations.push(DomainError::PasswordLengthOutOfRange {
                length,
                min: self.min_length,
                max: self.max_length,
            });
        }

        violations
    }

    /// Returns `true` if the password is non-empty and made only of `[A-Za-z0-9]`.
    fn is_half_width_alphanumeric(password: &str) -> bool {
        !password.is_empty() && password.chars().all(|c| c.is_ascii_alphanumeric())
    }
}
