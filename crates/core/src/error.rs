// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campstead_domain::DomainError;
use campstead_persistence::PersistenceError;

/// Errors surfaced by engine operations.
///
/// Domain variants are expected, user-facing outcomes; persistence
/// variants indicate infrastructure failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule or validation rejected the operation.
    Domain(DomainError),
    /// The storage layer failed.
    Persistence(PersistenceError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<PersistenceError> for CoreError {
    fn from(err: PersistenceError) -> Self {
        Self::Persistence(err)
    }
}

impl From<diesel::result::Error> for CoreError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Persistence(PersistenceError::from(err))
    }
}

impl CoreError {
    /// Shorthand for the common entity-missing outcome.
    #[must_use]
    pub const fn not_found(resource: &'static str, id: i64) -> Self {
        Self::Domain(DomainError::NotFound { resource, id })
    }
}
