// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API error types and the engine-to-API error translation.

use campstead::CoreError;
use campstead_domain::DomainError;

/// Errors returned across the API boundary.
///
/// Each variant corresponds to one caller-visible outcome class; the HTTP
/// layer maps them onto status codes. Engine errors never cross the
/// boundary untranslated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The actor lacks the authority for the attempted operation.
    Unauthorized {
        /// The operation that was attempted.
        action: String,
        /// A human-readable explanation.
        message: String,
    },
    /// A domain rule rejected an otherwise well-formed request.
    DomainRuleViolation {
        /// A stable machine-readable rule name.
        rule: String,
        /// A human-readable explanation.
        message: String,
    },
    /// A request field failed validation or parsing.
    InvalidInput {
        /// The offending field.
        field: String,
        /// A human-readable explanation.
        message: String,
    },
    /// A referenced resource does not exist.
    ResourceNotFound {
        /// The resource kind ("camp", "event", ...).
        resource_type: String,
        /// A human-readable explanation.
        message: String,
    },
    /// An infrastructure failure. The message is logged server-side and
    /// safe to surface.
    Internal {
        /// A human-readable explanation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, message } => {
                write!(f, "Unauthorized to {action}: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly across the API boundary. Every precondition failure maps to a
/// named rule so callers can react without parsing messages.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::NotFound { resource, .. } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message,
        },
        DomainError::Forbidden { action, .. } => ApiError::Unauthorized {
            action: action.to_string(),
            message,
        },
        DomainError::RoleDisabled { .. } => ApiError::DomainRuleViolation {
            rule: String::from("role_disabled"),
            message,
        },
        DomainError::NotEligible { .. } => ApiError::DomainRuleViolation {
            rule: String::from("membership_eligibility"),
            message,
        },
        DomainError::SlotOccupied { .. } => ApiError::DomainRuleViolation {
            rule: String::from("slot_occupancy"),
            message,
        },
        DomainError::MutualExclusion { .. } => ApiError::DomainRuleViolation {
            rule: String::from("mutual_exclusion"),
            message,
        },
        DomainError::DuplicateRequest { .. } => ApiError::DomainRuleViolation {
            rule: String::from("duplicate_request"),
            message,
        },
        DomainError::NotPending { .. } => ApiError::DomainRuleViolation {
            rule: String::from("single_decision"),
            message,
        },
        DomainError::LeadershipHeld { .. } => ApiError::DomainRuleViolation {
            rule: String::from("leadership_held"),
            message,
        },
        DomainError::InvalidName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidCapacity { field, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message,
        },
        DomainError::InvalidRole(_) => ApiError::InvalidInput {
            field: String::from("role"),
            message,
        },
        DomainError::InvalidStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::InvalidApprovalMode(_) => ApiError::InvalidInput {
            field: String::from("member_approval_mode"),
            message,
        },
        DomainError::InvalidScope(_) => ApiError::InvalidInput {
            field: String::from("scope"),
            message,
        },
    }
}

/// Translates an engine error into an API error.
///
/// Domain outcomes route through [`translate_domain_error`]; persistence
/// failures become [`ApiError::Internal`].
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Domain(domain_err) => translate_domain_error(domain_err),
        CoreError::Persistence(persistence_err) => ApiError::Internal {
            message: format!("Persistence failure: {persistence_err}"),
        },
    }
}
