// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{LeadershipRole, ScopeKind};

/// Errors raised by domain validation and the engine's invariant checks.
///
/// All variants are expected, user-facing outcomes. Validation fully
/// precedes mutation, so none of these leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced entity does not exist.
    NotFound {
        /// The entity kind ("camp", "team", "membership", ...).
        resource: &'static str,
        /// The identifier that failed to resolve.
        id: i64,
    },
    /// The actor lacks the role or ownership required for the operation.
    Forbidden {
        /// The operation that was attempted.
        action: &'static str,
        /// The acting user.
        user_id: i64,
    },
    /// The targeted leadership role is not enabled on that scope.
    RoleDisabled {
        /// The scope level.
        scope: ScopeKind,
        /// The scoped entity.
        scope_id: i64,
        /// The disabled role.
        role: LeadershipRole,
    },
    /// The target user holds no approved membership in the owning camp.
    NotEligible {
        /// The ineligible user.
        user_id: i64,
        /// The camp that owns the scope.
        camp_id: i64,
    },
    /// The leadership slot is held by another user and the caller lacks
    /// override authority.
    SlotOccupied {
        /// The scope level.
        scope: ScopeKind,
        /// The scoped entity.
        scope_id: i64,
        /// The occupied role.
        role: LeadershipRole,
        /// The current holder.
        holder_id: i64,
    },
    /// The user already holds the opposite slot in the same scope.
    MutualExclusion {
        /// The scope level.
        scope: ScopeKind,
        /// The scoped entity.
        scope_id: i64,
        /// The doubly-assigned user.
        user_id: i64,
    },
    /// A pending or approved request already exists for the pair.
    DuplicateRequest {
        /// The request kind ("membership", "association", ...).
        subject: &'static str,
        /// Description of the colliding pair.
        detail: String,
    },
    /// An approval decision was attempted on a non-pending subject.
    NotPending {
        /// The subject kind ("membership", "association", "event").
        subject: &'static str,
        /// The subject identifier.
        id: i64,
        /// The status actually observed.
        status: String,
    },
    /// Team-member removal attempted while the user holds a leadership slot
    /// on that team.
    LeadershipHeld {
        /// The team.
        team_id: i64,
        /// The slot holder.
        user_id: i64,
    },
    /// A name field is empty or too long.
    InvalidName(String),
    /// A capacity field is zero or negative.
    InvalidCapacity {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: i32,
    },
    /// An event's end date precedes its start date.
    InvalidDateRange {
        /// The start date (ISO-8601).
        start: String,
        /// The end date (ISO-8601).
        end: String,
    },
    /// A role string failed to parse.
    InvalidRole(String),
    /// A status string failed to parse.
    InvalidStatus(String),
    /// A member approval mode string failed to parse.
    InvalidApprovalMode(String),
    /// A leadership scope string failed to parse.
    InvalidScope(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => write!(f, "{resource} {id} not found"),
            Self::Forbidden { action, user_id } => {
                write!(f, "user {user_id} is not permitted to {action}")
            }
            Self::RoleDisabled {
                scope,
                scope_id,
                role,
            } => {
                write!(f, "{role} is not enabled on {scope} {scope_id}")
            }
            Self::NotEligible { user_id, camp_id } => {
                write!(
                    f,
                    "user {user_id} holds no approved membership in camp {camp_id}"
                )
            }
            Self::SlotOccupied {
                scope,
                scope_id,
                role,
                holder_id,
            } => {
                write!(
                    f,
                    "{role} on {scope} {scope_id} is already held by user {holder_id}"
                )
            }
            Self::MutualExclusion {
                scope,
                scope_id,
                user_id,
            } => {
                write!(
                    f,
                    "user {user_id} cannot hold both lead and backup lead on {scope} {scope_id}"
                )
            }
            Self::DuplicateRequest { subject, detail } => {
                write!(f, "a {subject} request already exists: {detail}")
            }
            Self::NotPending {
                subject,
                id,
                status,
            } => {
                write!(f, "{subject} {id} is not pending (status: {status})")
            }
            Self::LeadershipHeld { team_id, user_id } => {
                write!(
                    f,
                    "user {user_id} holds a leadership slot on team {team_id}; clear it first"
                )
            }
            Self::InvalidName(msg) => write!(f, "invalid name: {msg}"),
            Self::InvalidCapacity { field, value } => {
                write!(f, "invalid {field}: {value}; must be greater than 0")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "end date {end} precedes start date {start}")
            }
            Self::InvalidRole(msg) => write!(f, "invalid role: {msg}"),
            Self::InvalidStatus(msg) => write!(f, "invalid status: {msg}"),
            Self::InvalidApprovalMode(msg) => write!(f, "invalid approval mode: {msg}"),
            Self::InvalidScope(msg) => write!(f, "invalid leadership scope: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
