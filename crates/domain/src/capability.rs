// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The single capability check consulted by every engine entry point.
//!
//! All three approval instances and the leadership/roster paths share this
//! one authorization table. Callers resolve the actor's approved camp role
//! for the camp in play (if any) before asking.

use crate::error::DomainError;
use crate::types::{CampRole, GlobalRole, MemberApprovalMode};

/// A resolved acting user.
///
/// `camp_role` is the actor's role from an *approved* membership in the camp
/// relevant to the capability being checked, or `None` when the actor has no
/// approved membership there (or no camp is in play).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The acting user.
    pub user_id: i64,
    /// The actor's site-wide role.
    pub global_role: GlobalRole,
    /// The actor's approved role in the relevant camp, if any.
    pub camp_role: Option<CampRole>,
}

impl Actor {
    /// Creates an actor with no camp-scoped role resolved.
    #[must_use]
    pub const fn new(user_id: i64, global_role: GlobalRole) -> Self {
        Self {
            user_id,
            global_role,
            camp_role: None,
        }
    }

    /// Returns this actor with the given approved camp role attached.
    #[must_use]
    pub const fn with_camp_role(mut self, camp_role: Option<CampRole>) -> Self {
        self.camp_role = camp_role;
        self
    }

    /// Whether the actor is an approved manager of the relevant camp.
    #[must_use]
    pub fn is_camp_manager(&self) -> bool {
        self.camp_role == Some(CampRole::Manager)
    }

    /// Whether the actor is an approved member (any role) of the relevant camp.
    #[must_use]
    pub const fn is_camp_member(&self) -> bool {
        self.camp_role.is_some()
    }
}

/// What an operation requires of its actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Structural changes inside a camp: clusters, teams, rosters, slot
    /// reassignment, promotion and demotion.
    ManageCamp { camp_id: i64 },
    /// Deciding membership admission requests, gated by the camp's mode.
    ApproveMembers {
        camp_id: i64,
        mode: MemberApprovalMode,
    },
    /// Deciding a camp↔event association request.
    DecideAssociation { event_creator_id: i64 },
    /// Creating a new event (created pending).
    CreateEvent,
    /// Deciding event publication.
    PublishEvent,
    /// Editing or cancelling an event.
    ManageEvent { event_creator_id: i64 },
}

impl Capability {
    /// The operation name used in `Forbidden` errors.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::ManageCamp { .. } => "manage this camp",
            Self::ApproveMembers { .. } => "decide membership requests for this camp",
            Self::DecideAssociation { .. } => "decide camp requests for this event",
            Self::CreateEvent => "create events",
            Self::PublishEvent => "decide event publication",
            Self::ManageEvent { .. } => "manage this event",
        }
    }
}

/// Checks whether `actor` holds `capability`.
///
/// Global admins hold every capability. Site admins hold everything except
/// camp management, which additionally falls to them (site-level authority
/// covers unmanaged camps).
///
/// # Errors
///
/// Returns [`DomainError::Forbidden`] when the actor lacks the capability.
pub fn authorize(actor: &Actor, capability: &Capability) -> Result<(), DomainError> {
    if actor.global_role == GlobalRole::GlobalAdmin {
        return Ok(());
    }

    let granted: bool = match capability {
        Capability::ManageCamp { .. } => {
            actor.is_camp_manager() || actor.global_role.is_site_admin_or_higher()
        }
        Capability::ApproveMembers { mode, .. } => {
            if actor.global_role.is_site_admin_or_higher() {
                true
            } else {
                match mode {
                    MemberApprovalMode::ManagerOnly => actor.is_camp_manager(),
                    MemberApprovalMode::AllMembers => actor.is_camp_member(),
                }
            }
        }
        Capability::DecideAssociation { event_creator_id } => {
            actor.user_id == *event_creator_id || actor.global_role.is_event_manager_or_higher()
        }
        Capability::CreateEvent => actor.global_role.is_event_manager_or_higher(),
        Capability::PublishEvent => actor.global_role.is_site_admin_or_higher(),
        Capability::ManageEvent { event_creator_id } => {
            actor.user_id == *event_creator_id || actor.global_role.is_site_admin_or_higher()
        }
    };

    if granted {
        Ok(())
    } else {
        Err(DomainError::Forbidden {
            action: capability.action(),
            user_id: actor.user_id,
        })
    }
}
