// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Site-wide role held by a user in the identity directory.
///
/// Roles are ordered by decreasing privilege. The engine consults them for
/// the capability checks in [`crate::authorize`]; it never mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GlobalRole {
    /// Full system access.
    GlobalAdmin,
    /// Site-level content and publication authority.
    SiteAdmin,
    /// May create and manage events.
    EventManager,
    /// May manage specific camps (camp-level authority still requires an
    /// approved manager membership in that camp).
    CampManager,
    /// Basic access.
    #[default]
    Member,
}

impl GlobalRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GlobalAdmin => "global_admin",
            Self::SiteAdmin => "site_admin",
            Self::EventManager => "event_manager",
            Self::CampManager => "camp_manager",
            Self::Member => "member",
        }
    }

    /// Privilege rank, lower is more privileged.
    const fn rank(self) -> u8 {
        match self {
            Self::GlobalAdmin => 0,
            Self::SiteAdmin => 1,
            Self::EventManager => 2,
            Self::CampManager => 3,
            Self::Member => 4,
        }
    }

    /// Checks whether this role has the privileges of `other` or higher.
    #[must_use]
    pub const fn at_least(self, other: Self) -> bool {
        self.rank() <= other.rank()
    }

    /// Checks whether this role is site admin or higher.
    #[must_use]
    pub const fn is_site_admin_or_higher(self) -> bool {
        self.at_least(Self::SiteAdmin)
    }

    /// Checks whether this role is event manager or higher.
    #[must_use]
    pub const fn is_event_manager_or_higher(self) -> bool {
        self.at_least(Self::EventManager)
    }
}

impl FromStr for GlobalRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global_admin" => Ok(Self::GlobalAdmin),
            "site_admin" => Ok(Self::SiteAdmin),
            "event_manager" => Ok(Self::EventManager),
            "camp_manager" => Ok(Self::CampManager),
            "member" => Ok(Self::Member),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for GlobalRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Camp-scoped role carried on an approved membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CampRole {
    /// May manage the camp, approve members, and promote or demote.
    Manager,
    /// Regular member with no camp-level authority.
    #[default]
    Member,
}

impl CampRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }
}

impl FromStr for CampRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for CampRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Admission status of a camp membership request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MembershipStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Admitted. Terminal for this request.
    Approved,
    /// Declined. Terminal for this request; a fresh request may be issued.
    Rejected,
}

impl MembershipStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl FromStr for MembershipStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a camp's request to participate in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AssociationStatus {
    /// Awaiting a decision by the event's managing actor.
    #[default]
    Pending,
    /// Approved. Terminal.
    Approved,
    /// Rejected. Terminal.
    Rejected,
}

impl AssociationStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for AssociationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AssociationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Publication status of an event.
///
/// Valid transitions:
/// - Pending → Approved
/// - Pending → Rejected
/// - Approved → Cancelled
///
/// No other state reaches Cancelled, and there is no way back to Approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventStatus {
    /// Created, awaiting site admin approval.
    #[default]
    Pending,
    /// Publicly visible.
    Approved,
    /// Declined by a site admin. Terminal.
    Rejected,
    /// Cancelled after approval. Terminal.
    Cancelled,
}

impl EventStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected) | (Self::Approved, Self::Cancelled)
        )
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Determines who may decide membership requests for a camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MemberApprovalMode {
    /// Only camp managers decide.
    #[default]
    ManagerOnly,
    /// Any approved camp member decides.
    AllMembers,
}

impl MemberApprovalMode {
    /// Converts this mode to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ManagerOnly => "manager_only",
            Self::AllMembers => "all_members",
        }
    }
}

impl FromStr for MemberApprovalMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager_only" => Ok(Self::ManagerOnly),
            "all_members" => Ok(Self::AllMembers),
            _ => Err(DomainError::InvalidApprovalMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for MemberApprovalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the two leadership roles available at every scope level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadershipRole {
    /// Primary lead.
    Lead,
    /// Backup lead.
    BackupLead,
}

impl LeadershipRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::BackupLead => "backup_lead",
        }
    }

    /// The other role at the same scope, for mutual-exclusion checks.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Lead => Self::BackupLead,
            Self::BackupLead => Self::Lead,
        }
    }
}

impl FromStr for LeadershipRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead" => Ok(Self::Lead),
            "backup_lead" => Ok(Self::BackupLead),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeadershipRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The hierarchy level a leadership slot or operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    Camp,
    Cluster,
    Team,
}

impl ScopeKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Camp => "camp",
            Self::Cluster => "cluster",
            Self::Team => "team",
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies the entity whose leadership slots an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadershipScope {
    /// A camp's lead/backup-lead pair.
    Camp(i64),
    /// A cluster's lead/backup-lead pair.
    Cluster(i64),
    /// A team's lead/backup-lead pair.
    Team(i64),
}

impl LeadershipScope {
    /// The hierarchy level of this scope.
    #[must_use]
    pub const fn kind(&self) -> ScopeKind {
        match self {
            Self::Camp(_) => ScopeKind::Camp,
            Self::Cluster(_) => ScopeKind::Cluster,
            Self::Team(_) => ScopeKind::Team,
        }
    }

    /// The identifier of the scoped entity.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Camp(id) | Self::Cluster(id) | Self::Team(id) => *id,
        }
    }
}

impl std::fmt::Display for LeadershipScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// The lead/backup-lead slot pair carried by every Camp, Cluster, and Team.
///
/// A slot value must be null whenever its enable flag is false; the
/// hierarchy update paths clear the value in the same write that disables
/// the flag. Slot values are only ever written through the leadership
/// assignment path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LeadershipSlots {
    /// Whether the lead role is enabled at this scope.
    pub enable_lead: bool,
    /// Whether the backup-lead role is enabled at this scope.
    pub enable_backup_lead: bool,
    /// The current lead, if any.
    pub lead_id: Option<i64>,
    /// The current backup lead, if any.
    pub backup_lead_id: Option<i64>,
}

impl LeadershipSlots {
    /// Whether the given role is enabled at this scope.
    #[must_use]
    pub const fn is_enabled(&self, role: LeadershipRole) -> bool {
        match role {
            LeadershipRole::Lead => self.enable_lead,
            LeadershipRole::BackupLead => self.enable_backup_lead,
        }
    }

    /// The current holder of the given role's slot.
    #[must_use]
    pub const fn holder(&self, role: LeadershipRole) -> Option<i64> {
        match role {
            LeadershipRole::Lead => self.lead_id,
            LeadershipRole::BackupLead => self.backup_lead_id,
        }
    }

    /// Whether the given user holds either slot.
    #[must_use]
    pub fn holds_any(&self, user_id: i64) -> bool {
        self.lead_id == Some(user_id) || self.backup_lead_id == Some(user_id)
    }

    /// Sets the given role's slot value.
    pub const fn set(&mut self, role: LeadershipRole, value: Option<i64>) {
        match role {
            LeadershipRole::Lead => self.lead_id = value,
            LeadershipRole::BackupLead => self.backup_lead_id = value,
        }
    }
}
