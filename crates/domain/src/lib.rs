// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
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

mod capability;
mod entities;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use capability::{Actor, Capability, authorize};
pub use entities::{
    Association, Camp, CampAmenities, Cluster, Event, EventContacts, EventOptions,
    EventRegistration, Membership, Team, TeamMembership, UserRef,
};
pub use error::DomainError;
pub use types::{
    AssociationStatus, CampRole, EventStatus, GlobalRole, LeadershipRole, LeadershipScope,
    LeadershipSlots, MemberApprovalMode, MembershipStatus, ScopeKind,
};
pub use validation::{
    validate_capacity, validate_event_dates, validate_name, validate_slot_flag_consistency,
    violates_mutual_exclusion,
};
