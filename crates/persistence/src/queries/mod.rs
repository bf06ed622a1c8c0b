// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side persistence functions.
//!
//! Every function takes a `&mut SqliteConnection` so callers can compose
//! multiple reads and writes inside a single transaction.

pub mod camps;
pub mod events;
pub mod members;
pub mod users;

pub use camps::{
    get_camp, get_camp_opt, get_cluster, get_cluster_opt, get_team, get_team_opt,
    list_camps, list_clusters_for_camp, list_teams_for_cluster,
};
pub use events::{
    get_association_by_id, get_association_by_id_opt, get_association_opt, get_event,
    get_event_opt, get_registration_opt, list_associations_for_camp, list_associations_for_event,
    list_events_by_status, list_pending_associations, list_registrations_for_event,
};
pub use members::{
    get_membership_by_id, get_membership_by_id_opt, get_membership_opt, get_team_member_opt,
    list_members_by_status, list_memberships_for_user, list_team_members,
};
pub use users::{get_user, get_user_opt, get_users_by_ids};
