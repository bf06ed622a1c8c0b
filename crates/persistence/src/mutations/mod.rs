// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side persistence functions.
//!
//! Every function takes a `&mut SqliteConnection` so callers can compose
//! multiple reads and writes inside a single transaction. Status decisions
//! and leadership slot claims are compare-and-set updates: the `WHERE`
//! clause re-checks the precondition and the returned row count tells the
//! caller whether it still held.

pub mod camps;
pub mod events;
pub mod members;
pub mod users;

pub use camps::{
    CampChanges, ClusterChanges, TeamChanges, claim_camp_slot, claim_cluster_slot,
    claim_team_slot, clear_camp_slot, clear_cluster_slot, clear_team_slot, delete_camp,
    delete_cluster, delete_team, insert_camp, insert_cluster, insert_team, update_camp,
    update_cluster, update_team,
};
pub use events::{
    EventChanges, decide_association, delete_association, delete_registration, insert_association,
    insert_event, insert_registration, set_association_location, set_event_status, update_event,
    update_registration,
};
pub use members::{
    decide_membership, delete_membership, delete_team_member, insert_membership,
    insert_team_member, set_membership_role,
};
pub use users::upsert_user;
