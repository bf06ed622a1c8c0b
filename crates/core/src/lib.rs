// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Campstead organization and approval engine.
//!
//! Operations are grouped by concern:
//!
//! - [`hierarchy`] — camp / cluster / team structure and cascades
//! - [`leadership`] — the lead/backup-lead slot assignment path
//! - [`roster`] — membership admission requests, roles, team rosters
//! - [`approval`] — the three approval workflows (membership admission,
//!   camp/event association, event publication) plus event management
//! - [`registration`] — attendee registrations for approved events
//! - [`directory`] — the identity directory sync upsert
//! - [`views`] — read models with leadership slots resolved to users
//!
//! Every mutating operation resolves the actor, authorizes through
//! [`campstead_domain::authorize`], re-checks its preconditions, and
//! writes inside one immediate transaction. Decisions and empty-slot
//! claims are compare-and-set against the store, so a racing writer
//! loses cleanly instead of double-deciding.

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
#![allow(clippy::multiple_crate_versions)]

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub mod approval;
pub mod directory;
mod error;
pub mod hierarchy;
pub mod leadership;
pub mod registration;
pub mod roster;
pub mod views;

mod actor;

#[cfg(test)]
mod tests;

pub use approval::Decision;
pub use error::CoreError;

/// The current UTC instant as an ISO-8601 timestamp string, matching the
/// storage format used throughout the schema.
#[must_use]
pub(crate) fn now_timestamp() -> String {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}
