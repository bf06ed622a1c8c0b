// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Campstead.
//!
//! This crate provides `SQLite` persistence for the camp hierarchy,
//! rosters, events, and approval workflows. It is built on Diesel with
//! embedded migrations.
//!
//! ## Layout
//!
//! - [`queries`] — read-side functions taking `&mut SqliteConnection`
//! - [`mutations`] — write-side functions, including the compare-and-set
//!   updates used by the approval and leadership workflows
//! - [`Persistence`] — connection lifecycle and transaction boundaries
//!
//! Query and mutation functions never open their own transactions; the
//! engine composes them inside [`Persistence::immediate_transaction`] so
//! every workflow's precondition re-check and write land atomically.
//!
//! ## Testing
//!
//! Standard tests run against unique shared in-memory databases. Each
//! call to [`Persistence::new_in_memory`] receives a fresh database via
//! an atomic counter, so tests are isolated and deterministic.

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

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod data_models;
mod diesel_schema;
mod error;
pub mod mutations;
pub mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter owning the `SQLite` connection.
///
/// Construction runs migrations and verifies foreign key enforcement.
/// Reads and writes go through [`Self::connection`] or
/// [`Self::immediate_transaction`] with the functions in [`queries`]
/// and [`mutations`].
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Returns the underlying connection for read-only composition.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Runs a closure inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// Workflows that re-check a precondition before writing must run
    /// under an immediate transaction so the write lock is taken up
    /// front and the re-check cannot race another writer.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or the transaction error if commit
    /// or rollback fails.
    pub fn immediate_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, E>,
        E: From<diesel::result::Error>,
    {
        self.conn.immediate_transaction(f)
    }
}
