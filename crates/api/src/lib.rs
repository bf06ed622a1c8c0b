// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Campstead API boundary.
//!
//! This crate sits between the HTTP server and the engine. It owns the
//! request and response data transfer objects, translates their loosely
//! typed fields (role strings, date strings, scope names) into domain
//! types, delegates to the engine, and translates every engine error into
//! an [`ApiError`] that is safe to serialize to a caller.
//!
//! Authorization itself lives in the engine; this layer never re-derives
//! it. The one piece of authority logic here is [`capabilities`], an
//! advisory read model that tells a UI what the actor could do.

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

pub mod capabilities;
mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
