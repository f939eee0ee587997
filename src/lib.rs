//! # Announcements
//!
//! `announcements` is a small HTTP service that stores announcement records in
//! `PostgreSQL` and exposes create, read, update and delete over JSON.
//!
//! ## Data Model
//!
//! Each announcement has a storage-assigned integer `id`, a required `header`,
//! optional `description` and `owner`, and a `created_at` timestamp set by the
//! database on insert. Deletes are hard deletes.
//!
//! ## Request Flow
//!
//! 1. The router matches `/announcements/` (POST) or `/announcements/{id}`
//!    (GET, PATCH, DELETE).
//! 2. The payload is validated against the create or patch shape before any
//!    database access.
//! 3. The handler opens a scoped connection or transaction, runs one row
//!    operation and commits.
//! 4. Failures are rendered uniformly as `{"status": "error", "reason": ...}`.
//!
//! The schema is bootstrapped at startup from `sql/schema.sql`.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
