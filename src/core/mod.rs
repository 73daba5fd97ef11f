//! In-memory competition snapshot and index helpers.

/// Competition arena with id lookups and document validation.
pub mod competition;
/// Helper index aliases.
pub mod indices;
