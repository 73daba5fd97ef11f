//! Pure derivations over a round: ranking, naming, lifecycle, advancement and
//! roster reconciliation.

/// Advancement condition evaluator.
pub mod advancement;
/// Engine configuration.
pub mod config;
/// Round lifecycle state.
pub mod lifecycle;
/// Round names and badge labels.
pub mod naming;
/// Ranking and tie assignment.
pub mod ranking;
/// Next-qualifying and roster mismatch checks.
pub mod reconcile;
