//! Live results and advancement for multi-round, multi-event competitions.
//!
//! Everything here is a pure function of a read-only competition snapshot:
//! attempts reduce to a score, scores rank into a tie-aware order, advancement
//! conditions select who moves on, and adjacent rounds are reconciled against
//! their rosters.
//!
//! # Examples
//!
//! Ranking a round directly:
//! ```
//! use cuberesults::{
//!     engine::ranking::rank,
//!     types::{Direction, Format},
//!     wcif::ResultRecord,
//! };
//!
//! let results = vec![
//!     ResultRecord { person_id: 1, ranking: None, attempts: vec![1200, -1, 1100] },
//!     ResultRecord { person_id: 2, ranking: None, attempts: vec![-1, -1, -1] },
//! ];
//! let ranking = rank(&results, Format::BestOf3, Direction::LowerIsBetter);
//! assert_eq!(ranking.results[0].person_id, 1);
//! assert_eq!(ranking.results[0].best, Some(1100));
//! assert_eq!(ranking.results[1].ranking, None);
//! ```
//!
//! Building views over a whole document:
//! ```
//! use cuberesults::{
//!     core::competition::Competition,
//!     engine::config::EngineConfig,
//!     views::round_view,
//!     wcif::ActivityCode,
//! };
//!
//! let json = r#"{
//!     "id": "Demo2026",
//!     "name": "Demo 2026",
//!     "persons": [
//!         { "registrantId": 1, "name": "Ann", "countryIso2": "GB" },
//!         { "registrantId": 2, "name": "Bo", "countryIso2": "SE" }
//!     ],
//!     "events": [{
//!         "id": "333",
//!         "rounds": [{
//!             "id": "333-r1",
//!             "format": "1",
//!             "advancementCondition": { "type": "ranking", "level": 1 },
//!             "results": [
//!                 { "personId": 1, "attempts": [900] },
//!                 { "personId": 2, "attempts": [800] }
//!             ]
//!         }, {
//!             "id": "333-r2",
//!             "format": "1"
//!         }]
//!     }]
//! }"#;
//!
//! let competition = Competition::from_json(json).expect("valid document");
//! let code: ActivityCode = "333-r1".parse().expect("code");
//! let view = round_view(&competition, &code, &EngineConfig::default()).expect("round");
//! assert_eq!(view.name, "First Round");
//! assert!(view.results[0].advancing);
//! assert_eq!(view.results[0].person_name.as_deref(), Some("Bo"));
//! ```
#![deny(missing_docs)]

/// Attempt encoding, validation and score reduction.
pub mod attempt;
/// Competition snapshot and id indices.
pub mod core;
/// Ranking, naming, lifecycle, advancement and reconciliation.
pub mod engine;
/// Shared primitive types and enums.
pub mod types;
/// Presentation-facing views.
pub mod views;
/// Competition document records.
pub mod wcif;
