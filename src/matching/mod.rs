//! Entity resolution across independently-formatted sources.
//!
//! - `canonical`: team-name canonical forms
//! - `fuzzy`: similarity scoring and best-candidate selection
//! - `schema`: date/home/away column discovery for league archives
//! - `anchor`: archive anchors and recent-match extraction
//! - `display`: seed cleanup and display names

pub mod anchor;
pub mod canonical;
pub mod display;
pub mod fuzzy;
pub mod schema;

pub use anchor::{candidate_pool, resolve_anchor, resolve_recent_matches, AnchorOverride};
pub use canonical::{canonicalize, CanonicalName};
pub use display::{estimate_team_position, pick_display_name, teams_from_base_key};
pub use fuzzy::{best_match, similarity, AnchorMatch};
pub use schema::{resolve_schema, ArchiveSchema, SchemaConfidence};
