//! Consistency rules for a tournament structure.
//!
//! Everything here is a pure function over records from `tourney-types`:
//! validators and the duplicate scan fill in field errors, cascades and the
//! lane allocator compute updated dependent collections, the guard decides
//! whether a delete may proceed, and summaries roll field errors up per group.

mod cascade;
mod draft;
mod duplicates;
mod error;
mod guard;
mod lanes;
mod summary;
mod validators;

pub use cascade::{cascade_event_games, cascade_tournament_dates};
pub use draft::{Draft, SideGame, validate_draft};
pub use error::DeleteBlocked;
pub use guard::{can_delete_division, can_delete_event, can_delete_squad};
pub use lanes::{is_valid_geometry, lanes_for, regenerate_lanes, without_squad};
pub use summary::{GroupSummaries, summarize, summarize_tournament};
pub use validators::side_games::SideGameContext;
pub use validators::validate_structure;
