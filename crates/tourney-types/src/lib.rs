pub mod error;
pub mod field_errors;
pub mod id;
pub mod parse;
pub mod side_game;
pub mod snapshot;
pub mod structure;
pub mod violation;

pub use error::DomainError;
pub use field_errors::FieldErrors;
pub use id::{EntityId, EntityKind, IdGenerator, SequentialIds, UuidIds};
pub use parse::{parse_money, parse_squad_time};
pub use side_game::{
    Bracket, BracketField, Eliminator, EliminatorField, Pot, PotField, PotType,
};
pub use snapshot::{ErrorGroup, ReferenceData, Sibling, TournamentSnapshot, next_sort_order, sorted};
pub use structure::{
    Division, DivisionField, Event, EventField, HandicapBasis, Lane, Squad, SquadField,
    Tournament, TournamentField,
};
pub use violation::{FieldViolation, ViolationKind};
