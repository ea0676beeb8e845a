use crate::id::EntityId;
use crate::side_game::{Bracket, Eliminator, Pot};
use crate::structure::{Division, Event, Lane, Squad, Tournament};
use crate::violation::FieldViolation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A record that lives in an ordered collection of siblings.
pub trait Sibling {
    fn id(&self) -> &EntityId;
    /// Assigned once at creation; never reassigned.
    fn sort_order(&self) -> u32;
    /// Name used when the record is reported in a group summary.
    fn display_name(&self) -> String;
    /// Violation on the earliest field in check order, if any.
    fn first_error(&self) -> Option<&FieldViolation>;
}

macro_rules! impl_sibling {
    ($ty:ty, |$s:ident| $name:expr) => {
        impl Sibling for $ty {
            fn id(&self) -> &EntityId {
                &self.id
            }

            fn sort_order(&self) -> u32 {
                self.sort_order
            }

            fn display_name(&self) -> String {
                let $s = self;
                $name
            }

            fn first_error(&self) -> Option<&FieldViolation> {
                self.errors.first().map(|(_, v)| v)
            }
        }
    };
}

impl_sibling!(Event, |e| e.name.clone());
impl_sibling!(Division, |d| d.name.clone());
impl_sibling!(Squad, |s| s.name.clone());
impl_sibling!(Pot, |p| format!("{} Pot", p.pot_type));
impl_sibling!(Bracket, |b| format!("Bracket at game {}", b.start));
impl_sibling!(Eliminator, |e| format!(
    "Eliminator at game {} ({} games)",
    e.start, e.games
));

/// Siblings in ascending sort order.
pub fn sorted<T: Sibling>(items: &[T]) -> Vec<&T> {
    let mut refs: Vec<&T> = items.iter().collect();
    refs.sort_by_key(|s| s.sort_order());
    refs
}

/// Sort order for a newly added sibling: one past the current maximum, or 1.
pub fn next_sort_order<T: Sibling>(items: &[T]) -> u32 {
    items.iter().map(Sibling::sort_order).max().map_or(1, |max| max + 1)
}

/// Persistence groups, in the order a save writes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorGroup {
    Tournament,
    Events,
    Divisions,
    Squads,
    Lanes,
    Pots,
    Brackets,
    Eliminators,
}

impl ErrorGroup {
    pub const ALL: [ErrorGroup; 8] = [
        Self::Tournament,
        Self::Events,
        Self::Divisions,
        Self::Squads,
        Self::Lanes,
        Self::Pots,
        Self::Brackets,
        Self::Eliminators,
    ];
}

impl fmt::Display for ErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tournament => "Tournament",
            Self::Events => "Events",
            Self::Divisions => "Divisions",
            Self::Squads => "Squads",
            Self::Lanes => "Lanes",
            Self::Pots => "Pots",
            Self::Brackets => "Brackets",
            Self::Eliminators => "Eliminators",
        };
        f.write_str(name)
    }
}

/// Read-only selectable parents supplied from outside the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub bowls: Vec<EntityId>,
}

/// In-memory entity store: the tournament and every collection hanging off it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub tournament: Tournament,
    pub events: Vec<Event>,
    pub divisions: Vec<Division>,
    pub squads: Vec<Squad>,
    pub lanes: Vec<Lane>,
    pub pots: Vec<Pot>,
    pub brackets: Vec<Bracket>,
    pub eliminators: Vec<Eliminator>,
}

impl TournamentSnapshot {
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            events: Vec::new(),
            divisions: Vec::new(),
            squads: Vec::new(),
            lanes: Vec::new(),
            pots: Vec::new(),
            brackets: Vec::new(),
            eliminators: Vec::new(),
        }
    }

    pub fn event(&self, id: &EntityId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn division(&self, id: &EntityId) -> Option<&Division> {
        self.divisions.iter().find(|d| &d.id == id)
    }

    pub fn squad(&self, id: &EntityId) -> Option<&Squad> {
        self.squads.iter().find(|s| &s.id == id)
    }

    pub fn lanes_for<'a>(&'a self, squad_id: &'a EntityId) -> impl Iterator<Item = &'a Lane> {
        self.lanes.iter().filter(move |l| &l.squad_id == squad_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EntityKind;

    fn event(n: u128, sort_order: u32) -> Event {
        Event::new(EntityId::numbered(EntityKind::Event, n), sort_order, format!("Event {n}"))
    }

    #[test]
    fn next_sort_order_is_one_past_max_or_one() {
        assert_eq!(next_sort_order::<Event>(&[]), 1);
        assert_eq!(next_sort_order(&[event(1, 4), event(2, 2)]), 5);
    }

    #[test]
    fn sorted_orders_by_sort_order_not_position() {
        let events = vec![event(1, 3), event(2, 1), event(3, 2)];
        let names: Vec<_> = sorted(&events).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Event 2", "Event 3", "Event 1"]);
    }

    #[test]
    fn snapshot_serializes_without_field_errors() {
        let mut snapshot = TournamentSnapshot::new(Tournament::new(
            EntityId::numbered(EntityKind::Tournament, 1),
            "Summer Classic",
        ));
        let mut e = event(2, 1);
        e.errors.set(
            crate::structure::EventField::Name,
            FieldViolation::Required { label: "Name" },
        );
        snapshot.events.push(e);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["events"][0].get("errors").is_none());

        let back: TournamentSnapshot = serde_json::from_value(json).unwrap();
        assert!(back.events[0].errors.is_empty());
        similar_asserts::assert_eq!(back.events[0].name, "Event 2");
    }
}
