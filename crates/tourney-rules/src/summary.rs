//! Group summaries.
//!
//! A group summary names the first record, by sort order, that currently has
//! a field error, and that record's first violation. Summaries are derived
//! state: recompute them from the snapshot after every mutation.

use serde::Serialize;
use tourney_types::{ErrorGroup, Sibling, Tournament, TournamentSnapshot, sorted};

fn format_summary(name: &str, message: &str) -> String {
    format!(": Error in {name} - {message}")
}

/// `": Error in <name> - <message>"` for the first sibling in error, or an
/// empty string when every sibling is clean.
pub fn summarize<T: Sibling>(siblings: &[T]) -> String {
    sorted(siblings)
        .into_iter()
        .find_map(|s| {
            s.first_error()
                .map(|v| format_summary(&s.display_name(), &v.to_string()))
        })
        .unwrap_or_default()
}

pub fn summarize_tournament(tournament: &Tournament) -> String {
    tournament
        .errors
        .first()
        .map(|(_, v)| format_summary(&tournament.name, &v.to_string()))
        .unwrap_or_default()
}

/// One summary per save group. Lanes carry no field errors, so they have none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GroupSummaries {
    pub tournament: String,
    pub events: String,
    pub divisions: String,
    pub squads: String,
    pub pots: String,
    pub brackets: String,
    pub eliminators: String,
}

impl GroupSummaries {
    pub fn from_snapshot(snapshot: &TournamentSnapshot) -> Self {
        Self {
            tournament: summarize_tournament(&snapshot.tournament),
            events: summarize(&snapshot.events),
            divisions: summarize(&snapshot.divisions),
            squads: summarize(&snapshot.squads),
            pots: summarize(&snapshot.pots),
            brackets: summarize(&snapshot.brackets),
            eliminators: summarize(&snapshot.eliminators),
        }
    }

    pub fn get(&self, group: ErrorGroup) -> &str {
        match group {
            ErrorGroup::Tournament => &self.tournament,
            ErrorGroup::Events => &self.events,
            ErrorGroup::Divisions => &self.divisions,
            ErrorGroup::Squads => &self.squads,
            ErrorGroup::Lanes => "",
            ErrorGroup::Pots => &self.pots,
            ErrorGroup::Brackets => &self.brackets,
            ErrorGroup::Eliminators => &self.eliminators,
        }
    }

    /// First group, in save order, whose summary is non-empty.
    pub fn first_failing_group(&self) -> Option<ErrorGroup> {
        ErrorGroup::ALL
            .into_iter()
            .find(|group| !self.get(*group).is_empty())
    }

    pub fn is_clean(&self) -> bool {
        self.first_failing_group().is_none()
    }
}
