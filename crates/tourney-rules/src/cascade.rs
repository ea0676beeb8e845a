//! Cross-collection cascades.
//!
//! Each cascade takes the changed record plus the dependent collection and
//! returns the updated collection. Cascades run once per edit and never
//! trigger each other.

use tourney_types::{Event, Squad, Tournament};
use tracing::debug;

/// Push an event's new game count down to its squads.
///
/// A squad follows the event only when it was still tracking the event's
/// previous count (or the previous count was 0). Squads whose games were set
/// to something else are left alone.
pub fn cascade_event_games(event: &Event, previous_games: i32, squads: &[Squad]) -> Vec<Squad> {
    let mut touched = 0usize;
    let updated = squads
        .iter()
        .map(|squad| {
            let tracks_event = squad.games == previous_games || previous_games == 0;
            if squad.event_id == event.id && tracks_event && squad.games != event.games {
                touched += 1;
                Squad {
                    games: event.games,
                    ..squad.clone()
                }
            } else {
                squad.clone()
            }
        })
        .collect();
    debug!(
        event = %event.id,
        previous_games,
        games = event.games,
        touched,
        "cascaded event games to squads"
    );
    updated
}

/// Pull squad dates into the tournament's date range.
///
/// Unset dates take the start date; dates before the start clamp to it,
/// dates after the end clamp to the end. Without a start date, or with the
/// end before the start, there is no usable range and squads are untouched.
pub fn cascade_tournament_dates(tournament: &Tournament, squads: &[Squad]) -> Vec<Squad> {
    let Some(start) = tournament.start_date else {
        return squads.to_vec();
    };
    if tournament.end_date.is_some_and(|end| end < start) {
        return squads.to_vec();
    }

    let mut touched = 0usize;
    let updated = squads
        .iter()
        .map(|squad| {
            let clamped = match (squad.squad_date, tournament.end_date) {
                (None, _) => start,
                (Some(day), _) if day < start => start,
                (Some(day), Some(end)) if day > end => end,
                (Some(day), _) => day,
            };
            if squad.squad_date == Some(clamped) {
                squad.clone()
            } else {
                touched += 1;
                Squad {
                    squad_date: Some(clamped),
                    ..squad.clone()
                }
            }
        })
        .collect();
    debug!(tournament = %tournament.id, touched, "cascaded tournament dates to squads");
    updated
}
