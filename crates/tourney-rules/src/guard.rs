//! Referential guard, run before any delete takes effect.
//!
//! Events, divisions and squads are guarded. Each check looks for dependents
//! first and then for the at-least-one rule, so a blocked delete names the
//! dependent whenever there is one. Pots, brackets and eliminators have no
//! consumers and are always deletable; lanes go with their squad.

use tourney_types::{Division, EntityId, EntityKind, Event, Squad, TournamentSnapshot};
use tracing::debug;

use crate::error::DeleteBlocked;

fn side_game_referencing(
    snapshot: &TournamentSnapshot,
    refers: impl Fn(&EntityId, Option<&EntityId>) -> bool,
) -> Option<EntityKind> {
    if snapshot
        .pots
        .iter()
        .any(|p| refers(&p.squad_id, p.div_id.as_ref()))
    {
        return Some(EntityKind::Pot);
    }
    if snapshot
        .brackets
        .iter()
        .any(|b| refers(&b.squad_id, b.div_id.as_ref()))
    {
        return Some(EntityKind::Bracket);
    }
    if snapshot
        .eliminators
        .iter()
        .any(|e| refers(&e.squad_id, e.div_id.as_ref()))
    {
        return Some(EntityKind::Eliminator);
    }
    None
}

fn blocked(err: DeleteBlocked) -> Result<(), DeleteBlocked> {
    debug!(reason = %err, "delete blocked");
    Err(err)
}

/// An event is blocked while any squad belongs to it, or if it is the last event.
pub fn can_delete_event(event: &Event, snapshot: &TournamentSnapshot) -> Result<(), DeleteBlocked> {
    if snapshot.squads.iter().any(|s| s.event_id == event.id) {
        return blocked(DeleteBlocked::InUse {
            kind: EntityKind::Event,
            name: event.name.clone(),
            dependent: EntityKind::Squad,
        });
    }
    if snapshot.events.len() <= 1 {
        return blocked(DeleteBlocked::LastRemaining {
            kind: EntityKind::Event,
            name: event.name.clone(),
        });
    }
    Ok(())
}

/// A division is blocked while any pot, bracket or eliminator names it, or if
/// it is the last division.
pub fn can_delete_division(
    division: &Division,
    snapshot: &TournamentSnapshot,
) -> Result<(), DeleteBlocked> {
    if let Some(dependent) =
        side_game_referencing(snapshot, |_, div_id| div_id == Some(&division.id))
    {
        return blocked(DeleteBlocked::InUse {
            kind: EntityKind::Division,
            name: division.name.clone(),
            dependent,
        });
    }
    if snapshot.divisions.len() <= 1 {
        return blocked(DeleteBlocked::LastRemaining {
            kind: EntityKind::Division,
            name: division.name.clone(),
        });
    }
    Ok(())
}

/// A squad is blocked while any pot, bracket or eliminator runs in it, or if
/// it is the last squad. Its lanes never block.
pub fn can_delete_squad(squad: &Squad, snapshot: &TournamentSnapshot) -> Result<(), DeleteBlocked> {
    if let Some(dependent) = side_game_referencing(snapshot, |squad_id, _| squad_id == &squad.id) {
        return blocked(DeleteBlocked::InUse {
            kind: EntityKind::Squad,
            name: squad.name.clone(),
            dependent,
        });
    }
    if snapshot.squads.len() <= 1 {
        return blocked(DeleteBlocked::LastRemaining {
            kind: EntityKind::Squad,
            name: squad.name.clone(),
        });
    }
    Ok(())
}
