//! Per-record field validators and the whole-structure batch pass.
//!
//! Each sub-module covers one record type and exposes two functions:
//! - `validate(record, ctx) -> (record, first_error)`: field checks only,
//!   never looking at siblings.
//! - `check(record, siblings, ctx) -> (record, first_error)`: `validate` plus the
//!   order-scoped duplicate scan from [`crate::duplicates`].
//!
//! Validators only ever rewrite a record's `errors`; structural data passes
//! through untouched. The first error is the violation on the earliest field
//! in the record's check order, which is also what a group summary reports.
//!
//! [`validate_structure`] runs every `check` over every collection and is the
//! "recompute everything" step after each edit.

pub mod division;
pub mod event;
pub mod side_games;
pub mod squad;
pub mod tournament;

use rust_decimal::Decimal;
use tourney_types::{FieldViolation, ReferenceData, TournamentSnapshot};

use side_games::SideGameContext;
use squad::SquadContext;
use tournament::TournamentContext;

/// Upper bound for every monetary field.
pub const MONEY_MAX: Decimal = Decimal::from_parts(999_999, 0, 0, false, 0);

pub(crate) fn required_text(label: &'static str, value: &str) -> Result<(), FieldViolation> {
    if value.trim().is_empty() {
        return Err(FieldViolation::Required { label });
    }
    Ok(())
}

pub(crate) fn int_in_range(
    label: &'static str,
    value: i32,
    min: i32,
    max: i32,
) -> Result<(), FieldViolation> {
    if value < min || value > max {
        return Err(FieldViolation::out_of_range(label, min, max));
    }
    Ok(())
}

pub(crate) fn money_in_range(
    label: &'static str,
    value: Decimal,
    min: Decimal,
) -> Result<(), FieldViolation> {
    if value < min || value > MONEY_MAX {
        return Err(FieldViolation::out_of_range(label, min, MONEY_MAX));
    }
    Ok(())
}

/// Re-run every validator and duplicate scan over the whole structure.
///
/// Collections are processed in save-group order. Each record is checked
/// against the pre-pass values of its parents and siblings; since validation
/// only touches `errors`, the result does not depend on processing order.
/// Lanes have no field errors and pass through unchanged.
pub fn validate_structure(
    snapshot: &TournamentSnapshot,
    refs: &ReferenceData,
) -> TournamentSnapshot {
    let tournament_ctx = TournamentContext { bowls: &refs.bowls };
    let (tournament, _) = tournament::validate(&snapshot.tournament, &tournament_ctx);

    let events = snapshot
        .events
        .iter()
        .map(|e| event::check(e, &snapshot.events).0)
        .collect();

    let divisions = snapshot
        .divisions
        .iter()
        .map(|d| division::check(d, &snapshot.divisions).0)
        .collect();

    let squads = snapshot
        .squads
        .iter()
        .map(|s| {
            let ctx = SquadContext::for_squad(snapshot, s);
            squad::check(s, &snapshot.squads, &ctx).0
        })
        .collect();

    let pots = snapshot
        .pots
        .iter()
        .map(|p| {
            let ctx = SideGameContext::for_squad(snapshot, &p.squad_id);
            side_games::check_pot(p, &snapshot.pots, &ctx).0
        })
        .collect();

    let brackets = snapshot
        .brackets
        .iter()
        .map(|b| {
            let ctx = SideGameContext::for_squad(snapshot, &b.squad_id);
            side_games::check_bracket(b, &snapshot.brackets, &ctx).0
        })
        .collect();

    let eliminators = snapshot
        .eliminators
        .iter()
        .map(|e| {
            let ctx = SideGameContext::for_squad(snapshot, &e.squad_id);
            side_games::check_eliminator(e, &snapshot.eliminators, &ctx).0
        })
        .collect();

    TournamentSnapshot {
        tournament,
        events,
        divisions,
        squads,
        lanes: snapshot.lanes.clone(),
        pots,
        brackets,
        eliminators,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use tourney_types::{EventField, Sibling, SquadField};

    #[test]
    fn clean_structure_has_no_errors() {
        let checked = validate_structure(&snapshot(), &refs());
        assert!(checked.tournament.errors.is_empty());
        assert!(checked.events.iter().all(|e| e.first_error().is_none()));
        assert!(checked.squads.iter().all(|s| s.first_error().is_none()));
    }

    #[test]
    fn structural_data_passes_through_untouched() {
        let mut s = snapshot();
        s.events[0].games = 0;
        let checked = validate_structure(&s, &refs());
        assert_eq!(checked.events[0].games, 0);
        assert!(checked.events[0].errors.has(EventField::Games));
    }

    #[test]
    fn squad_games_checked_against_owning_event() {
        let mut s = snapshot();
        s.events[0].games = 3;
        let checked = validate_structure(&s, &refs());
        assert_eq!(
            checked.squads[0].errors.get(SquadField::Games),
            Some(&FieldViolation::GamesExceedEvent {
                games: 6,
                event_games: 3
            })
        );
    }

    #[test]
    fn previous_errors_are_cleared_by_a_fixing_pass() {
        let mut s = snapshot();
        s.events[0].name = String::new();
        let broken = validate_structure(&s, &refs());
        assert!(broken.events[0].errors.has(EventField::Name));

        let mut fixed = broken.clone();
        fixed.events[0].name = "Singles".into();
        let checked = validate_structure(&fixed, &refs());
        assert!(checked.events[0].errors.is_empty());
    }
}
