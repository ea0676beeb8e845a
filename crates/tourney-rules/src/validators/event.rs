//! Event validation.
//!
//! Money fields are exact decimals. The LPOX check compares the sum of
//! lineage, prize fund, other and expenses to the entry fee with plain
//! equality: a one-cent mismatch is a violation.

use rust_decimal::Decimal;
use tourney_types::{Event, EventField, FieldViolation};

use super::{int_in_range, money_in_range, required_text};
use crate::duplicates;

pub const MIN_TEAM_SIZE: i32 = 1;
pub const MAX_TEAM_SIZE: i32 = 5;
pub const MIN_GAMES: i32 = 1;
pub const MAX_GAMES: i32 = 99;

pub fn validate(event: &Event) -> (Event, Option<FieldViolation>) {
    let mut out = event.clone();
    let errors = &mut out.errors;

    errors.record(EventField::Name, required_text("Event name", &event.name));
    errors.record(
        EventField::TeamSize,
        int_in_range("Team size", event.team_size, MIN_TEAM_SIZE, MAX_TEAM_SIZE),
    );
    errors.record(
        EventField::Games,
        int_in_range("Games", event.games, MIN_GAMES, MAX_GAMES),
    );
    errors.record(
        EventField::AddedMoney,
        money_in_range("Added money", event.added_money, Decimal::ZERO),
    );
    errors.record(
        EventField::EntryFee,
        money_in_range("Entry fee", event.entry_fee, Decimal::ZERO),
    );
    errors.record(
        EventField::Lineage,
        money_in_range("Lineage", event.lineage, Decimal::ZERO),
    );
    errors.record(
        EventField::PrizeFund,
        money_in_range("Prize fund", event.prize_fund, Decimal::ZERO),
    );
    errors.record(
        EventField::Other,
        money_in_range("Other", event.other, Decimal::ZERO),
    );
    errors.record(
        EventField::Expenses,
        money_in_range("Expenses", event.expenses, Decimal::ZERO),
    );

    let lpox = event.lpox();
    let lpox_check = if lpox == event.entry_fee {
        Ok(())
    } else {
        Err(FieldViolation::LpoxMismatch {
            entry_fee: event.entry_fee,
            lpox,
        })
    };
    errors.record(EventField::Lpox, lpox_check);

    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

/// [`validate`] plus the event-name uniqueness scan.
pub fn check(event: &Event, siblings: &[Event]) -> (Event, Option<FieldViolation>) {
    let (mut out, _) = validate(event);
    if !out.errors.has(EventField::Name) && duplicates::duplicate_name(siblings, event, |e| &e.name)
    {
        out.errors.set(
            EventField::Name,
            FieldViolation::Duplicate {
                label: "Event name",
                value: event.name.trim().to_string(),
            },
        );
    }
    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::fixtures::*;
    use tourney_types::ViolationKind;

    #[test]
    fn lpox_equal_to_entry_fee_passes() {
        let e = event(1, 1, "Singles");
        assert_eq!(e.lpox(), Decimal::new(80, 0));
        let (checked, first) = validate(&e);
        assert!(first.is_none());
        assert!(!checked.errors.has(EventField::Lpox));
    }

    #[test]
    fn lineage_bump_breaks_lpox() {
        let mut e = event(1, 1, "Singles");
        e.lineage = Decimal::new(19, 0);
        assert_eq!(e.lpox(), Decimal::new(81, 0));
        let (checked, first) = validate(&e);
        assert_eq!(
            first,
            Some(FieldViolation::LpoxMismatch {
                entry_fee: Decimal::new(80, 0),
                lpox: Decimal::new(81, 0),
            })
        );
        assert!(checked.errors.has(EventField::Lpox));
    }

    #[test]
    fn lpox_comparison_is_exact_to_the_cent() {
        let mut e = event(1, 1, "Singles");
        e.expenses = Decimal::new(501, 2);
        let (_, first) = validate(&e);
        assert!(matches!(first, Some(FieldViolation::LpoxMismatch { .. })));
    }

    #[test]
    fn range_checks_cover_team_size_games_and_money() {
        let mut e = event(1, 1, "Singles");
        e.team_size = 6;
        e.games = 100;
        e.added_money = Decimal::new(1_000_000, 0);
        let (checked, first) = validate(&e);
        assert_eq!(first, Some(FieldViolation::out_of_range("Team size", 1, 5)));
        assert!(checked.errors.has(EventField::Games));
        assert_eq!(
            checked.errors.get(EventField::AddedMoney).map(FieldViolation::kind),
            Some(ViolationKind::RangeViolation)
        );
    }

    #[test]
    fn negative_money_is_out_of_range() {
        let mut e = event(1, 1, "Singles");
        e.other = Decimal::new(-2, 0);
        e.lineage = Decimal::new(22, 0);
        let (checked, _) = validate(&e);
        assert!(checked.errors.has(EventField::Other));
        assert!(!checked.errors.has(EventField::Lpox));
    }

    #[test]
    fn duplicate_name_flags_later_event_only() {
        let events = vec![event(1, 1, "Singles"), event(2, 2, " singles ")];
        let (first_event, _) = check(&events[0], &events);
        let (second_event, err) = check(&events[1], &events);
        assert!(first_event.errors.is_empty());
        assert_eq!(
            err,
            Some(FieldViolation::Duplicate {
                label: "Event name",
                value: "singles".into()
            })
        );
        assert!(second_event.errors.has(EventField::Name));
    }
}
