//! Order-scoped sibling uniqueness.
//!
//! Siblings are scanned in ascending sort order and the scan stops at the
//! first sibling whose sort order is not below the candidate's. Only earlier
//! siblings are ever compared, so of two records sharing a key only the later
//! one is reported. Which record carries the visible error depends on this,
//! so the scan must not be made symmetric.

use tourney_types::{Bracket, Eliminator, Pot, Sibling, Squad, sorted};

/// True when an earlier sibling (by sort order) shares the candidate's key.
///
/// A `None` key never matches anything, including another `None`. The
/// candidate itself is skipped by id.
pub fn is_duplicate<T, K, F>(siblings: &[T], candidate: &T, key: F) -> bool
where
    T: Sibling,
    K: PartialEq,
    F: Fn(&T) -> Option<K>,
{
    let Some(wanted) = key(candidate) else {
        return false;
    };
    for sibling in sorted(siblings) {
        if sibling.sort_order() >= candidate.sort_order() {
            return false;
        }
        if sibling.id() == candidate.id() {
            continue;
        }
        if key(sibling).as_ref() == Some(&wanted) {
            return true;
        }
    }
    false
}

/// Names compare trimmed and case-folded. Blank names never collide.
pub fn name_key(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

pub fn duplicate_name<T, F>(siblings: &[T], candidate: &T, name: F) -> bool
where
    T: Sibling,
    F: Fn(&T) -> &String,
{
    is_duplicate(siblings, candidate, |s| name_key(name(s)))
}

/// Exact `(date, time)` match; squads missing either part never collide.
pub fn duplicate_date_time(squads: &[Squad], candidate: &Squad) -> bool {
    is_duplicate(squads, candidate, |s| match (s.squad_date, s.squad_time) {
        (Some(day), Some(time)) => Some((day, time)),
        _ => None,
    })
}

/// One pot of each type per division.
pub fn duplicate_pot(pots: &[Pot], candidate: &Pot) -> bool {
    is_duplicate(pots, candidate, |p| p.div_id.clone().map(|d| (p.pot_type, d)))
}

/// One bracket per division per starting game.
pub fn duplicate_bracket(brackets: &[Bracket], candidate: &Bracket) -> bool {
    is_duplicate(brackets, candidate, |b| b.div_id.clone().map(|d| (d, b.start)))
}

/// One eliminator per division per `(start, games)` run.
pub fn duplicate_eliminator(eliminators: &[Eliminator], candidate: &Eliminator) -> bool {
    is_duplicate(eliminators, candidate, |e| {
        e.div_id.clone().map(|d| (d, e.start, e.games))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::fixtures::*;
    use tourney_types::{EntityKind, Event};

    fn named(n: u128, sort_order: u32, name: &str) -> Event {
        Event::new(id(EntityKind::Event, n), sort_order, name)
    }

    #[test]
    fn only_later_sibling_is_duplicate() {
        let events = vec![named(1, 1, "Doubles"), named(2, 2, "doubles")];
        assert!(!duplicate_name(&events, &events[0], |e| &e.name));
        assert!(duplicate_name(&events, &events[1], |e| &e.name));
    }

    #[test]
    fn scan_follows_sort_order_not_vec_position() {
        let events = vec![named(2, 2, "Team"), named(1, 1, "Team")];
        assert!(duplicate_name(&events, &events[0], |e| &e.name));
        assert!(!duplicate_name(&events, &events[1], |e| &e.name));
    }

    #[test]
    fn removing_the_earlier_sibling_clears_the_later() {
        let events = vec![named(1, 1, "Singles"), named(2, 2, "Singles")];
        assert!(duplicate_name(&events, &events[1], |e| &e.name));
        let remaining = vec![events[1].clone()];
        assert!(!duplicate_name(&remaining, &remaining[0], |e| &e.name));
    }

    #[test]
    fn blank_names_never_collide() {
        let events = vec![named(1, 1, " "), named(2, 2, "")];
        assert!(!duplicate_name(&events, &events[1], |e| &e.name));
    }

    #[test]
    fn date_time_requires_both_parts_to_match() {
        let time = tourney_types::parse_squad_time("02:00 PM").unwrap();
        let mut a = squad(1, 1, 1, "A");
        let mut b = squad(2, 1, 2, "B");
        a.squad_time = Some(time);
        b.squad_time = Some(time);
        b.squad_date = Some(date(2023, 9, 17));
        let squads = vec![a.clone(), b.clone()];
        assert!(!duplicate_date_time(&squads, &b));

        b.squad_date = a.squad_date;
        let squads = vec![a, b.clone()];
        assert!(duplicate_date_time(&squads, &b));
    }

    #[test]
    fn draft_with_next_sort_order_scans_every_sibling() {
        use crate::validators::side_games::fixtures::pot;
        use tourney_types::PotType;

        let existing = vec![pot(1, 1, PotType::Series, 1), pot(2, 2, PotType::Game, 1)];
        let mut draft = pot(0, 0, PotType::Series, 1);
        draft.sort_order = tourney_types::next_sort_order(&existing);
        assert!(duplicate_pot(&existing, &draft));
    }
}
