//! Lane allocation.
//!
//! A squad's lanes are a pure function of its `(starting_lane, lane_count)`
//! geometry. Regeneration replaces the squad's whole lane set in place: the new
//! set goes where the squad's first lane was (or at the end for a squad with no
//! lanes yet), and lanes of other squads keep their order. Running it twice on
//! an unchanged geometry gives identical output.

use tourney_types::{EntityId, Lane, Squad};
use tracing::debug;

pub const MIN_STARTING_LANE: i32 = 1;
pub const MAX_STARTING_LANE: i32 = 199;
pub const MIN_LANE_COUNT: i32 = 2;
pub const MAX_LANE_COUNT: i32 = 200;

/// Odd starting lane in `[1, 199]` and even lane count in `[2, 200]`.
pub fn is_valid_geometry(starting_lane: i32, lane_count: i32) -> bool {
    (MIN_STARTING_LANE..=MAX_STARTING_LANE).contains(&starting_lane)
        && starting_lane % 2 == 1
        && (MIN_LANE_COUNT..=MAX_LANE_COUNT).contains(&lane_count)
        && lane_count % 2 == 0
}

/// The lanes a squad's geometry produces, or none if the geometry is invalid.
pub fn lanes_for(squad: &Squad) -> Vec<Lane> {
    if !is_valid_geometry(squad.starting_lane, squad.lane_count) {
        return Vec::new();
    }
    (squad.starting_lane..squad.starting_lane + squad.lane_count)
        .map(|lane_number| Lane {
            squad_id: squad.id.clone(),
            lane_number,
            in_use: true,
        })
        .collect()
}

/// All lanes not owned by `squad_id`, order preserved.
pub fn without_squad(squad_id: &EntityId, all_lanes: &[Lane]) -> Vec<Lane> {
    all_lanes
        .iter()
        .filter(|l| &l.squad_id != squad_id)
        .cloned()
        .collect()
}

/// Replace the squad's lanes with the set its current geometry generates.
pub fn regenerate_lanes(squad: &Squad, all_lanes: &[Lane]) -> Vec<Lane> {
    // Every lane before the squad's first one belongs to another squad.
    let at = all_lanes.iter().position(|l| l.squad_id == squad.id);
    let mut lanes = without_squad(&squad.id, all_lanes);
    let generated = lanes_for(squad);
    debug!(
        squad = %squad.id,
        starting_lane = squad.starting_lane,
        lane_count = squad.lane_count,
        generated = generated.len(),
        "regenerated squad lanes"
    );
    match at {
        Some(at) => {
            lanes.splice(at..at, generated);
        }
        None => lanes.extend(generated),
    }
    lanes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::fixtures::*;

    fn other_lanes() -> Vec<Lane> {
        let other = squad(2, 1, 2, "Squad 2");
        lanes_for(&other)
    }

    #[test_log::test]
    fn geometry_29_by_12_yields_lanes_29_through_40() {
        let mut s = squad(1, 1, 1, "Squad 1");
        s.starting_lane = 29;
        s.lane_count = 12;
        let before = other_lanes();

        let lanes = regenerate_lanes(&s, &before);
        let owned: Vec<_> = lanes.iter().filter(|l| l.squad_id == s.id).collect();

        assert_eq!(owned.len(), 12);
        assert_eq!(
            owned.iter().map(|l| l.lane_number).collect::<Vec<_>>(),
            (29..=40).collect::<Vec<_>>()
        );
        assert!(owned.iter().all(|l| l.in_use));
        similar_asserts::assert_eq!(without_squad(&s.id, &lanes), before);
    }

    #[test]
    fn odd_lane_count_clears_the_squads_lanes() {
        let mut s = squad(1, 1, 1, "Squad 1");
        s.starting_lane = 29;
        s.lane_count = 12;
        let lanes = regenerate_lanes(&s, &other_lanes());

        s.lane_count = 13;
        let lanes = regenerate_lanes(&s, &lanes);
        assert_eq!(lanes.iter().filter(|l| l.squad_id == s.id).count(), 0);
        similar_asserts::assert_eq!(lanes, other_lanes());
    }

    #[test]
    fn regeneration_is_idempotent() {
        let mut s = squad(1, 1, 1, "Squad 1");
        s.starting_lane = 29;
        s.lane_count = 12;
        let once = regenerate_lanes(&s, &other_lanes());
        let twice = regenerate_lanes(&s, &once);
        similar_asserts::assert_eq!(once, twice);
    }

    #[test]
    fn regenerated_lanes_keep_their_place() {
        let mut first = squad(1, 1, 1, "Squad 1");
        first.starting_lane = 1;
        first.lane_count = 4;
        let mut lanes = lanes_for(&first);
        lanes.extend(other_lanes());

        similar_asserts::assert_eq!(regenerate_lanes(&first, &lanes), lanes);

        first.starting_lane = 29;
        let moved = regenerate_lanes(&first, &lanes);
        assert_eq!(
            moved.iter().take(4).map(|l| l.lane_number).collect::<Vec<_>>(),
            vec![29, 30, 31, 32]
        );
        similar_asserts::assert_eq!(without_squad(&first.id, &moved), other_lanes());
    }

    #[test]
    fn geometry_bounds() {
        assert!(is_valid_geometry(1, 2));
        assert!(is_valid_geometry(199, 200));
        assert!(!is_valid_geometry(201, 2));
        assert!(!is_valid_geometry(2, 2));
        assert!(!is_valid_geometry(1, 0));
        assert!(!is_valid_geometry(1, 202));
        assert!(!is_valid_geometry(-1, 2));
    }
}
