use chrono::NaiveDate;
use tourney_types::{FieldViolation, Squad, SquadField, TournamentSnapshot};

use super::{int_in_range, required_text};
use super::event::{MAX_GAMES, MIN_GAMES};
use crate::duplicates;
use crate::lanes::{MAX_LANE_COUNT, MAX_STARTING_LANE, MIN_LANE_COUNT, MIN_STARTING_LANE};

/// Values a squad is validated against that live outside the squad itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquadContext {
    /// Games of the owning event; `None` when the event does not exist.
    pub event_games: Option<i32>,
    pub tournament_start: Option<NaiveDate>,
    pub tournament_end: Option<NaiveDate>,
    /// Number of squads in the tournament. A start time is only required
    /// once there is more than one.
    pub squad_count: usize,
}

impl SquadContext {
    pub fn for_squad(snapshot: &TournamentSnapshot, squad: &Squad) -> Self {
        Self {
            event_games: snapshot.event(&squad.event_id).map(|e| e.games),
            tournament_start: snapshot.tournament.start_date,
            tournament_end: snapshot.tournament.end_date,
            squad_count: snapshot.squads.len(),
        }
    }
}

/// Check order: event, name, games, starting lane, lane count, date, time.
pub fn validate(squad: &Squad, ctx: &SquadContext) -> (Squad, Option<FieldViolation>) {
    let mut out = squad.clone();
    let errors = &mut out.errors;

    let event = match ctx.event_games {
        Some(_) => Ok(()),
        None => Err(FieldViolation::UnknownReference { label: "Event" }),
    };
    errors.record(SquadField::Event, event);

    errors.record(SquadField::Name, required_text("Squad name", &squad.name));

    // An event whose own games are broken still caps at the absolute max.
    let ceiling = ctx
        .event_games
        .filter(|g| (MIN_GAMES..=MAX_GAMES).contains(g))
        .unwrap_or(MAX_GAMES);
    let games = if squad.games < MIN_GAMES || squad.games > MAX_GAMES {
        Err(FieldViolation::out_of_range("Games", MIN_GAMES, ceiling))
    } else if squad.games > ceiling {
        Err(FieldViolation::GamesExceedEvent {
            games: squad.games,
            event_games: ceiling,
        })
    } else {
        Ok(())
    };
    errors.record(SquadField::Games, games);

    let starting_lane = int_in_range(
        "Starting lane",
        squad.starting_lane,
        MIN_STARTING_LANE,
        MAX_STARTING_LANE,
    )
    .and_then(|()| {
        if squad.starting_lane % 2 == 1 {
            Ok(())
        } else {
            Err(FieldViolation::NotOdd {
                label: "Starting lane",
            })
        }
    });
    errors.record(SquadField::StartingLane, starting_lane);

    let lane_count = int_in_range("Lane count", squad.lane_count, MIN_LANE_COUNT, MAX_LANE_COUNT)
        .and_then(|()| {
            if squad.lane_count % 2 == 0 {
                Ok(())
            } else {
                Err(FieldViolation::NotEven {
                    label: "Lane count",
                })
            }
        });
    errors.record(SquadField::LaneCount, lane_count);

    let date = match (squad.squad_date, ctx.tournament_start, ctx.tournament_end) {
        (None, _, _) => Err(FieldViolation::Required { label: "Squad date" }),
        (Some(day), Some(start), Some(end)) if day < start || day > end => {
            Err(FieldViolation::DateOutsideTournament { start, end })
        }
        _ => Ok(()),
    };
    errors.record(SquadField::SquadDate, date);

    let time = if ctx.squad_count > 1 && squad.squad_time.is_none() {
        Err(FieldViolation::Required {
            label: "Start time",
        })
    } else {
        Ok(())
    };
    errors.record(SquadField::SquadTime, time);

    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

/// [`validate`] plus the squad-name and date/time uniqueness scans.
pub fn check(
    squad: &Squad,
    siblings: &[Squad],
    ctx: &SquadContext,
) -> (Squad, Option<FieldViolation>) {
    let (mut out, _) = validate(squad, ctx);

    if !out.errors.has(SquadField::Name) && duplicates::duplicate_name(siblings, squad, |s| &s.name)
    {
        out.errors.set(
            SquadField::Name,
            FieldViolation::Duplicate {
                label: "Squad name",
                value: squad.name.trim().to_string(),
            },
        );
    }

    if !out.errors.has(SquadField::SquadTime)
        && !out.errors.has(SquadField::SquadDate)
        && duplicates::duplicate_date_time(siblings, squad)
    {
        if let (Some(day), Some(time)) = (squad.squad_date, squad.squad_time) {
            out.errors.set(
                SquadField::SquadTime,
                FieldViolation::Duplicate {
                    label: "Date and time",
                    value: format!("{} {}", day, time.format("%I:%M %p")),
                },
            );
        }
    }

    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::fixtures::*;
    use tourney_types::{Sibling, ViolationKind, parse_squad_time};

    fn ctx(count: usize) -> SquadContext {
        SquadContext {
            event_games: Some(6),
            tournament_start: Some(date(2023, 9, 16)),
            tournament_end: Some(date(2023, 9, 17)),
            squad_count: count,
        }
    }

    #[test]
    fn lone_squad_may_leave_time_blank() {
        let s = squad(1, 1, 1, "Squad 1");
        let (checked, first) = validate(&s, &ctx(1));
        assert!(first.is_none(), "{:?}", checked.errors);
    }

    #[test]
    fn time_required_once_a_second_squad_exists() {
        let s = squad(1, 1, 1, "Squad 1");
        let (checked, _) = validate(&s, &ctx(2));
        assert_eq!(
            checked.errors.get(SquadField::SquadTime).map(FieldViolation::kind),
            Some(ViolationKind::MissingRequiredField)
        );
    }

    #[test]
    fn games_cannot_exceed_event_games() {
        let mut s = squad(1, 1, 1, "Squad 1");
        s.games = 7;
        let (_, first) = validate(&s, &ctx(1));
        assert_eq!(
            first,
            Some(FieldViolation::GamesExceedEvent {
                games: 7,
                event_games: 6
            })
        );
    }

    #[test]
    fn missing_event_is_reported_first() {
        let s = squad(1, 1, 1, "Squad 1");
        let missing = SquadContext {
            event_games: None,
            ..ctx(1)
        };
        let (_, first) = validate(&s, &missing);
        assert_eq!(first, Some(FieldViolation::UnknownReference { label: "Event" }));
    }

    #[test]
    fn lane_geometry_parity_is_enforced() {
        let mut s = squad(1, 1, 1, "Squad 1");
        s.starting_lane = 30;
        s.lane_count = 13;
        let (checked, _) = validate(&s, &ctx(1));
        assert_eq!(
            checked.errors.get(SquadField::StartingLane),
            Some(&FieldViolation::NotOdd {
                label: "Starting lane"
            })
        );
        assert_eq!(
            checked.errors.get(SquadField::LaneCount),
            Some(&FieldViolation::NotEven { label: "Lane count" })
        );
    }

    #[test]
    fn squad_date_must_fall_inside_tournament() {
        let mut s = squad(1, 1, 1, "Squad 1");
        s.squad_date = Some(date(2023, 9, 18));
        let (_, first) = validate(&s, &ctx(1));
        assert_eq!(
            first,
            Some(FieldViolation::DateOutsideTournament {
                start: date(2023, 9, 16),
                end: date(2023, 9, 17)
            })
        );
    }

    #[test]
    fn duplicate_time_slot_flags_only_the_later_squad() {
        let time = parse_squad_time("02:00 PM").unwrap();
        let mut a = squad(1, 1, 1, "Early");
        let mut b = squad(2, 1, 2, "Late");
        a.squad_time = Some(time);
        b.squad_time = Some(time);
        let squads = vec![b, a];

        let checked: Vec<_> = squads.iter().map(|s| check(s, &squads, &ctx(2)).0).collect();
        let late = checked.iter().find(|s| s.sort_order() == 2).unwrap();
        let early = checked.iter().find(|s| s.sort_order() == 1).unwrap();

        assert!(early.errors.is_empty());
        insta::assert_snapshot!(
            late.errors.get(SquadField::SquadTime).unwrap().to_string(),
            @r#"Date and time "2023-09-16 02:00 PM" has already been used"#
        );
    }
}
