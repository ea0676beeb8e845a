//! Pots, brackets and eliminators.
//!
//! All three are scoped to one division within one squad and share the same
//! leading checks (squad, division) and trailing fee check. Brackets and
//! eliminators also cover a run of games that must fit inside the squad.

use rust_decimal::Decimal;
use tourney_types::{
    Bracket, BracketField, Division, EliminatorField, Eliminator, EntityId, FieldViolation, Pot,
    PotField, TournamentSnapshot,
};

use super::event::{MAX_GAMES, MIN_GAMES};
use super::{int_in_range, money_in_range};
use crate::duplicates;

/// Parent values a side game is validated against.
#[derive(Clone, Copy, Debug)]
pub struct SideGameContext<'a> {
    /// Games of the owning squad, clamped into the valid game range; `None`
    /// when the squad does not exist.
    pub squad_games: Option<i32>,
    pub divisions: &'a [Division],
}

impl<'a> SideGameContext<'a> {
    pub fn for_squad(snapshot: &'a TournamentSnapshot, squad_id: &EntityId) -> Self {
        Self {
            squad_games: snapshot
                .squad(squad_id)
                .map(|s| s.games.clamp(MIN_GAMES, MAX_GAMES)),
            divisions: &snapshot.divisions,
        }
    }
}

fn squad_check(ctx: &SideGameContext<'_>) -> Result<(), FieldViolation> {
    match ctx.squad_games {
        Some(_) => Ok(()),
        None => Err(FieldViolation::UnknownReference { label: "Squad" }),
    }
}

fn division_check(div_id: Option<&EntityId>, ctx: &SideGameContext<'_>) -> Result<(), FieldViolation> {
    match div_id {
        None => Err(FieldViolation::Required { label: "Division" }),
        Some(id) if !ctx.divisions.iter().any(|d| &d.id == id) => {
            Err(FieldViolation::UnknownReference { label: "Division" })
        }
        Some(_) => Ok(()),
    }
}

fn fee_check(fee: Decimal) -> Result<(), FieldViolation> {
    money_in_range("Fee", fee, Decimal::ONE)
}

/// Start game range first, then the span `start..start+games-1` against the squad.
/// A span needs at least one game.
fn span_check(start: i32, games: i32, squad_games: i32) -> Result<(), FieldViolation> {
    int_in_range("Start game", start, 1, squad_games)?;
    if games < 1 {
        return Err(FieldViolation::out_of_range("Games", 1, squad_games));
    }
    if i64::from(start) + i64::from(games) - 1 > i64::from(squad_games) {
        return Err(FieldViolation::SpanExceedsSquad {
            start,
            games,
            squad_games,
        });
    }
    Ok(())
}

/// Check order: squad, division, fee. The pot type only carries the
/// uniqueness violation added by [`check_pot`].
pub fn validate_pot(pot: &Pot, ctx: &SideGameContext<'_>) -> (Pot, Option<FieldViolation>) {
    let mut out = pot.clone();
    out.errors.record(PotField::Squad, squad_check(ctx));
    out.errors
        .record(PotField::Division, division_check(pot.div_id.as_ref(), ctx));
    out.errors.clear(PotField::PotType);
    out.errors.record(PotField::Fee, fee_check(pot.fee));
    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

pub fn check_pot(
    pot: &Pot,
    siblings: &[Pot],
    ctx: &SideGameContext<'_>,
) -> (Pot, Option<FieldViolation>) {
    let (mut out, _) = validate_pot(pot, ctx);
    if !out.errors.has(PotField::Division) && duplicates::duplicate_pot(siblings, pot) {
        out.errors.set(
            PotField::PotType,
            FieldViolation::Duplicate {
                label: "Pot",
                value: pot.pot_type.to_string(),
            },
        );
    }
    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

/// Check order: squad, division, start (range then span), fee.
///
/// The game count of a bracket is fixed at creation and only matters through
/// the span check.
pub fn validate_bracket(
    bracket: &Bracket,
    ctx: &SideGameContext<'_>,
) -> (Bracket, Option<FieldViolation>) {
    let mut out = bracket.clone();
    out.errors.record(BracketField::Squad, squad_check(ctx));
    out.errors.record(
        BracketField::Division,
        division_check(bracket.div_id.as_ref(), ctx),
    );
    match ctx.squad_games {
        Some(squad_games) => out.errors.record(
            BracketField::Start,
            span_check(bracket.start, bracket.games, squad_games),
        ),
        None => out.errors.clear(BracketField::Start),
    }
    out.errors.record(BracketField::Fee, fee_check(bracket.fee));
    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

pub fn check_bracket(
    bracket: &Bracket,
    siblings: &[Bracket],
    ctx: &SideGameContext<'_>,
) -> (Bracket, Option<FieldViolation>) {
    let (mut out, _) = validate_bracket(bracket, ctx);
    if !out.errors.has(BracketField::Division)
        && !out.errors.has(BracketField::Start)
        && duplicates::duplicate_bracket(siblings, bracket)
    {
        out.errors.set(
            BracketField::Start,
            FieldViolation::Duplicate {
                label: "Bracket starting at game",
                value: bracket.start.to_string(),
            },
        );
    }
    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

/// Check order: squad, division, start, games, fee.
///
/// Unlike a bracket, the game count is validated on its own; the span check
/// only runs once both start and games are individually in range.
pub fn validate_eliminator(
    eliminator: &Eliminator,
    ctx: &SideGameContext<'_>,
) -> (Eliminator, Option<FieldViolation>) {
    let mut out = eliminator.clone();
    out.errors.record(EliminatorField::Squad, squad_check(ctx));
    out.errors.record(
        EliminatorField::Division,
        division_check(eliminator.div_id.as_ref(), ctx),
    );
    match ctx.squad_games {
        Some(squad_games) => {
            let games = int_in_range("Games", eliminator.games, 1, squad_games);
            let start = if games.is_ok() {
                span_check(eliminator.start, eliminator.games, squad_games)
            } else {
                int_in_range("Start game", eliminator.start, 1, squad_games)
            };
            out.errors.record(EliminatorField::Start, start);
            out.errors.record(EliminatorField::Games, games);
        }
        None => {
            out.errors.clear(EliminatorField::Start);
            out.errors.clear(EliminatorField::Games);
        }
    }
    out.errors.record(EliminatorField::Fee, fee_check(eliminator.fee));
    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

pub fn check_eliminator(
    eliminator: &Eliminator,
    siblings: &[Eliminator],
    ctx: &SideGameContext<'_>,
) -> (Eliminator, Option<FieldViolation>) {
    let (mut out, _) = validate_eliminator(eliminator, ctx);
    if !out.errors.has(EliminatorField::Division)
        && !out.errors.has(EliminatorField::Start)
        && !out.errors.has(EliminatorField::Games)
        && duplicates::duplicate_eliminator(siblings, eliminator)
    {
        out.errors.set(
            EliminatorField::Start,
            FieldViolation::Duplicate {
                label: "Eliminator",
                value: format!("games {}-{}", eliminator.start, eliminator.start + eliminator.games - 1),
            },
        );
    }
    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_decimal::Decimal;
    use tourney_types::{
        Bracket, Eliminator, EntityKind, FieldErrors, Pot, PotType,
    };

    use crate::validators::fixtures::id;

    pub fn pot(n: u128, sort_order: u32, pot_type: PotType, div_n: u128) -> Pot {
        Pot {
            id: id(EntityKind::Pot, n),
            sort_order,
            squad_id: id(EntityKind::Squad, 1),
            div_id: Some(id(EntityKind::Division, div_n)),
            pot_type,
            fee: Decimal::new(20, 0),
            errors: FieldErrors::new(),
        }
    }

    pub fn bracket(n: u128, sort_order: u32, start: i32) -> Bracket {
        Bracket {
            id: id(EntityKind::Bracket, n),
            sort_order,
            squad_id: id(EntityKind::Squad, 1),
            div_id: Some(id(EntityKind::Division, 1)),
            start,
            games: 3,
            fee: Decimal::new(5, 0),
            errors: FieldErrors::new(),
        }
    }

    pub fn eliminator(n: u128, sort_order: u32, start: i32, games: i32) -> Eliminator {
        Eliminator {
            id: id(EntityKind::Eliminator, n),
            sort_order,
            squad_id: id(EntityKind::Squad, 1),
            div_id: Some(id(EntityKind::Division, 1)),
            start,
            games,
            fee: Decimal::new(10, 0),
            errors: FieldErrors::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::validators::fixtures::snapshot;
    use tourney_types::{PotType, ViolationKind};

    #[test]
    fn pot_fee_must_be_at_least_one() {
        let s = snapshot();
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        let mut p = pot(1, 1, PotType::Game, 1);
        p.fee = Decimal::ZERO;
        let (_, first) = validate_pot(&p, &ctx);
        assert_eq!(first, Some(FieldViolation::out_of_range("Fee", 1, 999999)));
    }

    #[test]
    fn pot_without_division_is_missing() {
        let s = snapshot();
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        let mut p = pot(1, 1, PotType::Game, 1);
        p.div_id = None;
        let (checked, first) = check_pot(&p, &[], &ctx);
        assert_eq!(first, Some(FieldViolation::Required { label: "Division" }));
        assert!(checked.errors.has(PotField::Division));
    }

    #[test]
    fn same_pot_type_in_other_division_is_not_duplicate() {
        let mut s = snapshot();
        s.divisions
            .push(crate::validators::fixtures::division(2, 2, "Handicap"));
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        let pots = vec![pot(1, 1, PotType::Game, 1), pot(2, 2, PotType::Game, 2)];
        assert!(check_pot(&pots[1], &pots, &ctx).1.is_none());

        let pots = vec![pot(1, 1, PotType::Game, 1), pot(2, 2, PotType::Game, 1)];
        let (_, first) = check_pot(&pots[1], &pots, &ctx);
        assert_eq!(first.map(|v| v.kind()), Some(ViolationKind::UniquenessViolation));
    }

    #[test]
    fn bracket_span_must_fit_squad_games() {
        let s = snapshot();
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        assert!(validate_bracket(&bracket(1, 1, 4), &ctx).1.is_none());
        let (_, first) = validate_bracket(&bracket(1, 1, 5), &ctx);
        assert_eq!(
            first,
            Some(FieldViolation::SpanExceedsSquad {
                start: 5,
                games: 3,
                squad_games: 6
            })
        );
    }

    #[test]
    fn bracket_start_outside_squad_is_range_violation() {
        let s = snapshot();
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        let (_, first) = validate_bracket(&bracket(1, 1, 0), &ctx);
        assert_eq!(first, Some(FieldViolation::out_of_range("Start game", 1, 6)));
    }

    #[test]
    fn oversized_squad_games_are_clamped_before_span_check() {
        let mut s = snapshot();
        s.squads[0].games = i32::MAX;
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        assert_eq!(ctx.squad_games, Some(MAX_GAMES));

        let (_, first) = validate_bracket(&bracket(1, 1, i32::MAX), &ctx);
        assert_eq!(first, Some(FieldViolation::out_of_range("Start game", 1, 99)));

        let mut b = bracket(1, 1, 99);
        b.games = i32::MAX;
        let (_, first) = validate_bracket(&b, &ctx);
        assert!(matches!(first, Some(FieldViolation::SpanExceedsSquad { .. })));
    }

    #[test]
    fn bracket_needs_at_least_one_game() {
        let s = snapshot();
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        let mut b = bracket(1, 1, 1);
        b.games = 0;
        let (checked, first) = validate_bracket(&b, &ctx);
        assert_eq!(first, Some(FieldViolation::out_of_range("Games", 1, 6)));
        assert!(checked.errors.has(BracketField::Start));
    }

    #[test]
    fn brackets_unique_per_division_and_start() {
        let s = snapshot();
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        let brackets = vec![bracket(1, 1, 1), bracket(2, 2, 1), bracket(3, 3, 4)];
        let flagged: Vec<bool> = brackets
            .iter()
            .map(|b| check_bracket(b, &brackets, &ctx).1.is_some())
            .collect();
        assert_eq!(flagged, [false, true, false]);
    }

    #[test]
    fn eliminator_games_checked_independently() {
        let s = snapshot();
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        let (checked, _) = validate_eliminator(&eliminator(1, 1, 1, 7), &ctx);
        assert_eq!(
            checked.errors.get(EliminatorField::Games),
            Some(&FieldViolation::out_of_range("Games", 1, 6))
        );
        assert!(!checked.errors.has(EliminatorField::Start));
    }

    #[test]
    fn eliminators_unique_per_division_start_and_games() {
        let s = snapshot();
        let ctx = SideGameContext::for_squad(&s, &s.squads[0].id);
        let elims = vec![
            eliminator(1, 1, 1, 3),
            eliminator(2, 2, 1, 4),
            eliminator(3, 3, 1, 3),
        ];
        assert!(check_eliminator(&elims[1], &elims, &ctx).1.is_none());
        assert!(check_eliminator(&elims[2], &elims, &ctx).1.is_some());
    }

    #[test]
    fn orphaned_side_game_reports_missing_squad() {
        let s = snapshot();
        let missing = crate::validators::fixtures::id(tourney_types::EntityKind::Squad, 99);
        let ctx = SideGameContext::for_squad(&s, &missing);
        let (_, first) = validate_bracket(&bracket(1, 1, 1), &ctx);
        assert_eq!(first, Some(FieldViolation::UnknownReference { label: "Squad" }));
    }
}
