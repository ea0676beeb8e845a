use tourney_types::{EntityId, FieldViolation, Tournament, TournamentField};

use super::required_text;

/// Reference data a tournament is validated against.
#[derive(Clone, Copy, Debug)]
pub struct TournamentContext<'a> {
    /// Selectable bowls.
    pub bowls: &'a [EntityId],
}

/// Check order: name, bowl, start date, end date.
pub fn validate(
    tournament: &Tournament,
    ctx: &TournamentContext<'_>,
) -> (Tournament, Option<FieldViolation>) {
    let mut out = tournament.clone();

    out.errors
        .record(TournamentField::Name, required_text("Tournament name", &out.name));

    let bowl = match &out.bowl_id {
        None => Err(FieldViolation::Required { label: "Bowl" }),
        Some(id) if !ctx.bowls.contains(id) => Err(FieldViolation::UnknownReference { label: "Bowl" }),
        Some(_) => Ok(()),
    };
    out.errors.record(TournamentField::Bowl, bowl);

    let start = match out.start_date {
        None => Err(FieldViolation::Required { label: "Start date" }),
        Some(_) => Ok(()),
    };
    out.errors.record(TournamentField::StartDate, start);

    let end = match (out.start_date, out.end_date) {
        (_, None) => Err(FieldViolation::Required { label: "End date" }),
        (Some(start), Some(end)) if end < start => Err(FieldViolation::EndBeforeStart),
        _ => Ok(()),
    };
    out.errors.record(TournamentField::EndDate, end);

    let first = out.errors.first().map(|(_, v)| v.clone());
    (out, first)
}
