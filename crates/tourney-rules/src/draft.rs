//! Author-then-commit workflow for pots, brackets and eliminators.
//!
//! A [`Draft`] holds one staged record. It is validated with the same field
//! and duplicate rules as a committed record, scanned against every existing
//! sibling (the draft takes the next sort order, so nothing is cut off).
//! Committing appends it with a fresh id and resets the draft to the blank
//! template for the same squad.

use tourney_types::{
    Bracket, Eliminator, EntityId, EntityKind, FieldViolation, Pot, Sibling, next_sort_order,
};
use tracing::debug;

use crate::validators::side_games::{self, SideGameContext};

/// A record type that goes through the draft workflow.
pub trait SideGame: Sibling + Clone {
    const KIND: EntityKind;

    fn squad_id(&self) -> &EntityId;
    fn set_squad(&mut self, squad_id: EntityId);
    fn assign(&mut self, id: EntityId, sort_order: u32);
    /// Field checks plus the duplicate scan against `siblings`.
    fn check(&self, siblings: &[Self], ctx: &SideGameContext<'_>) -> (Self, Option<FieldViolation>);
}

impl SideGame for Pot {
    const KIND: EntityKind = EntityKind::Pot;

    fn squad_id(&self) -> &EntityId {
        &self.squad_id
    }

    fn set_squad(&mut self, squad_id: EntityId) {
        self.squad_id = squad_id;
    }

    fn assign(&mut self, id: EntityId, sort_order: u32) {
        self.id = id;
        self.sort_order = sort_order;
    }

    fn check(&self, siblings: &[Self], ctx: &SideGameContext<'_>) -> (Self, Option<FieldViolation>) {
        side_games::check_pot(self, siblings, ctx)
    }
}

impl SideGame for Bracket {
    const KIND: EntityKind = EntityKind::Bracket;

    fn squad_id(&self) -> &EntityId {
        &self.squad_id
    }

    fn set_squad(&mut self, squad_id: EntityId) {
        self.squad_id = squad_id;
    }

    fn assign(&mut self, id: EntityId, sort_order: u32) {
        self.id = id;
        self.sort_order = sort_order;
    }

    fn check(&self, siblings: &[Self], ctx: &SideGameContext<'_>) -> (Self, Option<FieldViolation>) {
        side_games::check_bracket(self, siblings, ctx)
    }
}

impl SideGame for Eliminator {
    const KIND: EntityKind = EntityKind::Eliminator;

    fn squad_id(&self) -> &EntityId {
        &self.squad_id
    }

    fn set_squad(&mut self, squad_id: EntityId) {
        self.squad_id = squad_id;
    }

    fn assign(&mut self, id: EntityId, sort_order: u32) {
        self.id = id;
        self.sort_order = sort_order;
    }

    fn check(&self, siblings: &[Self], ctx: &SideGameContext<'_>) -> (Self, Option<FieldViolation>) {
        side_games::check_eliminator(self, siblings, ctx)
    }
}

/// Validate a staged candidate against the full list of existing siblings.
///
/// Returns the candidate with its errors filled in, and whether it is clean.
pub fn validate_draft<T: SideGame>(
    candidate: &T,
    existing: &[T],
    ctx: &SideGameContext<'_>,
) -> (T, bool) {
    let mut probe = candidate.clone();
    probe.assign(EntityId::placeholder(T::KIND), next_sort_order(existing));
    let (checked, first) = probe.check(existing, ctx);
    (checked, first.is_none())
}

/// One staged record plus the blank template it resets to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft<T> {
    template: T,
    candidate: T,
}

impl<T: SideGame> Draft<T> {
    pub fn new(template: T) -> Self {
        Self {
            candidate: template.clone(),
            template,
        }
    }

    pub fn candidate(&self) -> &T {
        &self.candidate
    }

    pub fn candidate_mut(&mut self) -> &mut T {
        &mut self.candidate
    }

    /// Re-validate the staged record in place; true when it could be committed.
    pub fn validate(&mut self, existing: &[T], ctx: &SideGameContext<'_>) -> bool {
        let (checked, valid) = validate_draft(&self.candidate, existing, ctx);
        self.candidate = checked;
        valid
    }

    /// Append the staged record to `existing` under `id`.
    ///
    /// On a violation nothing is appended, the draft keeps its errors and the
    /// first violation is returned.
    pub fn commit(
        &mut self,
        existing: &mut Vec<T>,
        id: EntityId,
        ctx: &SideGameContext<'_>,
    ) -> Result<EntityId, FieldViolation> {
        let sort_order = next_sort_order(existing);
        let (mut checked, first) = {
            let mut probe = self.candidate.clone();
            probe.assign(EntityId::placeholder(T::KIND), sort_order);
            probe.check(existing, ctx)
        };
        if let Some(violation) = first {
            self.candidate = checked;
            return Err(violation);
        }

        checked.assign(id.clone(), sort_order);
        let squad_id = checked.squad_id().clone();
        existing.push(checked);
        let kind = T::KIND;
        debug!(%kind, id = %id, sort_order, "committed draft");

        self.reset(squad_id);
        Ok(id)
    }

    /// Back to the blank template, keeping the given squad.
    pub fn reset(&mut self, squad_id: EntityId) {
        let mut blank = self.template.clone();
        blank.set_squad(squad_id);
        self.candidate = blank;
    }
}
