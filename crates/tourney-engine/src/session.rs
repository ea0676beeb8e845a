//! The editing session.
//!
//! Every mutation goes through the same pipeline: write the edit, run the
//! cascade it triggers (if any), re-validate the whole structure, then
//! recompute group summaries. Nothing is patched incrementally; consistency
//! comes from recomputing everything after each step.

use tourney_rules::{
    Draft, GroupSummaries, SideGame, SideGameContext, can_delete_division, can_delete_event,
    can_delete_squad, cascade_event_games, cascade_tournament_dates, regenerate_lanes,
    validate_structure, without_squad,
};
use tourney_types::{
    Bracket, Division, Eliminator, EntityId, EntityKind, IdGenerator, Pot, ReferenceData,
    Sibling, Squad, TournamentSnapshot, UuidIds, next_sort_order, sorted,
};
use tracing::{debug, info};

use crate::command::{
    BracketEdit, DeleteTarget, Edit, EliminatorEdit, EventEdit, PotEdit, SquadEdit,
};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::persistence::{SaveGateway, save_grouped};

/// A delete that passed the referential guard and awaits confirmation.
///
/// Dropping it is cancellation: nothing has been removed yet.
#[must_use = "a pending delete does nothing until it is confirmed"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    target: DeleteTarget,
}

impl PendingDelete {
    pub fn target(&self) -> &DeleteTarget {
        &self.target
    }
}

fn find_mut<'a, T: Sibling>(
    items: &'a mut [T],
    id: &EntityId,
    kind: EntityKind,
) -> Result<&'a mut T, EngineError> {
    items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| EngineError::NotFound {
            kind,
            id: id.clone(),
        })
}

fn find<'a, T: Sibling>(
    items: &'a [T],
    id: &EntityId,
    kind: EntityKind,
) -> Result<&'a T, EngineError> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| EngineError::NotFound {
            kind,
            id: id.clone(),
        })
}

fn remove<T: Sibling>(
    items: &mut Vec<T>,
    id: &EntityId,
    kind: EntityKind,
) -> Result<(), EngineError> {
    let before = items.len();
    items.retain(|item| item.id() != id);
    if items.len() == before {
        return Err(EngineError::NotFound {
            kind,
            id: id.clone(),
        });
    }
    Ok(())
}

fn revalidate_draft<T: SideGame>(
    draft: &mut Draft<T>,
    existing: &[T],
    snapshot: &TournamentSnapshot,
) -> bool {
    let ctx = SideGameContext::for_squad(snapshot, draft.candidate().squad_id());
    draft.validate(existing, &ctx)
}

fn commit_draft<T: SideGame>(
    draft: &mut Draft<T>,
    existing: &mut Vec<T>,
    squads: &[Squad],
    divisions: &[Division],
    ids: &mut impl IdGenerator,
) -> Result<EntityId, EngineError> {
    let squad_games = squads
        .iter()
        .find(|s| s.id == *draft.candidate().squad_id())
        .map(|s| s.games);
    let ctx = SideGameContext {
        squad_games,
        divisions,
    };
    if !draft.validate(existing, &ctx) {
        if let Some(violation) = draft.candidate().first_error() {
            return Err(EngineError::InvalidDraft {
                kind: T::KIND,
                violation: violation.clone(),
            });
        }
    }
    let id = ids.next_id(T::KIND);
    draft
        .commit(existing, id, &ctx)
        .map_err(|violation| EngineError::InvalidDraft {
            kind: T::KIND,
            violation,
        })
}

/// Single-writer editing session over one tournament.
pub struct EditSession<G = UuidIds> {
    config: EngineConfig,
    refs: ReferenceData,
    ids: G,
    original: TournamentSnapshot,
    current: TournamentSnapshot,
    summaries: GroupSummaries,
    pot_draft: Draft<Pot>,
    bracket_draft: Draft<Bracket>,
    eliminator_draft: Draft<Eliminator>,
}

impl<G: IdGenerator> EditSession<G> {
    /// Open a session on a loaded snapshot.
    ///
    /// The snapshot is validated immediately, so summaries reflect any
    /// problems it was loaded with. Drafts start on the first squad.
    pub fn open(
        snapshot: TournamentSnapshot,
        refs: ReferenceData,
        config: EngineConfig,
        ids: G,
    ) -> Self {
        let current = validate_structure(&snapshot, &refs);
        let summaries = GroupSummaries::from_snapshot(&current);
        let squad_id = sorted(&current.squads)
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| EntityId::placeholder(EntityKind::Squad));
        info!(
            tournament = %current.tournament.id,
            events = current.events.len(),
            divisions = current.divisions.len(),
            squads = current.squads.len(),
            "opened edit session"
        );
        Self {
            pot_draft: Draft::new(config.blank_pot(squad_id.clone())),
            bracket_draft: Draft::new(config.blank_bracket(squad_id.clone())),
            eliminator_draft: Draft::new(config.blank_eliminator(squad_id)),
            config,
            refs,
            ids,
            original: current.clone(),
            current,
            summaries,
        }
    }

    pub fn snapshot(&self) -> &TournamentSnapshot {
        &self.current
    }

    /// The snapshot as last loaded or saved.
    pub fn original(&self) -> &TournamentSnapshot {
        &self.original
    }

    pub fn summaries(&self) -> &GroupSummaries {
        &self.summaries
    }

    pub fn is_dirty(&self) -> bool {
        self.original != self.current
    }

    fn refresh(&mut self) {
        self.current = validate_structure(&self.current, &self.refs);
        self.summaries = GroupSummaries::from_snapshot(&self.current);
    }

    /// Apply one field edit, run its cascade and recompute derived state.
    pub fn apply(&mut self, edit: Edit) -> Result<&GroupSummaries, EngineError> {
        debug!(?edit, "applying edit");
        let snapshot = &mut self.current;
        match edit {
            Edit::Tournament(edit) => {
                let dates = edit.changes_dates();
                edit.apply_to(&mut snapshot.tournament);
                if dates {
                    snapshot.squads =
                        cascade_tournament_dates(&snapshot.tournament, &snapshot.squads);
                }
            }
            Edit::Event { id, edit } => {
                let event = find_mut(&mut snapshot.events, &id, EntityKind::Event)?;
                let previous_games = event.games;
                let games = matches!(edit, EventEdit::Games(_));
                edit.apply_to(event);
                if games {
                    let event = event.clone();
                    snapshot.squads =
                        cascade_event_games(&event, previous_games, &snapshot.squads);
                }
            }
            Edit::Division { id, edit } => {
                let division = find_mut(&mut snapshot.divisions, &id, EntityKind::Division)?;
                edit.apply_to(division);
            }
            Edit::Squad { id, edit } => {
                let squad = find_mut(&mut snapshot.squads, &id, EntityKind::Squad)?;
                let geometry = edit.changes_lane_geometry();
                edit.apply_to(squad);
                if geometry {
                    let squad = squad.clone();
                    snapshot.lanes = regenerate_lanes(&squad, &snapshot.lanes);
                }
            }
            Edit::Pot { id, edit } => {
                edit.apply_to(find_mut(&mut snapshot.pots, &id, EntityKind::Pot)?);
            }
            Edit::Bracket { id, edit } => {
                edit.apply_to(find_mut(&mut snapshot.brackets, &id, EntityKind::Bracket)?);
            }
            Edit::Eliminator { id, edit } => {
                edit.apply_to(find_mut(
                    &mut snapshot.eliminators,
                    &id,
                    EntityKind::Eliminator,
                )?);
            }
        }
        self.refresh();
        Ok(&self.summaries)
    }

    /// Add an event from the config template at the next sort order.
    pub fn add_event(&mut self) -> EntityId {
        let id = self.ids.next_id(EntityKind::Event);
        let sort_order = next_sort_order(&self.current.events);
        self.current
            .events
            .push(self.config.new_event(id.clone(), sort_order));
        debug!(%id, sort_order, "added event");
        self.refresh();
        id
    }

    /// Add a division from the config template at the next sort order.
    pub fn add_division(&mut self) -> EntityId {
        let id = self.ids.next_id(EntityKind::Division);
        let sort_order = next_sort_order(&self.current.divisions);
        self.current
            .divisions
            .push(self.config.new_division(id.clone(), sort_order));
        debug!(%id, sort_order, "added division");
        self.refresh();
        id
    }

    /// Add a squad to an event. It inherits the event's games, starts on the
    /// tournament's first day and gets its lanes generated right away.
    pub fn add_squad(&mut self, event_id: &EntityId) -> Result<EntityId, EngineError> {
        let event = find(&self.current.events, event_id, EntityKind::Event)?;
        let id = self.ids.next_id(EntityKind::Squad);
        let sort_order = next_sort_order(&self.current.squads);
        let squad = self.config.new_squad(
            id.clone(),
            event,
            sort_order,
            self.current.tournament.start_date,
        );
        self.current.lanes = regenerate_lanes(&squad, &self.current.lanes);
        self.current.squads.push(squad);
        debug!(%id, event = %event_id, sort_order, "added squad");
        self.refresh();
        Ok(id)
    }

    /// Run the referential guard for a delete.
    ///
    /// A refusal carries the reason for the blocking-message channel; an
    /// allowed delete still needs [`EditSession::confirm_delete`].
    pub fn request_delete(&self, target: DeleteTarget) -> Result<PendingDelete, EngineError> {
        self.check_delete(&target)?;
        Ok(PendingDelete { target })
    }

    fn check_delete(&self, target: &DeleteTarget) -> Result<(), EngineError> {
        let s = &self.current;
        match target {
            DeleteTarget::Event(id) => {
                can_delete_event(find(&s.events, id, EntityKind::Event)?, s)?;
            }
            DeleteTarget::Division(id) => {
                can_delete_division(find(&s.divisions, id, EntityKind::Division)?, s)?;
            }
            DeleteTarget::Squad(id) => {
                can_delete_squad(find(&s.squads, id, EntityKind::Squad)?, s)?;
            }
            DeleteTarget::Pot(id) => {
                find(&s.pots, id, EntityKind::Pot)?;
            }
            DeleteTarget::Bracket(id) => {
                find(&s.brackets, id, EntityKind::Bracket)?;
            }
            DeleteTarget::Eliminator(id) => {
                find(&s.eliminators, id, EntityKind::Eliminator)?;
            }
        }
        Ok(())
    }

    /// Perform a confirmed delete. The guard runs again first, so a token
    /// that went stale through later edits cannot bypass it.
    pub fn confirm_delete(
        &mut self,
        pending: PendingDelete,
    ) -> Result<&GroupSummaries, EngineError> {
        self.check_delete(&pending.target)?;
        let s = &mut self.current;
        match &pending.target {
            DeleteTarget::Event(id) => remove(&mut s.events, id, EntityKind::Event)?,
            DeleteTarget::Division(id) => remove(&mut s.divisions, id, EntityKind::Division)?,
            DeleteTarget::Squad(id) => {
                remove(&mut s.squads, id, EntityKind::Squad)?;
                s.lanes = without_squad(id, &s.lanes);
                self.retarget_drafts(id);
            }
            DeleteTarget::Pot(id) => remove(&mut s.pots, id, EntityKind::Pot)?,
            DeleteTarget::Bracket(id) => remove(&mut s.brackets, id, EntityKind::Bracket)?,
            DeleteTarget::Eliminator(id) => {
                remove(&mut s.eliminators, id, EntityKind::Eliminator)?
            }
        }
        info!(record = ?pending.target, "deleted record");
        self.refresh();
        Ok(&self.summaries)
    }

    /// Drafts pointing at a deleted squad move to the first remaining squad.
    fn retarget_drafts(&mut self, deleted: &EntityId) {
        let Some(first) = sorted(&self.current.squads).first().map(|s| s.id.clone()) else {
            return;
        };
        if self.pot_draft.candidate().squad_id == *deleted {
            self.pot_draft.reset(first.clone());
        }
        if self.bracket_draft.candidate().squad_id == *deleted {
            self.bracket_draft.reset(first.clone());
        }
        if self.eliminator_draft.candidate().squad_id == *deleted {
            self.eliminator_draft.reset(first);
        }
    }

    /// The staged pot, with the errors from its last validation.
    pub fn pot_draft(&self) -> &Pot {
        self.pot_draft.candidate()
    }

    /// Edit the staged pot; returns whether it could be committed as is.
    pub fn edit_pot_draft(&mut self, edit: PotEdit) -> bool {
        edit.apply_to(self.pot_draft.candidate_mut());
        revalidate_draft(&mut self.pot_draft, &self.current.pots, &self.current)
    }

    /// Append the staged pot under a fresh id and reset the draft.
    pub fn commit_pot_draft(&mut self) -> Result<EntityId, EngineError> {
        let id = commit_draft(
            &mut self.pot_draft,
            &mut self.current.pots,
            &self.current.squads,
            &self.current.divisions,
            &mut self.ids,
        )?;
        self.refresh();
        Ok(id)
    }

    /// The staged bracket, with the errors from its last validation.
    pub fn bracket_draft(&self) -> &Bracket {
        self.bracket_draft.candidate()
    }

    /// Edit the staged bracket; returns whether it could be committed as is.
    pub fn edit_bracket_draft(&mut self, edit: BracketEdit) -> bool {
        edit.apply_to(self.bracket_draft.candidate_mut());
        revalidate_draft(&mut self.bracket_draft, &self.current.brackets, &self.current)
    }

    /// Append the staged bracket under a fresh id and reset the draft.
    pub fn commit_bracket_draft(&mut self) -> Result<EntityId, EngineError> {
        let id = commit_draft(
            &mut self.bracket_draft,
            &mut self.current.brackets,
            &self.current.squads,
            &self.current.divisions,
            &mut self.ids,
        )?;
        self.refresh();
        Ok(id)
    }

    /// The staged eliminator, with the errors from its last validation.
    pub fn eliminator_draft(&self) -> &Eliminator {
        self.eliminator_draft.candidate()
    }

    /// Edit the staged eliminator; returns whether it could be committed as is.
    pub fn edit_eliminator_draft(&mut self, edit: EliminatorEdit) -> bool {
        edit.apply_to(self.eliminator_draft.candidate_mut());
        revalidate_draft(
            &mut self.eliminator_draft,
            &self.current.eliminators,
            &self.current,
        )
    }

    /// Append the staged eliminator under a fresh id and reset the draft.
    pub fn commit_eliminator_draft(&mut self) -> Result<EntityId, EngineError> {
        let id = commit_draft(
            &mut self.eliminator_draft,
            &mut self.current.eliminators,
            &self.current.squads,
            &self.current.divisions,
            &mut self.ids,
        )?;
        self.refresh();
        Ok(id)
    }

    /// Hand the current snapshot to the gateway, group by group.
    ///
    /// Refuses while any group summary is non-empty. On failure the
    /// in-memory state is left as is for correction and retry; on success the
    /// current snapshot becomes the new original.
    pub fn save<S: SaveGateway + ?Sized>(&mut self, gateway: &mut S) -> Result<(), EngineError> {
        if let Some(group) = self.summaries.first_failing_group() {
            return Err(EngineError::Unresolved {
                group,
                summary: self.summaries.get(group).to_string(),
            });
        }
        save_grouped(gateway, &self.original, &self.current)?;
        self.original = self.current.clone();
        info!(tournament = %self.current.tournament.id, "saved tournament");
        Ok(())
    }
}
