use thiserror::Error;
use tourney_rules::DeleteBlocked;
use tourney_types::{EntityId, EntityKind, ErrorGroup, FieldViolation};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: EntityId },
    #[error(transparent)]
    DeleteBlocked(#[from] DeleteBlocked),
    #[error("{kind} draft cannot be added: {violation}")]
    InvalidDraft {
        kind: EntityKind,
        violation: FieldViolation,
    },
    #[error("cannot save while {group} has errors{summary}")]
    Unresolved { group: ErrorGroup, summary: String },
    #[error("saving {group} failed: {message}")]
    Persistence { group: ErrorGroup, message: String },
}

impl EngineError {
    /// The save group a failure is attributed to, if any.
    pub fn group(&self) -> Option<ErrorGroup> {
        match self {
            Self::Unresolved { group, .. } | Self::Persistence { group, .. } => Some(*group),
            _ => None,
        }
    }
}
