use tourney_types::EntityKind;

/// Why a delete was refused.
///
/// Referential problems are not field errors: the targeted record is fine,
/// its dependents are what make it undeletable. The message is what the
/// blocking dialog shows.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeleteBlocked {
    #[error("Cannot delete {kind} \"{name}\": it is used by a {dependent}")]
    InUse {
        kind: EntityKind,
        name: String,
        dependent: EntityKind,
    },
    #[error("Cannot delete {kind} \"{name}\": a tournament needs at least one {kind}")]
    LastRemaining { kind: EntityKind, name: String },
}
