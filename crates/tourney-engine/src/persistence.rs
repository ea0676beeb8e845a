use thiserror::Error;
use tourney_types::{ErrorGroup, TournamentSnapshot};
use tracing::{debug, warn};

use crate::error::EngineError;

/// Failure reported by the store for one group.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GroupWriteError {
    pub message: String,
}

impl GroupWriteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Writes one save group at a time.
///
/// The gateway sees both the snapshot the session opened with and the current
/// one, so it can work out inserts, updates and deletes per group.
pub trait SaveGateway {
    fn save_group(
        &mut self,
        group: ErrorGroup,
        original: &TournamentSnapshot,
        current: &TournamentSnapshot,
    ) -> Result<(), GroupWriteError>;
}

/// Save every group in [`ErrorGroup::ALL`] order, stopping at the first failure.
///
/// Groups after a failing one are never attempted.
pub fn save_grouped<S: SaveGateway + ?Sized>(
    gateway: &mut S,
    original: &TournamentSnapshot,
    current: &TournamentSnapshot,
) -> Result<(), EngineError> {
    for group in ErrorGroup::ALL {
        if let Err(err) = gateway.save_group(group, original, current) {
            warn!(%group, error = %err, "save aborted");
            return Err(EngineError::Persistence {
                group,
                message: err.message,
            });
        }
        debug!(%group, "saved group");
    }
    Ok(())
}
