mod command;
mod config;
mod error;
mod persistence;
mod session;

pub use command::{
    BracketEdit, DeleteTarget, DivisionEdit, Edit, EliminatorEdit, EventEdit, PotEdit, SquadEdit,
    TournamentEdit,
};
pub use config::EngineConfig;
pub use error::EngineError;
pub use persistence::{GroupWriteError, SaveGateway, save_grouped};
pub use session::{EditSession, PendingDelete};
