use crate::field_errors::FieldErrors;
use crate::id::EntityId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a pot pays on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PotType {
    #[default]
    Game,
    LastGame,
    Series,
}

impl fmt::Display for PotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game => f.write_str("Game"),
            Self::LastGame => f.write_str("Last Game"),
            Self::Series => f.write_str("Series"),
        }
    }
}

/// Fields of a [`Pot`], in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PotField {
    Squad,
    Division,
    PotType,
    Fee,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub id: EntityId,
    pub sort_order: u32,
    pub squad_id: EntityId,
    pub div_id: Option<EntityId>,
    pub pot_type: PotType,
    pub fee: Decimal,
    #[serde(skip)]
    pub errors: FieldErrors<PotField>,
}

/// Fields of a [`Bracket`], in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BracketField {
    Squad,
    Division,
    Start,
    Fee,
}

/// A head-to-head bracket over `games` consecutive games starting at `start`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: EntityId,
    pub sort_order: u32,
    pub squad_id: EntityId,
    pub div_id: Option<EntityId>,
    pub start: i32,
    pub games: i32,
    pub fee: Decimal,
    #[serde(skip)]
    pub errors: FieldErrors<BracketField>,
}

/// Fields of an [`Eliminator`], in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EliminatorField {
    Squad,
    Division,
    Start,
    Games,
    Fee,
}

/// Same shape as a [`Bracket`], but the game count is chosen per eliminator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eliminator {
    pub id: EntityId,
    pub sort_order: u32,
    pub squad_id: EntityId,
    pub div_id: Option<EntityId>,
    pub start: i32,
    pub games: i32,
    pub fee: Decimal,
    #[serde(skip)]
    pub errors: FieldErrors<EliminatorField>,
}
