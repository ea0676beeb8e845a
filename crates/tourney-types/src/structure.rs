use crate::field_errors::FieldErrors;
use crate::id::EntityId;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields of a [`Tournament`], in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TournamentField {
    Name,
    Bowl,
    StartDate,
    EndDate,
}

/// The root record. Every other record hangs off exactly one tournament.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: EntityId,
    pub name: String,
    pub bowl_id: Option<EntityId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(skip)]
    pub errors: FieldErrors<TournamentField>,
}

impl Tournament {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bowl_id: None,
            start_date: None,
            end_date: None,
            errors: FieldErrors::new(),
        }
    }
}

/// Fields of an [`Event`], in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventField {
    Name,
    TeamSize,
    Games,
    AddedMoney,
    EntryFee,
    Lineage,
    PrizeFund,
    Other,
    Expenses,
    Lpox,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub sort_order: u32,
    pub name: String,
    pub team_size: i32,
    pub games: i32,
    pub added_money: Decimal,
    pub entry_fee: Decimal,
    pub lineage: Decimal,
    pub prize_fund: Decimal,
    pub other: Decimal,
    pub expenses: Decimal,
    #[serde(skip)]
    pub errors: FieldErrors<EventField>,
}

impl Event {
    pub fn new(id: EntityId, sort_order: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            sort_order,
            name: name.into(),
            team_size: 1,
            games: 3,
            added_money: Decimal::ZERO,
            entry_fee: Decimal::ZERO,
            lineage: Decimal::ZERO,
            prize_fund: Decimal::ZERO,
            other: Decimal::ZERO,
            expenses: Decimal::ZERO,
            errors: FieldErrors::new(),
        }
    }

    /// Lineage + prize fund + other + expenses.
    pub fn lpox(&self) -> Decimal {
        self.lineage + self.prize_fund + self.other + self.expenses
    }
}

/// Whether a division's handicap is figured per game or per series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandicapBasis {
    #[default]
    Game,
    Series,
}

impl fmt::Display for HandicapBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game => f.write_str("Game"),
            Self::Series => f.write_str("Series"),
        }
    }
}

/// Fields of a [`Division`], in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DivisionField {
    Name,
    HdcpPer,
    HdcpFrom,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: EntityId,
    pub sort_order: u32,
    pub name: String,
    /// Handicap percentage as a fraction, 0 through 1.25.
    pub hdcp_per: Decimal,
    /// Handicap base score. Ignored while `hdcp_per` is zero.
    pub hdcp_from: i32,
    pub int_hdcp: bool,
    pub hdcp_for: HandicapBasis,
    #[serde(skip)]
    pub errors: FieldErrors<DivisionField>,
}

impl Division {
    pub fn new(id: EntityId, sort_order: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            sort_order,
            name: name.into(),
            hdcp_per: Decimal::ZERO,
            hdcp_from: 0,
            int_hdcp: true,
            hdcp_for: HandicapBasis::Game,
            errors: FieldErrors::new(),
        }
    }

    /// A zero percentage disables the handicap base and basis.
    pub fn handicap_enabled(&self) -> bool {
        self.hdcp_per > Decimal::ZERO
    }
}

/// Fields of a [`Squad`], in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SquadField {
    Event,
    Name,
    Games,
    StartingLane,
    LaneCount,
    SquadDate,
    SquadTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    pub id: EntityId,
    pub event_id: EntityId,
    pub sort_order: u32,
    pub name: String,
    pub games: i32,
    pub starting_lane: i32,
    pub lane_count: i32,
    pub squad_date: Option<NaiveDate>,
    pub squad_time: Option<NaiveTime>,
    #[serde(skip)]
    pub errors: FieldErrors<SquadField>,
}

impl Squad {
    pub fn new(id: EntityId, event_id: EntityId, sort_order: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            event_id,
            sort_order,
            name: name.into(),
            games: 3,
            starting_lane: 1,
            lane_count: 2,
            squad_date: None,
            squad_time: None,
            errors: FieldErrors::new(),
        }
    }
}

/// One lane of one squad. Lanes are derived from the squad's lane geometry;
/// `(squad_id, lane_number)` is their whole identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane {
    pub squad_id: EntityId,
    pub lane_number: i32,
    pub in_use: bool,
}
