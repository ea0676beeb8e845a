//! Edit commands.
//!
//! Each command sets one field of one record. Applying a command only writes
//! data; validation, cascades and summaries are the session's job.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tourney_types::{
    Bracket, Division, Eliminator, EntityId, Event, HandicapBasis, Pot, PotType, Squad,
    Tournament,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TournamentEdit {
    Name(String),
    Bowl(Option<EntityId>),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
}

impl TournamentEdit {
    /// Date edits cascade into squad dates.
    pub fn changes_dates(&self) -> bool {
        matches!(self, Self::StartDate(_) | Self::EndDate(_))
    }

    pub(crate) fn apply_to(self, t: &mut Tournament) {
        match self {
            Self::Name(name) => t.name = name,
            Self::Bowl(bowl_id) => t.bowl_id = bowl_id,
            Self::StartDate(day) => t.start_date = day,
            Self::EndDate(day) => t.end_date = day,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventEdit {
    Name(String),
    TeamSize(i32),
    Games(i32),
    AddedMoney(Decimal),
    EntryFee(Decimal),
    Lineage(Decimal),
    PrizeFund(Decimal),
    Other(Decimal),
    Expenses(Decimal),
}

impl EventEdit {
    pub(crate) fn apply_to(self, e: &mut Event) {
        match self {
            Self::Name(name) => e.name = name,
            Self::TeamSize(n) => e.team_size = n,
            Self::Games(n) => e.games = n,
            Self::AddedMoney(v) => e.added_money = v,
            Self::EntryFee(v) => e.entry_fee = v,
            Self::Lineage(v) => e.lineage = v,
            Self::PrizeFund(v) => e.prize_fund = v,
            Self::Other(v) => e.other = v,
            Self::Expenses(v) => e.expenses = v,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DivisionEdit {
    Name(String),
    HdcpPer(Decimal),
    HdcpFrom(i32),
    IntHdcp(bool),
    HdcpFor(HandicapBasis),
}

impl DivisionEdit {
    pub(crate) fn apply_to(self, d: &mut Division) {
        match self {
            Self::Name(name) => d.name = name,
            Self::HdcpPer(v) => d.hdcp_per = v,
            Self::HdcpFrom(n) => d.hdcp_from = n,
            Self::IntHdcp(b) => d.int_hdcp = b,
            Self::HdcpFor(basis) => d.hdcp_for = basis,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SquadEdit {
    Event(EntityId),
    Name(String),
    Games(i32),
    StartingLane(i32),
    LaneCount(i32),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
}

impl SquadEdit {
    /// Geometry edits regenerate the squad's lanes.
    pub fn changes_lane_geometry(&self) -> bool {
        matches!(self, Self::StartingLane(_) | Self::LaneCount(_))
    }

    pub(crate) fn apply_to(self, s: &mut Squad) {
        match self {
            Self::Event(event_id) => s.event_id = event_id,
            Self::Name(name) => s.name = name,
            Self::Games(n) => s.games = n,
            Self::StartingLane(n) => s.starting_lane = n,
            Self::LaneCount(n) => s.lane_count = n,
            Self::Date(day) => s.squad_date = day,
            Self::Time(time) => s.squad_time = time,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PotEdit {
    Squad(EntityId),
    Division(Option<EntityId>),
    PotType(PotType),
    Fee(Decimal),
}

impl PotEdit {
    pub(crate) fn apply_to(self, p: &mut Pot) {
        match self {
            Self::Squad(id) => p.squad_id = id,
            Self::Division(id) => p.div_id = id,
            Self::PotType(t) => p.pot_type = t,
            Self::Fee(v) => p.fee = v,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BracketEdit {
    Squad(EntityId),
    Division(Option<EntityId>),
    Start(i32),
    Fee(Decimal),
}

impl BracketEdit {
    pub(crate) fn apply_to(self, b: &mut Bracket) {
        match self {
            Self::Squad(id) => b.squad_id = id,
            Self::Division(id) => b.div_id = id,
            Self::Start(n) => b.start = n,
            Self::Fee(v) => b.fee = v,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EliminatorEdit {
    Squad(EntityId),
    Division(Option<EntityId>),
    Start(i32),
    Games(i32),
    Fee(Decimal),
}

impl EliminatorEdit {
    pub(crate) fn apply_to(self, e: &mut Eliminator) {
        match self {
            Self::Squad(id) => e.squad_id = id,
            Self::Division(id) => e.div_id = id,
            Self::Start(n) => e.start = n,
            Self::Games(n) => e.games = n,
            Self::Fee(v) => e.fee = v,
        }
    }
}

/// A field change addressed to one committed record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    Tournament(TournamentEdit),
    Event { id: EntityId, edit: EventEdit },
    Division { id: EntityId, edit: DivisionEdit },
    Squad { id: EntityId, edit: SquadEdit },
    Pot { id: EntityId, edit: PotEdit },
    Bracket { id: EntityId, edit: BracketEdit },
    Eliminator { id: EntityId, edit: EliminatorEdit },
}

/// A record a user asked to delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Event(EntityId),
    Division(EntityId),
    Squad(EntityId),
    Pot(EntityId),
    Bracket(EntityId),
    Eliminator(EntityId),
}

impl DeleteTarget {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Event(id)
            | Self::Division(id)
            | Self::Squad(id)
            | Self::Pot(id)
            | Self::Bracket(id)
            | Self::Eliminator(id) => id,
        }
    }
}
