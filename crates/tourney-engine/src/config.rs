use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tourney_types::{
    Bracket, Division, Eliminator, EntityId, EntityKind, Event, FieldErrors, HandicapBasis, Pot,
    PotType, Squad,
};

/// Templates for records created by "add" actions.
///
/// Deserializes with every field optional; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    team_size: i32,
    event_games: i32,
    hdcp_per: Decimal,
    hdcp_from: i32,
    int_hdcp: bool,
    hdcp_for: HandicapBasis,
    starting_lane: i32,
    lane_count: i32,
    side_game_games: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            team_size: 1,
            event_games: 3,
            hdcp_per: Decimal::new(90, 2),
            hdcp_from: 220,
            int_hdcp: true,
            hdcp_for: HandicapBasis::Game,
            starting_lane: 1,
            lane_count: 2,
            side_game_games: 3,
        }
    }
}

impl EngineConfig {
    pub fn team_size(mut self, team_size: i32) -> Self {
        self.team_size = team_size;
        self
    }

    pub fn event_games(mut self, games: i32) -> Self {
        self.event_games = games;
        self
    }

    pub fn handicap(mut self, hdcp_per: Decimal, hdcp_from: i32) -> Self {
        self.hdcp_per = hdcp_per;
        self.hdcp_from = hdcp_from;
        self
    }

    pub fn handicap_basis(mut self, hdcp_for: HandicapBasis, int_hdcp: bool) -> Self {
        self.hdcp_for = hdcp_for;
        self.int_hdcp = int_hdcp;
        self
    }

    pub fn lanes(mut self, starting_lane: i32, lane_count: i32) -> Self {
        self.starting_lane = starting_lane;
        self.lane_count = lane_count;
        self
    }

    /// Game count given to new brackets and eliminators.
    pub fn side_game_games(mut self, games: i32) -> Self {
        self.side_game_games = games;
        self
    }

    pub(crate) fn new_event(&self, id: EntityId, sort_order: u32) -> Event {
        Event {
            team_size: self.team_size,
            games: self.event_games,
            ..Event::new(id, sort_order, format!("Event {sort_order}"))
        }
    }

    pub(crate) fn new_division(&self, id: EntityId, sort_order: u32) -> Division {
        Division {
            hdcp_per: self.hdcp_per,
            hdcp_from: self.hdcp_from,
            int_hdcp: self.int_hdcp,
            hdcp_for: self.hdcp_for,
            ..Division::new(id, sort_order, format!("Division {sort_order}"))
        }
    }

    /// New squads take the event's games and the given date.
    pub(crate) fn new_squad(
        &self,
        id: EntityId,
        event: &Event,
        sort_order: u32,
        squad_date: Option<chrono::NaiveDate>,
    ) -> Squad {
        Squad {
            games: event.games,
            starting_lane: self.starting_lane,
            lane_count: self.lane_count,
            squad_date,
            ..Squad::new(id, event.id.clone(), sort_order, format!("Squad {sort_order}"))
        }
    }

    pub(crate) fn blank_pot(&self, squad_id: EntityId) -> Pot {
        Pot {
            id: EntityId::placeholder(EntityKind::Pot),
            sort_order: 0,
            squad_id,
            div_id: None,
            pot_type: PotType::Game,
            fee: Decimal::ZERO,
            errors: FieldErrors::new(),
        }
    }

    pub(crate) fn blank_bracket(&self, squad_id: EntityId) -> Bracket {
        Bracket {
            id: EntityId::placeholder(EntityKind::Bracket),
            sort_order: 0,
            squad_id,
            div_id: None,
            start: 1,
            games: self.side_game_games,
            fee: Decimal::ZERO,
            errors: FieldErrors::new(),
        }
    }

    pub(crate) fn blank_eliminator(&self, squad_id: EntityId) -> Eliminator {
        Eliminator {
            id: EntityId::placeholder(EntityKind::Eliminator),
            sort_order: 0,
            squad_id,
            div_id: None,
            start: 1,
            games: self.side_game_games,
            fee: Decimal::ZERO,
            errors: FieldErrors::new(),
        }
    }
}
