//! Ledger types - the innings aggregate the engine transforms
//!
//! `Match` owns its players and its overs; an `Over` owns its deliveries in
//! bowled order. All serialized field names are camelCase so a snapshot
//! round-trips through any store that speaks the same schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::completed_overs;
use crate::normalize::{lenient_bool, lenient_u32};
use crate::types::{
    PlayerRole, BALLS_PER_OVER, DEFAULT_MAX_OVERS, SQUAD_BATSMEN, SQUAD_BOWLERS,
};

/// A squad member with cumulative batting and bowling figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub role: PlayerRole,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub runs: u32,
    /// Legal deliveries faced.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub balls: u32,
    /// Wickets taken (bowlers).
    #[serde(default, deserialize_with = "lenient_u32")]
    pub wickets: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub runs_conceded: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub overs_bowled: u32,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_striker: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_non_striker: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_bowling: bool,
    /// Dismissed batsmen are never picked as a replacement.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_out: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            runs: 0,
            balls: 0,
            wickets: 0,
            runs_conceded: 0,
            overs_bowled: 0,
            is_striker: false,
            is_non_striker: false,
            is_bowling: false,
            is_out: false,
        }
    }

    pub fn is_batsman(&self) -> bool {
        self.role == PlayerRole::Batsman
    }

    /// At the crease as striker or non-striker.
    pub fn at_crease(&self) -> bool {
        self.is_striker || self.is_non_striker
    }
}

/// What a recorded delivery was. Exactly one kind per delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryKind {
    Run,
    Dot,
    Wicket,
    Wide,
    NoBall,
    LegalVariant,
}

impl DeliveryKind {
    /// Legal deliveries count toward the six-ball over.
    pub fn is_legal(&self) -> bool {
        !matches!(self, DeliveryKind::Wide | DeliveryKind::NoBall)
    }
}

/// One recorded ball. Immutable once recorded; undo only ever removes the
/// last one of the last over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DeliveryRecord", into = "DeliveryRecord")]
pub struct Delivery {
    pub id: String,
    /// 1-indexed over this delivery belongs to.
    pub over_number: u32,
    /// Position within the over, 1-6.
    pub ball_number: u32,
    /// Every run this delivery put on the board, extras included.
    pub runs: u32,
    pub kind: DeliveryKind,
    /// The striker who faced it.
    pub batsman_id: String,
    pub bowler_id: String,
}

impl Delivery {
    pub fn is_wicket(&self) -> bool {
        self.kind == DeliveryKind::Wicket
    }

    pub fn is_wide(&self) -> bool {
        self.kind == DeliveryKind::Wide
    }

    pub fn is_no_ball(&self) -> bool {
        self.kind == DeliveryKind::NoBall
    }

    pub fn is_legal_variant(&self) -> bool {
        self.kind == DeliveryKind::LegalVariant
    }

    pub fn is_dot(&self) -> bool {
        self.kind == DeliveryKind::Dot
    }

    pub fn is_extra(&self) -> bool {
        !self.kind.is_legal()
    }

    pub fn is_legal(&self) -> bool {
        self.kind.is_legal()
    }

    /// Runs credited to the batsman. A no-ball carries its one-run penalty
    /// on top of these; a wide carries none.
    pub fn off_bat_runs(&self) -> u32 {
        match self.kind {
            DeliveryKind::Wide => 0,
            DeliveryKind::NoBall => self.runs.saturating_sub(1),
            _ => self.runs,
        }
    }

    /// Legal sixth ball of its over.
    pub fn completes_over(&self) -> bool {
        self.is_legal() && self.ball_number == BALLS_PER_OVER
    }

    /// Whether recording this delivery swapped the batsmen.
    pub fn rotated_strike(&self) -> bool {
        self.is_legal() && (self.runs % 2 == 1 || self.completes_over())
    }
}

/// Flag-per-kind wire form of [`Delivery`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryRecord {
    id: String,
    #[serde(deserialize_with = "lenient_u32")]
    over_number: u32,
    #[serde(deserialize_with = "lenient_u32")]
    ball_number: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    runs: u32,
    #[serde(default, deserialize_with = "lenient_bool")]
    is_wicket: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    is_wide: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    is_no_ball: bool,
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        alias = "is1stBounce",
        alias = "isLegalVariant"
    )]
    is_special_legal_variant: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    is_dot: bool,
    batsman_id: String,
    bowler_id: String,
}

impl From<DeliveryRecord> for Delivery {
    fn from(r: DeliveryRecord) -> Self {
        // Extras win over everything: they decide whether the ball was legal.
        let kind = if r.is_wide {
            DeliveryKind::Wide
        } else if r.is_no_ball {
            DeliveryKind::NoBall
        } else if r.is_special_legal_variant {
            DeliveryKind::LegalVariant
        } else if r.is_wicket {
            DeliveryKind::Wicket
        } else if r.is_dot || r.runs == 0 {
            DeliveryKind::Dot
        } else {
            DeliveryKind::Run
        };

        Self {
            id: r.id,
            over_number: r.over_number,
            ball_number: r.ball_number,
            runs: r.runs,
            kind,
            batsman_id: r.batsman_id,
            bowler_id: r.bowler_id,
        }
    }
}

impl From<Delivery> for DeliveryRecord {
    fn from(d: Delivery) -> Self {
        Self {
            is_wicket: d.kind == DeliveryKind::Wicket,
            is_wide: d.kind == DeliveryKind::Wide,
            is_no_ball: d.kind == DeliveryKind::NoBall,
            is_special_legal_variant: d.kind == DeliveryKind::LegalVariant,
            is_dot: d.kind == DeliveryKind::Dot,
            id: d.id,
            over_number: d.over_number,
            ball_number: d.ball_number,
            runs: d.runs,
            batsman_id: d.batsman_id,
            bowler_id: d.bowler_id,
        }
    }
}

/// An over and its deliveries in bowled order.
///
/// `total_runs`, `wickets` and `extras` are derived; every mutation goes
/// through [`Over::push`] or [`Over::pop`], which recompute them from the
/// delivery list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Over {
    pub id: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub over_number: u32,
    #[serde(rename = "balls", default)]
    pub deliveries: Vec<Delivery>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_runs: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub wickets: u32,
    /// Count of wides and no-balls (deliveries, not runs).
    #[serde(default, deserialize_with = "lenient_u32")]
    pub extras: u32,
}

impl Over {
    pub fn new(id: impl Into<String>, over_number: u32) -> Self {
        Self {
            id: id.into(),
            over_number,
            deliveries: Vec::new(),
            total_runs: 0,
            wickets: 0,
            extras: 0,
        }
    }

    pub fn push(&mut self, delivery: Delivery) {
        self.deliveries.push(delivery);
        self.recompute_totals();
    }

    pub fn pop(&mut self) -> Option<Delivery> {
        let d = self.deliveries.pop();
        self.recompute_totals();
        d
    }

    pub fn last_delivery(&self) -> Option<&Delivery> {
        self.deliveries.last()
    }

    pub fn legal_count(&self) -> usize {
        self.deliveries.iter().filter(|d| d.is_legal()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Rebuild the derived totals from the delivery list.
    pub fn recompute_totals(&mut self) {
        self.total_runs = self
            .deliveries
            .iter()
            .fold(0u32, |acc, d| acc.saturating_add(d.runs));
        self.wickets = self.deliveries.iter().filter(|d| d.is_wicket()).count() as u32;
        self.extras = self.deliveries.iter().filter(|d| d.is_extra()).count() as u32;
    }
}

/// The innings aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub team_name: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub max_overs: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_runs: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub wickets: u32,
    /// Completed overs, always `balls / 6`.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub overs: u32,
    /// Legal deliveries bowled; wides and no-balls never count.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub balls: u32,
    /// Count of wides and no-balls.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub extras: u32,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub overs_list: Vec<Over>,
    #[serde(default)]
    pub current_striker_id: String,
    #[serde(default)]
    pub current_non_striker_id: String,
    #[serde(default)]
    pub current_bowler_id: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Match {
    /// Create an empty innings with a seeded squad.
    ///
    /// Batsmen `BT1..BT11` and bowlers `B1..B5` get ids derived from the
    /// match id. `BT1` takes strike, `BT2` is at the other end and `B1` bowls.
    /// A `max_overs` of zero falls back to [`DEFAULT_MAX_OVERS`].
    pub fn new(
        id: impl Into<String>,
        team_name: impl Into<String>,
        max_overs: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        let max_overs = if max_overs == 0 {
            DEFAULT_MAX_OVERS
        } else {
            max_overs
        };

        let mut players = Vec::with_capacity(SQUAD_BATSMEN + SQUAD_BOWLERS);
        for i in 1..=SQUAD_BATSMEN {
            let mut p = Player::new(format!("{id}_bt{i}"), format!("BT{i}"), PlayerRole::Batsman);
            p.is_striker = i == 1;
            p.is_non_striker = i == 2;
            players.push(p);
        }
        for i in 1..=SQUAD_BOWLERS {
            let mut p = Player::new(format!("{id}_b{i}"), format!("B{i}"), PlayerRole::Bowler);
            p.is_bowling = i == 1;
            players.push(p);
        }

        Self {
            current_striker_id: format!("{id}_bt1"),
            current_non_striker_id: format!("{id}_bt2"),
            current_bowler_id: format!("{id}_b1"),
            id,
            team_name: team_name.into(),
            max_overs,
            total_runs: 0,
            wickets: 0,
            overs: 0,
            balls: 0,
            extras: 0,
            players,
            overs_list: Vec::new(),
            is_completed: false,
            created_at,
            completed_at: None,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn striker(&self) -> Option<&Player> {
        self.player(&self.current_striker_id)
    }

    pub fn non_striker(&self) -> Option<&Player> {
        self.player(&self.current_non_striker_id)
    }

    pub fn bowler(&self) -> Option<&Player> {
        self.player(&self.current_bowler_id)
    }

    pub fn over(&self, over_number: u32) -> Option<&Over> {
        self.overs_list.iter().find(|o| o.over_number == over_number)
    }

    pub fn last_delivery(&self) -> Option<&Delivery> {
        self.overs_list.last().and_then(Over::last_delivery)
    }

    /// Every recorded delivery, oldest first.
    pub fn deliveries(&self) -> impl Iterator<Item = &Delivery> {
        self.overs_list.iter().flat_map(|o| o.deliveries.iter())
    }

    /// Recompute `overs` from `balls`.
    pub(crate) fn sync_overs(&mut self) {
        self.overs = completed_overs(self.balls);
    }
}
