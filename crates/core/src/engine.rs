//! Transition engine - applies one scoring action to a match snapshot
//!
//! Every handler is total: it never fails and never panics on any reachable
//! match state. [`ScoringEngine::apply`] clones the snapshot, mutates the
//! clone and hands it back, so the caller's snapshot is never touched.
//!
//! | Action | Legal | Team runs | Extras | Striker | Bowler conceded |
//! |--------|-------|-----------|--------|---------|-----------------|
//! | `Run(n)` | yes | +n | 0 | +n runs, +1 ball | +n |
//! | `Dot` | yes | 0 | 0 | +1 ball | 0 |
//! | `Wicket` | yes | 0 | 0 | +1 ball | 0 (+1 wicket) |
//! | `Wide` | no | +1 | +1 | - | +1 |
//! | `NoBall(r)` | no | +1+r | +1 | +r runs, +1 ball if r>0 | +1+r |
//! | `LegalVariant(r)` | yes | +r | 0 | +r runs, +1 ball | +r |
//!
//! Strike rotates on a legal delivery with odd runs or one that completes the
//! over; extras never rotate it.

use tracing::debug;

use crate::classifier::{completes_over, extra_slot, legal_slot, Slot};
use crate::ledger::{Delivery, DeliveryKind, Match, Over};
use crate::types::ScoringAction;
use crate::undo::undo_last_delivery;

/// Policy knobs the source behavior leaves open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    /// When set, a `Wicket` at or beyond this count leaves the match unchanged.
    /// `None` leaves the ten-wicket limit to the caller.
    pub max_wickets: Option<u32>,
    /// Undoing a wicket brings the dismissed batsman back on strike and sends
    /// the replacement back to the pavilion. When false the substitution is
    /// one-way and only the counters are reversed.
    pub restore_dismissed_batsman: bool,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            max_wickets: None,
            restore_dismissed_batsman: true,
        }
    }
}

impl ScoringRules {
    /// No wicket cap and a one-way batsman substitution on undo.
    pub fn legacy() -> Self {
        Self {
            max_wickets: None,
            restore_dismissed_batsman: false,
        }
    }

    pub fn with_max_wickets(mut self, cap: Option<u32>) -> Self {
        self.max_wickets = cap;
        self
    }
}

/// Applies scoring actions under a fixed set of [`ScoringRules`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringEngine {
    rules: ScoringRules,
}

impl ScoringEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Apply `action` to a copy of `snapshot` and return the copy.
    pub fn apply(&self, snapshot: &Match, action: ScoringAction) -> Match {
        let mut next = snapshot.clone();
        self.apply_in_place(&mut next, action);
        next
    }

    /// Apply `action` directly to `m`. Returns false when the action was a
    /// no-op: undo with nothing recorded, a capped wicket, or a wicket with
    /// only an already dismissed batsman on strike.
    ///
    /// The last case is a deliberate policy: a refused wicket adds no ball,
    /// so every accepted wicket is a real dismissal that undo can reverse.
    /// Counters saturate at `u32::MAX` instead of overflowing.
    pub fn apply_in_place(&self, m: &mut Match, action: ScoringAction) -> bool {
        let changed = match action {
            ScoringAction::Run { value } => {
                score_legal(m, value, DeliveryKind::Run);
                true
            }
            ScoringAction::Dot => {
                score_legal(m, 0, DeliveryKind::Dot);
                true
            }
            ScoringAction::LegalVariant { off_bat_runs } => {
                score_legal(m, off_bat_runs, DeliveryKind::LegalVariant);
                true
            }
            ScoringAction::Wicket => {
                let capped = self.rules.max_wickets.is_some_and(|cap| m.wickets >= cap);
                // All out with the last man still on strike.
                let nobody_to_dismiss = m.striker().is_some_and(|p| p.is_out);
                if capped || nobody_to_dismiss {
                    false
                } else {
                    wicket(m);
                    true
                }
            }
            ScoringAction::Wide => {
                score_extra(m, 0, DeliveryKind::Wide);
                true
            }
            ScoringAction::NoBall { off_bat_runs } => {
                score_extra(m, off_bat_runs, DeliveryKind::NoBall);
                true
            }
            ScoringAction::Undo => undo_last_delivery(m, &self.rules),
        };

        debug!(
            match_id = %m.id,
            %action,
            changed,
            total_runs = m.total_runs,
            wickets = m.wickets,
            balls = m.balls,
            "scoring action applied"
        );
        changed
    }
}

/// Apply `action` to a copy of `snapshot` under the default rules.
pub fn apply_action(snapshot: &Match, action: ScoringAction) -> Match {
    ScoringEngine::default().apply(snapshot, action)
}

/// Run, dot and legal-variant deliveries.
fn score_legal(m: &mut Match, runs: u32, kind: DeliveryKind) {
    let facing = m.current_striker_id.clone();
    let bowler_id = m.current_bowler_id.clone();

    m.total_runs = m.total_runs.saturating_add(runs);
    if let Some(striker) = m.player_mut(&facing) {
        striker.runs = striker.runs.saturating_add(runs);
        striker.balls = striker.balls.saturating_add(1);
    }
    if let Some(bowler) = m.player_mut(&bowler_id) {
        bowler.runs_conceded = bowler.runs_conceded.saturating_add(runs);
    }

    m.balls = m.balls.saturating_add(1);
    m.sync_overs();
    let over_done = completes_over(m.balls);

    record(m, legal_slot(m.balls), runs, kind, facing, bowler_id.clone());

    if over_done {
        credit_over(m, &bowler_id);
    }
    if runs % 2 == 1 || over_done {
        rotate_strike(m);
    }
}

fn wicket(m: &mut Match) {
    let facing = m.current_striker_id.clone();
    let bowler_id = m.current_bowler_id.clone();

    m.wickets = m.wickets.saturating_add(1);
    if let Some(striker) = m.player_mut(&facing) {
        striker.balls = striker.balls.saturating_add(1);
        striker.is_out = true;
    }
    if let Some(bowler) = m.player_mut(&bowler_id) {
        bowler.wickets = bowler.wickets.saturating_add(1);
    }

    m.balls = m.balls.saturating_add(1);
    m.sync_overs();
    let over_done = completes_over(m.balls);

    record(
        m,
        legal_slot(m.balls),
        0,
        DeliveryKind::Wicket,
        facing,
        bowler_id.clone(),
    );

    // The replacement takes the dismissed batsman's end before any
    // end-of-over swap.
    bring_in_next_batsman(m);

    if over_done {
        credit_over(m, &bowler_id);
        rotate_strike(m);
    }
}

/// Wides (`off_bat_runs` is always 0) and no-balls. An off-bat value too
/// large for the penalty run is clamped so the delivery stays undoable.
fn score_extra(m: &mut Match, off_bat_runs: u32, kind: DeliveryKind) {
    let facing = m.current_striker_id.clone();
    let bowler_id = m.current_bowler_id.clone();
    let off_bat_runs = off_bat_runs.min(u32::MAX - 1);
    let runs = off_bat_runs + 1;

    m.total_runs = m.total_runs.saturating_add(runs);
    m.extras = m.extras.saturating_add(1);
    if off_bat_runs > 0 {
        if let Some(striker) = m.player_mut(&facing) {
            striker.runs = striker.runs.saturating_add(off_bat_runs);
            striker.balls = striker.balls.saturating_add(1);
        }
    }
    if let Some(bowler) = m.player_mut(&bowler_id) {
        bowler.runs_conceded = bowler.runs_conceded.saturating_add(runs);
    }

    record(m, extra_slot(m.balls), runs, kind, facing, bowler_id);
}

/// Append a delivery to the over named by `slot`, opening it if needed.
fn record(
    m: &mut Match,
    slot: Slot,
    runs: u32,
    kind: DeliveryKind,
    batsman_id: String,
    bowler_id: String,
) {
    let idx = match m
        .overs_list
        .iter()
        .rposition(|o| o.over_number == slot.over_number)
    {
        Some(idx) => idx,
        None => {
            let id = format!("{}_over{}", m.id, slot.over_number);
            m.overs_list.push(Over::new(id, slot.over_number));
            m.overs_list.len() - 1
        }
    };

    let over = &mut m.overs_list[idx];
    let delivery = Delivery {
        id: format!("{}_d{}", over.id, over.deliveries.len() + 1),
        over_number: slot.over_number,
        ball_number: slot.ball_number,
        runs,
        kind,
        batsman_id,
        bowler_id,
    };
    over.push(delivery);
}

fn credit_over(m: &mut Match, bowler_id: &str) {
    if let Some(bowler) = m.player_mut(bowler_id) {
        bowler.overs_bowled = bowler.overs_bowled.saturating_add(1);
    }
}

/// Swap striker and non-striker, then rebuild every player's crease flags
/// from the two ids.
pub(crate) fn rotate_strike(m: &mut Match) {
    std::mem::swap(&mut m.current_striker_id, &mut m.current_non_striker_id);
    sync_crease_flags(m);
}

pub(crate) fn sync_crease_flags(m: &mut Match) {
    for p in m.players.iter_mut() {
        p.is_striker = p.id == m.current_striker_id;
        p.is_non_striker = p.id == m.current_non_striker_id;
    }
}

/// Promote the first available batsman (list order, not at the crease, not
/// out) to striker. With nobody left the striker stays as is and the caller
/// is expected to notice the innings is over.
fn bring_in_next_batsman(m: &mut Match) {
    let Some(next) = m
        .players
        .iter()
        .position(|p| p.is_batsman() && !p.at_crease() && !p.is_out)
    else {
        return;
    };

    let out_id = m.current_striker_id.clone();
    if let Some(out) = m.player_mut(&out_id) {
        out.is_striker = false;
    }

    let incoming = &mut m.players[next];
    incoming.is_striker = true;
    m.current_striker_id = incoming.id.clone();
    debug!(match_id = %m.id, out = %out_id, incoming = %m.current_striker_id, "new batsman");
}
