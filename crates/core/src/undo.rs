//! Undo - exact inverse of the most recently recorded delivery
//!
//! There is no command log. The last delivery of the last over carries
//! everything needed to reverse it: its kind, its runs, its slot (for the
//! strike-rotation condition) and the batsman and bowler on record.
//! Counters are clamped at zero so a corrupted snapshot cannot go negative.

use tracing::debug;

use crate::engine::{rotate_strike, sync_crease_flags, ScoringRules};
use crate::ledger::{Delivery, DeliveryKind, Match};

/// Remove the last delivery and reverse its effects. Returns false (and
/// leaves `m` untouched) when nothing has been recorded.
pub(crate) fn undo_last_delivery(m: &mut Match, rules: &ScoringRules) -> bool {
    let Some(last) = m.last_delivery().cloned() else {
        return false;
    };

    match last.kind {
        DeliveryKind::Wide | DeliveryKind::NoBall => reverse_extra(m, &last),
        DeliveryKind::Run
        | DeliveryKind::Dot
        | DeliveryKind::Wicket
        | DeliveryKind::LegalVariant => reverse_legal(m, &last, rules),
    }

    if let Some(over) = m.overs_list.last_mut() {
        over.pop();
        if over.is_empty() {
            m.overs_list.pop();
        }
    }

    debug!(
        match_id = %m.id,
        delivery = %last.id,
        kind = ?last.kind,
        total_runs = m.total_runs,
        balls = m.balls,
        "delivery undone"
    );
    true
}

fn reverse_extra(m: &mut Match, last: &Delivery) {
    m.total_runs = m.total_runs.saturating_sub(last.runs);
    m.extras = m.extras.saturating_sub(1);

    if let Some(bowler) = m.player_mut(&last.bowler_id) {
        bowler.runs_conceded = bowler.runs_conceded.saturating_sub(last.runs);
    }

    let off_bat = last.off_bat_runs();
    if off_bat > 0 {
        if let Some(batsman) = m.player_mut(&last.batsman_id) {
            batsman.runs = batsman.runs.saturating_sub(off_bat);
            batsman.balls = batsman.balls.saturating_sub(1);
        }
    }
}

fn reverse_legal(m: &mut Match, last: &Delivery, rules: &ScoringRules) {
    m.total_runs = m.total_runs.saturating_sub(last.runs);
    m.balls = m.balls.saturating_sub(1);
    m.sync_overs();

    if let Some(batsman) = m.player_mut(&last.batsman_id) {
        batsman.runs = batsman.runs.saturating_sub(last.runs);
        batsman.balls = batsman.balls.saturating_sub(1);
    }
    if let Some(bowler) = m.player_mut(&last.bowler_id) {
        bowler.runs_conceded = bowler.runs_conceded.saturating_sub(last.runs);
        if last.is_wicket() {
            bowler.wickets = bowler.wickets.saturating_sub(1);
        }
        if last.completes_over() {
            bowler.overs_bowled = bowler.overs_bowled.saturating_sub(1);
        }
    }
    if last.is_wicket() {
        m.wickets = m.wickets.saturating_sub(1);
    }

    if last.rotated_strike() {
        rotate_strike(m);
    }

    // Recording a wicket swapped in the replacement before the end-of-over
    // rotation, so it is reversed after rotating back.
    if last.is_wicket() && rules.restore_dismissed_batsman {
        restore_dismissed(m, &last.batsman_id);
    }
}

fn restore_dismissed(m: &mut Match, dismissed_id: &str) {
    let Some(dismissed) = m.player_mut(dismissed_id) else {
        return;
    };
    dismissed.is_out = false;

    if m.current_striker_id != dismissed_id {
        m.current_striker_id = dismissed_id.to_string();
    }
    sync_crease_flags(m);
}

#[cfg(test)]
mod tests {
    use crate::engine::{apply_action, ScoringEngine, ScoringRules};
    use crate::ledger::Match;
    use crate::types::ScoringAction;
    use chrono::{TimeZone, Utc};

    fn new_match() -> Match {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        Match::new("m", "Falcons", 2, created)
    }

    fn play(m: &Match, actions: &[ScoringAction]) -> Match {
        actions.iter().fold(m.clone(), |acc, &a| apply_action(&acc, a))
    }

    fn assert_round_trip(prefix: &[ScoringAction], action: ScoringAction) {
        let before = play(&new_match(), prefix);
        let after = apply_action(&apply_action(&before, action), ScoringAction::Undo);
        assert_eq!(after, before, "{action} then undo after {prefix:?}");
    }

    #[test]
    fn undo_on_empty_match_is_a_no_op() {
        let m = new_match();
        assert_eq!(apply_action(&m, ScoringAction::Undo), m);
    }

    #[test]
    fn wide_then_undo_is_identity() {
        assert_round_trip(&[], ScoringAction::Wide);
        assert_round_trip(&[ScoringAction::Dot; 6], ScoringAction::Wide);
    }

    #[test]
    fn every_action_reverses_exactly() {
        let prefixes: [&[ScoringAction]; 4] = [
            &[],
            &[ScoringAction::Run { value: 1 }],
            &[ScoringAction::Dot; 5],
            &[ScoringAction::Wicket, ScoringAction::Wide, ScoringAction::Dot],
        ];
        let actions = [
            ScoringAction::Run { value: 1 },
            ScoringAction::Run { value: 4 },
            ScoringAction::Run { value: 6 },
            ScoringAction::Dot,
            ScoringAction::Wicket,
            ScoringAction::Wide,
            ScoringAction::NoBall { off_bat_runs: 0 },
            ScoringAction::NoBall { off_bat_runs: 3 },
            ScoringAction::LegalVariant { off_bat_runs: 0 },
            ScoringAction::LegalVariant { off_bat_runs: 5 },
        ];
        for prefix in prefixes {
            for action in actions {
                assert_round_trip(prefix, action);
            }
        }
    }

    #[test]
    fn undo_removes_an_emptied_over() {
        let m = play(&new_match(), &[ScoringAction::Dot; 6]);
        let m = apply_action(&m, ScoringAction::Run { value: 2 });
        assert_eq!(m.overs_list.len(), 2);
        let m = apply_action(&m, ScoringAction::Undo);
        assert_eq!(m.overs_list.len(), 1);
        assert_eq!(m.balls, 6);
        assert_eq!(m.overs, 1);
    }

    #[test]
    fn undo_reopens_a_completed_over() {
        let m = play(&new_match(), &[ScoringAction::Dot; 6]);
        let striker = m.current_striker_id.clone();
        let m = apply_action(&m, ScoringAction::Undo);
        assert_eq!(m.overs, 0);
        assert_eq!(m.balls, 5);
        assert_eq!(m.overs_list[0].legal_count(), 5);
        assert_ne!(m.current_striker_id, striker);
        assert_eq!(m.player("m_b1").unwrap().overs_bowled, 0);
    }

    #[test]
    fn repeated_undo_unwinds_the_whole_innings() {
        let actions = [
            ScoringAction::Run { value: 4 },
            ScoringAction::Wicket,
            ScoringAction::NoBall { off_bat_runs: 2 },
            ScoringAction::Run { value: 3 },
            ScoringAction::Wide,
            ScoringAction::Dot,
            ScoringAction::LegalVariant { off_bat_runs: 1 },
            ScoringAction::Run { value: 6 },
        ];
        let start = new_match();
        let mut m = play(&start, &actions);
        for _ in 0..actions.len() {
            m = apply_action(&m, ScoringAction::Undo);
        }
        assert_eq!(m, start);
    }

    #[test]
    fn legacy_rules_keep_the_replacement_in() {
        let engine = ScoringEngine::new(ScoringRules::legacy());
        let m = engine.apply(&new_match(), ScoringAction::Wicket);
        let m = engine.apply(&m, ScoringAction::Undo);

        assert_eq!(m.wickets, 0);
        assert_eq!(m.balls, 0);
        assert_eq!(m.player("m_b1").unwrap().wickets, 0);
        assert_eq!(m.player("m_bt1").unwrap().balls, 0);
        // The substitution is one-way.
        assert_eq!(m.current_striker_id, "m_bt3");
        assert!(m.player("m_bt1").unwrap().is_out);
    }

    #[test]
    fn default_rules_restore_the_dismissed_batsman() {
        let m = apply_action(&new_match(), ScoringAction::Wicket);
        let m = apply_action(&m, ScoringAction::Undo);
        assert_eq!(m.current_striker_id, "m_bt1");
        let bt1 = m.player("m_bt1").unwrap();
        assert!(bt1.is_striker && !bt1.is_out);
        assert!(!m.player("m_bt3").unwrap().at_crease());
    }

    #[test]
    fn undo_of_the_last_wicket_brings_the_last_man_back() {
        let all_out = play(&new_match(), &[ScoringAction::Wicket; 10]);
        let m = apply_action(&all_out, ScoringAction::Undo);
        assert_eq!(m.wickets, 9);
        assert_eq!(m.current_striker_id, "m_bt11");
        assert!(!m.player("m_bt11").unwrap().is_out);
    }

    #[test]
    fn undo_clamps_corrupted_counters_at_zero() {
        let mut m = apply_action(&new_match(), ScoringAction::Run { value: 4 });
        m.total_runs = 1;
        m.players[0].runs = 0;
        let m = apply_action(&m, ScoringAction::Undo);
        assert_eq!(m.total_runs, 0);
        assert_eq!(m.players[0].runs, 0);
    }
}
