//! Read-only projections over a match snapshot.

use chrono::{DateTime, Utc};

use crate::ledger::Match;
use crate::types::{BALLS_PER_OVER, MAX_WICKETS};

/// Boundary counts for an innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boundaries {
    pub fours: u32,
    pub sixes: u32,
}

impl Match {
    /// The over currently being bowled (1-indexed).
    pub fn current_over_number(&self) -> u32 {
        self.overs + 1
    }

    pub fn balls_in_current_over(&self) -> u32 {
        self.balls % BALLS_PER_OVER
    }

    pub fn balls_remaining(&self) -> u32 {
        (self.max_overs * BALLS_PER_OVER).saturating_sub(self.balls)
    }

    /// Runs per over; 0.0 before the first legal ball.
    pub fn run_rate(&self) -> f64 {
        let overs = self.overs as f64 + self.balls_in_current_over() as f64 / BALLS_PER_OVER as f64;
        if overs > 0.0 {
            self.total_runs as f64 / overs
        } else {
            0.0
        }
    }

    /// Completed overs and balls into the next one, e.g. `"3.2"`.
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.overs, self.balls_in_current_over())
    }

    /// All out, or the overs allocation is used up.
    pub fn is_innings_over(&self) -> bool {
        self.wickets >= MAX_WICKETS
            || (self.overs >= self.max_overs && self.balls % BALLS_PER_OVER == 0)
    }

    /// Fours and sixes off the bat. Wides never count.
    pub fn boundaries(&self) -> Boundaries {
        self.deliveries()
            .filter(|d| !d.is_wide())
            .fold(Boundaries::default(), |mut acc, d| {
                match d.off_bat_runs() {
                    4 => acc.fours += 1,
                    6 => acc.sixes += 1,
                    _ => {}
                }
                acc
            })
    }

    /// Sum of every recorded delivery's runs. Equals `total_runs` on any
    /// snapshot the engine produced.
    pub fn recomputed_total_runs(&self) -> u32 {
        self.deliveries().fold(0u32, |acc, d| acc.saturating_add(d.runs))
    }

    /// Mark the innings finished.
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.is_completed = true;
        self.completed_at = Some(at);
    }
}
