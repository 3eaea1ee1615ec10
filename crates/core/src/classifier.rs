//! Delivery classifier - maps a legal-ball count to an over/ball slot
//!
//! Balls 1-6 fall in over 1, balls 7-12 in over 2, and so on. A legal
//! delivery is classified on the count *after* it was added; an extra does
//! not add to the count, so it is classified on `count + 1` and lands in the
//! over that will receive the next legal ball.

use crate::types::BALLS_PER_OVER;

/// Where a delivery sits in the innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub over_number: u32,
    pub ball_number: u32,
}

/// 1-indexed over holding the `legal_balls`-th legal ball.
pub fn current_over_number(legal_balls: u32) -> u32 {
    if legal_balls == 0 {
        return 1;
    }
    (legal_balls - 1) / BALLS_PER_OVER + 1
}

/// Position (1-6) of the `legal_balls`-th legal ball within its over.
pub fn ball_number_in_over(legal_balls: u32) -> u32 {
    if legal_balls == 0 {
        return 1;
    }
    (legal_balls - 1) % BALLS_PER_OVER + 1
}

/// Slot of a legal delivery, given the legal count including it.
pub fn legal_slot(legal_balls_after: u32) -> Slot {
    Slot {
        over_number: current_over_number(legal_balls_after),
        ball_number: ball_number_in_over(legal_balls_after),
    }
}

/// Slot of a wide or no-ball, given the legal count before it.
pub fn extra_slot(legal_balls_before: u32) -> Slot {
    legal_slot(legal_balls_before.saturating_add(1))
}

/// Completed overs for a legal-ball count.
pub fn completed_overs(legal_balls: u32) -> u32 {
    legal_balls / BALLS_PER_OVER
}

/// True when `legal_balls` sits exactly on an over boundary.
pub fn completes_over(legal_balls: u32) -> bool {
    legal_balls > 0 && legal_balls % BALLS_PER_OVER == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_over_boundaries() {
        assert_eq!(legal_slot(0), Slot { over_number: 1, ball_number: 1 });
        assert_eq!(legal_slot(1), Slot { over_number: 1, ball_number: 1 });
        assert_eq!(legal_slot(6), Slot { over_number: 1, ball_number: 6 });
        assert_eq!(legal_slot(7), Slot { over_number: 2, ball_number: 1 });
        assert_eq!(legal_slot(12), Slot { over_number: 2, ball_number: 6 });
    }

    #[test]
    fn extras_go_to_the_over_of_the_next_legal_ball() {
        // Before any legal ball: over 1, ball 1.
        assert_eq!(extra_slot(0), Slot { over_number: 1, ball_number: 1 });
        // After the sixth ball the extra opens over 2.
        assert_eq!(extra_slot(6), Slot { over_number: 2, ball_number: 1 });
        assert_eq!(extra_slot(8), Slot { over_number: 2, ball_number: 3 });
    }

    #[test]
    fn over_completion() {
        assert!(!completes_over(0));
        assert!(!completes_over(5));
        assert!(completes_over(6));
        assert!(!completes_over(7));
        assert!(completes_over(12));
        assert_eq!(completed_overs(5), 0);
        assert_eq!(completed_overs(6), 1);
        assert_eq!(completed_overs(13), 2);
    }

    proptest! {
        #[test]
        fn slot_matches_division(n in 1u32..10_000) {
            let slot = legal_slot(n);
            prop_assert!((1..=BALLS_PER_OVER).contains(&slot.ball_number));
            prop_assert_eq!((slot.over_number - 1) * BALLS_PER_OVER + slot.ball_number, n);
            prop_assert_eq!(slot.ball_number == BALLS_PER_OVER, completes_over(n));
        }

        #[test]
        fn next_legal_ball_shares_the_extra_slot(n in 0u32..10_000) {
            prop_assert_eq!(extra_slot(n), legal_slot(n + 1));
        }
    }
}
