//! Display helpers for over strips and ball boxes. Pure functions.

use crate::ledger::{Delivery, DeliveryKind, Over};
use crate::types::BallColor;

/// Space-joined tokens for the legal deliveries of an over.
///
/// `W` for a wicket, `0` for a dot, `b<runs>` for a legal variant, otherwise
/// the run value. Wides and no-balls are left out.
///
/// ```
/// use cricket_scorer_core::{summary_of, Over};
///
/// assert_eq!(summary_of(&Over::new("o1", 1)), "");
/// ```
pub fn summary_of(over: &Over) -> String {
    over.deliveries
        .iter()
        .filter(|d| d.is_legal())
        .map(|d| match d.kind {
            DeliveryKind::Wicket => "W".to_string(),
            DeliveryKind::Dot => "0".to_string(),
            DeliveryKind::LegalVariant => format!("b{}", d.runs),
            _ => d.runs.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Presentation color, first match wins: legal variant, six, four, wicket,
/// wide or no-ball, then the default.
pub fn color_of(delivery: &Delivery) -> BallColor {
    if delivery.is_legal_variant() {
        BallColor::Variant
    } else if delivery.runs == 6 {
        BallColor::Six
    } else if delivery.runs == 4 {
        BallColor::Four
    } else if delivery.is_wicket() {
        BallColor::Wicket
    } else if delivery.is_extra() {
        BallColor::Extra
    } else {
        BallColor::Default
    }
}

/// Short label for one ball box: `W`, `WD`, `NB`, `1B`, `0` or the runs.
pub fn ball_label(delivery: &Delivery) -> String {
    match delivery.kind {
        DeliveryKind::Wicket => "W".to_string(),
        DeliveryKind::Wide => "WD".to_string(),
        DeliveryKind::NoBall => "NB".to_string(),
        DeliveryKind::LegalVariant => "1B".to_string(),
        DeliveryKind::Dot => "0".to_string(),
        DeliveryKind::Run => delivery.runs.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(runs: u32, kind: DeliveryKind) -> Delivery {
        Delivery {
            id: "d".into(),
            over_number: 1,
            ball_number: 1,
            runs,
            kind,
            batsman_id: "bt1".into(),
            bowler_id: "b1".into(),
        }
    }

    #[test]
    fn summary_skips_extras() {
        let mut over = Over::new("o1", 1);
        over.push(delivery(4, DeliveryKind::Run));
        over.push(delivery(1, DeliveryKind::Wide));
        over.push(delivery(0, DeliveryKind::Dot));
        over.push(delivery(3, DeliveryKind::NoBall));
        over.push(delivery(0, DeliveryKind::Wicket));
        over.push(delivery(2, DeliveryKind::LegalVariant));
        over.push(delivery(6, DeliveryKind::Run));
        assert_eq!(summary_of(&over), "4 0 W b2 6");
    }

    #[test]
    fn color_priority() {
        // Variant beats the six check.
        assert_eq!(color_of(&delivery(6, DeliveryKind::LegalVariant)), BallColor::Variant);
        assert_eq!(color_of(&delivery(6, DeliveryKind::Run)), BallColor::Six);
        assert_eq!(color_of(&delivery(4, DeliveryKind::Run)), BallColor::Four);
        // A no-ball worth four is colored as a four.
        assert_eq!(color_of(&delivery(4, DeliveryKind::NoBall)), BallColor::Four);
        assert_eq!(color_of(&delivery(0, DeliveryKind::Wicket)), BallColor::Wicket);
        assert_eq!(color_of(&delivery(1, DeliveryKind::Wide)), BallColor::Extra);
        assert_eq!(color_of(&delivery(2, DeliveryKind::NoBall)), BallColor::Extra);
        assert_eq!(color_of(&delivery(1, DeliveryKind::Run)), BallColor::Default);
        assert_eq!(color_of(&delivery(0, DeliveryKind::Dot)), BallColor::Default);
    }

    #[test]
    fn labels() {
        assert_eq!(ball_label(&delivery(0, DeliveryKind::Wicket)), "W");
        assert_eq!(ball_label(&delivery(1, DeliveryKind::Wide)), "WD");
        assert_eq!(ball_label(&delivery(3, DeliveryKind::NoBall)), "NB");
        assert_eq!(ball_label(&delivery(2, DeliveryKind::LegalVariant)), "1B");
        assert_eq!(ball_label(&delivery(0, DeliveryKind::Dot)), "0");
        assert_eq!(ball_label(&delivery(3, DeliveryKind::Run)), "3");
    }
}
