//! HistoryView: finished matches, newest first, one row each.

use crate::core::Match;
use crate::fb::{FrameBuffer, Rgb};
use crate::score_view::{draw_status_lines, header_style, text, StatusLines, Viewport};

const HELP: &str = "Up/Down select  Enter open  d delete  Esc back  q quit";

/// First list row; the header sits on row 0 and column titles on row 2.
const LIST_TOP: u16 = 3;

#[derive(Debug, Clone, Default)]
pub struct HistoryView;

impl HistoryView {
    pub fn new() -> Self {
        Self
    }

    /// Render `matches` with row `selected` highlighted. The list scrolls to
    /// keep the selection on screen.
    pub fn render_into(
        &self,
        matches: &[&Match],
        selected: usize,
        lines: StatusLines<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(text().into_cell(' '));

        let header = header_style();
        fb.fill_row(0, header);
        fb.put_str(1, 0, &format!("Match history ({})", matches.len()), header);

        if matches.is_empty() {
            fb.put_str(2, 2, "No finished matches yet.", text());
        } else {
            fb.put_str(
                2,
                2,
                &format!("  {:<20} {:<16} {:>7} {:>10} {:>7}", "Team", "Played", "Score", "Overs", "RR"),
                text().dim(),
            );
            let room = fb.height().saturating_sub(LIST_TOP + 2).max(1) as usize;
            let skip = (selected + 1).saturating_sub(room);
            for (row, (i, m)) in matches.iter().enumerate().skip(skip).take(room).enumerate() {
                let y = LIST_TOP + row as u16;
                let style = if i == selected {
                    text().bold().with_bg(Rgb::new(0x1f, 0x29, 0x37))
                } else {
                    text()
                };
                let marker = if i == selected { '>' } else { ' ' };
                fb.put_str(2, y, &history_row(marker, m), style);
            }
        }

        draw_status_lines(fb, lines, HELP);
    }

    pub fn render(
        &self,
        matches: &[&Match],
        selected: usize,
        lines: StatusLines<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(matches, selected, lines, viewport, &mut fb);
        fb
    }
}

fn history_row(marker: char, m: &Match) -> String {
    let team: String = m.team_name.chars().take(20).collect();
    format!(
        "{marker} {:<20} {:<16} {:>7} {:>10} {:>7.2}",
        team,
        m.created_at.format("%Y-%m-%d %H:%M").to_string(),
        format!("{}/{}", m.total_runs, m.wickets),
        format!("{} / {}", m.overs_display(), m.max_overs),
        m.run_rate()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::apply_action;
    use crate::types::ScoringAction;
    use chrono::{TimeZone, Utc};

    fn finished(id: &str, team: &str, hour: u32, runs: u32) -> Match {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap();
        let mut m = Match::new(id, team, 5, created);
        for _ in 0..runs {
            m = apply_action(&m, ScoringAction::Run { value: 2 });
        }
        m.complete(created);
        m
    }

    #[test]
    fn rows_show_score_overs_and_date() {
        let a = finished("a", "Falcons", 12, 3);
        let b = finished("b", "Hawks", 9, 0);
        let fb = HistoryView::new().render(&[&a, &b], 0, StatusLines::default(), Viewport::new(100, 12));

        assert!(fb.row_text(0).contains("Match history (2)"));
        let first = fb.row_text(LIST_TOP);
        assert!(first.starts_with("  > Falcons"), "{first}");
        assert!(first.contains("2024-03-01 12:00"), "{first}");
        assert!(first.contains("6/0"), "{first}");
        assert!(first.contains("0.3 / 5"), "{first}");
        assert!(first.contains("12.00"), "{first}");
        assert!(fb.row_text(LIST_TOP + 1).starts_with("    Hawks"));
        assert!(fb.row_text(11).contains("d delete"));
    }

    #[test]
    fn selection_is_highlighted_and_kept_in_view() {
        let all: Vec<Match> = (0..8)
            .map(|i| finished(&format!("m{i}"), &format!("Team{i}"), i, 0))
            .collect();
        let refs: Vec<&Match> = all.iter().collect();
        // Rows 3..=5 fit between the titles and the footer.
        let fb = HistoryView::new().render(&refs, 6, StatusLines::default(), Viewport::new(100, 8));
        let shown: Vec<String> = (LIST_TOP..6).map(|y| fb.row_text(y)).collect();
        assert!(shown[2].starts_with("  > Team6"), "{shown:?}");
        assert!(shown[0].contains("Team4"), "{shown:?}");

        let bg = fb.get(4, LIST_TOP + 2).unwrap().style.bg;
        assert_ne!(bg, text().bg);
    }

    #[test]
    fn empty_history_and_prompt() {
        let lines = StatusLines {
            prompt: Some("Delete Falcons? (y/n)"),
            ..Default::default()
        };
        let fb = HistoryView::new().render(&[], 0, lines, Viewport::new(60, 10));
        assert!(fb.row_text(2).contains("No finished matches yet."));
        assert_eq!(fb.row_text(8), " Delete Falcons? (y/n)");
    }
}
