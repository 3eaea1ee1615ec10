//! ScoreboardView: draws a match snapshot into a framebuffer.
//!
//! Pure (no I/O), so every line can be asserted on in tests.

use crate::core::{ball_label, color_of, summary_of, Match, Over, Player};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Transient lines drawn at the bottom of every screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusLines<'a> {
    /// An open input prompt; takes the place of `status`.
    pub prompt: Option<&'a str>,
    /// Last persistence message, e.g. `Saved`.
    pub status: Option<&'a str>,
    /// Replaces the screen's own key help.
    pub help: Option<&'a str>,
}

const HELP: &str = "1-6 runs  0 dot  w wicket  e wide  n no-ball  b 1st bounce  u undo  \
                    s save  x finish  h history  q quit";

/// Key help for a finished match opened from the history list.
pub const DETAIL_HELP: &str = "d delete  Esc back  q quit";

/// Rows reserved below the over list: banner, status, help.
const FOOTER_ROWS: u16 = 3;
/// Column where per-over totals start, counted from the right edge.
const TOTALS_WIDTH: u16 = 14;

#[derive(Debug, Clone, Default)]
pub struct ScoreboardView;

impl ScoreboardView {
    pub fn new() -> Self {
        Self
    }

    /// Render `m` (or the idle screen) into an existing framebuffer.
    pub fn render_into(
        &self,
        m: Option<&Match>,
        lines: StatusLines<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        match m {
            Some(m) => self.draw_match(fb, m),
            None => {
                fb.put_str(2, 2, "No match in progress.", text());
                fb.put_str(2, 3, "Press Enter to start a new match.", text().dim());
            }
        }
        self.draw_footer(fb, m, lines);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, m: Option<&Match>, lines: StatusLines<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(m, lines, viewport, &mut fb);
        fb
    }

    fn draw_match(&self, fb: &mut FrameBuffer, m: &Match) {
        let header = header_style();
        fb.fill_row(0, header);
        let x = fb.put_str(1, 0, &m.team_name, header);
        if m.is_completed {
            fb.put_str(x + 2, 0, "FINAL", header);
        }

        fb.put_str(
            2,
            2,
            &format!(
                "{}/{}   Overs {} / {}",
                m.total_runs,
                m.wickets,
                m.overs_display(),
                m.max_overs
            ),
            text().bold(),
        );
        let b = m.boundaries();
        fb.put_str(
            2,
            3,
            &format!(
                "Run rate {:.2}   Balls {}   Remaining {}   Extras {}   4s {}   6s {}",
                m.run_rate(),
                m.balls,
                m.balls_remaining(),
                m.extras,
                b.fours,
                b.sixes
            ),
            text(),
        );

        fb.put_str(2, 5, &batting_line('*', m.striker()), text());
        fb.put_str(2, 6, &batting_line(' ', m.non_striker()), text());
        if let Some(bowler) = m.bowler() {
            fb.put_str(
                2,
                7,
                &format!(
                    "  {}  {} ov  {} runs  {} wkts",
                    bowler.name, bowler.overs_bowled, bowler.runs_conceded, bowler.wickets
                ),
                text(),
            );
        }

        self.draw_overs(fb, m, 9);
    }

    /// Over rows from `top`, oldest first; older overs scroll off when the
    /// screen is short.
    fn draw_overs(&self, fb: &mut FrameBuffer, m: &Match, top: u16) {
        let totals_x = fb.width().saturating_sub(TOTALS_WIDTH);
        fb.put_str(2, top, "Over", text().dim());
        fb.put_str(totals_x, top, "  R   W  Ex", text().dim());

        let bottom = fb.height().saturating_sub(FOOTER_ROWS);
        let room = bottom.saturating_sub(top + 1) as usize;
        let skip = m.overs_list.len().saturating_sub(room);

        for (row, over) in m.overs_list.iter().skip(skip).enumerate() {
            let y = top + 1 + row as u16;
            self.draw_over_row(fb, over, y, totals_x);
        }
    }

    fn draw_over_row(&self, fb: &mut FrameBuffer, over: &Over, y: u16, totals_x: u16) {
        let mut x = fb.put_str(2, y, &format!("{:>4}", over.over_number), text());
        x += 2;
        for d in &over.deliveries {
            let style = CellStyle::default()
                .with_fg(Rgb::new(255, 255, 255))
                .with_bg(color_of(d).into())
                .bold();
            x = fb.put_str(x, y, &format!(" {} ", ball_label(d)), style);
            x += 1;
        }

        let summary = summary_of(over);
        if !summary.is_empty() {
            fb.put_str(x + 1, y, &format!("({summary})"), text().dim());
        }
        fb.put_str(
            totals_x,
            y,
            &format!("{:>3} {:>3} {:>3}", over.total_runs, over.wickets, over.extras),
            text(),
        );
    }

    fn draw_footer(&self, fb: &mut FrameBuffer, m: Option<&Match>, lines: StatusLines<'_>) {
        let h = fb.height();
        if h < FOOTER_ROWS {
            return;
        }

        if let Some(m) = m.filter(|m| !m.is_completed && m.is_innings_over()) {
            let banner = CellStyle::default()
                .with_fg(Rgb::new(255, 255, 255))
                .with_bg(Rgb::new(0xef, 0x44, 0x44))
                .bold();
            fb.fill_row(h - 3, banner);
            fb.put_str(
                1,
                h - 3,
                &format!("Innings over at {}/{}. Press x to finish or u to undo.", m.total_runs, m.wickets),
                banner,
            );
        }

        draw_status_lines(fb, lines, HELP);
    }
}

/// Prompt or status on the second-to-last row, key help on the last.
pub(crate) fn draw_status_lines(fb: &mut FrameBuffer, lines: StatusLines<'_>, help: &str) {
    let h = fb.height();
    if h < 2 {
        return;
    }
    if let Some(prompt) = lines.prompt {
        fb.put_str(1, h - 2, prompt, text().bold().with_fg(Rgb::new(0xf5, 0x9e, 0x0b)));
    } else if let Some(status) = lines.status {
        fb.put_str(1, h - 2, status, text());
    }
    fb.put_str(1, h - 1, lines.help.unwrap_or(help), text().dim());
}

pub(crate) fn text() -> CellStyle {
    CellStyle::default()
}

pub(crate) fn header_style() -> CellStyle {
    CellStyle::default()
        .with_fg(Rgb::new(255, 255, 255))
        .with_bg(Rgb::new(0x0f, 0x76, 0x6e))
        .bold()
}

fn batting_line(marker: char, p: Option<&Player>) -> String {
    match p {
        Some(p) => format!("{marker} {}  {} ({})", p.name, p.runs, p.balls),
        None => format!("{marker} -"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::apply_action;
    use crate::types::ScoringAction;
    use chrono::{TimeZone, Utc};

    fn played(actions: &[ScoringAction]) -> Match {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let m = Match::new("m", "Falcons", 2, created);
        actions.iter().fold(m, |acc, &a| apply_action(&acc, a))
    }

    fn screen(m: Option<&Match>, lines: StatusLines<'_>) -> FrameBuffer {
        ScoreboardView::new().render(m, lines, Viewport::new(100, 20))
    }

    fn find_row(fb: &FrameBuffer, needle: &str) -> Option<u16> {
        (0..fb.height()).find(|&y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn headline_numbers() {
        let m = played(&[
            ScoringAction::Run { value: 4 },
            ScoringAction::Wide,
            ScoringAction::Wicket,
        ]);
        let fb = screen(Some(&m), StatusLines::default());
        assert!(fb.row_text(0).contains("Falcons"));
        assert!(fb.row_text(2).contains("5/1   Overs 0.2 / 2"));
        assert!(fb.row_text(3).contains("Remaining 10"));
        assert!(fb.row_text(3).contains("4s 1"));
        assert!(fb.row_text(5).starts_with("  * BT3  0 (0)"));
        assert!(fb.row_text(7).contains("B1"));
    }

    #[test]
    fn over_row_shows_labels_summary_and_totals() {
        let m = played(&[
            ScoringAction::Run { value: 6 },
            ScoringAction::NoBall { off_bat_runs: 2 },
            ScoringAction::Wicket,
            ScoringAction::LegalVariant { off_bat_runs: 1 },
        ]);
        let fb = screen(Some(&m), StatusLines::default());
        let y = find_row(&fb, " 6 ").unwrap();
        let row = fb.row_text(y);
        assert!(row.contains(" 6   NB   W   1B "), "{row}");
        assert!(row.contains("(6 W b1)"), "{row}");
        assert!(row.ends_with("10   1   1"), "{row}");
    }

    #[test]
    fn ball_boxes_use_the_palette() {
        let m = played(&[ScoringAction::Run { value: 4 }, ScoringAction::Wicket]);
        let fb = screen(Some(&m), StatusLines::default());
        // First over row sits under the header at row 9.
        let boxed: Vec<_> = (0..fb.width())
            .filter_map(|x| fb.get(x, 10))
            .filter(|c| c.style.bg != CellStyle::default().bg && c.ch != ' ')
            .map(|c| (c.ch, c.style.bg))
            .collect();
        assert_eq!(
            boxed,
            [('4', Rgb::new(0x3b, 0x82, 0xf6)), ('W', Rgb::new(0xef, 0x44, 0x44))]
        );
    }

    #[test]
    fn prompt_replaces_status() {
        let m = played(&[]);
        let lines = StatusLines {
            prompt: Some("No ball - runs off the bat?"),
            status: Some("Saved"),
            ..Default::default()
        };
        let fb = screen(Some(&m), lines);
        assert_eq!(fb.row_text(18), " No ball - runs off the bat?");
        assert!(fb.row_text(19).contains("u undo"));
    }

    #[test]
    fn innings_over_banner() {
        let m = played(&[ScoringAction::Dot; 12]);
        let fb = screen(Some(&m), StatusLines::default());
        assert!(fb.row_text(17).contains("Innings over at 0/0"));
    }

    #[test]
    fn idle_screen_without_a_match() {
        let lines = StatusLines {
            status: Some("Match saved"),
            ..Default::default()
        };
        let fb = screen(None, lines);
        assert!(find_row(&fb, "No match in progress").is_some());
        assert_eq!(fb.row_text(18), " Match saved");
    }

    #[test]
    fn finished_match_with_its_own_help() {
        let mut m = played(&[ScoringAction::Run { value: 4 }]);
        m.complete(Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap());
        let lines = StatusLines {
            help: Some(DETAIL_HELP),
            ..Default::default()
        };
        let fb = screen(Some(&m), lines);
        assert!(fb.row_text(0).contains("Falcons  FINAL"));
        assert_eq!(fb.row_text(19), format!(" {DETAIL_HELP}"));
    }

    #[test]
    fn long_innings_scrolls_to_the_latest_over() {
        let m = played(&[ScoringAction::Dot; 12]);
        let fb = ScoreboardView::new().render(Some(&m), StatusLines::default(), Viewport::new(100, 14));
        // Rows 10..11 hold the over list; only over 2 fits.
        assert!(find_row(&fb, "   2   0").is_some());
        assert!(find_row(&fb, "   1   0").is_none());
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let m = played(&[ScoringAction::Run { value: 1 }]);
        let _ = ScoreboardView::new().render(Some(&m), StatusLines::default(), Viewport::new(3, 2));
        let _ = ScoreboardView::new().render(Some(&m), StatusLines::default(), Viewport::new(0, 0));
    }
}
