//! New-match screen: team name and an overs limit picked from the presets.

use crate::fb::{FrameBuffer, Rgb};
use crate::score_view::{draw_status_lines, header_style, text, StatusLines, Viewport};
use crate::types::{DEFAULT_MAX_OVERS, OVERS_PRESETS};

const HELP: &str = "1-9 or arrows choose overs  Enter start  h history  Esc back  q quit";

/// Overs options for a new match with one of them selected.
///
/// The options are [`OVERS_PRESETS`]; a configured limit that is not a preset
/// is slotted in, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OversPicker {
    options: Vec<u32>,
    selected: usize,
}

impl OversPicker {
    /// Options with `preferred` selected. Zero means the default limit.
    pub fn new(preferred: u32) -> Self {
        let preferred = if preferred == 0 { DEFAULT_MAX_OVERS } else { preferred };
        let mut options = OVERS_PRESETS.to_vec();
        if let Err(at) = options.binary_search(&preferred) {
            options.insert(at, preferred);
        }
        let selected = options.iter().position(|&o| o == preferred).unwrap_or(0);
        Self { options, selected }
    }

    pub fn options(&self) -> &[u32] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The chosen overs limit.
    pub fn overs(&self) -> u32 {
        self.options[self.selected]
    }

    /// Move the selection, stopping at either end.
    pub fn move_by(&mut self, delta: isize) {
        let last = self.options.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Select option `index`; out-of-range picks are ignored.
    pub fn pick(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SetupView;

impl SetupView {
    pub fn new() -> Self {
        Self
    }

    pub fn render_into(
        &self,
        team_name: &str,
        picker: &OversPicker,
        lines: StatusLines<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(text().into_cell(' '));

        let header = header_style();
        fb.fill_row(0, header);
        fb.put_str(1, 0, "New match", header);

        fb.put_str(2, 2, &format!("Team   {team_name}"), text().bold());
        let mut x = fb.put_str(2, 4, "Overs ", text());
        for (i, overs) in picker.options().iter().enumerate() {
            let style = if i == picker.selected_index() {
                text()
                    .bold()
                    .with_fg(Rgb::new(255, 255, 255))
                    .with_bg(Rgb::new(0x0f, 0x76, 0x6e))
            } else {
                text().dim()
            };
            x = fb.put_str(x + 1, 4, &format!(" {}:{overs} ", i + 1), style);
        }

        draw_status_lines(fb, lines, HELP);
    }

    pub fn render(
        &self,
        team_name: &str,
        picker: &OversPicker,
        lines: StatusLines<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(team_name, picker, lines, viewport, &mut fb);
        fb
    }
}
