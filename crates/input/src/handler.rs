//! Input handler with a pending two-key prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::{
    detail_key_event, handle_key_event, history_key_event, run_digit, setup_key_event,
    should_quit, Command, Prompt,
};

/// Which screen the keys are aimed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Scoring,
    History,
    Detail,
    /// Overs choice before a new match.
    Setup,
}

/// Turns key presses into [`Command`]s for the active [`Screen`].
///
/// `n` and `b` open a prompt; the next digit (or Enter for the default)
/// completes the delivery and Esc abandons it. Other keys are ignored while
/// the prompt is open, except quit. A delete request waits for `y`; any
/// other key drops it.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    screen: Screen,
    prompt: Option<Prompt>,
    confirming_delete: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Switch screens, dropping any half-entered prompt.
    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.prompt = None;
        self.confirming_delete = false;
    }

    /// The prompt waiting for its second key, if any.
    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        // Terminals with keyboard enhancement also report releases.
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if should_quit(key) {
            self.prompt = None;
            self.confirming_delete = false;
            return Some(Command::Quit);
        }

        if self.confirming_delete {
            self.confirming_delete = false;
            return matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'))
                .then_some(Command::Delete);
        }

        let command = match self.screen {
            Screen::Scoring => return self.handle_scoring_key(key),
            Screen::History => history_key_event(key)?,
            Screen::Detail => detail_key_event(key)?,
            Screen::Setup => setup_key_event(key)?,
        };
        if command == Command::ConfirmDelete {
            self.confirming_delete = true;
            return None;
        }
        Some(command)
    }

    fn handle_scoring_key(&mut self, key: KeyEvent) -> Option<Command> {
        if let Some(prompt) = self.prompt {
            return match key.code {
                KeyCode::Esc => {
                    self.prompt = None;
                    None
                }
                KeyCode::Enter => {
                    self.prompt = None;
                    Some(Command::Score(prompt.action(prompt.default_runs())))
                }
                code => {
                    let runs = run_digit(code)?;
                    self.prompt = None;
                    Some(Command::Score(prompt.action(runs)))
                }
            };
        }

        match handle_key_event(key)? {
            Command::Prompt(prompt) => {
                self.prompt = Some(prompt);
                None
            }
            command => Some(command),
        }
    }
}
