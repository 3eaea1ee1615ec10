//! Key mapping from terminal events to scorer commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{ScoringAction, DEFAULT_NO_BALL_RUNS, MAX_RUN_VALUE};

/// A second key is needed to finish these deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    NoBall,
    LegalVariant,
}

impl Prompt {
    /// Off-bat runs used when the prompt is confirmed with Enter.
    pub fn default_runs(self) -> u32 {
        match self {
            Prompt::NoBall => DEFAULT_NO_BALL_RUNS,
            Prompt::LegalVariant => 0,
        }
    }

    pub fn action(self, off_bat_runs: u32) -> ScoringAction {
        match self {
            Prompt::NoBall => ScoringAction::NoBall { off_bat_runs },
            Prompt::LegalVariant => ScoringAction::LegalVariant { off_bat_runs },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Prompt::NoBall => "No ball - runs off the bat? (0-6, Enter = 1, Esc cancels)",
            Prompt::LegalVariant => "1st bounce - runs? (0-6, Enter = 0, Esc cancels)",
        }
    }
}

/// What a key press asks the scorer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Score(ScoringAction),
    Prompt(Prompt),
    Save,
    Complete,
    /// Start a new match once the current one is finished.
    NewMatch,
    ShowHistory,
    MoveUp,
    MoveDown,
    /// Open the highlighted match.
    Open,
    /// Ask to delete the shown or highlighted match; needs confirming.
    ConfirmDelete,
    /// Deletion confirmed.
    Delete,
    Back,
    /// Choose the n-th overs option (0-based).
    Pick(usize),
    /// Create a match with the chosen overs.
    Create,
    Quit,
}

/// Map a single key press, ignoring any pending prompt.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }
    let command = match key.code {
        KeyCode::Char(c @ '1'..='6') => Command::Score(ScoringAction::Run {
            value: c.to_digit(10)?,
        }),
        KeyCode::Char('0') | KeyCode::Char('.') => Command::Score(ScoringAction::Dot),
        KeyCode::Char('w') | KeyCode::Char('W') => Command::Score(ScoringAction::Wicket),
        KeyCode::Char('e') | KeyCode::Char('E') => Command::Score(ScoringAction::Wide),
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Backspace => {
            Command::Score(ScoringAction::Undo)
        }

        KeyCode::Char('n') | KeyCode::Char('N') => Command::Prompt(Prompt::NoBall),
        KeyCode::Char('b') | KeyCode::Char('B') => Command::Prompt(Prompt::LegalVariant),

        KeyCode::Char('s') | KeyCode::Char('S') => Command::Save,
        KeyCode::Char('x') | KeyCode::Char('X') => Command::Complete,
        KeyCode::Char('h') | KeyCode::Char('H') => Command::ShowHistory,
        KeyCode::Enter => Command::NewMatch,

        _ => return None,
    };
    Some(command)
}

/// Keys on the match history list.
pub fn history_key_event(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }
    let command = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Command::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Command::MoveDown,
        KeyCode::Enter => Command::Open,
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => Command::ConfirmDelete,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => Command::Back,
        _ => return None,
    };
    Some(command)
}

/// Keys on a single finished match.
pub fn detail_key_event(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }
    let command = match key.code {
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => Command::ConfirmDelete,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => Command::Back,
        _ => return None,
    };
    Some(command)
}

/// Keys on the new-match screen: digits pick an overs option directly.
pub fn setup_key_event(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }
    let command = match key.code {
        KeyCode::Char(c @ '1'..='9') => Command::Pick(c.to_digit(10)? as usize - 1),
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => Command::MoveUp,
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => Command::MoveDown,
        KeyCode::Enter => Command::Create,
        KeyCode::Esc => Command::Back,
        KeyCode::Char('h') | KeyCode::Char('H') => Command::ShowHistory,
        _ => return None,
    };
    Some(command)
}

/// A run digit in `0..=6`.
pub fn run_digit(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::Char(c) => c.to_digit(10).filter(|&d| d <= MAX_RUN_VALUE),
        _ => None,
    }
}

/// Check if key should quit the scorer.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
