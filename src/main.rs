//! Terminal scorer (default binary).
//!
//! Resumes the newest unfinished match from the data directory (or offers a
//! new one) and scores it ball by ball from the keyboard. Finished matches
//! can be browsed, opened and deleted from the history screen.

use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use cricket_scorer::core::Match;
use cricket_scorer::input::{Command, InputHandler, Screen};
use cricket_scorer::store::{JsonFileStore, MatchSession, ScorerConfig, StoreRuntime};
use cricket_scorer::term::{
    FrameBuffer, HistoryView, OversPicker, ScoreboardView, SetupView, StatusLines,
    TerminalRenderer, Viewport, DETAIL_HELP,
};
use cricket_scorer::types::ScoringAction;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = ScorerConfig::from_env();
    init_logging(&config)?;

    let runtime = StoreRuntime::new().context("failed to start store runtime")?;
    let store = Arc::new(JsonFileStore::new(&config.data_dir));
    let mut session = MatchSession::new(store, config.rules());

    runtime
        .block_on(session.load())
        .with_context(|| format!("failed to load matches from {}", config.data_dir.display()))?;

    let mut input = InputHandler::new();
    if session.current().is_none() {
        input.set_screen(Screen::Setup);
    }

    let mut app = App {
        picker: OversPicker::new(config.max_overs),
        config,
        session,
        runtime,
        input,
        status: None,
        last_completed: None,
        selected: 0,
        viewing: None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = app.run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `CRICKET_LOG_PATH` when set. The terminal owns stdout, so there is
/// no console fallback.
fn init_logging(config: &ScorerConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

struct App {
    config: ScorerConfig,
    session: MatchSession<JsonFileStore>,
    runtime: StoreRuntime,
    input: InputHandler,
    status: Option<String>,
    /// Shown on the idle screen after `x`.
    last_completed: Option<Match>,
    /// Highlighted row of the history list.
    selected: usize,
    /// Finished match opened from the history list.
    viewing: Option<Match>,
    picker: OversPicker,
}

impl App {
    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        info!(data_dir = %self.config.data_dir.display(), "scorer started");

        loop {
            while let Some(outcome) = self.runtime.try_recv() {
                self.status = Some(match outcome.result {
                    Ok(()) => "Saved".to_string(),
                    Err(e) => format!("Save failed: {e}"),
                });
            }

            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let fb = self.frame(Viewport::new(w, h));
            term.draw(&fb)?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let key = match event::read()? {
                Event::Key(key) => key,
                Event::Resize(..) => {
                    term.invalidate();
                    continue;
                }
                _ => continue,
            };

            match self.input.handle_key(key) {
                Some(Command::Quit) => return self.shutdown(),
                Some(command) => self.execute(command),
                None => {}
            }
        }
    }

    /// Draw the active screen.
    fn frame(&self, viewport: Viewport) -> FrameBuffer {
        let delete_prompt = self
            .input
            .confirming_delete()
            .then(|| self.delete_target())
            .flatten()
            .map(|m| {
                let played = m.created_at.format("%Y-%m-%d %H:%M");
                format!("Delete {} from {played}? (y/n)", m.team_name)
            });
        let lines = StatusLines {
            prompt: delete_prompt
                .as_deref()
                .or_else(|| self.input.prompt().map(|p| p.label())),
            status: self.status.as_deref(),
            help: None,
        };

        match self.input.screen() {
            Screen::Scoring => {
                let shown = self.session.current().or(self.last_completed.as_ref());
                ScoreboardView::new().render(shown, lines, viewport)
            }
            Screen::History => {
                let history: Vec<&Match> = self.session.history().collect();
                HistoryView::new().render(&history, self.selected, lines, viewport)
            }
            Screen::Detail => {
                let lines = StatusLines {
                    help: Some(DETAIL_HELP),
                    ..lines
                };
                ScoreboardView::new().render(self.viewing.as_ref(), lines, viewport)
            }
            Screen::Setup => {
                SetupView::new().render(&self.config.team_name, &self.picker, lines, viewport)
            }
        }
    }

    /// The match a confirmed delete would remove.
    fn delete_target(&self) -> Option<&Match> {
        match self.input.screen() {
            Screen::Detail => self.viewing.as_ref(),
            Screen::History => self.session.history().nth(self.selected),
            Screen::Scoring | Screen::Setup => None,
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Score(action) => self.score(action),
            Command::Save => {
                if let Some(m) = self.session.current() {
                    let snapshot = m.clone();
                    let store = Arc::clone(self.session.store());
                    self.runtime.save_in_background(store, snapshot);
                    self.status = Some("Saving...".to_string());
                }
            }
            Command::Complete => match self.runtime.block_on(self.session.complete_current()) {
                Ok(Some(done)) => {
                    self.status = Some(format!(
                        "Match complete: {}/{} in {} overs",
                        done.total_runs,
                        done.wickets,
                        done.overs_display()
                    ));
                    self.last_completed = Some(done);
                }
                Ok(None) => {}
                Err(e) => self.status = Some(format!("Could not complete match: {e}")),
            },
            Command::NewMatch if self.session.current().is_none() => {
                self.picker = OversPicker::new(self.config.max_overs);
                self.input.set_screen(Screen::Setup);
            }
            Command::Create => self.create_match(),
            Command::Pick(index) => {
                self.picker.pick(index);
            }
            Command::ShowHistory => {
                self.selected = 0;
                self.input.set_screen(Screen::History);
            }
            Command::MoveUp => self.move_selection(-1),
            Command::MoveDown => self.move_selection(1),
            Command::Open => {
                if let Some(m) = self.session.history().nth(self.selected) {
                    self.viewing = Some(m.clone());
                    self.input.set_screen(Screen::Detail);
                }
            }
            Command::Delete => self.delete_match(),
            Command::Back => self.back(),
            Command::NewMatch | Command::Prompt(_) | Command::ConfirmDelete | Command::Quit => {}
        }
    }

    fn create_match(&mut self) {
        let overs = self.picker.overs();
        let created = self
            .runtime
            .block_on(self.session.create_new_match(&self.config.team_name, overs));
        match created {
            Ok(_) => {
                self.status = Some(format!("New {overs}-over match started"));
                self.last_completed = None;
                self.input.set_screen(Screen::Scoring);
            }
            Err(e) => self.status = Some(format!("Could not start a match: {e}")),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        match self.input.screen() {
            Screen::History => {
                let last = self.session.history().count().saturating_sub(1);
                self.selected = self.selected.saturating_add_signed(delta).min(last);
            }
            Screen::Setup => self.picker.move_by(delta),
            Screen::Scoring | Screen::Detail => {}
        }
    }

    fn delete_match(&mut self) {
        let Some(id) = self.delete_target().map(|m| m.id.clone()) else {
            return;
        };
        match self.runtime.block_on(self.session.delete_match(&id)) {
            Ok(()) => {
                self.status = Some("Match deleted".to_string());
                if self.last_completed.as_ref().is_some_and(|m| m.id == id) {
                    self.last_completed = None;
                }
                self.viewing = None;
                let last = self.session.history().count().saturating_sub(1);
                self.selected = self.selected.min(last);
                self.input.set_screen(Screen::History);
            }
            Err(e) => self.status = Some(format!("Could not delete match: {e}")),
        }
    }

    /// Detail goes back to the list, everything else to the scoreboard.
    fn back(&mut self) {
        let screen = match self.input.screen() {
            Screen::Detail => Screen::History,
            Screen::Scoring => return,
            Screen::History | Screen::Setup => Screen::Scoring,
        };
        self.viewing = None;
        self.input.set_screen(screen);
    }

    fn score(&mut self, action: ScoringAction) {
        let Some(outcome) = self.session.apply(action) else {
            return;
        };
        self.status = match (outcome.changed, action.is_undo()) {
            (false, true) => Some("Nothing to undo".to_string()),
            (false, false) if outcome.innings_over => Some("Innings is over".to_string()),
            (false, false) => Some("Wicket limit reached".to_string()),
            (true, _) => None,
        };
    }

    /// Save the current match and wait for background saves before exiting.
    fn shutdown(&mut self) -> Result<()> {
        while let Some(outcome) = self.runtime.wait() {
            if let Err(e) = outcome.result {
                warn!(match_id = %outcome.match_id, error = %e, "save lost at shutdown");
            }
        }
        self.runtime
            .block_on(self.session.save_current())
            .context("failed to save the current match")?;
        info!("scorer stopped");
        Ok(())
    }
}
