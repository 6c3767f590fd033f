//! Running the dialog on a real terminal with crossterm.

use super::render::{self, DialogLayout};
use super::{DialogKey, DialogOutcome, HotkeySelection, InputEvent};
use crate::config::DashboardConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Map a crossterm key event to a dialog key.
pub fn translate_key(key: &KeyEvent) -> Option<DialogKey> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(DialogKey::Cancel);
    }

    match key.code {
        KeyCode::Esc => Some(DialogKey::Cancel),
        KeyCode::Enter => Some(DialogKey::Confirm),
        KeyCode::Up => Some(DialogKey::Up),
        KeyCode::Down => Some(DialogKey::Down),
        KeyCode::Char(' ') => Some(DialogKey::Toggle),
        KeyCode::Char(c) => Some(DialogKey::Char(c)),
        _ => None,
    }
}

/// Map any crossterm event to a dialog event. Mouse clicks need the layout of
/// the last drawn frame.
pub fn translate_event(
    event: &Event,
    layout: Option<&DialogLayout>,
    dialog: &HotkeySelection,
) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key).map(InputEvent::Key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => layout?.hit_test(dialog, *column, *row),
        _ => None,
    }
}

type DialogTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
///
/// Created as soon as raw mode is on, so a failure later in setup or a panic
/// in the event loop still leaves the terminal usable.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self, DialogError> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            Show
        );
    }
}

/// Run an already opened dialog until it is confirmed or cancelled.
///
/// The terminal is restored on every exit path, including panics.
pub fn run_dialog(dialog: HotkeySelection) -> Result<DialogOutcome, DialogError> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut terminal, dialog)
}

fn event_loop(
    terminal: &mut DialogTerminal,
    mut dialog: HotkeySelection,
) -> Result<DialogOutcome, DialogError> {
    loop {
        let mut layout = None;
        terminal.draw(|frame| {
            let area = frame.area();
            layout = render::draw(frame, area, &dialog);
        })?;

        let event = event::read()?;
        if let Some(input) = translate_event(&event, layout.as_ref(), &dialog) {
            if let Some(outcome) = dialog.handle_event(input) {
                return Ok(outcome);
            }
        }
    }
}

/// Open the hotkey selection dialog and wait for the user.
///
/// Returns `Some(addresses)` on confirm and `None` on cancel.
pub fn select_hotkeys(
    config: &DashboardConfig,
    initial: &[String],
) -> Result<Option<Vec<String>>, DialogError> {
    let dialog = HotkeySelection::open(config, initial);
    Ok(run_dialog(dialog)?.into_selection())
}
