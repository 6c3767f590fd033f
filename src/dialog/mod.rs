//! Hotkey selection dialog.
//!
//! A modal checklist of every hotkey found under the configured wallet root.
//! The caller opens it with the addresses it already tracks, the user toggles
//! rows, and the dialog ends either confirmed (with the checked addresses) or
//! cancelled.
//!
//! [`HotkeySelection`] is a plain state machine driven by [`InputEvent`]s, so
//! the same transitions apply whether input comes from a key shortcut, a mouse
//! click on a button, or a test. Drawing lives in [`render`], the terminal loop
//! in [`terminal`].
//!
//! ```
//! use bittensor_dash::dialog::{DialogButton, DialogOutcome, HotkeySelection, InputEvent};
//! use bittensor_dash::wallet::HotkeyRecord;
//!
//! let records = vec![HotkeyRecord {
//!     wallet_name: "alice".into(),
//!     hotkey_name: "default".into(),
//!     ss58_address: "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".into(),
//! }];
//! let mut dialog = HotkeySelection::from_records(records, &[]);
//! dialog.handle_event(InputEvent::ToggleRow(0));
//! let outcome = dialog.handle_event(InputEvent::Click(DialogButton::Yes));
//! assert_eq!(
//!     outcome,
//!     Some(DialogOutcome::Confirmed(vec![
//!         "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".to_string()
//!     ]))
//! );
//! ```

pub mod render;
pub mod terminal;

use crate::config::DashboardConfig;
use crate::wallet::{get_all_hotkeys, HotkeyRecord};
use std::collections::HashSet;

/// Dialog title
pub const TITLE: &str = "Select Hotkeys to Track";

/// Number of address characters shown in a row label
const ADDRESS_PREFIX_LEN: usize = 8;

/// The two terminal buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    No,
    Yes,
}

impl DialogButton {
    pub fn label(self) -> &'static str {
        match self {
            DialogButton::No => "[N]o",
            DialogButton::Yes => "[Y]es",
        }
    }
}

/// Keys the dialog understands, independent of any terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    Up,
    Down,
    /// Toggle the highlighted row (space)
    Toggle,
    /// Enter
    Confirm,
    /// Escape
    Cancel,
    Char(char),
}

/// Input delivered to the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(DialogKey),
    /// Pointer click on a button
    Click(DialogButton),
    /// Pointer click on a row
    ToggleRow(usize),
}

/// What an input event asks the dialog to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Confirm,
    Cancel,
    ToggleCursor,
    ToggleRow(usize),
    MoveUp,
    MoveDown,
}

impl Action {
    fn from_event(event: InputEvent) -> Option<Self> {
        match event {
            InputEvent::Click(DialogButton::Yes) => Some(Action::Confirm),
            InputEvent::Click(DialogButton::No) => Some(Action::Cancel),
            InputEvent::ToggleRow(index) => Some(Action::ToggleRow(index)),
            InputEvent::Key(key) => match key {
                DialogKey::Confirm => Some(Action::Confirm),
                DialogKey::Cancel => Some(Action::Cancel),
                DialogKey::Toggle | DialogKey::Char(' ') => Some(Action::ToggleCursor),
                DialogKey::Up => Some(Action::MoveUp),
                DialogKey::Down => Some(Action::MoveDown),
                DialogKey::Char(c) => match c.to_ascii_lowercase() {
                    'y' => Some(Action::Confirm),
                    'n' => Some(Action::Cancel),
                    'k' => Some(Action::MoveUp),
                    'j' => Some(Action::MoveDown),
                    _ => None,
                },
            },
        }
    }
}

/// Lifecycle of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Open,
    Confirmed,
    Cancelled,
}

/// Result handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Checked addresses in display order (possibly empty)
    Confirmed(Vec<String>),
    /// The user backed out; no selection
    Cancelled,
}

impl DialogOutcome {
    /// `Some(addresses)` when confirmed, `None` when cancelled.
    pub fn into_selection(self) -> Option<Vec<String>> {
        match self {
            DialogOutcome::Confirmed(addresses) => Some(addresses),
            DialogOutcome::Cancelled => None,
        }
    }
}

/// One checklist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRow {
    pub label: String,
    /// Full SS58 address
    pub value: String,
    /// Whether `value` is in the checked set; rows sharing an address agree
    pub selected: bool,
}

/// Row label: `wallet/hotkey (5Abcdefg...)`
pub fn row_label(record: &HotkeyRecord) -> String {
    let prefix: String = record.ss58_address.chars().take(ADDRESS_PREFIX_LEN).collect();
    format!("{}/{} ({}...)", record.wallet_name, record.hotkey_name, prefix)
}

/// State of one open hotkey selection dialog.
#[derive(Debug, Clone)]
pub struct HotkeySelection {
    rows: Vec<SelectionRow>,
    /// Checked addresses
    checked: HashSet<String>,
    cursor: usize,
    state: DialogState,
    has_content: bool,
}

impl HotkeySelection {
    /// Open the dialog: scan the configured wallet root and pre-check rows whose
    /// address is in `initial`.
    ///
    /// Without a configured wallet path the dialog has no content at all.
    pub fn open(config: &DashboardConfig, initial: &[String]) -> Self {
        match config.wallet_root() {
            Some(root) => {
                tracing::debug!(root = %root.display(), "Opening hotkey selection");
                Self::from_records(get_all_hotkeys(root), initial)
            }
            None => {
                tracing::debug!("No wallet path configured, hotkey selection is empty");
                Self::empty()
            }
        }
    }

    /// Build the dialog from already scanned records.
    pub fn from_records(mut records: Vec<HotkeyRecord>, initial: &[String]) -> Self {
        records.sort();

        // Only addresses that are actually listed can be checked
        let checked: HashSet<String> = records
            .iter()
            .filter(|record| initial.contains(&record.ss58_address))
            .map(|record| record.ss58_address.clone())
            .collect();

        let rows = records
            .iter()
            .map(|record| SelectionRow {
                label: row_label(record),
                value: record.ss58_address.clone(),
                selected: checked.contains(&record.ss58_address),
            })
            .collect();

        Self {
            rows,
            checked,
            cursor: 0,
            state: DialogState::Open,
            has_content: true,
        }
    }

    /// The degenerate dialog shown when no wallet path is configured.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            checked: HashSet::new(),
            cursor: 0,
            state: DialogState::Open,
            has_content: false,
        }
    }

    /// Whether there is anything to draw (false only for the unconfigured dialog).
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn rows(&self) -> &[SelectionRow] {
        &self.rows
    }

    /// Index of the highlighted row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    /// Addresses currently checked, in display order, each once.
    pub fn selected(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut addresses = Vec::new();
        for row in &self.rows {
            if self.checked.contains(&row.value) && seen.insert(&row.value) {
                addresses.push(row.value.clone());
            }
        }
        addresses
    }

    /// The outcome once the dialog has closed.
    pub fn outcome(&self) -> Option<DialogOutcome> {
        match self.state {
            DialogState::Open => None,
            DialogState::Confirmed => Some(DialogOutcome::Confirmed(self.selected())),
            DialogState::Cancelled => Some(DialogOutcome::Cancelled),
        }
    }

    /// Feed one input event. Returns the outcome when the event closes the
    /// dialog; events after closing are ignored.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<DialogOutcome> {
        if !self.is_open() {
            return None;
        }

        match Action::from_event(event)? {
            Action::Confirm => {
                self.state = DialogState::Confirmed;
                tracing::debug!(count = self.selected().len(), "Hotkey selection confirmed");
                return self.outcome();
            }
            Action::Cancel => {
                self.state = DialogState::Cancelled;
                tracing::debug!("Hotkey selection cancelled");
                return self.outcome();
            }
            Action::ToggleCursor => self.toggle(self.cursor),
            Action::ToggleRow(index) => {
                if index < self.rows.len() {
                    self.cursor = index;
                }
                self.toggle(index);
            }
            Action::MoveUp => self.move_cursor(false),
            Action::MoveDown => self.move_cursor(true),
        }
        None
    }

    /// Flip the address of row `index`, on every row that lists it.
    fn toggle(&mut self, index: usize) {
        let Some(value) = self.rows.get(index).map(|row| row.value.clone()) else {
            return;
        };
        let selected = if self.checked.remove(&value) {
            false
        } else {
            self.checked.insert(value.clone());
            true
        };
        for row in self.rows.iter_mut().filter(|row| row.value == value) {
            row.selected = selected;
        }
    }

    fn move_cursor(&mut self, down: bool) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        self.cursor = if down {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }
}
