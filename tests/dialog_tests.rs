//! Hotkey selection dialog tests
//!
//! Validates:
//! - Opening from a configured wallet root pre-checks the initial selection
//! - Key shortcuts and button clicks produce identical outcomes
//! - Cancel is distinguishable from an empty confirmed selection
//! - The unconfigured dialog draws nothing

use bittensor_dash::config::DashboardConfig;
use bittensor_dash::dialog::render::{self, DialogLayout};
use bittensor_dash::dialog::{
    DialogButton, DialogKey, DialogOutcome, DialogState, HotkeySelection, InputEvent, TITLE,
};
use bittensor_dash::wallet::HOTKEYS_DIR;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const ALICE_DEFAULT: &str = "5AbcAliceDefault000000000000000000000000000000000";
const ALICE_MINER: &str = "5DefAliceMiner0000000000000000000000000000000000";
const BOB_DEFAULT: &str = "5XyzBobDefault00000000000000000000000000000000000";

fn write_hotkey(root: &Path, wallet: &str, hotkey: &str, address: &str) {
    let dir = root.join(wallet).join(HOTKEYS_DIR);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(hotkey), format!(r#"{{"ss58Address": "{}"}}"#, address)).unwrap();
}

fn wallet_root() -> (TempDir, DashboardConfig) {
    let dir = tempdir().unwrap();
    write_hotkey(dir.path(), "bob", "default", BOB_DEFAULT);
    write_hotkey(dir.path(), "alice", "default", ALICE_DEFAULT);
    write_hotkey(dir.path(), "alice", "miner", ALICE_MINER);
    fs::write(dir.path().join("alice").join(HOTKEYS_DIR).join("broken"), "{").unwrap();

    let config = DashboardConfig::new().with_wallet_path(dir.path().to_string_lossy());
    (dir, config)
}

fn rendered_text(dialog: &HotkeySelection) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            render::draw(frame, area, dialog);
        })
        .unwrap();

    let buffer = terminal.backend().buffer().clone();
    let width = usize::from(buffer.area.width);
    let symbols: Vec<&str> = buffer.content().iter().map(|cell| cell.symbol()).collect();
    symbols
        .chunks(width)
        .map(|line| line.concat())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Opening
// ============================================================================

#[test]
fn test_open_prechecks_initial_selection() {
    let (_dir, config) = wallet_root();
    let initial = vec![ALICE_DEFAULT.to_string(), BOB_DEFAULT.to_string()];

    let dialog = HotkeySelection::open(&config, &initial);

    let labels: Vec<&str> = dialog.rows().iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "alice/default (5AbcAlic...)",
            "alice/miner (5DefAlic...)",
            "bob/default (5XyzBobD...)",
        ]
    );
    let checked: Vec<bool> = dialog.rows().iter().map(|r| r.selected).collect();
    assert_eq!(checked, [true, false, true]);
    assert_eq!(dialog.rows()[0].value, ALICE_DEFAULT);
}

#[test]
fn test_unknown_initial_addresses_are_ignored() {
    let (_dir, config) = wallet_root();
    let dialog = HotkeySelection::open(&config, &["5NotOnDisk".to_string()]);
    assert!(dialog.selected().is_empty());
    assert_eq!(dialog.rows().len(), 3);
}

#[test]
fn test_open_without_wallet_path_is_empty() {
    let dialog = HotkeySelection::open(&DashboardConfig::new(), &[ALICE_DEFAULT.to_string()]);
    assert!(!dialog.has_content());
    assert!(dialog.rows().is_empty());
    assert!(dialog.is_open());
}

#[test]
fn test_open_with_missing_root_has_no_rows() {
    let dir = tempdir().unwrap();
    let config = DashboardConfig::new().with_wallet_path(dir.path().join("nope").to_string_lossy());
    let dialog = HotkeySelection::open(&config, &[]);
    assert!(dialog.has_content());
    assert!(dialog.rows().is_empty());
}

// ============================================================================
// Terminal actions
// ============================================================================

fn toggle_miner_then(close: InputEvent) -> Option<DialogOutcome> {
    let (_dir, config) = wallet_root();
    let mut dialog = HotkeySelection::open(&config, &[ALICE_DEFAULT.to_string()]);
    dialog.handle_event(InputEvent::Key(DialogKey::Down));
    dialog.handle_event(InputEvent::Key(DialogKey::Toggle));
    dialog.handle_event(close)
}

#[test]
fn test_confirm_channels_agree() {
    let expected = Some(DialogOutcome::Confirmed(vec![
        ALICE_DEFAULT.to_string(),
        ALICE_MINER.to_string(),
    ]));

    assert_eq!(toggle_miner_then(InputEvent::Click(DialogButton::Yes)), expected);
    assert_eq!(toggle_miner_then(InputEvent::Key(DialogKey::Confirm)), expected);
    assert_eq!(toggle_miner_then(InputEvent::Key(DialogKey::Char('y'))), expected);
    assert_eq!(toggle_miner_then(InputEvent::Key(DialogKey::Char('Y'))), expected);
}

#[test]
fn test_cancel_channels_agree() {
    let expected = Some(DialogOutcome::Cancelled);

    assert_eq!(toggle_miner_then(InputEvent::Click(DialogButton::No)), expected);
    assert_eq!(toggle_miner_then(InputEvent::Key(DialogKey::Cancel)), expected);
    assert_eq!(toggle_miner_then(InputEvent::Key(DialogKey::Char('n'))), expected);
}

#[test]
fn test_cancel_differs_from_empty_confirm() {
    let (_dir, config) = wallet_root();

    let mut confirmed = HotkeySelection::open(&config, &[]);
    let confirmed = confirmed
        .handle_event(InputEvent::Click(DialogButton::Yes))
        .unwrap();

    let mut cancelled = HotkeySelection::open(&config, &[]);
    let cancelled = cancelled
        .handle_event(InputEvent::Click(DialogButton::No))
        .unwrap();

    assert_eq!(confirmed.clone().into_selection(), Some(Vec::new()));
    assert_eq!(cancelled.clone().into_selection(), None);
    assert_ne!(confirmed, cancelled);
}

#[test]
fn test_row_click_toggles_like_space() {
    let (_dir, config) = wallet_root();

    let mut by_click = HotkeySelection::open(&config, &[]);
    by_click.handle_event(InputEvent::ToggleRow(2));

    let mut by_key = HotkeySelection::open(&config, &[]);
    by_key.handle_event(InputEvent::Key(DialogKey::Up));
    by_key.handle_event(InputEvent::Key(DialogKey::Char(' ')));

    assert_eq!(by_click.selected(), vec![BOB_DEFAULT.to_string()]);
    assert_eq!(by_click.selected(), by_key.selected());
    assert_eq!(by_click.cursor(), by_key.cursor());
}

#[test]
fn test_state_is_sticky_after_close() {
    let (_dir, config) = wallet_root();
    let mut dialog = HotkeySelection::open(&config, &[]);

    dialog.handle_event(InputEvent::Key(DialogKey::Confirm));
    assert_eq!(dialog.state(), DialogState::Confirmed);
    assert!(dialog.handle_event(InputEvent::ToggleRow(0)).is_none());
    assert_eq!(dialog.outcome(), Some(DialogOutcome::Confirmed(Vec::new())));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_shows_title_rows_and_buttons() {
    let (_dir, config) = wallet_root();
    let dialog = HotkeySelection::open(&config, &[BOB_DEFAULT.to_string()]);
    let text = rendered_text(&dialog);

    assert!(text.contains(TITLE));
    assert!(text.contains("[ ] alice/default (5AbcAlic...)"));
    assert!(text.contains("[x] bob/default (5XyzBobD...)"));
    assert!(text.contains("[N]o"));
    assert!(text.contains("[Y]es"));
}

#[test]
fn test_render_empty_dialog_draws_nothing() {
    let dialog = HotkeySelection::empty();
    let text = rendered_text(&dialog);
    assert!(text.chars().all(|c| c == ' ' || c == '\n'));
}

#[test]
fn test_clicks_on_drawn_buttons_close_dialog() {
    let (_dir, config) = wallet_root();
    let mut dialog = HotkeySelection::open(&config, &[]);
    let layout = DialogLayout::new(ratatui::layout::Rect::new(0, 0, 80, 30));

    let event = layout
        .hit_test(&dialog, layout.no_button.x, layout.no_button.y)
        .unwrap();
    assert_eq!(dialog.handle_event(event), Some(DialogOutcome::Cancelled));
}
