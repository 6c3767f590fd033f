//! Hotkey discovery across a wallet directory tree.
//!
//! Wallets are laid out as:
//! ```text
//! <wallet_root>/
//!   └── <wallet_name>/
//!       └── hotkeys/
//!           └── <hotkey_name>   # JSON key file with an "ss58Address" field
//! ```
//!
//! Scanning is best effort. A file that cannot be read or parsed is skipped
//! and logged at debug level; the caller only ever sees the hotkeys that
//! could be read.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default wallet directory name under home
const WALLET_DIR_NAME: &str = ".bittensor/wallets";

/// Hotkeys directory name
pub const HOTKEYS_DIR: &str = "hotkeys";

/// A hotkey found while scanning a wallet root.
///
/// Field order gives the `(wallet_name, hotkey_name)` ordering used for display.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HotkeyRecord {
    pub wallet_name: String,
    pub hotkey_name: String,
    pub ss58_address: String,
}

/// Read one hotkey file, returning `None` if it is hidden, unreadable, not
/// JSON, or lacks a string `ss58Address`.
pub fn scan_hotkey_file(wallet_name: &str, path: &Path) -> Option<HotkeyRecord> {
    let hotkey_name = path.file_name()?.to_string_lossy().into_owned();
    if hotkey_name.starts_with('.') {
        return None;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Skipping unreadable hotkey file");
            return None;
        }
    };

    let document: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Skipping malformed hotkey file");
            return None;
        }
    };

    let Some(address) = document.get("ss58Address").and_then(|v| v.as_str()) else {
        tracing::debug!(path = %path.display(), "Skipping hotkey file without ss58Address");
        return None;
    };

    Some(HotkeyRecord {
        wallet_name: wallet_name.to_string(),
        hotkey_name,
        ss58_address: address.to_string(),
    })
}

/// Scan every wallet under `wallet_root` and return its hotkeys, sorted by
/// wallet name then hotkey name.
///
/// A missing or unlistable root yields an empty list.
pub fn get_all_hotkeys(wallet_root: impl AsRef<Path>) -> Vec<HotkeyRecord> {
    let wallet_root = wallet_root.as_ref();
    if !wallet_root.exists() {
        tracing::debug!(root = %wallet_root.display(), "Wallet root does not exist");
        return Vec::new();
    }

    let entries = match fs::read_dir(wallet_root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(root = %wallet_root.display(), error = %e, "Cannot list wallet root");
            return Vec::new();
        }
    };

    let mut hotkeys: Vec<HotkeyRecord> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .flat_map(|wallet_dir| {
            let wallet_name = wallet_dir.file_name().to_string_lossy().into_owned();
            wallet_hotkey_files(&wallet_dir.path())
                .into_iter()
                .filter_map(move |file| scan_hotkey_file(&wallet_name, &file))
        })
        .collect();

    hotkeys.sort();
    tracing::debug!(root = %wallet_root.display(), count = hotkeys.len(), "Scanned hotkeys");
    hotkeys
}

/// Paths of all entries inside `<wallet_dir>/hotkeys`, or nothing if absent.
fn wallet_hotkey_files(wallet_dir: &Path) -> Vec<PathBuf> {
    let hotkeys_dir = wallet_dir.join(HOTKEYS_DIR);
    if !hotkeys_dir.is_dir() {
        return Vec::new();
    }

    match fs::read_dir(&hotkeys_dir) {
        Ok(entries) => entries.filter_map(Result::ok).map(|e| e.path()).collect(),
        Err(e) => {
            tracing::debug!(dir = %hotkeys_dir.display(), error = %e, "Cannot list hotkeys");
            Vec::new()
        }
    }
}

/// Get the default wallet path (~/.bittensor/wallets).
pub fn default_wallet_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(WALLET_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(WALLET_DIR_NAME))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
