//! Wallet helpers for the Bittensor dashboard.
//!
//! - [`wallet`]: hotkey discovery and key file loading
//! - [`dialog`]: the hotkey selection dialog (state machine, ratatui view, crossterm loop)
//! - [`config`], [`logging`], [`error`]: ambient plumbing
//! - [`cli`]: the `btdash` command tree

pub mod cli;
pub mod config;
pub mod dialog;
pub mod error;
pub mod logging;
pub mod wallet;

pub use config::{ConfigError, DashboardConfig};
pub use dialog::terminal::{select_hotkeys, DialogError};
pub use dialog::{
    DialogButton, DialogKey, DialogOutcome, DialogState, HotkeySelection, InputEvent,
    SelectionRow,
};
pub use error::{Error, Result};
pub use logging::{init_default_logging, init_logging, is_initialized, LogFormat, LoggingConfig};
pub use wallet::{
    default_wallet_path, get_all_hotkeys, load_keypair_from_file, normalize_private_key,
    save_keyfile, HotkeyRecord, KeyfileError, Keypair, KeypairError, BITTENSOR_SS58_FORMAT,
};
