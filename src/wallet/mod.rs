//! Wallet key files for the Bittensor dashboard.
//!
//! - **Hotkey discovery**: [`get_all_hotkeys`] walks a wallet root and reports
//!   every hotkey file carrying an SS58 address.
//! - **Keypair loading**: [`load_keypair_from_file`] reads a key file's
//!   `privateKey`, normalizes it and builds an SR25519 [`Keypair`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use bittensor_dash::wallet::{default_wallet_path, get_all_hotkeys, load_keypair_from_file};
//!
//! for hotkey in get_all_hotkeys(default_wallet_path()) {
//!     println!("{}/{} {}", hotkey.wallet_name, hotkey.hotkey_name, hotkey.ss58_address);
//! }
//!
//! let path = default_wallet_path().join("default/hotkeys/default");
//! let keypair = load_keypair_from_file(path).unwrap();
//! println!("{}", keypair.ss58_address());
//! ```
//!
//! Scanning never fails: unreadable files are skipped. Loading is strict: a key
//! file either yields a keypair or an error.

pub mod keyfile;
pub mod keypair;
pub mod scanner;

pub use keyfile::{
    load_keypair_from_file, normalize_private_key, save_keyfile, KeyfileError, KeyfileJson,
};
pub use keypair::{Keypair, KeypairError, BITTENSOR_SS58_FORMAT};
pub use scanner::{
    default_wallet_path, expand_home, get_all_hotkeys, scan_hotkey_file, HotkeyRecord,
    HOTKEYS_DIR,
};
