//! Command implementations for the btdash CLI.

pub mod hotkeys;
pub mod keypair;
pub mod select;
