//! `btdash keypair`: load a key file and show what it holds.

use crate::cli::utils::print_success;
use crate::error::Result;
use crate::wallet::load_keypair_from_file;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Clone)]
pub struct KeypairCommand {
    /// Path to the key file
    pub path: PathBuf,
}

pub fn execute(cmd: &KeypairCommand) -> Result<()> {
    let keypair = load_keypair_from_file(&cmd.path)?;

    print_success(&format!("Loaded {}", cmd.path.display()));
    println!("SS58 address: {}", keypair.ss58_address());
    println!("Public key:   0x{}", hex::encode(keypair.public_key()));
    Ok(())
}
