//! `btdash select`: interactive hotkey selection.

use crate::cli::utils::{format_address, print_info, print_success};
use crate::config::DashboardConfig;
use crate::dialog::terminal::select_hotkeys;
use crate::error::Result;
use clap::Args;
use std::path::Path;

#[derive(Args, Clone)]
pub struct SelectCommand {
    /// Initially checked addresses (default: the tracked hotkeys in the config)
    #[arg(long = "selected", value_name = "ADDRESS")]
    pub selected: Vec<String>,

    /// Print the result without saving it to the config file
    #[arg(long)]
    pub no_save: bool,
}

pub fn execute(cmd: &SelectCommand, config: DashboardConfig, config_path: &Path) -> Result<()> {
    let initial = if cmd.selected.is_empty() {
        config.selected_hotkeys.clone()
    } else {
        cmd.selected.clone()
    };

    let Some(selection) = select_hotkeys(&config, &initial)? else {
        print_info("Selection cancelled, tracked hotkeys unchanged");
        return Ok(());
    };

    print_success(&format!("{} hotkey(s) selected", selection.len()));
    for address in &selection {
        println!("  {}", format_address(address));
    }

    if !cmd.no_save {
        // `config` carries this run's overrides; only the selection is persisted
        DashboardConfig::save_selected_hotkeys(config_path, selection)?;
        tracing::info!(path = %config_path.display(), "Saved tracked hotkeys");
    }
    Ok(())
}
