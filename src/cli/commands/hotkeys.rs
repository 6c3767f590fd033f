//! `btdash hotkeys`: list every hotkey under the wallet root.

use crate::cli::utils::{create_table_with_headers, print_info, print_warning};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::wallet::get_all_hotkeys;
use clap::Args;

#[derive(Args, Clone)]
pub struct HotkeysCommand {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(cmd: &HotkeysCommand, config: &DashboardConfig) -> Result<()> {
    let Some(root) = config.wallet_root() else {
        print_warning("No wallet path configured. Set wallet_path or pass --wallet-path.");
        return Ok(());
    };

    let hotkeys = get_all_hotkeys(&root);
    tracing::info!(root = %root.display(), count = hotkeys.len(), "Listed hotkeys");

    if cmd.json {
        let json = serde_json::to_string_pretty(&hotkeys)?;
        println!("{}", json);
        return Ok(());
    }

    if hotkeys.is_empty() {
        print_info(&format!("No hotkeys found under {}", root.display()));
        return Ok(());
    }

    let mut table = create_table_with_headers(&["Wallet", "Hotkey", "SS58 Address", "Tracked"]);
    for hotkey in &hotkeys {
        let tracked = if config.selected_hotkeys.contains(&hotkey.ss58_address) {
            "✓"
        } else {
            ""
        };
        table.add_row(vec![
            hotkey.wallet_name.as_str(),
            hotkey.hotkey_name.as_str(),
            hotkey.ss58_address.as_str(),
            tracked,
        ]);
    }
    println!("{}", table);
    Ok(())
}
