//! Terminal output helpers.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use console::{style, Term};

/// Print success message in green.
pub fn print_success(message: &str) {
    let term = Term::stdout();
    let _ = term.write_line(&format!("{} {}", style("✓").green().bold(), message));
}

/// Print error message in red.
pub fn print_error(message: &str) {
    let term = Term::stderr();
    let _ = term.write_line(&format!("{} {}", style("✗").red().bold(), message));
}

/// Print info message in blue.
pub fn print_info(message: &str) {
    let term = Term::stdout();
    let _ = term.write_line(&format!("{} {}", style("ℹ").blue().bold(), message));
}

/// Print warning message in yellow.
pub fn print_warning(message: &str) {
    let term = Term::stdout();
    let _ = term.write_line(&format!("{} {}", style("⚠").yellow().bold(), message));
}

/// Shorten an SS58 address to its first and last 8 characters.
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 18 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Create a styled table with bold headers.
pub fn create_table_with_headers(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| style(*h).bold().to_string()));
    table
}
