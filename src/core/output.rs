//! Output formatting for messages printed outside the interactive UI.
//!
//! These helpers cover the paths where git-stager talks to the user on a
//! plain terminal: fatal startup errors, the clean-tree exit message, and
//! informational notes printed after the screen has been torn down.
//!
//! # Design Principles
//! - **Consistent color scheme**: red for errors, green for success
//! - **Standardized spacing**: newline before and after messages

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a success message with consistent styling
pub fn print_success(message: &str) {
    println!("\n{} {}\n", "✓".green(), message.white());
}
