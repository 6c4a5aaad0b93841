//! Table and JSON printing helpers.

use anyhow::{Context, Result};
use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize results")?;
    println!("{}", text);
    Ok(())
}

/// Print an analysis title with an underline.
pub fn print_title(title: &str) {
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count().max(42)));
    println!();
}

/// Print right-aligned column headers and a separator line.
pub fn print_header(columns: &[&str]) {
    for column in columns {
        print!("{:>14}", column);
    }
    println!();
    println!("{}", "-".repeat(14 * columns.len()));
}
