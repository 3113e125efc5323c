use std::fmt::Display;

use colored::*;
use tracing::info;

use crate::terminal::logging::PRINT_TARGET;

pub const TOTAL_WIDTH: usize = 64;

const SEPARATOR: Color = Color::BrightBlack;
const PRIMARY: Color = Color::BrightGreen;
const TEXT_DEFAULT: Color = Color::White;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().color(PRIMARY),
        "─".repeat(right)
    )
    .color(SEPARATOR);

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(SEPARATOR);
    print(&format!("{}", sep));
}

/// `key.....: value`, with the dots padding every key to `key_width`.
pub fn aligned_line<V: Display>(key: &str, value: V, key_width: usize) {
    let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
    let colon: String = format!("{}{}", dots.color(SEPARATOR), ":".color(SEPARATOR));
    let prefix: ColoredString = ">".color(SEPARATOR);
    print(&format!(
        "{} {}{} {}",
        prefix,
        key.color(PRIMARY),
        colon,
        value.to_string().color(TEXT_DEFAULT)
    ));
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

/// Key/value block closed by a centered one-line verdict.
pub fn summary<V: Display>(rows: &[(&str, V)], verdict: &str) {
    let key_width: usize = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in rows {
        aligned_line(key, value, key_width);
    }
    fat_separator();
    centerln(verdict);
}
