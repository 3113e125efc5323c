use std::io::IsTerminal;

use anyhow::Context;
use colored::*;
use console::Term;

/// Asks a yes/no question on the terminal. Only `y` counts as consent.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!("{} {} (y/n): ", "[?]".cyan().bold(), question))
        .context("failed to write prompt")?;
    let answer = term.read_line().context("failed to read answer")?;
    Ok(is_yes(&answer))
}

pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && Term::stderr().is_term()
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
