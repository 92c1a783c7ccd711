//! Menu text and selection parsing.

use crate::commands::Step;

/// Menu id that leaves the loop.
pub const EXIT_ID: &str = "5";

/// What the user asked for on one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    /// Ids to dispatch, in order. Unknown ids and duplicates are kept.
    Run(Vec<String>),
}

/// The prompt line, e.g.
/// `Enter command numbers separated by commas (1:init, ..., 5:exit): or hit Enter to run all`.
pub fn prompt() -> String {
    let entries: Vec<String> = Step::ALL
        .iter()
        .map(|s| format!("{}:{}", s.id(), s.label()))
        .chain(std::iter::once(format!("{EXIT_ID}:exit")))
        .collect();
    format!(
        "Enter command numbers separated by commas ({}): or hit Enter to run all",
        entries.join(", ")
    )
}

/// Interpret one line of input.
///
/// A blank line selects every step in order. Only a line that is exactly
/// the exit id exits; inside a list it is just another unknown id.
pub fn parse_choice(line: &str) -> MenuChoice {
    let line = line.trim();
    if line == EXIT_ID {
        return MenuChoice::Exit;
    }
    if line.is_empty() {
        return MenuChoice::Run(Step::ALL.iter().map(|s| s.id().to_string()).collect());
    }
    MenuChoice::Run(line.split(',').map(|s| s.trim().to_string()).collect())
}
