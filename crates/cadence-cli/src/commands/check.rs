use anyhow::Result;
use cadence_core::rule::{validate, RecurrenceRule};
use owo_colors::{OwoColorize, Style};

use crate::cli::CheckCommand;

pub fn check_rule(command: CheckCommand) -> Result<()> {
    validate(&command.rule)?;

    if command.rule.is_empty() {
        println!("Empty rule: the task does not repeat.");
        return Ok(());
    }

    let rule: RecurrenceRule = command.rule.parse()?;
    println!(
        "{} Valid rule: {} ({})",
        "✓".style(Style::new().green().bold()),
        rule.to_string().bright_white().bold(),
        rule.describe()
    );

    Ok(())
}
