use anyhow::Result;
use cadence_core::models::NewTaskData;
use cadence_core::repository::TaskRepository;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::util::{display_date, now, resolve_date};

pub async fn add_task(repo: &impl TaskRepository, command: AddCommand) -> Result<()> {
    let today = now().date();
    let data = NewTaskData {
        title: command.title,
        date: command
            .date
            .as_deref()
            .map(|d| resolve_date(d, today))
            .unwrap_or_default(),
        comment: command.comment.unwrap_or_default(),
        repeat: command.repeat.map(|r| r.trim().to_string()).unwrap_or_default(),
    };

    let task = repo.add_task(data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.title.bright_white().bold()
    );
    println!("  {} Task ID: {}", "→".style(info_style), task.id.to_string().yellow());
    println!("  {} Date: {}", "→".style(info_style), display_date(&task.date).cyan());
    if let Ok(Some(rule)) = task.rule() {
        println!("  {} Repeats: {}", "→".style(info_style), rule.describe());
    }

    Ok(())
}
