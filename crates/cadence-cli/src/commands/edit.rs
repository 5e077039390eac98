use anyhow::{anyhow, Result};
use cadence_core::error::CoreError;
use cadence_core::models::UpdateTaskData;
use cadence_core::repository::TaskRepository;

use crate::cli::EditCommand;
use crate::util::{display_date, now, resolve_date};

pub async fn edit_task(repo: &impl TaskRepository, command: EditCommand) -> Result<()> {
    let today = now().date();

    let comment = if command.comment_clear {
        Some(String::new())
    } else {
        command.comment
    };

    let repeat = if command.repeat_clear {
        Some(String::new())
    } else {
        command.repeat.map(|r| r.trim().to_string())
    };

    let update_data = UpdateTaskData {
        title: command.title,
        date: command.date.as_deref().map(|d| resolve_date(d, today)),
        comment,
        repeat,
    };

    if update_data.is_empty() {
        return Err(anyhow!(CoreError::InvalidInput(
            "nothing to change, pass at least one of --title, --date, --comment or --repeat".to_string()
        )));
    }

    let task = repo.update_task(command.id, update_data).await?;
    println!("Updated task with ID: {}", task.id);
    println!("  Date: {}", display_date(&task.date));

    Ok(())
}
