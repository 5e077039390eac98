use anyhow::{anyhow, Result};
use cadence_core::error::CoreError;
use cadence_core::repository::TaskRepository;

use crate::cli::ShowCommand;
use crate::util::now;
use crate::views::table::display_task_details;

pub async fn show_task(repo: &impl TaskRepository, command: ShowCommand) -> Result<()> {
    let task = repo
        .find_task_by_id(command.id)
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(command.id.to_string())))?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        display_task_details(&task, now().date());
    }

    Ok(())
}
