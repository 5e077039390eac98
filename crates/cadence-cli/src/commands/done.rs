use anyhow::Result;
use cadence_core::models::CompletionResult;
use cadence_core::repository::TaskRepository;

use crate::cli::DoneCommand;
use crate::util::display_date;

pub async fn done_task(repo: &impl TaskRepository, command: DoneCommand) -> Result<()> {
    match repo.complete_task(command.id).await? {
        CompletionResult::Removed(task) => {
            println!("Completed task: '{}'", task.title);
        }
        CompletionResult::Rescheduled { task, previous_date } => {
            println!("Completed task: '{}'", task.title);
            println!(
                "Next occurrence: {} (was {})",
                display_date(&task.date),
                display_date(&previous_date)
            );
        }
    }

    Ok(())
}
