use anyhow::Result;
use cadence_core::repository::TaskRepository;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::util::now;
use crate::views::table::display_tasks;

pub async fn list_tasks(repo: &impl TaskRepository, command: ListCommand, config: &Config) -> Result<()> {
    let limit = command.limit.unwrap_or(config.list_limit);

    let tasks = match command.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => repo.search_tasks(term, limit).await?,
        _ => repo.list_tasks(limit).await?,
    };

    display_tasks(&tasks, now().date());

    Ok(())
}
