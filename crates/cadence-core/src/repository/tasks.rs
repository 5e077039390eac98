use crate::date::{format_date, parse_date};
use crate::error::{CalculationError, CoreError};
use crate::models::{CompletionResult, NewTaskData, Task, UpdateTaskData};
use crate::normalize::normalize;
use crate::query::{like_pattern, Search};
use crate::repository::SqliteRepository;
use crate::rule::{validate, RecurrenceRule};
use crate::schedule::completion_reference;
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info, instrument};

const MAX_TITLE_LEN: usize = 256;

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    #[instrument(skip(self, data), fields(title = %data.title))]
    async fn add_task(&self, mut data: NewTaskData) -> Result<Task, CoreError> {
        check_title(&data.title)?;
        validate(&data.repeat)?;
        normalize(&mut data.date, &data.repeat, self.now())?;

        let mut tx = self.pool().begin().await?;
        let task: Task = sqlx::query_as(
            r#"INSERT INTO scheduler (date, title, comment, repeat)
            VALUES ($1, $2, $3, $4)
            RETURNING *"#,
        )
        .bind(&data.date)
        .bind(&data.title)
        .bind(&data.comment)
        .bind(&data.repeat)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        info!(id = task.id, date = %task.date, "task added");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM scheduler WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, CoreError> {
        self.find_tasks(&Search::All, limit).await
    }

    async fn search_tasks(&self, search: &str, limit: u32) -> Result<Vec<Task>, CoreError> {
        self.find_tasks(&Search::parse(search), limit).await
    }

    #[instrument(skip(self, data))]
    async fn update_task(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let mut task = Self::find_task_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(date) = data.date {
            task.date = date;
        }
        if let Some(comment) = data.comment {
            task.comment = comment;
        }
        if let Some(repeat) = data.repeat {
            task.repeat = repeat;
        }

        check_title(&task.title)?;
        validate(&task.repeat)?;
        normalize(&mut task.date, &task.repeat, self.now())?;

        let updated: Task = sqlx::query_as(
            r#"UPDATE scheduler
            SET date = $1, title = $2, comment = $3, repeat = $4
            WHERE id = $5
            RETURNING *"#,
        )
        .bind(&task.date)
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(id, date = %updated.date, "task updated");
        Ok(updated)
    }

    async fn update_date(&self, id: i64, date: &str) -> Result<(), CoreError> {
        if parse_date(date).is_none() {
            return Err(CoreError::InvalidInput(format!(
                "date '{}' must use the YYYYMMDD format",
                date
            )));
        }

        let mut tx = self.pool().begin().await?;
        let task = Self::set_date_in_transaction(&mut tx, id, date)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        tx.commit().await?;

        debug!(id, date = %task.date, "task date changed");
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        info!(id, "task deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn complete_task(&self, id: i64) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task = Self::find_task_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let Some(rule) = task.rule()? else {
            sqlx::query("DELETE FROM scheduler WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            info!(id, "one-off task done and removed");
            return Ok(CompletionResult::Removed(task));
        };

        let next = self.next_occurrence(&rule, &task.date)?;
        let rescheduled = Self::set_date_in_transaction(&mut tx, id, &next)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        tx.commit().await?;

        info!(id, from = %task.date, to = %next, "repeating task rescheduled");
        Ok(CompletionResult::Rescheduled {
            task: rescheduled,
            previous_date: task.date,
        })
    }
}

impl SqliteRepository {
    async fn find_task_in_transaction(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM scheduler WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(task)
    }

    async fn set_date_in_transaction(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        date: &str,
    ) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("UPDATE scheduler SET date = $1 WHERE id = $2 RETURNING *")
            .bind(date)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(task)
    }

    async fn find_tasks(&self, search: &Search, limit: u32) -> Result<Vec<Task>, CoreError> {
        debug!(?search, limit, "listing tasks");
        let tasks = match search {
            Search::All => {
                sqlx::query_as("SELECT * FROM scheduler ORDER BY date, id LIMIT $1")
                    .bind(limit)
                    .fetch_all(self.pool())
                    .await?
            }
            Search::Date(date) => {
                sqlx::query_as("SELECT * FROM scheduler WHERE date = $1 ORDER BY date, id LIMIT $2")
                    .bind(format_date(*date))
                    .bind(limit)
                    .fetch_all(self.pool())
                    .await?
            }
            Search::Text(text) => {
                sqlx::query_as(
                    r#"SELECT * FROM scheduler
                    WHERE title LIKE $1 ESCAPE '\' OR comment LIKE $1 ESCAPE '\'
                    ORDER BY date, id
                    LIMIT $2"#,
                )
                .bind(like_pattern(text))
                .bind(limit)
                .fetch_all(self.pool())
                .await?
            }
        };
        Ok(tasks)
    }

    /// Next date for a repeating task that is being marked done.
    fn next_occurrence(&self, rule: &RecurrenceRule, current: &str) -> Result<String, CoreError> {
        let current_date = parse_date(current)
            .ok_or_else(|| CalculationError::InvalidStartDate(current.to_string()))?;
        let reference = completion_reference(rule, self.now().date(), current_date)?;
        let next = rule.next_after(reference, current_date)?;
        Ok(format_date(next))
    }
}

fn check_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::InvalidInput("task title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::InvalidInput(format!(
            "task title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}
