use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, UpdateTaskData};
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

pub mod tasks;

/// Source of the reference moment used when normalizing and completing tasks.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Clock reading the local wall time.
pub fn system_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

/// Clock frozen at `moment`, for deterministic tests and tooling.
pub fn fixed_clock(moment: NaiveDateTime) -> Clock {
    Arc::new(move || moment)
}

#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn search_tasks(&self, search: &str, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn update_date(&self, id: i64, date: &str) -> Result<(), CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
    async fn complete_task(&self, id: i64) -> Result<CompletionResult, CoreError>;
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
    clock: Clock,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self::with_clock(pool, system_clock())
    }

    pub fn with_clock(pool: DbPool, clock: Clock) -> Self {
        Self { pool, clock }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }
}
