//! # Cadence Core Library
//!
//! Task scheduling with compact repeat rules: `d 7` (every 7 days),
//! `w 1,3,5` (weekdays), `m 1,-1 6` (days of month, optionally restricted to
//! months) and `y` (yearly).
//!
//! ## Core Modules
//!
//! - [`rule`]: repeat-rule grammar, typed [`rule::RecurrenceRule`] and the validator
//! - [`schedule`]: next-date calculation for every rule kind
//! - [`normalize`]: date policy applied when a task is created or updated
//! - [`date`]: `YYYYMMDD` codec and calendar helpers
//! - [`db`]: database connection and migration management
//! - [`models`]: core data structures and transfer objects
//! - [`repository`]: data access layer with Repository pattern
//! - [`query`]: search term parsing for listings
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cadence_core::{
//!     db, models::NewTaskData, repository::{SqliteRepository, TaskRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cadence_core::error::CoreError> {
//!     let pool = db::establish_connection("scheduler.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let task = repo
//!         .add_task(NewTaskData {
//!             title: "Water the plants".to_string(),
//!             repeat: "d 3".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Scheduled '{}' for {}", task.title, task.date);
//!
//!     Ok(())
//! }
//! ```
//!
//! The calculator itself is a plain function:
//!
//! ```rust
//! use cadence_core::schedule::next_date;
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! assert_eq!(next_date(now, "20250301", "d 7").unwrap(), "20250315");
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod normalize;
pub mod query;
pub mod repository;
pub mod rule;
pub mod schedule;
