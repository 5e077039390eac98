pub mod add;
pub mod check;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod next_date;
pub mod show;
