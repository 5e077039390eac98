use cadence_core::date::parse_date;
use cadence_core::models::Task;
use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use owo_colors::OwoColorize;

use crate::util::display_date;

const COMMENT_WIDTH: usize = 40;

pub fn display_tasks(tasks: &[Task], today: NaiveDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Title", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(date_cell(&task.date, today));

        let mut title_cell = Cell::new(&task.title);
        if task.is_repeating() {
            title_cell = title_cell.add_attribute(Attribute::Bold);
        }
        row.add_cell(title_cell);

        row.add_cell(if task.is_repeating() {
            Cell::new(&task.repeat).fg(Color::Cyan)
        } else {
            Cell::new("-").fg(Color::DarkGrey)
        });
        row.add_cell(Cell::new(truncate(&task.comment, COMMENT_WIDTH)));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_task_details(task: &Task, today: NaiveDate) {
    println!("{} {}", "Task".bold(), task.id.to_string().yellow());
    println!("  {:<8} {}", "Title:", task.title.bright_white().bold());

    let date = display_date(&task.date);
    match parse_date(&task.date) {
        Some(d) if d < today => println!("  {:<8} {} (overdue)", "Date:", date.red()),
        Some(d) if d == today => println!("  {:<8} {} (today)", "Date:", date.yellow()),
        _ => println!("  {:<8} {}", "Date:", date.cyan()),
    }

    match task.rule() {
        Ok(Some(rule)) => println!("  {:<8} {} ({})", "Repeat:", task.repeat, rule.describe()),
        Ok(None) => println!("  {:<8} {}", "Repeat:", "never".bright_black()),
        Err(e) => println!("  {:<8} {} ({})", "Repeat:", task.repeat, e.red()),
    }

    if !task.comment.is_empty() {
        println!("  {:<8} {}", "Comment:", task.comment);
    }
}

fn date_cell(stored: &str, today: NaiveDate) -> Cell {
    let cell = Cell::new(display_date(stored));
    match parse_date(stored) {
        Some(d) if d < today => cell.fg(Color::Red), // Overdue
        Some(d) if d == today => cell.fg(Color::Yellow),
        _ => cell,
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
