use anyhow::Result;
use cadence_core::date::midnight;
use cadence_core::schedule::next_date;

use crate::cli::NextDateCommand;
use crate::util::{now, parse_date_arg};

/// Prints the bare `YYYYMMDD` result so it can be used in scripts.
pub fn print_next_date(command: NextDateCommand) -> Result<()> {
    let reference = match command.now.as_deref() {
        Some(day) => midnight(parse_date_arg(day, now().date())?),
        None => now(),
    };

    let date = next_date(reference, command.date.trim(), &command.repeat)?;
    println!("{}", date);

    Ok(())
}
