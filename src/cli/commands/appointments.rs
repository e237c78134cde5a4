use booking_core::{AppointmentStore, DEFAULT_LIST_LIMIT};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "appointments",
            "List stored appointment requests",
            "appointments [skip] [limit]",
            cmd_appointments,
        ),
        CommandEntry::new(
            "appointment",
            "Show one stored appointment request",
            "appointment <id>",
            cmd_appointment,
        ),
    ]
}

fn parse_count(raw: Option<&&str>, name: &str, default: usize) -> Result<usize, CommandError> {
    match raw {
        Some(value) => value.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` must be a whole number", name))
        }),
        None => Ok(default),
    }
}

fn cmd_appointments(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let skip = parse_count(args.first(), "skip", 0)?;
    let limit = parse_count(args.get(1), "limit", DEFAULT_LIST_LIMIT)?;
    let records = context.store.list(skip, limit)?;
    if records.is_empty() {
        output::info("No appointment requests stored.");
        return Ok(());
    }

    output::section("Appointment requests");
    for record in records {
        let submission = &record.submission;
        output::info(format!(
            "  {:>4}  {}  {:<28} {}",
            record.id,
            submission.submitted_at.format("%Y-%m-%d %H:%M"),
            submission.department_name,
            submission.field("name").unwrap_or("-")
        ));
    }
    Ok(())
}

fn cmd_appointment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: appointment <id>".into()))?
        .parse::<u64>()
        .map_err(|_| CommandError::InvalidArguments("appointment id must be a number".into()))?;
    let record = context.store.get(id)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
