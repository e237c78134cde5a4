use booking_core::{AppointmentForm, InputEvent, SubmitOutcome};
use booking_domain::NotificationState;

use crate::catalog;
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::forms::{
    clear_stale_dependents, display_value, resolve_option, FormEngine, FormResult,
    WizardInteraction,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "departments",
            "List the departments that take appointment requests",
            "departments",
            cmd_departments,
        ),
        CommandEntry::new(
            "open",
            "Open a department's booking form with a blank draft",
            "open <department>",
            cmd_open,
        ),
        CommandEntry::new(
            "set",
            "Type a value into a text field of the open form",
            "set <field> <value...>",
            cmd_set,
        ),
        CommandEntry::new(
            "select",
            "Choose an option for a select field by value, label or number",
            "select <field> <option>",
            cmd_select,
        ),
        CommandEntry::new(
            "draft",
            "Show the fields and current values of the open form",
            "draft",
            cmd_draft,
        ),
        CommandEntry::new(
            "submit",
            "Submit the open form's appointment request",
            "submit",
            cmd_submit,
        ),
        CommandEntry::new(
            "status",
            "Show the notification banner of the open form",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "book",
            "Fill and submit a booking form step by step",
            "book <department>",
            cmd_book,
        ),
    ]
}

fn cmd_departments(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Departments");
    for spec in catalog::all() {
        let department = spec.department();
        output::info(format!(
            "  {:<28} {:<40} {}",
            department.slug, department.name, department.specialty
        ));
    }
    Ok(())
}

fn department_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    args.first()
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let slug = department_arg(args, "open <department>")?;
    let form = context.open_form(slug)?;
    output::success(format!("Opened the {} booking form.", form.spec().department().name));
    output::hint("Fill it with `set`/`select`, review with `draft`, then `submit`.");
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value...>".into(),
        ));
    };
    let value = rest.join(" ");
    let form = context.form_mut()?;
    match form.spec().field(field) {
        None => output::warning(format!(
            "The {} form has no field `{}`; nothing changed.",
            form.spec().department().name,
            field
        )),
        Some(descriptor) if descriptor.kind.is_select() => {
            return Err(CommandError::InvalidArguments(format!(
                "`{}` is a select field; choose an option with `select {} <option>`",
                field, field
            )));
        }
        Some(_) => {}
    }
    form.handle_input(InputEvent::new(*field, value));
    Ok(())
}

fn report_cleared(form: &mut AppointmentForm) {
    for key in clear_stale_dependents(form) {
        output::warning(format!("{} no longer matches and was cleared.", key));
    }
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: select <field> <option>".into(),
        ));
    }
    let field = args[0];
    let choice = args[1..].join(" ");
    let form = context.form_mut()?;
    let descriptor = form
        .spec()
        .field(field)
        .filter(|descriptor| descriptor.kind.is_select())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{}` is not a select field on this form", field))
        })?;
    if let Some(parent) = descriptor.depends_on.as_deref() {
        if form.draft().get(parent).unwrap_or_default().is_empty() {
            return Err(CommandError::InvalidArguments(format!(
                "choose `{}` before {}",
                parent, descriptor.label
            )));
        }
    }
    let value = resolve_option(descriptor, form.draft(), &choice).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "`{}` is not an option for {}",
            choice, descriptor.label
        ))
    })?;
    let label = display_value(descriptor, &value);
    form.handle_select(value, field);
    output::info(format!("{} set to {}.", field, label));
    report_cleared(form);
    Ok(())
}

fn cmd_draft(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let form = context.form()?;
    let spec = form.spec();
    output::section(format!("{} request", spec.department().name));
    for field in spec.fields() {
        let marker = if field.required { "*" } else { " " };
        let value = form.draft().get(&field.key).unwrap_or_default();
        output::info(format!(
            "  {}{:<18} {:<30} {}",
            marker,
            field.key,
            field.label,
            display_value(field, value)
        ));
        let options = field.options_for(form.draft());
        if let (true, Some(parent)) = (options.is_empty(), field.depends_on.as_deref()) {
            output::info(format!("      (choose {} first)", parent));
        }
        for (position, option) in options.iter().enumerate() {
            output::info(format!("      {}. {} ({})", position + 1, option.label, option.value));
        }
    }
    output::info(format!("  * required  |  validation: {}", form.policy()));
    Ok(())
}

fn report_outcome(outcome: &SubmitOutcome, state: NotificationState, message: Option<&str>) {
    output::banner(state, message);
    if let SubmitOutcome::Booked(receipt) = outcome {
        output::info(format!(
            "  Request #{} (reference {}).",
            receipt.id, receipt.reference
        ));
    }
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let form = context.form_mut()?;
    let outcome = form.submit();
    report_outcome(&outcome, form.notification_state(), form.notification_message());
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let now = context.clock.now();
    let form = context.form()?;
    match (form.notification_state(), form.notification_message()) {
        (NotificationState::Hidden, _) | (_, None) => output::info("No notification is showing."),
        (state, Some(message)) => {
            output::banner(state, Some(message));
            if let Some(remaining) = form.notification().remaining(now) {
                output::info(format!(
                    "  Clears in {} ms.",
                    remaining.num_milliseconds()
                ));
            }
        }
    }
    Ok(())
}

fn cmd_book(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let slug = department_arg(args, "book <department>")?;
    if context.mode != CliMode::Interactive {
        return Err(CommandError::InvalidArguments(
            "`book` needs an interactive terminal; use open/set/select/submit in scripts".into(),
        ));
    }
    context.open_form(slug)?;

    let ShellContext { form, theme, .. } = context;
    let form = form.as_mut().ok_or(CommandError::NoFormOpen)?;
    output::hint("Type :back to revisit a field or :cancel to stop. Esc cancels a list.");
    let mut interaction = WizardInteraction::new(theme);
    let result = FormEngine::new(form).run(&mut interaction);
    match result {
        FormResult::Completed(outcome) => {
            report_outcome(&outcome, form.notification_state(), form.notification_message());
        }
        FormResult::Cancelled => {
            output::info("Booking cancelled. Your answers stay in the draft.");
        }
    }
    Ok(())
}
