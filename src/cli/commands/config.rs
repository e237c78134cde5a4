use booking_config::model::SETTABLE_KEYS;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;

const USAGE: &str = "config [show|set <key> <value>|backup [note]|backups|restore <name|number>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage stored preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return context.show_config();
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    SETTABLE_KEYS.join("|")
                )));
            }
            let value = args[2..].join(" ");
            context.set_config_value(args[1], value.trim())
        }
        "backup" => {
            let note = (args.len() > 1).then(|| args[1..].join(" "));
            context.backup_config(note.as_deref())
        }
        "backups" => context.list_config_backups(),
        "restore" => match args.get(1) {
            Some(reference) => context.restore_config(reference),
            None => Err(CommandError::InvalidArguments(
                "usage: config restore <name|number>".into(),
            )),
        },
        _ => Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
}
