use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::User;
use crate::settings;

const USER_USAGE: &str = "user [first|last] [value]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("user", "Show or edit the user's name", USER_USAGE, cmd_user),
        CommandEntry::new(
            "save-user",
            "Write the user to the settings store",
            "save-user",
            cmd_save_user,
        ),
        CommandEntry::new(
            "load-user",
            "Read the user back from the settings store",
            "load-user",
            cmd_load_user,
        ),
    ]
}

fn cmd_user(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(field) = args.first() else {
        print_user(&context.user);
        return Ok(());
    };

    let value = match args.get(1..) {
        Some(rest) if !rest.is_empty() => rest.join(" "),
        _ => {
            context.require_interactive(USER_USAGE)?;
            let current = field_mut(&mut context.user, field)?.clone();
            cli_io::prompt_text(&context.theme, field, Some(current.as_str()))?
        }
    };

    *field_mut(&mut context.user, field)? = value;
    tracing::debug!(field = %field, "user field edited");
    print_user(&context.user);
    Ok(())
}

fn field_mut<'a>(user: &'a mut User, field: &str) -> Result<&'a mut String, CommandError> {
    match field.to_lowercase().as_str() {
        "first" | "firstname" => Ok(&mut user.first_name),
        "last" | "lastname" => Ok(&mut user.last_name),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown user field `{}`; use `first` or `last`",
            other
        ))),
    }
}

fn print_user(user: &User) {
    output::info(format!("Your name is {}", user.full_name()));
}

fn cmd_save_user(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let key = context.config.user_key.clone();
    if settings::save_encoded(&mut context.settings, &key, &context.user) {
        output::success(format!("Saved user under `{}`.", key));
    } else {
        output::warning("The user could not be saved; nothing was written.");
    }
    Ok(())
}

fn cmd_load_user(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let key = &context.config.user_key;
    match settings::load_decoded::<_, User>(&context.settings, key)? {
        Some(user) => {
            context.user = user;
            print_user(&context.user);
        }
        None => output::info(format!("No user stored under `{}`.", key)),
    }
    Ok(())
}
