use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::registry::CommandEntry;
use crate::cli::{output, render};
use crate::domain::ExpenseRecord;
use crate::errors::ExpenseError;

const ADD_USAGE: &str = "add <name> <category> <amount>";
const DELETE_USAGE: &str = "delete <number>...";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Add an expense", ADD_USAGE, cmd_add),
        CommandEntry::new("list", "Show all expenses", "list", cmd_list).with_aliases(&["ls"]),
        CommandEntry::new(
            "delete",
            "Remove expenses by their list numbers",
            DELETE_USAGE,
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandEntry::new("export", "Print expenses as JSON", "export", cmd_export),
    ]
}

/// Field values collected by the add form; `None` means "ask for it".
struct AddForm {
    name: Option<String>,
    category: Option<String>,
    amount: Option<f64>,
}

impl AddForm {
    fn from_args(args: &[&str]) -> Result<Self, CommandError> {
        if args.len() > 3 {
            return Err(CommandError::InvalidArguments(format!("usage: {}", ADD_USAGE)));
        }
        let amount = args.get(2).map(|raw| parse_amount(raw)).transpose()?;
        Ok(Self {
            name: args.first().map(|value| value.to_string()),
            category: args.get(1).map(|value| value.to_string()),
            amount,
        })
    }

    fn is_complete(&self) -> bool {
        self.name.is_some() && self.category.is_some() && self.amount.is_some()
    }

    fn into_record(self, context: &ShellContext) -> Result<ExpenseRecord, CommandError> {
        let name = match self.name {
            Some(name) => name,
            None => cli_io::prompt_text(&context.theme, "Name", None)?,
        };
        let category = match self.category {
            Some(category) => category,
            None => cli_io::prompt_text(
                &context.theme,
                "Type",
                Some(context.config.default_category.as_str()),
            )?,
        };
        let amount = match self.amount {
            Some(amount) => amount,
            None => cli_io::prompt_amount(&context.theme, "Amount")?,
        };
        Ok(ExpenseRecord::new(name, category, amount))
    }
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let form = AddForm::from_args(args)?;
    if !form.is_complete() {
        context.require_interactive(ADD_USAGE)?;
    }
    let record = form.into_record(context)?;
    context.store.add(record);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render::print_items(context.store.items());
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let positions = if args.is_empty() {
        context.require_interactive(DELETE_USAGE)?;
        match pick_rows(context)? {
            Some(positions) => positions,
            None => return Ok(()),
        }
    } else {
        args.iter()
            .map(|raw| parse_position(raw))
            .collect::<Result<Vec<_>, _>>()?
    };

    match context.store.remove_at(positions) {
        Ok(_) => Ok(()),
        Err(ExpenseError::IndexOutOfRange { index, len }) => {
            Err(CommandError::InvalidArguments(format!(
                "there is no expense #{} (the list has {} item(s))",
                index + 1,
                len
            )))
        }
        Err(err) => Err(err.into()),
    }
}

fn pick_rows(context: &ShellContext) -> Result<Option<Vec<usize>>, CommandError> {
    if context.store.is_empty() {
        output::info("Nothing to delete.");
        return Ok(None);
    }
    let labels: Vec<String> = context.store.iter().map(ToString::to_string).collect();
    let picked = cli_io::select_many(&context.theme, "Select expenses to delete", &labels)?;
    if picked.is_empty() {
        return Ok(None);
    }
    let prompt = format!("Delete {} expense(s)?", picked.len());
    if cli_io::confirm_action(&context.theme, &prompt, false)? {
        Ok(Some(picked))
    } else {
        Ok(None)
    }
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::line(serde_json::to_string_pretty(context.store.items())?);
    Ok(())
}

fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim().parse::<f64>().map_err(|_| {
        CommandError::InvalidArguments(format!("amount `{}` is not a number", raw))
    })
}

/// Converts a 1-based list number into a store position.
fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a list number",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::{CliMode, LoopControl};
    use tempfile::TempDir;

    fn script_context() -> (TempDir, ShellContext) {
        let dir = TempDir::new().unwrap();
        let context = ShellContext::with_base_dir(CliMode::Script, dir.path().to_path_buf()).unwrap();
        (dir, context)
    }

    fn names(context: &ShellContext) -> Vec<&str> {
        context.store.iter().map(ExpenseRecord::name).collect()
    }

    #[test]
    fn add_with_all_fields_appends() {
        let (_dir, mut context) = script_context();
        context.process_line("add Lunch personal 5").unwrap();
        context.process_line("add \"Airport taxi\" travel 12.5").unwrap();
        assert_eq!(names(&context), vec!["Lunch", "Airport taxi"]);
        assert_eq!(context.store.get(1).unwrap().amount(), 12.5);
    }

    #[test]
    fn add_with_missing_fields_needs_interactive_mode() {
        let (_dir, mut context) = script_context();
        let err = context.process_line("add Lunch").expect_err("script mode cannot prompt");
        assert!(matches!(err, CommandError::InvalidArguments(ref message) if message.contains(ADD_USAGE)));
        assert!(context.store.is_empty());
    }

    #[test]
    fn add_rejects_non_numeric_amount() {
        let (_dir, mut context) = script_context();
        let err = context.process_line("add Lunch personal five").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(ref message) if message.contains("five")));
    }

    #[test]
    fn delete_takes_one_based_numbers_as_a_batch() {
        let (_dir, mut context) = script_context();
        for name in ["A", "B", "C", "D"] {
            context.process_line(&format!("add {} personal 1", name)).unwrap();
        }
        let control = context.process_line("delete 2 4").unwrap();
        assert_eq!(control, LoopControl::Continue);
        assert_eq!(names(&context), vec!["A", "C"]);
    }

    #[test]
    fn delete_out_of_range_reports_list_number() {
        let (_dir, mut context) = script_context();
        context.process_line("add A personal 1").unwrap();
        let err = context.process_line("rm 1 3").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(ref message) if message.contains("#3")));
        assert_eq!(names(&context), vec!["A"]);
    }

    #[test]
    fn delete_rejects_zero() {
        assert!(parse_position("0").is_err());
        assert_eq!(parse_position("1").unwrap(), 0);
    }
}
