pub mod expense;
pub mod system;
pub mod user;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(expense::definitions());
    commands.extend(user::definitions());
    commands.extend(system::definitions());
    commands
}
