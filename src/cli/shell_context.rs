use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;

use crate::{
    cli::{commands, output, render},
    config::{Config, ConfigManager},
    domain::{ExpenseRecord, User},
    settings::JsonFileSettings,
    store::{ExpenseStore, StoreEvent},
};

use super::core::CliError;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State owned by one shell session. The expense store lives and dies with it.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: ExpenseStore,
    pub settings: JsonFileSettings,
    pub user: User,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::from_manager(mode, ConfigManager::new()?)
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        Self::from_manager(mode, ConfigManager::with_base_dir(base)?)
    }

    fn from_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        if !config_manager.path().exists() {
            config_manager.save(&config)?;
        }
        output::set_preferences(output::OutputPreferences {
            plain: config.plain_output || mode == CliMode::Script,
        });
        let settings = JsonFileSettings::open(config_manager.settings_path(&config))?;

        let mut store = ExpenseStore::new();
        store.subscribe(announce_change);

        tracing::info!(?mode, settings = %settings.path().display(), "shell session started");
        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            store,
            settings,
            user: User::default(),
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("iexpense ({})> ", self.store.len())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }
}

/// Store observer: reports what changed and re-renders the list.
fn announce_change(event: &StoreEvent, items: &[ExpenseRecord]) {
    match event {
        StoreEvent::Added { index, .. } => {
            if let Some(record) = items.get(*index) {
                output::success(format!("Added `{}` as #{}.", record.name(), index + 1));
            }
        }
        StoreEvent::Removed { ids } => {
            output::success(format!("Removed {} expense(s).", ids.len()));
        }
    }
    render::print_items(items);
}
