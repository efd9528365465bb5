//! Mlem layout editor host.
//!
//! Loads a stored interaction bar layout, lays it out, replays a drag through
//! the arrangement engine and saves the result when it changed.

pub mod cli;
pub mod layout_pass;
pub mod replay;

pub use cli::{Cli, Command};

use mlem_core::{
    ArrangementConfig, ArrangementEngine, ConfigError, FileStorage, LayoutError, LayoutPersistence,
    LayoutWidgetKind, Storage, StorageError, WidgetLayout,
};
use replay::ReplayError;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

/// Name of the config file inside the Mlem data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Errors surfaced to the user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("No {0} widget in this layout")]
    MissingWidget(&'static str),
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("Dragged {actual} instead of {expected}; nothing was saved")]
    WrongWidget {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Run the command line against the default storage location.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = match cli.config {
        Some(path) => path,
        None => FileStorage::data_dir()?.join(CONFIG_FILE),
    };
    let config = ArrangementConfig::load_or_default(&config_path)?;
    let storage = Arc::new(FileStorage::default_location()?);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(storage, &config, cli.command, &mut out)
}

/// Execute a parsed command.
pub fn run_command<S: Storage>(
    storage: Arc<S>,
    config: &ArrangementConfig,
    command: Command,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match command {
        Command::Show { preset } => {
            let mut persistence = LayoutPersistence::new(storage, preset);
            let layout = pollster::block_on(persistence.load())?;
            let engine = ArrangementEngine::from_layout(preset, &layout, config)?;
            print_arrangement(out, &engine.to_layout(preset.key()))?;
        }
        Command::Move {
            preset,
            widget: kind,
            collection,
        } => {
            let mut persistence = LayoutPersistence::new(storage, preset);
            let layout = pollster::block_on(persistence.load())?;
            let mut engine = ArrangementEngine::from_layout(preset, &layout, config)?;
            layout_pass::lay_out(&mut engine);

            let target = engine
                .collection_id(&collection)
                .ok_or_else(|| AppError::UnknownCollection(collection.clone()))?;
            let widget = replay::find_widget(&engine, kind).ok_or(AppError::MissingWidget(kind.name()))?;

            match replay::drag_widget(&mut engine, widget, target, config.minimum_drag_distance)? {
                Some(outcome) if outcome.widget != widget => {
                    let actual = engine.widgets().kind_of(outcome.widget).map_or("unknown", |k| k.name());
                    return Err(AppError::WrongWidget {
                        expected: kind.name(),
                        actual,
                    });
                }
                Some(outcome) if outcome.to == target => {
                    persistence.record_drop(&outcome);
                    if outcome.moved() {
                        writeln!(out, "Moved {} to {}", kind.name(), collection)?;
                    } else if outcome.changed() {
                        writeln!(out, "Moved {} to the end of {}", kind.name(), collection)?;
                    } else {
                        writeln!(out, "{} is already in {}", kind.name(), collection)?;
                    }
                }
                Some(_) => writeln!(out, "{} cannot be placed in {}", kind.name(), collection)?,
                None => writeln!(out, "Nothing moved")?,
            }

            if pollster::block_on(persistence.save_on_exit(&engine))? {
                writeln!(out, "Saved {}", preset.key())?;
            }
            print_arrangement(out, &engine.to_layout(preset.key()))?;
        }
        Command::Reset { preset } => {
            let mut persistence = LayoutPersistence::new(storage, preset);
            let layout = pollster::block_on(persistence.reset())?;
            writeln!(out, "Reset {}", preset.key())?;
            print_arrangement(out, &layout)?;
        }
    }
    Ok(())
}

/// Print one line per collection.
pub fn print_arrangement(out: &mut dyn Write, layout: &WidgetLayout) -> Result<(), AppError> {
    for collection in &layout.collections {
        let names: Vec<&str> = collection.widgets.iter().map(LayoutWidgetKind::name).collect();
        if names.is_empty() {
            writeln!(out, "{}: (empty)", collection.name)?;
        } else {
            writeln!(out, "{}: {}", collection.name, names.join(", "))?;
        }
    }
    Ok(())
}
