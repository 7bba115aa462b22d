//! Command dispatch

use std::io;

use tracing::{debug, info, instrument};

use crate::application::{render_forest, CheckboxSession, LoadState, RenderOptions, ToggleEvent};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::interactive;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{descendant_ids, DomainError, Forest, NodeId};
use crate::infrastructure::{source_for, InfraError};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?.with_source(cli.source.as_deref());
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Show { toggles, ids }) => _show(&settings, toggles, *ids),
        Some(Commands::Descendants { id }) => _descendants(&settings, id),
        Some(Commands::Interactive { ids }) => _interactive(&settings, *ids),
        Some(Commands::Config { command }) => _config(&settings, command),
        Some(Commands::Completion { .. }) | None => Ok(()),
    }
}

fn render_options(settings: &Settings, show_ids: bool) -> RenderOptions {
    RenderOptions {
        markers: settings.markers.clone(),
        show_ids,
        title: Some(settings.title.clone()),
    }
}

/// Fetch the menu, reporting the load state the way the menu screen shows it.
#[instrument(skip(settings))]
fn load_menu(settings: &Settings) -> CliResult<Forest> {
    let spec = settings.source.as_deref().ok_or_else(|| {
        CliError::Usage("no menu source: pass --source or set `source` in the config".into())
    })?;
    let source = source_for(spec, settings);
    info!("loading menu from {}", source.describe());

    output::status(&LoadState::<InfraError>::Loading);
    let state = LoadState::from_result(source.fetch());
    if state.is_failed() {
        output::info(&state);
    } else {
        output::status(&state);
    }
    match state {
        LoadState::Loaded(forest) => Ok(forest),
        LoadState::Failed(e) => Err(CliError::LoadFailed(e)),
        LoadState::Loading => Err(InfraError::network("menu fetch did not complete").into()),
    }
}

#[instrument(skip(settings))]
fn _show(settings: &Settings, toggles: &[ToggleEvent], ids: bool) -> CliResult<()> {
    let forest = load_menu(settings)?;
    let mut session = CheckboxSession::new(&forest)?;

    let applied = session.apply_all(toggles);
    if applied < toggles.len() {
        output::warning(&format!(
            "{} toggle(s) named unknown nodes and were ignored",
            toggles.len() - applied
        ));
    }

    let opts = render_options(settings, ids);
    print!("{}", render_forest(&forest, session.selection(), &opts));

    let checked: Vec<String> = session
        .checked_ids()
        .into_iter()
        .map(String::from)
        .collect();
    output::header("Selected");
    if checked.is_empty() {
        output::detail(&"(none)");
    } else {
        for id in checked {
            output::detail(&id);
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _descendants(settings: &Settings, id: &str) -> CliResult<()> {
    let forest = load_menu(settings)?;
    let id = NodeId::from(id);
    let node = forest.find(&id).ok_or(DomainError::UnknownNode(id))?;
    for id in descendant_ids(node) {
        output::info(&id);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _interactive(settings: &Settings, ids: bool) -> CliResult<()> {
    if settings.source.as_deref() == Some("-") {
        return Err(CliError::InvalidArgs(
            "interactive mode reads commands from stdin; the menu cannot come from stdin too".into(),
        ));
    }
    let forest = load_menu(settings)?;
    let mut session = CheckboxSession::new(&forest)?;
    let opts = render_options(settings, ids);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    interactive::run(&mut session, &opts, stdin.lock(), &mut stdout)
        .map_err(|e| InfraError::io("interactive session", e))?;
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("cannot determine config directory"),
        },
    }
    Ok(())
}
