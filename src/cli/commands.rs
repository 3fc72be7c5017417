//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::SceneService;
use crate::cli::args::{BinArg, Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{self, Settings, LOCAL_CONFIG_FILE};
use crate::domain::{ModelEvent, NodeId, WorldTree};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { order }) => {
            let (settings, scene) = build_scene(cli)?;
            _tree(&scene, *order || settings.show_order)
        }
        Some(Commands::Move { name, bin, row }) => {
            let (settings, mut scene) = build_scene(cli)?;
            _move(&mut scene, name, *bin, *row, settings.show_order)
        }
        Some(Commands::Rename { name, new_name }) => {
            let (settings, mut scene) = build_scene(cli)?;
            _rename(&mut scene, name, new_name, settings.show_order)
        }
        Some(Commands::Remove { name }) => {
            let (settings, mut scene) = build_scene(cli)?;
            _remove(&mut scene, name, settings.show_order)
        }
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Local config: explicit `--config`, else `./.raypainter.toml` if present.
fn local_config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(|| {
        let default = PathBuf::from(LOCAL_CONFIG_FILE);
        default.exists().then_some(default)
    })
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let local = local_config_path(cli);
    debug!("local config: {:?}", local);
    Ok(Settings::load(local.as_deref())?)
}

/// Every invocation starts from the configured seed scene.
fn build_scene(cli: &Cli) -> CliResult<(Settings, SceneService)> {
    let settings = load_settings(cli)?;
    let scene = SceneService::from_settings(&settings)?;
    Ok((settings, scene))
}

#[instrument(skip(scene))]
fn _tree(scene: &SceneService, show_order: bool) -> CliResult<()> {
    output::info(&scene.render(show_order));
    Ok(())
}

#[instrument(skip(scene))]
fn _move(
    scene: &mut SceneService,
    name: &str,
    bin: BinArg,
    row: Option<usize>,
    show_order: bool,
) -> CliResult<()> {
    let mutation = scene.drag(name, bin.into(), row)?;
    print_events(scene.tree(), &mutation.events);
    output::success(&format!("moved {name}"));
    output::info(&scene.render(show_order));
    Ok(())
}

#[instrument(skip(scene))]
fn _rename(scene: &mut SceneService, name: &str, new_name: &str, show_order: bool) -> CliResult<()> {
    if new_name.trim().is_empty() {
        return Err(CliError::InvalidArgs("new name must not be empty".into()));
    }
    match scene.rename(name, new_name)? {
        Some(event) => {
            print_events(scene.tree(), &[event]);
            output::success(&format!("renamed {name} to {new_name}"));
        }
        None => output::warning(&format!("{name} already has that name")),
    }
    output::info(&scene.render(show_order));
    Ok(())
}

#[instrument(skip(scene))]
fn _remove(scene: &mut SceneService, name: &str, show_order: bool) -> CliResult<()> {
    let (item, events) = scene.remove(name)?;
    print_events(scene.tree(), &events);
    output::success(&format!("removed {}", item.name()));
    output::info(&scene.render(show_order));
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            output::header("Config locations");
            match config::global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            let local = local_config_path(cli).unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
            output::action("local", &local.display());
        }
    }
    Ok(())
}

fn print_events(tree: &WorldTree, events: &[ModelEvent]) {
    let name = |id: NodeId| {
        tree.get(id)
            .map(|item| item.name().to_string())
            .unwrap_or_else(|| id.to_string())
    };
    for event in events {
        let line = match *event {
            ModelEvent::RowsAboutToBeInserted { parent, first, last } => {
                format!("about to insert rows {first}..={last} under {}", name(parent))
            }
            ModelEvent::RowsInserted { parent, first, last } => {
                format!("inserted rows {first}..={last} under {}", name(parent))
            }
            ModelEvent::RowsAboutToBeRemoved { parent, first, last } => {
                format!("about to remove rows {first}..={last} under {}", name(parent))
            }
            ModelEvent::RowsRemoved { parent, first, last } => {
                format!("removed rows {first}..={last} under {}", name(parent))
            }
            ModelEvent::NameChanged(id) => format!("name changed: {}", name(id)),
            ModelEvent::OrderChanged(id) => format!("order changed: {}", name(id)),
        };
        output::event(&line);
    }
}
