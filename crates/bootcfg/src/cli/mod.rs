mod commands;
mod setup;

use anyhow::{Context, Result};
use bootcfg_store::{BootcfgConfig, FileStore, Store, TemplateKind};
use setup::{parse_cli, Cli, Commands, GroupCommand, ProfileCommand, TemplateCommand};
use std::fs::File;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Logs go to stderr so stdout stays clean for JSON and template output.
/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

fn build_store(cli: &Cli) -> Result<FileStore> {
    let mut config = BootcfgConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(data_path) = &cli.data_path {
        config.data_path = data_path.clone();
    }
    let store_config = config.into_store_config()?;
    tracing::debug!(
        root = %store_config.root.display(),
        groups = store_config.groups.len(),
        "opening store"
    );
    Ok(FileStore::new(store_config))
}

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let store = build_store(&cli)?;
    match dispatch(&store, cli.command)? {
        Output::Line(text) => println!("{}", text),
        Output::Raw(text) => print!("{}", text),
    }
    Ok(())
}

/// What a command prints: a line of output (JSON, messages) or raw template
/// bytes that must reach stdout untouched.
#[derive(Debug, PartialEq, Eq)]
enum Output {
    Line(String),
    Raw(String),
}

fn dispatch(store: &dyn Store, command: Commands) -> Result<Output> {
    let text = match command {
        Commands::Group(GroupCommand::List) => commands::group_list(store)?,
        Commands::Group(GroupCommand::Get { id }) => commands::group_get(store, &id)?,
        Commands::Profile(ProfileCommand::List) => commands::profile_list(store)?,
        Commands::Profile(ProfileCommand::Get { id }) => commands::profile_get(store, &id)?,
        Commands::Profile(ProfileCommand::Put { file }) => {
            if file.as_os_str() == "-" {
                commands::profile_put(store, io::stdin().lock())?
            } else {
                let input = File::open(&file)
                    .with_context(|| format!("opening {}", file.display()))?;
                commands::profile_put(store, input)?
            }
        }
        Commands::Ignition(TemplateCommand::Get { name }) => {
            return Ok(Output::Raw(commands::template_get(
                store,
                TemplateKind::Ignition,
                &name,
            )?));
        }
        Commands::Cloud(TemplateCommand::Get { name }) => {
            return Ok(Output::Raw(commands::template_get(
                store,
                TemplateKind::Cloud,
                &name,
            )?));
        }
    };
    Ok(Output::Line(text))
}
