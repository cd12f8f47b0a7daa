//! Command dispatch

use std::io::{self, BufRead, IsTerminal, Read};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{classify_at, classify_branch, classify_text, CastInput, Element, Tree};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::emit::{emitter_for, OutputFormat};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Cast { numbers }) => cmd_cast(cli, numbers),
        Some(Commands::Render { file }) => cmd_render(cli, file),
        Some(Commands::Session) => cmd_session(cli),
        Some(Commands::Classify {
            input,
            text,
            offset,
        }) => cmd_classify(input, *text, *offset),
        Some(Commands::Validate { numbers }) => cmd_validate(numbers),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

/// Settings from file and env, with command line flags on top.
pub fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(format) = cli.format {
        settings.format = format;
    }
    settings.validate()?;
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

fn print_tree(tree: &Tree, format: OutputFormat) -> CliResult<()> {
    let rendered = emitter_for(format).emit(tree)?;
    output::info(rendered.trim_end());
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_cast(cli: &Cli, numbers: &str) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    let format = settings.format;
    let container = ServiceContainer::new(settings)?;

    let mut session = container.session();
    match session.submit(numbers) {
        Ok(tree) => print_tree(tree, format),
        Err(e) => Err(CliError::Reported(e)),
    }
}

#[instrument(skip(cli))]
fn cmd_render(cli: &Cli, file: &Path) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    let format = settings.format;
    let container = ServiceContainer::new(settings)?;
    let service = container.divination_service();

    let body = if file == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_path_context("read response", file)?;
        buf
    } else {
        std::fs::read_to_string(file).with_path_context("read response", file)?
    };

    let result = service.decode(&body)?;
    print_tree(&service.render(&result), format)
}

#[instrument(skip(cli))]
fn cmd_session(cli: &Cli) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    let format = settings.format;
    let container = ServiceContainer::new(settings)?;
    let mut session = container.session();

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        output::header("六爻: enter six digits 0-3, empty line or q to quit");
        output::prompt(">");
    }

    for line in stdin.lock().lines() {
        let line = line.map_err(|e| InfraError::io("read stdin", e))?;
        let entry = line.trim();
        if entry.is_empty() || entry == "q" {
            break;
        }
        // failures were already reported; the panel keeps its last tree
        if let Ok(tree) = session.submit(entry) {
            print_tree(tree, format)?;
        }
        if interactive {
            output::prompt(">");
        }
    }
    Ok(())
}

fn cmd_classify(input: &str, text: bool, offset: Option<usize>) -> CliResult<()> {
    let element = match (text, offset) {
        (true, _) => classify_text(input),
        (false, Some(offset)) => classify_at(input, offset),
        (false, None) => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => classify_branch(c),
                _ => {
                    return Err(CliError::InvalidArgs(format!(
                        "expected a single branch glyph, got {input:?} (use --offset or --text)"
                    )))
                }
            }
        }
    };
    match element {
        Some(element) => output::action(element.css_class(), &describe(element)),
        None => output::detail(&"none"),
    }
    Ok(())
}

fn describe(element: Element) -> String {
    format!("{} ({})", element.glyph(), element)
}

fn cmd_validate(numbers: &str) -> CliResult<()> {
    let cast = CastInput::parse(numbers).map_err(ApplicationError::from)?;
    output::success(&format!("{cast}: {} moving", cast.moving_count()));
    for (i, value) in cast.values().iter().enumerate() {
        let moving = if value.is_moving() { " (moving)" } else { "" };
        output::detail(&format!(
            "{} {} {} {}{}",
            i + 1,
            value.digit(),
            value.stroke(),
            value.label(),
            moving
        ));
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = effective_settings(cli)?;
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Init { force } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?,
            };
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("cannot determine config directory"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
