// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use bootcard_app::{AppCommand, AppState};
use bootcard_tui::{SessionOutcome, UiOptions};
use config::Config;
use runtime::ThreadTimer;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `bootcard --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    runtime::init_logging(config.log_file().as_deref(), config.log_level())?;

    let deck_path = options.deck_path.clone().or_else(|| config.deck_path());
    if options.print_deck_path {
        match &deck_path {
            Some(path) => println!("{}", path.display()),
            None => println!("(builtin)"),
        }
        return Ok(());
    }

    let (deck, warnings) = match &deck_path {
        Some(path) => bootcard_deck::load(path).with_context(|| {
            format!(
                "load deck {} -- if this path is wrong, set [deck].path or BOOTCARD_DECK_PATH",
                path.display()
            )
        })?,
        None => (bootcard_deck::builtin(), Vec::new()),
    };
    info!(cards = deck.cards.len(), warnings = warnings.len(), "deck ready");

    if options.check_only {
        return Ok(());
    }

    let mut state = AppState::new(config.high_contrast());
    if !warnings.is_empty() {
        state.dispatch(AppCommand::SetStatus(format!(
            "deck warnings: {}",
            warnings.len()
        )));
    }

    let ui_options = UiOptions {
        timing: config.timing(),
        enter_effect: config.enter_effect(),
        exit_effect: config.exit_effect(),
    };
    let mut timer = ThreadTimer;
    let outcome = bootcard_tui::run_app(&mut state, &deck, &mut timer, &ui_options)?;

    // The invoking boot script reads the chosen endpoint from stdout; a
    // dismissed session prints nothing.
    if let SessionOutcome::Endpoint(id) = outcome {
        println!("{}", id.as_str());
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    deck_path: Option<PathBuf>,
    print_config_path: bool,
    print_deck_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        deck_path: None,
        print_config_path: false,
        print_deck_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--deck" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--deck requires a file path"))?;
                options.deck_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-deck-path" => {
                options.print_deck_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("bootcard");
    println!("  --config <path>          Use a specific config path");
    println!("  --deck <path>            Load a specific deck file");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-deck-path        Print resolved deck path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and deck, then exit");
    println!("  --help                   Show this help");
}
