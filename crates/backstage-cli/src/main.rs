// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use backstage_app::{AppState, Catalog, EntityKind};
use backstage_tui::UiOptions;
use config::Config;
use runtime::CatalogRuntime;
use std::env;
use std::path::PathBuf;

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
            "load config {}; run `backstage --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let catalog = build_catalog(&config, &options);

    if let Some(kind) = options.dump {
        let snapshot = catalog.snapshot(kind);
        let json = serde_json::to_string_pretty(&snapshot)
            .with_context(|| format!("serialize {kind} snapshot"))?;
        println!("{json}");
        return Ok(());
    }

    let status_timeout = config.status_timeout()?;
    let log_path = config.log_path()?;
    if options.check_only {
        logging::build_filter(&logging::filter_directive(
            env::var(logging::LOG_ENV).ok(),
            &config.log_level(),
        ))?;
        println!("config ok: {}", options.config_path.display());
        println!("log file: {}", log_path.display());
        return Ok(());
    }

    logging::init_logging(&config.log_level(), &log_path).with_context(|| {
        format!(
            "set up logging at {} -- set [log].file to a writable path",
            log_path.display()
        )
    })?;
    tracing::info!(
        config = %options.config_path.display(),
        start_tab = %config.start_tab(),
        records = EntityKind::ALL.iter().map(|kind| catalog.record_count(*kind)).sum::<usize>(),
        "starting backstage"
    );

    let mut state = AppState::starting_at(config.start_tab());
    let mut runtime = CatalogRuntime::new(catalog);
    let result = backstage_tui::run_app(&mut state, &mut runtime, UiOptions { status_timeout });
    if let Err(error) = &result {
        tracing::error!(error = %format!("{error:#}"), "ui exited with error");
    }
    result
}

fn build_catalog(config: &Config, options: &CliOptions) -> Catalog {
    if options.empty || !config.sample_data() {
        Catalog::empty()
    } else {
        Catalog::with_samples()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    empty: bool,
    dump: Option<EntityKind>,
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
        print_config_path: false,
        print_example: false,
        empty: false,
        dump: None,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--empty" => {
                options.empty = true;
            }
            "--dump" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!("--dump requires a kind: albums, events, groups, managers, tracks")
                })?;
                let kind = EntityKind::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown kind {:?} for --dump; use albums, events, groups, managers, or tracks",
                        value.as_ref()
                    )
                })?;
                options.dump = Some(kind);
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("backstage: music catalog");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --empty                  Start without sample data");
    println!("  --dump <kind>            Print one kind's list as JSON and exit");
    println!("  --check                  Validate config and logging setup");
    println!("  --help                   Show this help");
}
