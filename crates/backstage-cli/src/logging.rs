// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "BACKSTAGE_LOG";

/// `BACKSTAGE_LOG` wins over the configured level when it is set and non-empty.
pub fn filter_directive(env_value: Option<String>, configured_level: &str) -> String {
    env_value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| configured_level.to_owned())
}

pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid log filter {directive:?}"))
}

/// The terminal belongs to the TUI, so events go to an append-only file.
pub fn init_logging(level: &str, path: &Path) -> Result<()> {
    let filter = build_filter(&filter_directive(env::var(LOG_ENV).ok(), level))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .try_init()
        .context("install tracing subscriber")?;

    tracing::info!(log_file = %path.display(), "logging initialized");
    Ok(())
}
