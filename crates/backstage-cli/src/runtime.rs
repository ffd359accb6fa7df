// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use backstage_app::{Catalog, EntityKind, ScreenCommand, ScreenEvent, ScreenSnapshot};

/// Serves the TUI from an in-memory catalog.
#[derive(Debug)]
pub struct CatalogRuntime {
    catalog: Catalog,
}

impl CatalogRuntime {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl backstage_tui::AppRuntime for CatalogRuntime {
    fn load_snapshot(&mut self, kind: EntityKind) -> Result<ScreenSnapshot> {
        Ok(self.catalog.snapshot(kind))
    }

    fn apply(&mut self, kind: EntityKind, command: ScreenCommand<i64>) -> Result<Vec<ScreenEvent>> {
        tracing::trace!(%kind, ?command, "apply screen command");
        let events = self
            .catalog
            .dispatch(kind, command)
            .with_context(|| format!("{kind} command"))?;
        for event in &events {
            if let ScreenEvent::ValidationFailed(errors) = event {
                tracing::debug!(%kind, %errors, "form rejected");
            }
        }
        Ok(events)
    }
}
