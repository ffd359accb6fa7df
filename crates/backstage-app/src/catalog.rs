// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::sample;
use crate::{
    Album, CatalogResult, Entity, EntityKind, EntitySchema, EntityStore, Event, FieldKind,
    ListQuery, ListScreen, Liveness, Manager, ModalMode, MusicalGroup, PreviewRegistry,
    ScreenCommand, ScreenEvent, Track,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotRow {
    pub id: i64,
    pub cells: Vec<String>,
    pub liveness: Liveness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormFieldSnapshot {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub mode: ModalMode,
    pub target: Option<i64>,
    pub fields: Vec<FormFieldSnapshot>,
    pub preview_url: Option<String>,
    pub liveness: Liveness,
}

/// What the UI needs to draw one entity tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenSnapshot {
    pub kind: EntityKind,
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub search_label: &'static str,
    pub sort_label: &'static str,
    pub rows: Vec<SnapshotRow>,
    pub query: ListQuery,
    pub total: usize,
    pub form: Option<FormSnapshot>,
}

/// Type-erased face of a `ListScreen`, addressed with raw ids.
pub trait AnyScreen {
    fn kind(&self) -> EntityKind;
    fn dispatch_raw(&mut self, command: ScreenCommand<i64>) -> CatalogResult<Vec<ScreenEvent>>;
    fn total(&self) -> usize;
    fn snapshot(&self) -> ScreenSnapshot;
}

impl<E: Entity> AnyScreen for ListScreen<E> {
    fn kind(&self) -> EntityKind {
        E::schema().kind
    }

    fn dispatch_raw(&mut self, command: ScreenCommand<i64>) -> CatalogResult<Vec<ScreenEvent>> {
        self.dispatch(command.map_id(E::Id::from))
    }

    fn total(&self) -> usize {
        self.store().len()
    }

    fn snapshot(&self) -> ScreenSnapshot {
        let schema = E::schema();
        let rows = self
            .visible_rows()
            .into_iter()
            .map(|row| SnapshotRow {
                id: row.id.into(),
                cells: row.record.cells(),
                liveness: row.record.liveness(),
            })
            .collect();

        let form = self.form();
        let modal = form.modal();
        let form = modal.is_open().then(|| FormSnapshot {
            mode: modal.mode(),
            target: modal.target().map(Into::into),
            fields: schema
                .fields
                .iter()
                .map(|field| FormFieldSnapshot {
                    name: field.name,
                    label: field.label,
                    kind: field.kind,
                    required: field.required,
                    value: form.draft().value(field.name).to_owned(),
                    error: form.errors().get(field.name).map(str::to_owned),
                })
                .collect(),
            preview_url: form.preview_url().map(str::to_owned),
            liveness: form.draft().liveness(),
        });

        ScreenSnapshot {
            kind: schema.kind,
            title: schema.kind.title(),
            columns: schema.column_labels(),
            search_label: field_label(schema, schema.search_field),
            sort_label: field_label(schema, schema.sort_field),
            rows,
            query: self.query().clone(),
            total: self.store().len(),
            form,
        }
    }
}

fn field_label(schema: &EntitySchema, name: &'static str) -> &'static str {
    schema.field(name).map_or(name, |field| field.label)
}

/// One list screen per entity kind, sharing a preview registry.
#[derive(Debug)]
pub struct Catalog {
    albums: ListScreen<Album>,
    events: ListScreen<Event>,
    groups: ListScreen<MusicalGroup>,
    managers: ListScreen<Manager>,
    tracks: ListScreen<Track>,
    registry: PreviewRegistry,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::from_stores(
            EntityStore::new(),
            EntityStore::new(),
            EntityStore::new(),
            EntityStore::new(),
            EntityStore::new(),
        )
    }

    pub fn with_samples() -> Self {
        Self::from_stores(
            EntityStore::with_records(sample::albums()),
            EntityStore::with_records(sample::events()),
            EntityStore::with_records(sample::groups()),
            EntityStore::with_records(sample::managers()),
            EntityStore::with_records(sample::tracks()),
        )
    }

    pub fn from_stores(
        albums: EntityStore<Album>,
        events: EntityStore<Event>,
        groups: EntityStore<MusicalGroup>,
        managers: EntityStore<Manager>,
        tracks: EntityStore<Track>,
    ) -> Self {
        let registry = PreviewRegistry::new();
        Self {
            albums: ListScreen::new(albums, registry.clone()),
            events: ListScreen::new(events, registry.clone()),
            groups: ListScreen::new(groups, registry.clone()),
            managers: ListScreen::new(managers, registry.clone()),
            tracks: ListScreen::new(tracks, registry.clone()),
            registry,
        }
    }

    pub fn dispatch(
        &mut self,
        kind: EntityKind,
        command: ScreenCommand<i64>,
    ) -> CatalogResult<Vec<ScreenEvent>> {
        self.screen_mut(kind).dispatch_raw(command)
    }

    pub fn snapshot(&self, kind: EntityKind) -> ScreenSnapshot {
        self.screen(kind).snapshot()
    }

    pub fn record_count(&self, kind: EntityKind) -> usize {
        self.screen(kind).total()
    }

    pub fn live_previews(&self) -> usize {
        self.registry.live_handles()
    }

    pub fn albums(&self) -> &ListScreen<Album> {
        &self.albums
    }

    pub fn events(&self) -> &ListScreen<Event> {
        &self.events
    }

    pub fn groups(&self) -> &ListScreen<MusicalGroup> {
        &self.groups
    }

    pub fn managers(&self) -> &ListScreen<Manager> {
        &self.managers
    }

    pub fn tracks(&self) -> &ListScreen<Track> {
        &self.tracks
    }

    fn screen(&self, kind: EntityKind) -> &dyn AnyScreen {
        match kind {
            EntityKind::Album => &self.albums,
            EntityKind::Event => &self.events,
            EntityKind::Group => &self.groups,
            EntityKind::Manager => &self.managers,
            EntityKind::Track => &self.tracks,
        }
    }

    fn screen_mut(&mut self, kind: EntityKind) -> &mut dyn AnyScreen {
        match kind {
            EntityKind::Album => &mut self.albums,
            EntityKind::Event => &mut self.events,
            EntityKind::Group => &mut self.groups,
            EntityKind::Manager => &mut self.managers,
            EntityKind::Track => &mut self.tracks,
        }
    }
}
