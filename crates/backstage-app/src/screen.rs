// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::sanitize::strip_markup;
use crate::view::derive_view;
use crate::{
    CatalogError, CatalogResult, Entity, EntityStore, FieldErrors, FormController, ListQuery,
    Liveness, Modal, ModalMode, PreviewRegistry, Row,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand<Id> {
    Search(String),
    CycleStatus,
    ToggleSort,
    OpenCreate,
    OpenEdit(Id),
    OpenView(Id),
    Close,
    UpdateField { field: String, value: String },
    Save,
    Delete(Id),
    Restore(Id),
}

impl<Id> ScreenCommand<Id> {
    pub fn map_id<T>(self, convert: impl FnOnce(Id) -> T) -> ScreenCommand<T> {
        match self {
            Self::Search(term) => ScreenCommand::Search(term),
            Self::CycleStatus => ScreenCommand::CycleStatus,
            Self::ToggleSort => ScreenCommand::ToggleSort,
            Self::OpenCreate => ScreenCommand::OpenCreate,
            Self::OpenEdit(id) => ScreenCommand::OpenEdit(convert(id)),
            Self::OpenView(id) => ScreenCommand::OpenView(convert(id)),
            Self::Close => ScreenCommand::Close,
            Self::UpdateField { field, value } => ScreenCommand::UpdateField { field, value },
            Self::Save => ScreenCommand::Save,
            Self::Delete(id) => ScreenCommand::Delete(convert(id)),
            Self::Restore(id) => ScreenCommand::Restore(convert(id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    QueryChanged(ListQuery),
    ModalChanged(ModalMode),
    FieldUpdated { field: &'static str },
    ValidationFailed(FieldErrors),
    RecordAdded(i64),
    RecordUpdated(i64),
    RecordDeactivated(i64),
    RecordRestored(i64),
    Notice(Notice),
}

/// List management for one entity kind: the store, the current query and
/// the form. Every mutation goes through `dispatch`.
#[derive(Debug)]
pub struct ListScreen<E: Entity> {
    store: EntityStore<E>,
    query: ListQuery,
    form: FormController<E>,
}

impl<E: Entity> ListScreen<E> {
    pub fn new(store: EntityStore<E>, registry: PreviewRegistry) -> Self {
        Self {
            store,
            query: ListQuery::default(),
            form: FormController::new(registry),
        }
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn form(&self) -> &FormController<E> {
        &self.form
    }

    pub fn visible_rows(&self) -> Vec<&Row<E>> {
        derive_view(self.store.rows(), &self.query)
    }

    pub fn dispatch(&mut self, command: ScreenCommand<E::Id>) -> CatalogResult<Vec<ScreenEvent>> {
        match command {
            ScreenCommand::Search(term) => {
                self.query.search = strip_markup(&term);
                Ok(vec![ScreenEvent::QueryChanged(self.query.clone())])
            }
            ScreenCommand::CycleStatus => {
                self.query.status = self.query.status.cycle();
                Ok(vec![ScreenEvent::QueryChanged(self.query.clone())])
            }
            ScreenCommand::ToggleSort => {
                self.query.direction = self.query.direction.toggle();
                Ok(vec![ScreenEvent::QueryChanged(self.query.clone())])
            }
            ScreenCommand::OpenCreate => {
                self.form.open_create();
                Ok(vec![ScreenEvent::ModalChanged(ModalMode::Create)])
            }
            ScreenCommand::OpenEdit(id) => {
                self.form.open_edit(&self.store, id)?;
                Ok(vec![ScreenEvent::ModalChanged(ModalMode::Edit)])
            }
            ScreenCommand::OpenView(id) => {
                self.form.open_view(&self.store, id)?;
                Ok(vec![ScreenEvent::ModalChanged(ModalMode::View)])
            }
            ScreenCommand::Close => {
                self.form.close();
                Ok(vec![ScreenEvent::ModalChanged(ModalMode::Closed)])
            }
            ScreenCommand::UpdateField { field, value } => {
                let spec = self.form.update_field(&field, &value)?;
                Ok(vec![ScreenEvent::FieldUpdated { field: spec.name }])
            }
            ScreenCommand::Save => self.save(),
            ScreenCommand::Delete(id) => self.delete(id),
            ScreenCommand::Restore(id) => self.restore(id),
        }
    }

    /// Validates the draft and, when it passes, adds or replaces the record
    /// and closes the form. A failing draft keeps the form open with errors.
    pub fn save(&mut self) -> CatalogResult<Vec<ScreenEvent>> {
        let schema = E::schema();
        let modal = self.form.modal();
        if !modal.is_editable() {
            return Err(CatalogError::FormNotEditable { kind: schema.kind });
        }

        if !self.form.validate() {
            tracing::debug!(
                kind = %schema.kind,
                errors = %self.form.errors(),
                "save rejected by validation"
            );
            return Ok(vec![ScreenEvent::ValidationFailed(
                self.form.errors().clone(),
            )]);
        }
        let record = match self.form.build_record() {
            Ok(record) => record,
            Err(errors) => return Ok(vec![ScreenEvent::ValidationFailed(errors)]),
        };

        let (saved, message) = match modal {
            Modal::Edit(id) => {
                self.store.replace(id, record)?;
                tracing::info!(kind = %schema.kind, %id, "record updated");
                (
                    ScreenEvent::RecordUpdated(id.into()),
                    format!("{} actualizado", schema.notice_name),
                )
            }
            _ => {
                let id = self.store.add(record);
                tracing::info!(kind = %schema.kind, %id, "record added");
                (
                    ScreenEvent::RecordAdded(id.into()),
                    format!("{} agregado", schema.notice_name),
                )
            }
        };
        self.form.close();
        Ok(vec![
            saved,
            ScreenEvent::Notice(Notice::success(message)),
            ScreenEvent::ModalChanged(ModalMode::Closed),
        ])
    }

    pub fn delete(&mut self, id: E::Id) -> CatalogResult<Vec<ScreenEvent>> {
        let schema = E::schema();
        self.store.set_liveness(id, Liveness::Inactive)?;
        tracing::info!(kind = %schema.kind, %id, "record deactivated");
        Ok(vec![
            ScreenEvent::RecordDeactivated(id.into()),
            ScreenEvent::Notice(Notice::info(format!("{} eliminado", schema.notice_name))),
        ])
    }

    pub fn restore(&mut self, id: E::Id) -> CatalogResult<Vec<ScreenEvent>> {
        let schema = E::schema();
        self.store.set_liveness(id, Liveness::Active)?;
        tracing::info!(kind = %schema.kind, %id, "record restored");
        Ok(vec![
            ScreenEvent::RecordRestored(id.into()),
            ScreenEvent::Notice(Notice::success(format!(
                "{} restaurado",
                schema.notice_name
            ))),
        ])
    }
}
