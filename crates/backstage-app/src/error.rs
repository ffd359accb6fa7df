// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} record {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("{kind} form has no field named {field:?}")]
    UnknownField { kind: EntityKind, field: String },

    #[error("no {kind} form is open for editing")]
    FormNotEditable { kind: EntityKind },
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
