// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod error;
pub mod forms;
pub mod ids;
pub mod model;
pub mod preview;
pub mod sample;
pub mod sanitize;
pub mod schema;
pub mod screen;
pub mod state;
pub mod store;
pub mod view;

pub use catalog::*;
pub use error::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use preview::*;
pub use schema::{Draft, Entity, EntitySchema, FieldErrors, FieldKind, FieldSpec, SortKey};
pub use screen::*;
pub use state::*;
pub use store::*;
pub use view::*;
