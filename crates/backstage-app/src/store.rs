// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{CatalogError, CatalogResult, Entity, Liveness};

#[derive(Debug, Clone, PartialEq)]
pub struct Row<E: Entity> {
    pub id: E::Id,
    pub record: E,
}

/// Insertion-ordered records of one entity kind. Ids come from a counter
/// owned by the store and are never reused.
#[derive(Debug, Clone)]
pub struct EntityStore<E: Entity> {
    rows: Vec<Row<E>>,
    next_id: i64,
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store keeping each record's liveness as given.
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.push(record);
        }
        store
    }

    pub fn add(&mut self, mut record: E) -> E::Id {
        record.set_liveness(Liveness::Active);
        self.push(record)
    }

    pub fn replace(&mut self, id: E::Id, record: E) -> CatalogResult<()> {
        let row = self.row_mut(id)?;
        row.record = record;
        Ok(())
    }

    pub fn set_liveness(&mut self, id: E::Id, liveness: Liveness) -> CatalogResult<()> {
        let row = self.row_mut(id)?;
        row.record.set_liveness(liveness);
        Ok(())
    }

    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| &row.record)
    }

    pub fn require(&self, id: E::Id) -> CatalogResult<&E> {
        self.get(id).ok_or_else(|| not_found::<E>(id))
    }

    pub fn rows(&self) -> &[Row<E>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn push(&mut self, record: E) -> E::Id {
        let id = E::Id::from(self.next_id);
        self.next_id += 1;
        self.rows.push(Row { id, record });
        id
    }

    fn row_mut(&mut self, id: E::Id) -> CatalogResult<&mut Row<E>> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| not_found::<E>(id))
    }
}

fn not_found<E: Entity>(id: E::Id) -> CatalogError {
    CatalogError::NotFound {
        kind: E::schema().kind,
        id: id.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::EntityStore;
    use crate::{Album, AlbumId, CatalogError, EntityKind, Liveness};

    fn album(title: &str, year: i32, liveness: Liveness) -> Album {
        Album {
            title: title.to_owned(),
            artist: "Artista".to_owned(),
            year,
            genre: "Rock".to_owned(),
            photo: None,
            liveness,
        }
    }

    #[test]
    fn add_appends_active_record_with_fresh_id() {
        let mut store = EntityStore::with_records([album("A", 2020, Liveness::Active)]);
        let id = store.add(album("B", 2019, Liveness::Inactive));

        assert_eq!(store.len(), 2);
        assert_eq!(id, AlbumId::new(2));
        let last = &store.rows()[1];
        assert_eq!(last.id, id);
        assert_eq!(last.record.title, "B");
        assert_eq!(last.record.liveness, Liveness::Active);
    }

    #[test]
    fn duplicates_are_permitted() {
        let mut store = EntityStore::new();
        let first = store.add(album("A", 2020, Liveness::Active));
        let second = store.add(album("A", 2020, Liveness::Active));
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn seeding_keeps_given_liveness() {
        let store = EntityStore::with_records([album("A", 2020, Liveness::Inactive)]);
        assert_eq!(store.rows()[0].record.liveness, Liveness::Inactive);
    }

    #[test]
    fn replace_overwrites_whole_record() -> Result<(), CatalogError> {
        let mut store = EntityStore::new();
        let id = store.add(album("A", 2020, Liveness::Active));
        store.replace(id, album("A2", 2001, Liveness::Inactive))?;

        assert_eq!(store.get(id), Some(&album("A2", 2001, Liveness::Inactive)));
        Ok(())
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store: EntityStore<Album> = EntityStore::new();
        let missing = AlbumId::new(42);
        assert_eq!(
            store.replace(missing, album("A", 2020, Liveness::Active)),
            Err(CatalogError::NotFound {
                kind: EntityKind::Album,
                id: 42,
            }),
        );
        assert!(store.set_liveness(missing, Liveness::Inactive).is_err());
        assert!(store.require(missing).is_err());
    }

    #[test]
    fn liveness_flip_touches_only_liveness() -> Result<(), CatalogError> {
        let mut store = EntityStore::new();
        let first = store.add(album("A", 2020, Liveness::Active));
        let second = store.add(album("B", 2019, Liveness::Active));
        let before = store.rows().to_vec();

        store.set_liveness(first, Liveness::Inactive)?;
        assert_eq!(store.require(first)?.liveness, Liveness::Inactive);
        assert_eq!(store.require(first)?.title, "A");
        assert_eq!(store.get(second), Some(&before[1].record));

        store.set_liveness(first, Liveness::Active)?;
        assert_eq!(store.rows(), before.as_slice());
        Ok(())
    }
}
