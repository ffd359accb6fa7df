// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::sanitize::strip_markup;
use crate::schema::{
    count_message, date_message, parse_count, parse_iso_date, parse_year, required_message,
    year_message,
};
use crate::{
    CatalogError, CatalogResult, Draft, Entity, EntitySchema, EntityStore, FieldErrors, FieldKind,
    FieldSpec, PhotoRef, PreviewHandle, PreviewRegistry,
};

/// Checks every field of a draft against its schema. Required fields must be
/// non-blank; non-blank typed fields must parse as their kind.
pub fn validate_draft(schema: &EntitySchema, draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in schema.fields {
        let raw = draft.value(field.name).trim();
        if raw.is_empty() {
            if field.required {
                errors.insert(field.name, required_message(field.label));
            }
            continue;
        }

        let malformed = match field.kind {
            FieldKind::Year => parse_year(raw).is_none().then(|| year_message(field.label)),
            FieldKind::Date => parse_iso_date(raw)
                .is_none()
                .then(|| date_message(field.label)),
            FieldKind::Count => parse_count(raw)
                .is_none()
                .then(|| count_message(field.label)),
            FieldKind::Text | FieldKind::Photo => None,
        };
        if let Some(message) = malformed {
            errors.insert(field.name, message);
        }
    }
    errors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalMode {
    Closed,
    Create,
    Edit,
    View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal<Id> {
    #[default]
    Closed,
    Create,
    Edit(Id),
    View(Id),
}

impl<Id: Copy> Modal<Id> {
    pub const fn mode(&self) -> ModalMode {
        match self {
            Self::Closed => ModalMode::Closed,
            Self::Create => ModalMode::Create,
            Self::Edit(_) => ModalMode::Edit,
            Self::View(_) => ModalMode::View,
        }
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Create | Self::Edit(_))
    }

    pub fn target(&self) -> Option<Id> {
        match self {
            Self::Edit(id) | Self::View(id) => Some(*id),
            Self::Closed | Self::Create => None,
        }
    }
}

/// Modal state and staging draft for one list screen.
///
/// At most one of create, edit or view is open at a time. Edits land in the
/// draft only; the store is untouched until the screen saves. A selected
/// photo holds a preview handle that is released when it is superseded,
/// cleared, or the form closes.
#[derive(Debug)]
pub struct FormController<E: Entity> {
    modal: Modal<E::Id>,
    draft: Draft,
    errors: FieldErrors,
    preview: Option<PreviewHandle>,
    registry: PreviewRegistry,
}

impl<E: Entity> FormController<E> {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            modal: Modal::Closed,
            draft: Draft::blank(E::schema()),
            errors: FieldErrors::default(),
            preview: None,
            registry,
        }
    }

    pub fn open_create(&mut self) {
        self.modal = Modal::Create;
        self.load_draft(Draft::blank(E::schema()));
    }

    pub fn open_edit(&mut self, store: &EntityStore<E>, id: E::Id) -> CatalogResult<()> {
        let draft = store.require(id)?.to_draft();
        self.modal = Modal::Edit(id);
        self.load_draft(draft);
        Ok(())
    }

    pub fn open_view(&mut self, store: &EntityStore<E>, id: E::Id) -> CatalogResult<()> {
        let draft = store.require(id)?.to_draft();
        self.modal = Modal::View(id);
        self.load_draft(draft);
        Ok(())
    }

    pub fn close(&mut self) {
        self.modal = Modal::Closed;
        self.draft = Draft::blank(E::schema());
        self.errors = FieldErrors::default();
        self.preview = None;
    }

    pub fn update_field(&mut self, name: &str, value: &str) -> CatalogResult<&'static FieldSpec> {
        let schema = E::schema();
        if !self.modal.is_editable() {
            return Err(CatalogError::FormNotEditable { kind: schema.kind });
        }
        let field = schema
            .field(name)
            .ok_or_else(|| CatalogError::UnknownField {
                kind: schema.kind,
                field: name.to_owned(),
            })?;

        match field.kind {
            FieldKind::Photo => {
                // Stored raw; `Draft::photo` trims on build.
                self.draft.set(field.name, value);
                let path = value.trim();
                self.preview = (!path.is_empty())
                    .then(|| self.registry.acquire(&PhotoRef::new(path)));
            }
            FieldKind::Text | FieldKind::Year | FieldKind::Date | FieldKind::Count => {
                self.draft.set(field.name, strip_markup(value));
            }
        }
        Ok(field)
    }

    /// Recomputes the error map from the draft. True when nothing is missing
    /// or malformed.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_draft(E::schema(), &self.draft);
        self.errors.is_empty()
    }

    /// Converts the draft into a record, keeping any conversion failures as
    /// the displayed errors.
    pub fn build_record(&mut self) -> Result<E, FieldErrors> {
        E::from_draft(&self.draft).inspect_err(|errors| self.errors = errors.clone())
    }

    pub fn modal(&self) -> Modal<E::Id> {
        self.modal
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewHandle::url)
    }

    fn load_draft(&mut self, draft: Draft) {
        self.preview = E::schema()
            .fields
            .iter()
            .filter(|field| field.kind == FieldKind::Photo)
            .find_map(|field| draft.photo(field.name))
            .map(|photo| self.registry.acquire(&photo));
        self.draft = draft;
        self.errors = FieldErrors::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{FormController, Modal, ModalMode, validate_draft};
    use crate::{
        Album, AlbumId, CatalogError, Draft, Entity, EntityKind, EntityStore, Event, Liveness,
        PhotoRef, PreviewRegistry, Track,
    };

    fn album_store() -> EntityStore<Album> {
        EntityStore::with_records([Album {
            title: "Álbum 1".to_owned(),
            artist: "Artista 1".to_owned(),
            year: 2021,
            genre: "Rock".to_owned(),
            photo: Some(PhotoRef::new("/fotos/a1.png")),
            liveness: Liveness::Inactive,
        }])
    }

    fn album_form() -> (PreviewRegistry, FormController<Album>) {
        let registry = PreviewRegistry::new();
        let form = FormController::new(registry.clone());
        (registry, form)
    }

    #[test]
    fn required_fields_report_label_messages() {
        let errors = validate_draft(Album::schema(), &Draft::blank(Album::schema()));
        assert_eq!(errors.get("title"), Some("Título obligatorio"));
        assert_eq!(errors.get("artist"), Some("Artista obligatorio"));
        assert_eq!(errors.get("year"), Some("Año obligatorio"));
        assert_eq!(errors.get("genre"), Some("Género obligatorio"));
        assert_eq!(errors.get("photo"), None);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let draft = Draft::blank(Track::schema()).with("title", "   ");
        let errors = validate_draft(Track::schema(), &draft);
        assert_eq!(errors.get("title"), Some("Título obligatorio"));
    }

    #[test]
    fn year_must_be_four_digits() {
        let draft = Draft::blank(Album::schema())
            .with("title", "X")
            .with("artist", "Y")
            .with("year", "21")
            .with("genre", "Z");
        let errors = validate_draft(Album::schema(), &draft);
        assert_eq!(errors.get("year"), Some("Año debe tener 4 dígitos"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn malformed_date_and_capacity_are_reported() {
        let draft = Draft::blank(Event::schema())
            .with("name", "Gira")
            .with("genre", "Pop")
            .with("location", "Teatro")
            .with("date", "15/07/2024")
            .with("contact", "c@example.com")
            .with("capacity", "mil")
            .with("artists", "Banda");
        let errors = validate_draft(Event::schema(), &draft);
        assert_eq!(errors.get("date"), Some("Fecha debe tener formato AAAA-MM-DD"));
        assert_eq!(errors.get("capacity"), Some("Capacidad debe ser un número entero"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn open_create_starts_from_blank_template() {
        let (_, mut form) = album_form();
        form.open_create();
        assert_eq!(form.modal(), Modal::Create);
        assert_eq!(form.draft(), &Draft::blank(Album::schema()));
        assert_eq!(form.draft().liveness(), Liveness::Active);
        assert!(form.errors().is_empty());
        assert_eq!(form.preview_url(), None);
    }

    #[test]
    fn open_edit_copies_target_record() -> Result<(), CatalogError> {
        let store = album_store();
        let (registry, mut form) = album_form();
        form.open_edit(&store, AlbumId::new(1))?;

        assert_eq!(form.modal(), Modal::Edit(AlbumId::new(1)));
        assert_eq!(form.modal().mode(), ModalMode::Edit);
        assert_eq!(form.draft().value("title"), "Álbum 1");
        assert_eq!(form.draft().liveness(), Liveness::Inactive);
        assert_eq!(registry.live_handles(), 1);

        form.update_field("title", "Otro")?;
        assert_eq!(store.rows()[0].record.title, "Álbum 1");
        Ok(())
    }

    #[test]
    fn open_edit_unknown_id_leaves_form_closed() {
        let store = album_store();
        let (_, mut form) = album_form();
        let result = form.open_edit(&store, AlbumId::new(9));
        assert_eq!(
            result,
            Err(CatalogError::NotFound {
                kind: EntityKind::Album,
                id: 9,
            }),
        );
        assert_eq!(form.modal(), Modal::Closed);
    }

    #[test]
    fn view_mode_rejects_edits() -> Result<(), CatalogError> {
        let store = album_store();
        let (_, mut form) = album_form();
        form.open_view(&store, AlbumId::new(1))?;
        assert_eq!(
            form.update_field("title", "X"),
            Err(CatalogError::FormNotEditable {
                kind: EntityKind::Album,
            }),
        );

        form.close();
        assert!(form.update_field("title", "X").is_err());
        Ok(())
    }

    #[test]
    fn unknown_field_is_an_error() {
        let (_, mut form) = album_form();
        form.open_create();
        assert_eq!(
            form.update_field("rating", "5"),
            Err(CatalogError::UnknownField {
                kind: EntityKind::Album,
                field: "rating".to_owned(),
            }),
        );
    }

    #[test]
    fn text_fields_are_sanitized() -> Result<(), CatalogError> {
        let (_, mut form) = album_form();
        form.open_create();
        form.update_field("title", "<i>Noche</i> de rock")?;
        assert_eq!(form.draft().value("title"), "Noche de rock");
        Ok(())
    }

    #[test]
    fn photo_handles_follow_selection() -> Result<(), CatalogError> {
        let (registry, mut form) = album_form();
        form.open_create();

        form.update_field("photo", "/fotos/uno.png")?;
        assert_eq!(registry.live_handles(), 1);
        assert_eq!(form.preview_url(), Some("preview://1/uno.png"));

        form.update_field("photo", "/fotos/dos.png")?;
        assert_eq!(registry.live_handles(), 1);
        assert_eq!(form.preview_url(), Some("preview://2/dos.png"));

        form.update_field("photo", "")?;
        assert_eq!(registry.live_handles(), 0);
        assert_eq!(form.draft().value("photo"), "");

        form.update_field("photo", "/fotos/tres.png")?;
        form.close();
        assert_eq!(registry.live_handles(), 0);
        Ok(())
    }

    #[test]
    fn photo_path_keeps_interior_spaces_while_typing() -> Result<(), CatalogError> {
        let (registry, mut form) = album_form();
        form.open_create();

        let mut typed = String::new();
        for ch in "/fotos/mi foto.png".chars() {
            typed.push(ch);
            form.update_field("photo", &typed)?;
        }
        assert_eq!(form.draft().value("photo"), "/fotos/mi foto.png");
        assert_eq!(form.preview_url(), Some("preview://18/mi foto.png"));
        assert_eq!(registry.live_handles(), 1);

        form.update_field("photo", "   ")?;
        assert_eq!(form.preview_url(), None);
        assert_eq!(registry.live_handles(), 0);
        Ok(())
    }

    #[test]
    fn validate_keeps_error_map_for_display() -> Result<(), CatalogError> {
        let (_, mut form) = album_form();
        form.open_create();
        assert!(!form.validate());
        assert_eq!(form.errors().len(), 4);

        form.update_field("title", "A")?;
        form.update_field("artist", "B")?;
        form.update_field("year", "2019")?;
        form.update_field("genre", "Jazz")?;
        assert!(form.validate());
        assert!(form.errors().is_empty());
        assert_eq!(form.build_record().map(|album| album.year), Ok(2019));
        Ok(())
    }

    #[test]
    fn close_discards_staging_edits() -> Result<(), CatalogError> {
        let (_, mut form) = album_form();
        form.open_create();
        form.update_field("title", "Borrador")?;
        assert!(!form.validate());
        form.close();

        assert_eq!(form.modal(), Modal::Closed);
        assert_eq!(form.draft().value("title"), "");
        assert!(form.errors().is_empty());
        Ok(())
    }
}
