// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use time::Date;

use crate::ids::*;
use crate::schema::{
    Draft, Entity, EntitySchema, FieldErrors, FieldKind, FieldSpec, SortKey, format_iso_date,
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Album,
    Event,
    Group,
    Manager,
    Track,
}

impl EntityKind {
    pub const ALL: [Self; 5] = [
        Self::Album,
        Self::Event,
        Self::Group,
        Self::Manager,
        Self::Track,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Album => "albums",
            Self::Event => "events",
            Self::Group => "groups",
            Self::Manager => "managers",
            Self::Track => "tracks",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Album => "Álbumes",
            Self::Event => "Eventos",
            Self::Group => "Grupos musicales",
            Self::Manager => "Managers",
            Self::Track => "Temas",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "albums" | "album" => Some(Self::Album),
            "events" | "event" => Some(Self::Event),
            "groups" | "group" => Some(Self::Group),
            "managers" | "manager" => Some(Self::Manager),
            "tracks" | "track" => Some(Self::Track),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Liveness {
    #[default]
    Active,
    Inactive,
}

impl Liveness {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Activo",
            Self::Inactive => "Inactivo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Activo" => Some(Self::Active),
            "Inactivo" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    path: PathBuf,
}

impl PhotoRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub genre: String,
    pub photo: Option<PhotoRef>,
    pub liveness: Liveness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub genre: String,
    pub description: String,
    pub location: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub contact: String,
    pub capacity: u32,
    pub artists: String,
    pub liveness: Liveness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicalGroup {
    pub name: String,
    pub genre: String,
    pub description: String,
    pub platform: String,
    pub url: String,
    pub liveness: Liveness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub surname: String,
    pub given_name: String,
    pub email: String,
    pub gender: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub liveness: Liveness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub album: String,
    pub duration: String,
    pub year: i32,
    pub genre: String,
    pub liveness: Liveness,
}

const ALBUM_FIELDS: [FieldSpec; 5] = [
    FieldSpec::required("title", "Título", FieldKind::Text),
    FieldSpec::required("artist", "Artista", FieldKind::Text),
    FieldSpec::required("year", "Año", FieldKind::Year),
    FieldSpec::required("genre", "Género", FieldKind::Text),
    FieldSpec::optional("photo", "Foto", FieldKind::Photo),
];

static ALBUM_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Album,
    fields: &ALBUM_FIELDS,
    search_field: "title",
    sort_field: "year",
    notice_name: "Álbum",
};

const EVENT_FIELDS: [FieldSpec; 8] = [
    FieldSpec::required("name", "Nombre", FieldKind::Text),
    FieldSpec::required("genre", "Género", FieldKind::Text),
    FieldSpec::optional("description", "Descripción", FieldKind::Text),
    FieldSpec::required("location", "Lugar", FieldKind::Text),
    FieldSpec::required("date", "Fecha", FieldKind::Date),
    FieldSpec::required("contact", "Contacto", FieldKind::Text),
    FieldSpec::required("capacity", "Capacidad", FieldKind::Count),
    FieldSpec::required("artists", "Artistas", FieldKind::Text),
];

static EVENT_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Event,
    fields: &EVENT_FIELDS,
    search_field: "name",
    sort_field: "date",
    notice_name: "Evento",
};

const GROUP_FIELDS: [FieldSpec; 5] = [
    FieldSpec::required("name", "Nombre", FieldKind::Text),
    FieldSpec::required("genre", "Género", FieldKind::Text),
    FieldSpec::optional("description", "Descripción", FieldKind::Text),
    FieldSpec::required("platform", "Plataforma", FieldKind::Text),
    FieldSpec::optional("url", "URL", FieldKind::Text),
];

static GROUP_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Group,
    fields: &GROUP_FIELDS,
    search_field: "name",
    sort_field: "name",
    notice_name: "Grupo musical",
};

const MANAGER_FIELDS: [FieldSpec; 5] = [
    FieldSpec::required("surname", "Apellido", FieldKind::Text),
    FieldSpec::required("given_name", "Nombre", FieldKind::Text),
    FieldSpec::required("email", "Correo", FieldKind::Text),
    FieldSpec::required("gender", "Género", FieldKind::Text),
    FieldSpec::required("date", "Fecha", FieldKind::Date),
];

static MANAGER_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Manager,
    fields: &MANAGER_FIELDS,
    search_field: "given_name",
    sort_field: "date",
    notice_name: "Manager",
};

const TRACK_FIELDS: [FieldSpec; 5] = [
    FieldSpec::required("title", "Título", FieldKind::Text),
    FieldSpec::required("album", "Álbum", FieldKind::Text),
    FieldSpec::required("duration", "Duración", FieldKind::Text),
    FieldSpec::required("year", "Año", FieldKind::Year),
    FieldSpec::required("genre", "Género", FieldKind::Text),
];

static TRACK_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Track,
    fields: &TRACK_FIELDS,
    search_field: "title",
    sort_field: "year",
    notice_name: "Tema",
};

/// Validates the draft against the schema and hands back the typed field
/// reader, so every `from_draft` reports the same messages as the form.
fn checked(schema: &'static EntitySchema, draft: &Draft) -> Result<Fields, FieldErrors> {
    let errors = crate::forms::validate_draft(schema, draft);
    if errors.is_empty() {
        Ok(Fields { schema })
    } else {
        Err(errors)
    }
}

struct Fields {
    schema: &'static EntitySchema,
}

impl Fields {
    fn spec(&self, name: &'static str) -> Result<&'static FieldSpec, FieldErrors> {
        self.schema
            .field(name)
            .ok_or_else(|| FieldErrors::single(name, format!("{name} no existe")))
    }
}

impl Entity for Album {
    type Id = AlbumId;

    fn schema() -> &'static EntitySchema {
        &ALBUM_SCHEMA
    }

    fn liveness(&self) -> Liveness {
        self.liveness
    }

    fn set_liveness(&mut self, liveness: Liveness) {
        self.liveness = liveness;
    }

    fn search_text(&self) -> &str {
        &self.title
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Year(self.year)
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::blank(Self::schema())
            .with("title", self.title.as_str())
            .with("artist", self.artist.as_str())
            .with("year", self.year.to_string())
            .with("genre", self.genre.as_str())
            .with(
                "photo",
                self.photo
                    .as_ref()
                    .map(|photo| photo.path().display().to_string())
                    .unwrap_or_default(),
            );
        draft.set_liveness(self.liveness);
        draft
    }

    fn from_draft(draft: &Draft) -> Result<Self, FieldErrors> {
        let fields = checked(Self::schema(), draft)?;
        Ok(Self {
            title: draft.text("title"),
            artist: draft.text("artist"),
            year: draft.year(fields.spec("year")?)?,
            genre: draft.text("genre"),
            photo: draft.photo("photo"),
            liveness: draft.liveness(),
        })
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.artist.clone(),
            self.year.to_string(),
            self.genre.clone(),
            self.photo
                .as_ref()
                .map(PhotoRef::file_name)
                .unwrap_or_default(),
            self.liveness.as_str().to_owned(),
        ]
    }
}

impl Entity for Event {
    type Id = EventId;

    fn schema() -> &'static EntitySchema {
        &EVENT_SCHEMA
    }

    fn liveness(&self) -> Liveness {
        self.liveness
    }

    fn set_liveness(&mut self, liveness: Liveness) {
        self.liveness = liveness;
    }

    fn search_text(&self) -> &str {
        &self.name
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Date(self.date)
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::blank(Self::schema())
            .with("name", self.name.as_str())
            .with("genre", self.genre.as_str())
            .with("description", self.description.as_str())
            .with("location", self.location.as_str())
            .with("date", format_iso_date(self.date))
            .with("contact", self.contact.as_str())
            .with("capacity", self.capacity.to_string())
            .with("artists", self.artists.as_str());
        draft.set_liveness(self.liveness);
        draft
    }

    fn from_draft(draft: &Draft) -> Result<Self, FieldErrors> {
        let fields = checked(Self::schema(), draft)?;
        Ok(Self {
            name: draft.text("name"),
            genre: draft.text("genre"),
            description: draft.text("description"),
            location: draft.text("location"),
            date: draft.date(fields.spec("date")?)?,
            contact: draft.text("contact"),
            capacity: draft.count(fields.spec("capacity")?)?,
            artists: draft.text("artists"),
            liveness: draft.liveness(),
        })
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.genre.clone(),
            self.description.clone(),
            self.location.clone(),
            format_iso_date(self.date),
            self.contact.clone(),
            self.capacity.to_string(),
            self.artists.clone(),
            self.liveness.as_str().to_owned(),
        ]
    }
}

impl Entity for MusicalGroup {
    type Id = GroupId;

    fn schema() -> &'static EntitySchema {
        &GROUP_SCHEMA
    }

    fn liveness(&self) -> Liveness {
        self.liveness
    }

    fn set_liveness(&mut self, liveness: Liveness) {
        self.liveness = liveness;
    }

    fn search_text(&self) -> &str {
        &self.name
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.name.to_lowercase())
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::blank(Self::schema())
            .with("name", self.name.as_str())
            .with("genre", self.genre.as_str())
            .with("description", self.description.as_str())
            .with("platform", self.platform.as_str())
            .with("url", self.url.as_str());
        draft.set_liveness(self.liveness);
        draft
    }

    fn from_draft(draft: &Draft) -> Result<Self, FieldErrors> {
        checked(Self::schema(), draft)?;
        Ok(Self {
            name: draft.text("name"),
            genre: draft.text("genre"),
            description: draft.text("description"),
            platform: draft.text("platform"),
            url: draft.text("url"),
            liveness: draft.liveness(),
        })
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.genre.clone(),
            self.description.clone(),
            self.platform.clone(),
            self.url.clone(),
            self.liveness.as_str().to_owned(),
        ]
    }
}

impl Entity for Manager {
    type Id = ManagerId;

    fn schema() -> &'static EntitySchema {
        &MANAGER_SCHEMA
    }

    fn liveness(&self) -> Liveness {
        self.liveness
    }

    fn set_liveness(&mut self, liveness: Liveness) {
        self.liveness = liveness;
    }

    fn search_text(&self) -> &str {
        &self.given_name
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Date(self.date)
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::blank(Self::schema())
            .with("surname", self.surname.as_str())
            .with("given_name", self.given_name.as_str())
            .with("email", self.email.as_str())
            .with("gender", self.gender.as_str())
            .with("date", format_iso_date(self.date));
        draft.set_liveness(self.liveness);
        draft
    }

    fn from_draft(draft: &Draft) -> Result<Self, FieldErrors> {
        let fields = checked(Self::schema(), draft)?;
        Ok(Self {
            surname: draft.text("surname"),
            given_name: draft.text("given_name"),
            email: draft.text("email"),
            gender: draft.text("gender"),
            date: draft.date(fields.spec("date")?)?,
            liveness: draft.liveness(),
        })
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.surname.clone(),
            self.given_name.clone(),
            self.email.clone(),
            self.gender.clone(),
            format_iso_date(self.date),
            self.liveness.as_str().to_owned(),
        ]
    }
}

impl Entity for Track {
    type Id = TrackId;

    fn schema() -> &'static EntitySchema {
        &TRACK_SCHEMA
    }

    fn liveness(&self) -> Liveness {
        self.liveness
    }

    fn set_liveness(&mut self, liveness: Liveness) {
        self.liveness = liveness;
    }

    fn search_text(&self) -> &str {
        &self.title
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Year(self.year)
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::blank(Self::schema())
            .with("title", self.title.as_str())
            .with("album", self.album.as_str())
            .with("duration", self.duration.as_str())
            .with("year", self.year.to_string())
            .with("genre", self.genre.as_str());
        draft.set_liveness(self.liveness);
        draft
    }

    fn from_draft(draft: &Draft) -> Result<Self, FieldErrors> {
        let fields = checked(Self::schema(), draft)?;
        Ok(Self {
            title: draft.text("title"),
            album: draft.text("album"),
            duration: draft.text("duration"),
            year: draft.year(fields.spec("year")?)?,
            genre: draft.text("genre"),
            liveness: draft.liveness(),
        })
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.album.clone(),
            self.duration.clone(),
            self.year.to_string(),
            self.genre.clone(),
            self.liveness.as_str().to_owned(),
        ]
    }
}
