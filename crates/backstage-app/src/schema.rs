// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use time::macros::format_description;
use time::{Date, Month};

use crate::{EntityKind, Liveness, PhotoRef};

pub const STATUS_COLUMN: &str = "Estado";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Text,
    Year,
    Date,
    Count,
    Photo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

/// Everything the generic list screen needs to know about one entity kind.
/// `search_field` is matched by the search box, `sort_field` orders the
/// list and `notice_name` is the noun used in notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub fields: &'static [FieldSpec],
    pub search_field: &'static str,
    pub sort_field: &'static str,
    pub notice_name: &'static str,
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|field| field.required)
    }

    pub fn column_labels(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .map(|field| field.label)
            .chain(std::iter::once(STATUS_COLUMN))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Year(i32),
    Date(Date),
    Text(String),
}

pub trait Entity: Clone + PartialEq + fmt::Debug + Serialize {
    type Id: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + From<i64> + Into<i64>;

    fn schema() -> &'static EntitySchema;
    fn liveness(&self) -> Liveness;
    fn set_liveness(&mut self, liveness: Liveness);
    fn search_text(&self) -> &str;
    fn sort_key(&self) -> SortKey;
    fn to_draft(&self) -> Draft;
    /// Builds a record from a staging draft. Fails with the same messages
    /// `validate_draft` produces when the draft is not ready to save.
    fn from_draft(draft: &Draft) -> Result<Self, FieldErrors>;
    /// Display cells in `EntitySchema::column_labels` order.
    fn cells(&self) -> Vec<String>;
}

/// Raw text per form field plus the liveness carried over from the record
/// being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Draft {
    values: BTreeMap<&'static str, String>,
    liveness: Liveness,
}

impl Draft {
    pub fn blank(schema: &EntitySchema) -> Self {
        Self {
            values: schema
                .fields
                .iter()
                .map(|field| (field.name, String::new()))
                .collect(),
            liveness: Liveness::Active,
        }
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn set_liveness(&mut self, liveness: Liveness) {
        self.liveness = liveness;
    }

    pub fn text(&self, name: &str) -> String {
        self.value(name).trim().to_owned()
    }

    pub fn photo(&self, name: &str) -> Option<PhotoRef> {
        let raw = self.value(name).trim();
        (!raw.is_empty()).then(|| PhotoRef::new(raw))
    }

    pub fn year(&self, field: &FieldSpec) -> Result<i32, FieldErrors> {
        parse_year(self.value(field.name))
            .ok_or_else(|| FieldErrors::single(field.name, year_message(field.label)))
    }

    pub fn date(&self, field: &FieldSpec) -> Result<Date, FieldErrors> {
        parse_iso_date(self.value(field.name))
            .ok_or_else(|| FieldErrors::single(field.name, date_message(field.label)))
    }

    pub fn count(&self, field: &FieldSpec) -> Result<u32, FieldErrors> {
        parse_count(self.value(field.name))
            .ok_or_else(|| FieldErrors::single(field.name, count_message(field.label)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn single(name: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.insert(name, message);
        errors
    }

    pub fn insert(&mut self, name: &'static str, message: impl Into<String>) {
        self.0.insert(name, message.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, message)| (*name, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

pub fn required_message(label: &str) -> String {
    format!("{label} obligatorio")
}

pub fn year_message(label: &str) -> String {
    format!("{label} debe tener 4 dígitos")
}

pub fn date_message(label: &str) -> String {
    format!("{label} debe tener formato AAAA-MM-DD")
}

pub fn count_message(label: &str) -> String {
    format!("{label} debe ser un número entero")
}

pub fn parse_year(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

pub fn parse_iso_date(input: &str) -> Option<Date> {
    Date::parse(input.trim(), &format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn parse_count(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Calendar date helper for seed data and tests.
pub fn ymd(year: i32, month: Month, day: u8) -> Option<Date> {
    Date::from_calendar_date(year, month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::{
        Draft, FieldErrors, FieldKind, FieldSpec, SortKey, format_iso_date, parse_count,
        parse_iso_date, parse_year, ymd,
    };
    use time::Month;

    #[test]
    fn year_requires_exactly_four_ascii_digits() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year(" 1999 "), Some(1999));
        assert_eq!(parse_year("999"), None);
        assert_eq!(parse_year("20210"), None);
        assert_eq!(parse_year("+202"), None);
        assert_eq!(parse_year("２０２１"), None);
    }

    #[test]
    fn iso_dates_parse_and_format_symmetrically() {
        let date = parse_iso_date("2024-03-09").expect("valid iso date");
        assert_eq!(Some(date), ymd(2024, Month::March, 9));
        assert_eq!(format_iso_date(date), "2024-03-09");
        assert!(parse_iso_date("2024-13-01").is_none());
        assert!(parse_iso_date("09/03/2024").is_none());
    }

    #[test]
    fn count_rejects_signs_and_fractions() {
        assert_eq!(parse_count("5000"), Some(5000));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn date_sort_keys_order_by_calendar() {
        let earlier = SortKey::Date(ymd(2023, Month::December, 31).expect("valid date"));
        let later = SortKey::Date(ymd(2024, Month::January, 2).expect("valid date"));
        assert!(earlier < later);
        assert!(SortKey::Year(2018) < SortKey::Year(2021));
    }

    #[test]
    fn draft_typed_readers_report_field_label() {
        let year = FieldSpec::required("year", "Año", FieldKind::Year);
        let draft = Draft::default().with("year", "20x1");
        let error = draft.year(&year).expect_err("bad year should fail");
        assert_eq!(error.get("year"), Some("Año debe tener 4 dígitos"));

        let draft = Draft::default().with("year", "2020");
        assert_eq!(draft.year(&year).ok(), Some(2020));
    }

    #[test]
    fn field_errors_display_joins_messages() {
        let mut errors = FieldErrors::default();
        errors.insert("artist", "Artista obligatorio");
        errors.insert("title", "Título obligatorio");
        assert_eq!(errors.to_string(), "Artista obligatorio; Título obligatorio");
        assert_eq!(errors.len(), 2);
    }
}
