// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{Entity, Liveness, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const fn cycle(self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Inactive,
            Self::Inactive => Self::All,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "todos",
            Self::Active => "activos",
            Self::Inactive => "inactivos",
        }
    }

    pub const fn matches(self, liveness: Liveness) -> bool {
        match self {
            Self::All => true,
            Self::Active => matches!(liveness, Liveness::Active),
            Self::Inactive => matches!(liveness, Liveness::Inactive),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: String,
    pub status: StatusFilter,
    pub direction: SortDirection,
}

pub fn matches_search(haystack: &str, term: &str) -> bool {
    term.is_empty() || haystack.to_lowercase().contains(&term.to_lowercase())
}

pub fn filter_by_text<'a, E: Entity>(rows: Vec<&'a Row<E>>, term: &str) -> Vec<&'a Row<E>> {
    rows.into_iter()
        .filter(|row| matches_search(row.record.search_text(), term))
        .collect()
}

pub fn filter_by_status<'a, E: Entity>(
    rows: Vec<&'a Row<E>>,
    status: StatusFilter,
) -> Vec<&'a Row<E>> {
    rows.into_iter()
        .filter(|row| status.matches(row.record.liveness()))
        .collect()
}

/// Stable ascending sort on the kind's sort key; descending is the exact
/// reverse of ascending, ties included.
pub fn sort_rows<E: Entity>(rows: &mut [&Row<E>], direction: SortDirection) {
    rows.sort_by_cached_key(|row| row.record.sort_key());
    if direction == SortDirection::Desc {
        rows.reverse();
    }
}

/// Display list for a query: text filter, then status filter, then sort.
pub fn derive_view<'a, E: Entity>(rows: &'a [Row<E>], query: &ListQuery) -> Vec<&'a Row<E>> {
    let matched = filter_by_text(rows.iter().collect(), &query.search);
    let mut visible = filter_by_status(matched, query.status);
    sort_rows(&mut visible, query.direction);
    visible
}

#[cfg(test)]
mod tests {
    use super::{
        ListQuery, SortDirection, StatusFilter, derive_view, filter_by_status, filter_by_text,
        matches_search,
    };
    use crate::{Album, EntityStore, Liveness};

    fn album(title: &str, year: i32, liveness: Liveness) -> Album {
        Album {
            title: title.to_owned(),
            artist: "Artista".to_owned(),
            year,
            genre: "Pop".to_owned(),
            photo: None,
            liveness,
        }
    }

    fn titles(rows: &[&crate::Row<Album>]) -> Vec<String> {
        rows.iter().map(|row| row.record.title.clone()).collect()
    }

    fn years(rows: &[&crate::Row<Album>]) -> Vec<i32> {
        rows.iter().map(|row| row.record.year).collect()
    }

    #[test]
    fn status_filter_cycles_through_three_states() {
        let mut status = StatusFilter::default();
        status = status.cycle();
        assert_eq!(status, StatusFilter::Active);
        status = status.cycle();
        assert_eq!(status, StatusFilter::Inactive);
        status = status.cycle();
        assert_eq!(status, StatusFilter::All);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_search("Álbum 1", "ÁL"));
        assert!(matches_search("Álbum 1", "BUM"));
        // Folding is by case only; accents are significant.
        assert!(!matches_search("Álbum 1", "album"));
        assert!(matches_search("anything", ""));
        assert!(!matches_search("Álbum 1", "zzz"));
    }

    #[test]
    fn search_scenario_over_album_titles() {
        let store = EntityStore::with_records([
            album("Álbum 1", 2020, Liveness::Active),
            album("Álbum 2", 2021, Liveness::Active),
        ]);
        let both = derive_view(
            store.rows(),
            &ListQuery {
                search: "álbum".to_owned(),
                ..ListQuery::default()
            },
        );
        assert_eq!(titles(&both), vec!["Álbum 1", "Álbum 2"]);

        // "a" only appears as "á" in these titles.
        let plain_a = derive_view(
            store.rows(),
            &ListQuery {
                search: "a".to_owned(),
                ..ListQuery::default()
            },
        );
        assert!(plain_a.is_empty());

        let none = derive_view(
            store.rows(),
            &ListQuery {
                search: "zzz".to_owned(),
                ..ListQuery::default()
            },
        );
        assert!(none.is_empty());
    }

    #[test]
    fn year_sort_and_toggle_scenario() {
        let store = EntityStore::with_records([
            album("A", 2021, Liveness::Active),
            album("B", 2018, Liveness::Active),
            album("C", 2020, Liveness::Active),
        ]);
        let mut query = ListQuery::default();
        assert_eq!(years(&derive_view(store.rows(), &query)), vec![2018, 2020, 2021]);

        query.direction = query.direction.toggle();
        assert_eq!(query.direction, SortDirection::Desc);
        assert_eq!(years(&derive_view(store.rows(), &query)), vec![2021, 2020, 2018]);
    }

    #[test]
    fn descending_reverses_ties_too() {
        let store = EntityStore::with_records([
            album("A", 2020, Liveness::Active),
            album("B", 2020, Liveness::Active),
            album("C", 2019, Liveness::Active),
        ]);
        let asc = titles(&derive_view(store.rows(), &ListQuery::default()));
        let desc = titles(&derive_view(
            store.rows(),
            &ListQuery {
                direction: SortDirection::Desc,
                ..ListQuery::default()
            },
        ));
        assert_eq!(asc, vec!["C", "A", "B"]);
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn status_filter_compares_liveness_exactly() {
        let store = EntityStore::with_records([
            album("A", 2020, Liveness::Active),
            album("B", 2019, Liveness::Inactive),
        ]);
        let rows = store.rows().iter().collect::<Vec<_>>();
        assert_eq!(
            titles(&filter_by_status(rows.clone(), StatusFilter::Active)),
            vec!["A"]
        );
        assert_eq!(
            titles(&filter_by_status(rows.clone(), StatusFilter::Inactive)),
            vec!["B"]
        );
        assert_eq!(filter_by_status(rows, StatusFilter::All).len(), 2);
    }

    #[test]
    fn filters_commute() {
        let store = EntityStore::with_records([
            album("Noche", 2020, Liveness::Active),
            album("Noches", 2019, Liveness::Inactive),
            album("Día", 2018, Liveness::Active),
        ]);
        let rows = store.rows().iter().collect::<Vec<_>>();
        for status in [
            StatusFilter::All,
            StatusFilter::Active,
            StatusFilter::Inactive,
        ] {
            let text_first = filter_by_status(filter_by_text(rows.clone(), "noche"), status);
            let status_first = filter_by_text(filter_by_status(rows.clone(), status), "noche");
            assert_eq!(titles(&text_first), titles(&status_first));
        }
    }
}
