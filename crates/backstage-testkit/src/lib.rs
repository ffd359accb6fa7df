// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use backstage_app::{Album, Event, Liveness, Manager, MusicalGroup, PhotoRef, Track};
use time::{Date, Duration, Month};

const GENRES: [&str; 12] = [
    "Rock",
    "Pop",
    "Jazz",
    "Cumbia",
    "Salsa",
    "Folk",
    "Indie",
    "Reggaetón",
    "Blues",
    "Metal",
    "Bolero",
    "Electrónica",
];

const TITLE_WORDS: [&str; 20] = [
    "Noche", "Luna", "Camino", "Fuego", "Mar", "Ciudad", "Sombra", "Viento", "Río", "Sol",
    "Tierra", "Lluvia", "Eco", "Norte", "Sur", "Alba", "Marea", "Cielo", "Raíz", "Puerto",
];

const GIVEN_NAMES: [&str; 16] = [
    "Lucía", "Andrés", "Valentina", "Mateo", "Camila", "Diego", "Sofía", "Julián", "Isabel",
    "Tomás", "Renata", "Emilio", "Paula", "Gabriel", "Elena", "Martín",
];

const SURNAMES: [&str; 16] = [
    "García", "Pérez", "Rodríguez", "López", "Martínez", "Sánchez", "Ramírez", "Torres",
    "Flores", "Rivera", "Gómez", "Díaz", "Vargas", "Castro", "Ortiz", "Morales",
];

const VENUES: [&str; 10] = [
    "Teatro Municipal",
    "Parque Central",
    "Auditorio Norte",
    "Estadio del Sur",
    "Sala Eco",
    "Plaza Mayor",
    "Centro Cultural",
    "Anfiteatro",
    "Club Marea",
    "Foro Abierto",
];

const PLATFORMS: [&str; 6] = [
    "Spotify",
    "Bandcamp",
    "YouTube",
    "SoundCloud",
    "Deezer",
    "Radio",
];

const GENDERS: [&str; 3] = ["Femenino", "Masculino", "No binario"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible catalog records. Same seed, same records.
#[derive(Debug, Clone)]
pub struct CatalogFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl CatalogFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    /// Mostly active, roughly one in four inactive.
    pub fn liveness(&mut self) -> Liveness {
        if self.rng.int_n(4) == 0 {
            Liveness::Inactive
        } else {
            Liveness::Active
        }
    }

    pub fn album(&mut self) -> Album {
        let title = self.title(1, 3);
        let photo = self
            .rng
            .bool()
            .then(|| PhotoRef::new(format!("portadas/{}.jpg", slug(&title))));
        Album {
            artist: self.person_name(),
            year: self.int_range_i32(1960, 2025),
            genre: self.pick(&GENRES).to_owned(),
            photo,
            liveness: self.liveness(),
            title,
        }
    }

    pub fn event(&mut self) -> Event {
        let name = format!("Festival {}", self.title(1, 2));
        let description = if self.rng.bool() {
            self.title(3, 6)
        } else {
            String::new()
        };
        let year = self.int_range_i32(2015, 2026);
        Event {
            contact: format!("{}@eventos.example", slug(&name)),
            genre: self.pick(&GENRES).to_owned(),
            description,
            location: self.pick(&VENUES).to_owned(),
            date: self.date_in_year(year),
            capacity: self.int_range_i32(50, 60_000) as u32,
            artists: format!("{}, {}", self.person_name(), self.person_name()),
            liveness: self.liveness(),
            name,
        }
    }

    pub fn group(&mut self) -> MusicalGroup {
        let mut name = format!("Los {}", self.title(1, 2));
        if self.rng.bool() {
            name = name.to_lowercase();
        }
        let url = if self.rng.bool() {
            format!("https://musica.example/{}", slug(&name))
        } else {
            String::new()
        };
        MusicalGroup {
            genre: self.pick(&GENRES).to_owned(),
            description: String::new(),
            platform: self.pick(&PLATFORMS).to_owned(),
            url,
            liveness: self.liveness(),
            name,
        }
    }

    pub fn manager(&mut self) -> Manager {
        let given_name = self.pick(&GIVEN_NAMES).to_owned();
        let surname = self.pick(&SURNAMES).to_owned();
        let year = self.int_range_i32(2000, 2025);
        Manager {
            email: format!("{}.{}@managers.example", slug(&given_name), slug(&surname)),
            gender: self.pick(&GENDERS).to_owned(),
            date: self.date_in_year(year),
            liveness: self.liveness(),
            surname,
            given_name,
        }
    }

    pub fn track(&mut self) -> Track {
        Track {
            title: self.title(1, 3),
            album: self.title(1, 2),
            duration: format!(
                "{}:{:02}",
                self.int_range_i32(1, 9),
                self.int_range_i32(0, 59)
            ),
            year: self.int_range_i32(1960, 2025),
            genre: self.pick(&GENRES).to_owned(),
            liveness: self.liveness(),
        }
    }

    pub fn albums(&mut self, count: usize) -> Vec<Album> {
        (0..count).map(|_| self.album()).collect()
    }

    pub fn events(&mut self, count: usize) -> Vec<Event> {
        (0..count).map(|_| self.event()).collect()
    }

    pub fn groups(&mut self, count: usize) -> Vec<MusicalGroup> {
        (0..count).map(|_| self.group()).collect()
    }

    pub fn managers(&mut self, count: usize) -> Vec<Manager> {
        (0..count).map(|_| self.manager()).collect()
    }

    pub fn tracks(&mut self, count: usize) -> Vec<Track> {
        (0..count).map(|_| self.track()).collect()
    }

    /// A short fragment of a title word, in random case, for search tests.
    pub fn search_term(&mut self) -> String {
        let word = self.pick(&TITLE_WORDS);
        let chars = word.chars().collect::<Vec<_>>();
        let take = 1 + self.rng.int_n(chars.len().min(3));
        let fragment = chars[..take].iter().collect::<String>();
        if self.rng.bool() {
            fragment.to_uppercase()
        } else {
            fragment.to_lowercase()
        }
    }

    pub fn date_in_year(&mut self, year: i32) -> Date {
        let Ok(start) = Date::from_calendar_date(year, Month::January, 1) else {
            return Date::MIN;
        };
        let days = if time::util::is_leap_year(year) { 366 } else { 365 };
        start + Duration::days(self.rng.int_n(days) as i64)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = i64::from(max) - i64::from(min) + 1;
        let offset = (self.rng.next_u64() % (span as u64)) as i64;
        (i64::from(min) + offset) as i32
    }

    fn title(&mut self, min_words: usize, max_words: usize) -> String {
        let count = self.int_range_i32(min_words as i32, max_words as i32) as usize;
        (0..count)
            .map(|_| self.pick(&TITLE_WORDS))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&GIVEN_NAMES), self.pick(&SURNAMES))
    }
}

fn slug(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
