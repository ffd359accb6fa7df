// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Fixed records every catalog starts with unless launched empty.

use time::macros::date;

use crate::{Album, Event, Liveness, Manager, MusicalGroup, PhotoRef, Track};

pub fn albums() -> Vec<Album> {
    vec![
        Album {
            title: "Álbum 1".to_owned(),
            artist: "Artista 1".to_owned(),
            year: 2021,
            genre: "Rock".to_owned(),
            photo: Some(PhotoRef::new("portadas/album-1.jpg")),
            liveness: Liveness::Active,
        },
        Album {
            title: "Álbum 2".to_owned(),
            artist: "Artista 2".to_owned(),
            year: 2018,
            genre: "Pop".to_owned(),
            photo: None,
            liveness: Liveness::Active,
        },
        Album {
            title: "Álbum 3".to_owned(),
            artist: "Artista 3".to_owned(),
            year: 2020,
            genre: "Jazz".to_owned(),
            photo: None,
            liveness: Liveness::Inactive,
        },
    ]
}

pub fn events() -> Vec<Event> {
    vec![
        Event {
            name: "Festival de Verano".to_owned(),
            genre: "Pop".to_owned(),
            description: "Tres escenarios al aire libre".to_owned(),
            location: "Parque Central".to_owned(),
            date: date!(2024 - 07 - 15),
            contact: "eventos@backstage.example".to_owned(),
            capacity: 5000,
            artists: "Artista 1, Artista 2".to_owned(),
            liveness: Liveness::Active,
        },
        Event {
            name: "Noche de Jazz".to_owned(),
            genre: "Jazz".to_owned(),
            description: String::new(),
            location: "Teatro Municipal".to_owned(),
            date: date!(2024 - 03 - 02),
            contact: "jazz@backstage.example".to_owned(),
            capacity: 800,
            artists: "Artista 3".to_owned(),
            liveness: Liveness::Active,
        },
        Event {
            name: "Gira Acústica".to_owned(),
            genre: "Folk".to_owned(),
            description: "Fechas sujetas a confirmación".to_owned(),
            location: "Auditorio Norte".to_owned(),
            date: date!(2023 - 11 - 20),
            contact: "giras@backstage.example".to_owned(),
            capacity: 1200,
            artists: "Artista 2".to_owned(),
            liveness: Liveness::Inactive,
        },
    ]
}

pub fn groups() -> Vec<MusicalGroup> {
    vec![
        MusicalGroup {
            name: "Los Rayos".to_owned(),
            genre: "Rock".to_owned(),
            description: "Cuarteto de rock alternativo".to_owned(),
            platform: "Spotify".to_owned(),
            url: "https://open.example/los-rayos".to_owned(),
            liveness: Liveness::Active,
        },
        MusicalGroup {
            name: "aurora boreal".to_owned(),
            genre: "Indie".to_owned(),
            description: String::new(),
            platform: "Bandcamp".to_owned(),
            url: String::new(),
            liveness: Liveness::Active,
        },
        MusicalGroup {
            name: "Marea Alta".to_owned(),
            genre: "Cumbia".to_owned(),
            description: "Orquesta de doce músicos".to_owned(),
            platform: "YouTube".to_owned(),
            url: "https://video.example/marea-alta".to_owned(),
            liveness: Liveness::Active,
        },
    ]
}

pub fn managers() -> Vec<Manager> {
    vec![
        Manager {
            surname: "García".to_owned(),
            given_name: "Lucía".to_owned(),
            email: "lucia.garcia@backstage.example".to_owned(),
            gender: "Femenino".to_owned(),
            date: date!(2019 - 05 - 10),
            liveness: Liveness::Active,
        },
        Manager {
            surname: "Pérez".to_owned(),
            given_name: "Andrés".to_owned(),
            email: "andres.perez@backstage.example".to_owned(),
            gender: "Masculino".to_owned(),
            date: date!(2021 - 09 - 01),
            liveness: Liveness::Active,
        },
    ]
}

pub fn tracks() -> Vec<Track> {
    vec![
        Track {
            title: "Amanecer".to_owned(),
            album: "Álbum 1".to_owned(),
            duration: "3:45".to_owned(),
            year: 2021,
            genre: "Rock".to_owned(),
            liveness: Liveness::Active,
        },
        Track {
            title: "Ciudad Dormida".to_owned(),
            album: "Álbum 2".to_owned(),
            duration: "4:12".to_owned(),
            year: 2018,
            genre: "Pop".to_owned(),
            liveness: Liveness::Active,
        },
        Track {
            title: "Última Llamada".to_owned(),
            album: "Álbum 3".to_owned(),
            duration: "5:01".to_owned(),
            year: 2020,
            genre: "Jazz".to_owned(),
            liveness: Liveness::Active,
        },
    ]
}
