// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cell::Cell;
use std::rc::Rc;

use crate::PhotoRef;

#[derive(Debug, Default)]
struct Counters {
    live: Cell<usize>,
    issued: Cell<u64>,
}

/// Hands out display handles for locally selected photos and keeps count of
/// the ones still alive. Cloning shares the same counters.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    counters: Rc<Counters>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, photo: &PhotoRef) -> PreviewHandle {
        let serial = self.counters.issued.get().saturating_add(1);
        self.counters.issued.set(serial);
        self.counters.live.set(self.counters.live.get() + 1);

        let url = format!("preview://{serial}/{}", photo.file_name());
        tracing::trace!(%url, "preview handle acquired");
        PreviewHandle {
            url,
            photo: photo.clone(),
            counters: Rc::clone(&self.counters),
        }
    }

    pub fn live_handles(&self) -> usize {
        self.counters.live.get()
    }
}

/// Released on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    photo: PhotoRef,
    counters: Rc<Counters>,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn photo(&self) -> &PhotoRef {
        &self.photo
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.counters
            .live
            .set(self.counters.live.get().saturating_sub(1));
        tracing::trace!(url = %self.url, "preview handle released");
    }
}

#[cfg(test)]
mod tests {
    use super::PreviewRegistry;
    use crate::PhotoRef;

    #[test]
    fn handles_are_counted_until_dropped() {
        let registry = PreviewRegistry::new();
        let first = registry.acquire(&PhotoRef::new("/fotos/portada.png"));
        let second = registry.clone().acquire(&PhotoRef::new("/fotos/contra.png"));
        assert_eq!(registry.live_handles(), 2);

        drop(first);
        assert_eq!(registry.live_handles(), 1);
        drop(second);
        assert_eq!(registry.live_handles(), 0);
    }

    #[test]
    fn each_handle_gets_a_distinct_url() {
        let registry = PreviewRegistry::new();
        let photo = PhotoRef::new("/fotos/portada.png");
        let first = registry.acquire(&photo);
        let second = registry.acquire(&photo);
        assert_eq!(first.url(), "preview://1/portada.png");
        assert_eq!(second.url(), "preview://2/portada.png");
        assert_eq!(second.photo(), &photo);
    }
}
