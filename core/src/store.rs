//! Palette Store
//!
//! Single owner of the canonical palette. Mutators never hand out a
//! shared mutable reference; every change goes through [`update`] or
//! [`replace`], and subscribers are notified synchronously in
//! registration order with the fully-updated palette. Within one
//! notification no subscriber can observe a half-applied change.
//!
//! [`update`]: PaletteStore::update
//! [`replace`]: PaletteStore::replace

use crate::palette::Palette;

/// Callback invoked after every palette change.
pub type Subscriber = Box<dyn FnMut(&Palette)>;

/// Owns the live palette and fans out change notifications.
#[derive(Default)]
pub struct PaletteStore {
    palette: Palette,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for PaletteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteStore")
            .field("palette", &self.palette)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl PaletteStore {
    /// Create a store starting from the given palette.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            subscribers: Vec::new(),
        }
    }

    /// Read access to the current palette.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Register a change listener.
    ///
    /// Listeners run synchronously on every change, in the order they
    /// were registered. Registration does not fire an initial call.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Palette) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Mutate the palette in place, then notify.
    pub fn update(&mut self, mutate: impl FnOnce(&mut Palette)) {
        mutate(&mut self.palette);
        self.notify();
    }

    /// Replace the palette wholesale, then notify.
    pub fn replace(&mut self, palette: Palette) {
        self.palette = palette;
        self.notify();
    }

    fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.palette);
        }
    }
}
