//! Theme persistence.

use elegance_core::Theme;

use crate::storage::{KeyValueStore, Storage, keys};

/// The page's theme, stored under the `theme` key.
#[derive(Debug)]
pub struct ThemeController<S> {
    theme: Theme,
    storage: Storage<S>,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Load the saved theme, defaulting to light.
    pub fn load(storage: Storage<S>) -> Self {
        let theme = storage.get(keys::THEME, Theme::default()).into_inner();
        Self { theme, storage }
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch to the other theme and save it (best-effort).
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.storage.set_best_effort(keys::THEME, &self.theme);
        tracing::debug!(theme = %self.theme, "Theme toggled");
        self.theme
    }

    /// Re-read the saved theme, e.g. after another tab changed it.
    pub fn reload(&mut self) -> Theme {
        self.theme = self.storage.get(keys::THEME, Theme::default()).into_inner();
        self.theme
    }
}
