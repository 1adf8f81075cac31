//! Transient UI state.

/// Holds the page title shown in the navigation bar while the real
/// title is scrolled out of view.
#[derive(Debug, Default)]
pub struct UiStore {
    nav_title: String,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nav_title(&self) -> &str {
        &self.nav_title
    }

    pub fn set_nav_title(&mut self, title: impl Into<String>) {
        self.nav_title = title.into();
    }

    pub fn clear_nav_title(&mut self) {
        self.nav_title.clear();
    }
}
