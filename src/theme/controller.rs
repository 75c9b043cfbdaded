//! Theme controller: the effectful shell around `ThemeState`.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::preference::{ResolvedTheme, ThemePreference, ThemeState};
use super::probe::ColorSchemeProbe;
use super::storage::PreferenceStore;
use crate::dom::Document;
use crate::error::{Result, ToolshelfError};

/// Where the theme lives in storage and on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Storage key holding the preference
    pub storage_key: String,
    /// Body attribute signalling the active theme to styling
    pub attribute: String,
    /// Class marking theme-option elements
    pub option_class: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            attribute: "data-bs-theme".to_string(),
            option_class: "theme-option".to_string(),
        }
    }
}

pub struct ThemeController<S: PreferenceStore, P: ColorSchemeProbe> {
    store: S,
    probe: P,
    settings: ThemeSettings,
    state: ThemeState,
}

impl<S: PreferenceStore, P: ColorSchemeProbe> ThemeController<S, P> {
    pub fn new(store: S, probe: P, settings: ThemeSettings) -> Self {
        Self {
            store,
            probe,
            settings,
            state: ThemeState::default(),
        }
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the persisted preference into state without touching the page.
    /// An unreadable store counts as no stored value.
    pub fn restore(&mut self) -> ThemeState {
        let stored = match self.store.get_item(&self.settings.storage_key) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to read stored theme, falling back to auto: {}", e);
                None
            }
        };
        if let Some(value) = stored.as_deref() {
            if value.parse::<ThemePreference>().is_err() {
                warn!("Ignoring stored theme '{}', falling back to auto", value);
            }
        }
        self.state = ThemeState::from_stored(stored.as_deref());
        self.state
    }

    /// Restore the persisted preference and apply it to the document.
    pub fn initialize(&mut self, doc: &mut Document) -> Result<ResolvedTheme> {
        self.restore();
        info!("Theme preference: {}", self.state.preference);
        self.apply(doc)
    }

    /// Theme the current preference resolves to right now.
    pub fn resolved(&self) -> ResolvedTheme {
        self.state.resolve(self.probe.prefers_dark())
    }

    /// Write the resolved theme to the body attribute. The system preference
    /// is probed on each call.
    pub fn apply(&self, doc: &mut Document) -> Result<ResolvedTheme> {
        let resolved = self.resolved();
        let body = doc
            .body_mut()
            .ok_or_else(|| ToolshelfError::MissingElement("body".to_string()))?;
        body.set_attribute(self.settings.attribute.clone(), resolved.as_str());
        debug!("Applied theme {} ({})", resolved, self.state.preference);
        Ok(resolved)
    }

    /// Dispatch a theme token: transition, persist, apply.
    pub fn select(&mut self, token: &str, doc: &mut Document) -> Result<ResolvedTheme> {
        let next = self.persist(token)?;
        info!("Theme changed to {}", next.preference);
        self.apply(doc)
    }

    /// Transition and persist without a document, for headless callers.
    pub fn persist(&mut self, token: &str) -> Result<ThemeState> {
        let next = self.state.select(token)?;
        self.store
            .set_item(&self.settings.storage_key, next.preference.as_str())?;
        self.state = next;
        Ok(next)
    }

    /// Handle activation of a theme-option element: read its `data-theme`
    /// and dispatch it.
    pub fn activate(&mut self, doc: &mut Document, option: &[usize]) -> Result<ResolvedTheme> {
        let token = doc
            .element_at(option)
            .filter(|el| el.has_class(&self.settings.option_class))
            .and_then(|el| el.data("theme"))
            .map(str::to_string)
            .ok_or_else(|| ToolshelfError::MissingElement(format!(".{}[data-theme]", self.settings.option_class)))?;
        self.select(&token, doc)
    }

    /// Paths of every theme-option element on the page.
    pub fn options(&self, doc: &Document) -> Vec<Vec<usize>> {
        doc.query_class(&self.settings.option_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::theme::probe::FixedProbe;
    use crate::theme::storage::{FileStore, MemoryStore};

    fn page() -> Document {
        Document::new(
            Element::new("html").with_child(
                Element::new("body")
                    .with_child(
                        Element::new("a")
                            .with_class("dropdown-item theme-option")
                            .with_attr("data-theme", "dark"),
                    )
                    .with_child(
                        Element::new("a")
                            .with_class("dropdown-item theme-option")
                            .with_attr("data-theme", "auto"),
                    )
                    .with_child(Element::new("a").with_class("dropdown-item")),
            ),
        )
    }

    fn body_theme(doc: &Document) -> Option<String> {
        doc.body().and_then(|b| b.attribute("data-bs-theme")).map(str::to_string)
    }

    #[test]
    fn test_initialize_defaults_to_auto() {
        let mut doc = page();
        let mut ctl = ThemeController::new(MemoryStore::new(), FixedProbe(Some(false)), ThemeSettings::default());
        assert_eq!(ctl.initialize(&mut doc).unwrap(), ResolvedTheme::Light);
        assert_eq!(ctl.state().preference, ThemePreference::Auto);
        assert_eq!(body_theme(&doc).as_deref(), Some("light"));
    }

    #[test]
    fn test_initialize_reads_stored_value() {
        let store = MemoryStore::new();
        store.set_item("theme", "dark").unwrap();
        let mut doc = page();
        let mut ctl = ThemeController::new(store, FixedProbe(None), ThemeSettings::default());
        assert_eq!(ctl.initialize(&mut doc).unwrap(), ResolvedTheme::Dark);
        assert_eq!(body_theme(&doc).as_deref(), Some("dark"));
    }

    #[test]
    fn test_initialize_ignores_garbage() {
        let store = MemoryStore::new();
        store.set_item("theme", "neon").unwrap();
        let mut ctl = ThemeController::new(store, FixedProbe(Some(true)), ThemeSettings::default());
        assert_eq!(ctl.initialize(&mut page()).unwrap(), ResolvedTheme::Dark);
        assert_eq!(ctl.state().preference, ThemePreference::Auto);
    }

    #[test]
    fn test_initialize_survives_unreadable_store() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("local_storage.json");
        std::fs::write(&path, "not json").unwrap();

        let mut doc = page();
        let mut ctl = ThemeController::new(FileStore::new(&path), FixedProbe(Some(true)), ThemeSettings::default());
        assert_eq!(ctl.initialize(&mut doc).unwrap(), ResolvedTheme::Dark);
        assert_eq!(ctl.state().preference, ThemePreference::Auto);
        assert_eq!(body_theme(&doc).as_deref(), Some("dark"));
    }

    #[test]
    fn test_select_persists_auto_unresolved() {
        let mut doc = page();
        let mut ctl = ThemeController::new(MemoryStore::new(), FixedProbe(Some(true)), ThemeSettings::default());
        assert_eq!(ctl.select("auto", &mut doc).unwrap(), ResolvedTheme::Dark);
        assert_eq!(ctl.store().get_item("theme").unwrap().as_deref(), Some("auto"));
    }

    #[test]
    fn test_select_rejects_unknown_token() {
        let mut doc = page();
        let mut ctl = ThemeController::new(MemoryStore::new(), FixedProbe(None), ThemeSettings::default());
        assert!(matches!(ctl.select("blue", &mut doc), Err(ToolshelfError::InvalidTheme(_))));
        assert_eq!(ctl.store().get_item("theme").unwrap(), None);
        assert!(body_theme(&doc).is_none());
    }

    #[test]
    fn test_activate_theme_option() {
        let mut doc = page();
        let mut ctl = ThemeController::new(MemoryStore::new(), FixedProbe(Some(false)), ThemeSettings::default());
        let options = ctl.options(&doc);
        assert_eq!(options.len(), 2);

        assert_eq!(ctl.activate(&mut doc, &options[0]).unwrap(), ResolvedTheme::Dark);
        assert_eq!(body_theme(&doc).as_deref(), Some("dark"));
        assert_eq!(ctl.store().get_item("theme").unwrap().as_deref(), Some("dark"));

        assert_eq!(ctl.activate(&mut doc, &options[1]).unwrap(), ResolvedTheme::Light);
        assert_eq!(ctl.store().get_item("theme").unwrap().as_deref(), Some("auto"));
    }

    #[test]
    fn test_activate_non_option_element() {
        let mut doc = page();
        let mut ctl = ThemeController::new(MemoryStore::new(), FixedProbe(None), ThemeSettings::default());
        let err = ctl.activate(&mut doc, &[0, 2]).unwrap_err();
        assert!(matches!(err, ToolshelfError::MissingElement(_)));
    }

    #[test]
    fn test_apply_without_body() {
        let mut doc = Document::new(Element::new("html"));
        let ctl = ThemeController::new(MemoryStore::new(), FixedProbe(None), ThemeSettings::default());
        assert!(ctl.apply(&mut doc).is_err());
    }
}
