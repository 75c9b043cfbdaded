//! Catalog loader: fetch both documents, render them into the page.

use log::{error, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::links::LinkPolicy;
use super::model::{IconMap, ToolCatalog, ToolCatalogExt};
use super::render::{failure_message, render_catalog};
use super::source::Fetcher;
use crate::dom::Document;
use crate::error::{CatalogLoadError, Result, ToolshelfError};

/// Resource paths and the element the catalog is rendered into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub catalog_path: String,
    pub icons_path: String,
    /// Id of the render target element
    pub render_target: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            catalog_path: "data/tools_data.json".to_string(),
            icons_path: "data/tools_icons.json".to_string(),
            render_target: "tools-section".to_string(),
        }
    }
}

/// What `load_into` left in the render target.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Catalog rendered
    Rendered { categories: usize, tools: usize },
    /// Failure message rendered in place of the catalog
    Failed(CatalogLoadError),
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, LoadOutcome::Rendered { .. })
    }
}

pub struct CatalogLoader {
    fetcher: Box<dyn Fetcher>,
    settings: CatalogSettings,
    links: LinkPolicy,
}

impl CatalogLoader {
    pub fn new(fetcher: Box<dyn Fetcher>, settings: CatalogSettings, links: LinkPolicy) -> Self {
        Self {
            fetcher,
            settings,
            links,
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Fetch the catalog, then the icons. The icon request is only issued
    /// once the catalog has been fetched and parsed.
    pub async fn load(&self) -> std::result::Result<(ToolCatalog, IconMap), CatalogLoadError> {
        let catalog: ToolCatalog = self.fetch_json(&self.settings.catalog_path).await?;
        let icons: IconMap = self.fetch_json(&self.settings.icons_path).await?;
        Ok((catalog, icons))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, CatalogLoadError> {
        let body = self.fetcher.fetch(path).await?;
        serde_json::from_str(&body).map_err(|source| CatalogLoadError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Load and render into the render target, replacing its contents.
    ///
    /// A load failure is not an `Err`: the target then holds only the
    /// failure message, and `LoadOutcome::Failed` carries the cause. The
    /// only `Err` is a document without the render target.
    ///
    /// Buttons inserted here carry no pointer listeners yet; callers bind
    /// them afterwards (see `PointerRipple::register`).
    pub async fn load_into(&self, doc: &mut Document) -> Result<LoadOutcome> {
        let target_id = &self.settings.render_target;
        if doc.find_by_id(target_id).is_none() {
            return Err(ToolshelfError::MissingElement(target_id.clone()));
        }

        info!("Loading tools from {}", self.fetcher.describe());
        let loaded = self.load().await;

        let target = doc
            .get_element_by_id_mut(target_id)
            .ok_or_else(|| ToolshelfError::MissingElement(target_id.clone()))?;

        match loaded {
            Ok((catalog, icons)) => {
                target.replace_children(render_catalog(&catalog, &icons, &self.links));
                info!(
                    "Rendered {} categories, {} tools",
                    catalog.len(),
                    catalog.tool_count()
                );
                Ok(LoadOutcome::Rendered {
                    categories: catalog.len(),
                    tools: catalog.tool_count(),
                })
            }
            Err(e) => {
                error!("Failed to load tools: {}", e);
                target.replace_children(failure_message(&e));
                Ok(LoadOutcome::Failed(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::links::BaseUrlMode;
    use crate::catalog::model::IconMapExt;
    use crate::dom::Element;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Serves canned bodies and records request order.
    struct CannedFetcher {
        bodies: HashMap<String, std::result::Result<String, u16>>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl CannedFetcher {
        fn new(entries: &[(&str, std::result::Result<&str, u16>)]) -> (Self, Arc<Mutex<Vec<String>>>) {
            let requests = Arc::new(Mutex::new(Vec::new()));
            let bodies = entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect();
            (
                Self {
                    bodies,
                    requests: requests.clone(),
                },
                requests,
            )
        }
    }

    #[async_trait]
    impl Fetcher for CannedFetcher {
        async fn fetch(&self, path: &str) -> std::result::Result<String, CatalogLoadError> {
            self.requests.lock().unwrap().push(path.to_string());
            match self.bodies.get(path) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(CatalogLoadError::HttpStatus {
                    path: path.to_string(),
                    status: *status,
                }),
                None => Err(CatalogLoadError::HttpStatus {
                    path: path.to_string(),
                    status: 404,
                }),
            }
        }

        fn describe(&self) -> String {
            "canned".to_string()
        }
    }

    const CATALOG: &str = r#"{"Multimeters":[{"name":"DMM-X","description":"A tool","url":"tools/dmmx"}]}"#;
    const ICONS: &str = r#"{"Multimeters":"bi-speedometer"}"#;

    fn page() -> Document {
        Document::new(
            Element::new("html").with_child(
                Element::new("body").with_child(Element::new("div").with_id("tools-section").with_text("Loading...")),
            ),
        )
    }

    fn loader(entries: &[(&str, std::result::Result<&str, u16>)]) -> (CatalogLoader, Arc<Mutex<Vec<String>>>) {
        let (fetcher, requests) = CannedFetcher::new(entries);
        (
            CatalogLoader::new(Box::new(fetcher), CatalogSettings::default(), LinkPolicy::default()),
            requests,
        )
    }

    fn target(doc: &Document) -> &Element {
        doc.get_element_by_id("tools-section").unwrap()
    }

    #[tokio::test]
    async fn test_load_fetches_catalog_then_icons() {
        let (loader, requests) = loader(&[("data/tools_data.json", Ok(CATALOG)), ("data/tools_icons.json", Ok(ICONS))]);
        let (catalog, icons) = loader.load().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(icons.icon_for("Multimeters"), "bi-speedometer");
        assert_eq!(
            *requests.lock().unwrap(),
            vec!["data/tools_data.json".to_string(), "data/tools_icons.json".to_string()]
        );
    }

    #[tokio::test]
    async fn test_catalog_failure_skips_icon_fetch() {
        let (loader, requests) = loader(&[("data/tools_data.json", Err(500)), ("data/tools_icons.json", Ok(ICONS))]);
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::HttpStatus { status: 500, .. }));
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_load_into_renders_scenario() {
        let (loader, _) = loader(&[("data/tools_data.json", Ok(CATALOG)), ("data/tools_icons.json", Ok(ICONS))]);
        let mut doc = page();
        let outcome = loader.load_into(&mut doc).await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Rendered { categories: 1, tools: 1 }));

        let section = target(&doc);
        // heading block, rule, grid
        assert_eq!(section.children().len(), 3);
        let text = section.text_content();
        assert!(text.contains("Multimeters"));
        assert!(text.contains("DMM-X"));
        assert!(!text.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_invalid_icon_json_leaves_only_failure() {
        let (loader, _) = loader(&[("data/tools_data.json", Ok(CATALOG)), ("data/tools_icons.json", Ok("<html>"))]);
        let mut doc = page();
        let outcome = loader.load_into(&mut doc).await.unwrap();

        match outcome {
            LoadOutcome::Failed(CatalogLoadError::Parse { path, .. }) => assert_eq!(path, "data/tools_icons.json"),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let section = target(&doc);
        assert_eq!(section.children().len(), 2);
        assert!(section.text_content().starts_with("Failed to load tools data!Reason: invalid JSON in data/tools_icons.json"));
        assert!(!section.text_content().contains("DMM-X"));
    }

    #[tokio::test]
    async fn test_relative_mode_links() {
        let (fetcher, _) = CannedFetcher::new(&[("data/tools_data.json", Ok(CATALOG)), ("data/tools_icons.json", Ok(ICONS))]);
        let links = LinkPolicy {
            base_url_mode: BaseUrlMode::Relative,
            ..Default::default()
        };
        let loader = CatalogLoader::new(Box::new(fetcher), CatalogSettings::default(), links);
        let mut doc = page();
        loader.load_into(&mut doc).await.unwrap();

        let buttons = doc.query_class("btn-primary");
        assert_eq!(buttons.len(), 1);
        assert_eq!(doc.element_at(&buttons[0]).unwrap().attribute("href"), Some("tools/dmmx"));
    }

    #[tokio::test]
    async fn test_missing_render_target() {
        let (loader, requests) = loader(&[]);
        let mut doc = Document::default();
        let err = loader.load_into(&mut doc).await.unwrap_err();
        assert!(matches!(err, ToolshelfError::MissingElement(_)));
        assert!(requests.lock().unwrap().is_empty());
    }
}
