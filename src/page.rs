//! Page shell: the document skeleton and the start-up sequence tying the
//! theme controller, catalog loader and ripple binder together.

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogLoader, LoadOutcome};
use crate::dom::{Document, Element};
use crate::error::Result;
use crate::ripple::PointerRipple;
use crate::theme::{ColorSchemeProbe, PreferenceStore, ResolvedTheme, ThemeController, ThemePreference};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub title: String,
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "Electronics Toolkit".to_string(),
            stylesheets: vec![
                "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css".to_string(),
                "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css".to_string(),
                "css/style.css".to_string(),
            ],
            scripts: vec!["https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js".to_string()],
        }
    }
}

/// Build the page skeleton: navbar with the theme menu, and an empty render
/// target holding a loading placeholder.
pub fn scaffold(settings: &PageSettings, render_target: &str, option_class: &str) -> Document {
    let mut head = Element::new("head")
        .with_child(Element::new("meta").with_attr("charset", "utf-8"))
        .with_child(
            Element::new("meta")
                .with_attr("name", "viewport")
                .with_attr("content", "width=device-width, initial-scale=1"),
        )
        .with_child(Element::new("title").with_text(&settings.title));
    for href in &settings.stylesheets {
        head.append_child(Element::new("link").with_attr("rel", "stylesheet").with_attr("href", href));
    }

    let menu = ThemePreference::ALL.iter().fold(
        Element::new("ul").with_class("dropdown-menu dropdown-menu-end"),
        |menu, pref| {
            menu.with_child(
                Element::new("li").with_child(
                    Element::new("a")
                        .with_class(format!("dropdown-item {}", option_class))
                        .with_attr("href", "#")
                        .with_attr("data-theme", pref.as_str())
                        .with_text(capitalize(pref.as_str())),
                ),
            )
        },
    );

    let nav = Element::new("nav").with_class("navbar border-bottom").with_child(
        Element::new("div")
            .with_class("container")
            .with_child(Element::new("span").with_class("navbar-brand").with_text(&settings.title))
            .with_child(
                Element::new("div")
                    .with_class("dropdown")
                    .with_child(
                        Element::new("button")
                            .with_class("btn btn-outline-secondary dropdown-toggle")
                            .with_attr("type", "button")
                            .with_attr("data-bs-toggle", "dropdown")
                            .with_child(Element::new("i").with_class("bi bi-circle-half me-1"))
                            .with_text(" Theme"),
                    )
                    .with_child(menu),
            ),
    );

    let main = Element::new("main").with_class("container my-4").with_child(
        Element::new("div")
            .with_id(render_target)
            .with_child(Element::new("p").with_class("text-muted").with_text("Loading tools...")),
    );

    let mut body = Element::new("body").with_child(nav).with_child(main);
    for src in &settings.scripts {
        body.append_child(Element::new("script").with_attr("src", src));
    }

    Document::new(
        Element::new("html")
            .with_attr("lang", "en")
            .with_child(head)
            .with_child(body),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result of a full page start-up.
#[derive(Debug)]
pub struct PageReport {
    pub theme: ResolvedTheme,
    pub outcome: LoadOutcome,
    /// Buttons bound by the ripple binder after the render
    pub ripple_bound: usize,
}

/// Run the start-up sequence on `doc`: theme first (synchronous), then the
/// catalog load, then ripple binding for the buttons the render inserted.
/// Ripple binding is skipped when the load failed.
pub async fn initialize<S: PreferenceStore, P: ColorSchemeProbe>(
    doc: &mut Document,
    theme: &mut ThemeController<S, P>,
    loader: &CatalogLoader,
    ripple: &PointerRipple,
) -> Result<PageReport> {
    let resolved = theme.initialize(doc)?;
    let outcome = loader.load_into(doc).await?;

    let ripple_bound = if outcome.is_rendered() {
        ripple.register(doc)
    } else {
        0
    };
    info!("Page ready: theme={}, ripple bound to {} buttons", resolved, ripple_bound);

    Ok(PageReport {
        theme: resolved,
        outcome,
        ripple_bound,
    })
}
