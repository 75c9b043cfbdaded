//! Markup builders for the catalog section.

use std::fmt::Display;

use super::links::LinkPolicy;
use super::model::{IconMap, IconMapExt, ToolCatalog, ToolEntry};
use crate::dom::{Element, Node};

pub const GRID_CLASS: &str = "row row-cols-1 row-cols-sm-2 row-cols-md-3 g-3";
pub const FAILURE_TITLE: &str = "Failed to load tools data!";

/// Render every category in catalog order: heading block, rule, card grid.
pub fn render_catalog(catalog: &ToolCatalog, icons: &IconMap, links: &LinkPolicy) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(catalog.len() * 3);
    for (category, tools) in catalog.iter() {
        nodes.push(category_heading(category, icons.icon_for(category)).into());
        nodes.push(Element::new("hr").with_class("mt-2").into());
        nodes.push(tool_grid(tools, links).into());
    }
    nodes
}

pub fn category_heading(category: &str, icon: &str) -> Element {
    let icon_class = format!("bi {}", icon);
    Element::new("div")
        .with_class("d-flex flex-row gap-2 justify-content-between")
        .with_child(Element::new("h4").with_class("m-0").with_text(category))
        .with_child(
            Element::new("i")
                .with_class(icon_class.trim_end())
                .with_attr("title", category),
        )
}

pub fn tool_grid(tools: &[ToolEntry], links: &LinkPolicy) -> Element {
    tools
        .iter()
        .fold(Element::new("div").with_class(GRID_CLASS), |grid, tool| {
            grid.with_child(tool_card(tool, links))
        })
}

pub fn tool_card(tool: &ToolEntry, links: &LinkPolicy) -> Element {
    let source = Element::new("a")
        .with_attr("href", links.source_link(&tool.url))
        .with_class("btn btn-outline-primary mt-auto")
        .with_attr("target", "_blank")
        .with_attr("title", "View on GitHub")
        .with_child(Element::new("i").with_class("bi bi-github me-1"))
        .with_text(" GitHub");

    let open = Element::new("a")
        .with_attr("href", links.tool_link(&tool.url))
        .with_class("btn btn-primary mt-auto")
        .with_attr("target", "_blank")
        .with_child(Element::new("i").with_class("bi bi-box-arrow-up-right"))
        .with_text(" Open Tool");

    let actions = Element::new("div")
        .with_class("d-flex flex-row gap-2 w-100 align-items-end justify-content-end")
        .with_child(source)
        .with_child(open);

    let body = Element::new("div")
        .with_class("card-body d-flex flex-column")
        .with_child(Element::new("h5").with_class("card-title mb-2").with_text(&tool.name))
        .with_child(Element::new("p").with_class("card-text flex-grow-1").with_text(&tool.description))
        .with_child(actions);

    Element::new("div")
        .with_class("col d-flex")
        .with_child(Element::new("div").with_class("card flex-fill").with_child(body))
}

/// Replacement content for the render target when loading fails.
pub fn failure_message(reason: &dyn Display) -> Vec<Node> {
    vec![
        Element::new("h5").with_class("text-danger").with_text(FAILURE_TITLE).into(),
        Element::new("code").with_text(format!("Reason: {}", reason)).into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html::outer_html;

    fn entry() -> ToolEntry {
        ToolEntry::new("DMM-X", "A tool", "tools/dmmx")
    }

    #[test]
    fn test_heading_with_icon() {
        let heading = category_heading("Multimeters", "bi-speedometer");
        assert_eq!(
            outer_html(&heading),
            r#"<div class="d-flex flex-row gap-2 justify-content-between"><h4 class="m-0">Multimeters</h4><i class="bi bi-speedometer" title="Multimeters"></i></div>"#
        );
    }

    #[test]
    fn test_heading_without_icon() {
        let heading = category_heading("Misc", "");
        let icon = heading.child_elements().nth(1).unwrap();
        assert_eq!(icon.attribute("class"), Some("bi"));
    }

    #[test]
    fn test_card_links() {
        let card = tool_card(&entry(), &LinkPolicy::default());
        let html = outer_html(&card);
        assert!(html.contains(r#"href="https://github.com/theonlyasdk/electronics-toolkit/tools/dmmx""#));
        assert!(html.contains(r#"href="http://127.0.0.1:8080/tools/dmmx""#));
        assert!(html.contains(r#"<h5 class="card-title mb-2">DMM-X</h5>"#));
        assert!(html.contains(r#"<p class="card-text flex-grow-1">A tool</p>"#));
    }

    #[test]
    fn test_card_text_is_escaped() {
        let tool = ToolEntry::new("<b>x</b>", "a & b", "u");
        let html = outer_html(&tool_card(&tool, &LinkPolicy::default()));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_grid_keeps_order() {
        let tools = vec![
            ToolEntry::new("First", "1", "a"),
            ToolEntry::new("Second", "2", "b"),
            ToolEntry::new("Third", "3", "c"),
        ];
        let grid = tool_grid(&tools, &LinkPolicy::default());
        let titles: Vec<String> = grid
            .child_elements()
            .filter_map(|col| col.child_elements().next())
            .filter_map(|card| card.child_elements().next())
            .filter_map(|body| body.child_elements().next())
            .map(|title| title.text_content())
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_failure_message() {
        let nodes = failure_message(&"HTTP 404 fetching data/tools_data.json");
        assert_eq!(nodes.len(), 2);
        let code = nodes[1].as_element().unwrap();
        assert_eq!(code.text_content(), "Reason: HTTP 404 fetching data/tools_data.json");
    }
}
