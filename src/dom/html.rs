//! HTML serialization.

use super::node::{Element, Node};

const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr"];

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

pub fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag());

    let inline_style = style_value(el);
    let mut wrote_style = false;
    for (name, value) in el.attributes() {
        if name == "style" {
            if let Some(extra) = &inline_style {
                let merged = format!("{}; {}", value.trim_end_matches(';'), extra);
                push_attr(out, name, &merged);
                wrote_style = true;
                continue;
            }
        }
        push_attr(out, name, value);
    }
    if !wrote_style {
        if let Some(style) = &inline_style {
            push_attr(out, "style", style);
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag()) {
        return;
    }

    for child in el.children() {
        match child {
            Node::Text(t) => out.push_str(&escape_text(t)),
            Node::Element(e) => write_element(e, out),
        }
    }

    out.push_str("</");
    out.push_str(el.tag());
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

fn style_value(el: &Element) -> Option<String> {
    if el.style().is_empty() {
        return None;
    }
    Some(
        el.style()
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

/// Serialize a single element (outerHTML).
pub fn outer_html(el: &Element) -> String {
    let mut out = String::new();
    write_element(el, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn test_escape_attr_quotes() {
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_void_element_has_no_close_tag() {
        let el = Element::new("hr").with_class("mt-2");
        assert_eq!(outer_html(&el), r#"<hr class="mt-2">"#);
    }

    #[test]
    fn test_nested_markup() {
        let el = Element::new("a")
            .with_attr("href", "https://example.com/a?b=1&c=2")
            .with_child(Element::new("i").with_class("bi bi-github"))
            .with_text(" GitHub");
        assert_eq!(
            outer_html(&el),
            r#"<a href="https://example.com/a?b=1&amp;c=2"><i class="bi bi-github"></i> GitHub</a>"#
        );
    }

    #[test]
    fn test_style_properties_serialized() {
        let mut el = Element::new("a");
        el.set_style_property("--mouse-x", "4px");
        el.set_style_property("--mouse-y", "-2px");
        assert_eq!(outer_html(&el), r#"<a style="--mouse-x: 4px; --mouse-y: -2px"></a>"#);
    }

    #[test]
    fn test_style_merged_with_attribute() {
        let mut el = Element::new("a").with_attr("style", "color: red;");
        el.set_style_property("--mouse-x", "1px");
        assert_eq!(outer_html(&el), r#"<a style="color: red; --mouse-x: 1px"></a>"#);
    }
}
