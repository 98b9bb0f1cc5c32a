//! Host page adapter: binds rendered markup to an HTML document.
//!
//! Lookups and edits both go through `scraper`'s parsed tree. An edit parses
//! the markup as a body fragment, grafts its nodes under the target element
//! and serializes the document back to source.

use crate::markup::escape;
use crate::{Error, Result};
use ego_tree::{NodeId, NodeRef, Tree};
use scraper::{ElementRef, Html, Node, Selector};
use std::path::Path;

/// Page used when no host page is supplied
pub const DEFAULT_HOST_PAGE: &str = include_str!("index.html");

/// An HTML document the gallery is mounted into
#[derive(Debug, Clone)]
pub struct HostPage {
    source: String,
}

impl Default for HostPage {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_PAGE)
    }
}

impl HostPage {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::PageError(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(Self::new(source))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn into_string(self) -> String {
        self.source
    }

    /// Whether an element with this id exists in the document
    pub fn has_element(&self, id: &str) -> bool {
        let Some(selector) = id_selector(id) else {
            return false;
        };
        let document = Html::parse_document(&self.source);
        let found = document.select(&selector).next().is_some();
        found
    }

    /// Inner HTML of the element with this id, as the parser sees it
    pub fn inner_html(&self, id: &str) -> Option<String> {
        let selector = id_selector(id)?;
        let document = Html::parse_document(&self.source);
        let inner = document.select(&selector).next().map(|el| el.inner_html());
        inner
    }

    /// Append `html` after the element's existing content
    pub fn append_to(&mut self, id: &str, html: &str) -> bool {
        self.edit(id, html, false)
    }

    /// Replace the element's content with `html`
    pub fn replace_content(&mut self, id: &str, html: &str) -> bool {
        self.edit(id, html, true)
    }

    /// Replace the element's content with escaped `text`
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.replace_content(id, &escape(text))
    }

    /// Append an inline script as the last child of `<body>`
    pub fn attach_script(&mut self, script: &str) -> bool {
        let Ok(selector) = Selector::parse("body") else {
            return false;
        };
        let mut document = Html::parse_document(&self.source);
        let body = document.select(&selector).next().map(|el| el.id());
        match body {
            Some(body) => {
                graft(&mut document.tree, body, &format!("<script>\n{}</script>", script));
                self.source = serialize(&document);
                true
            }
            None => {
                log::warn!("Host page has no <body>; script not attached");
                false
            }
        }
    }

    fn edit(&mut self, id: &str, html: &str, replace: bool) -> bool {
        let Some(selector) = id_selector(id) else {
            return false;
        };
        let mut document = Html::parse_document(&self.source);
        let target = document.select(&selector).next().map(|el| el.id());
        let Some(target) = target else {
            return false;
        };

        if replace {
            clear_children(&mut document.tree, target);
        }
        graft(&mut document.tree, target, html);
        self.source = serialize(&document);
        true
    }
}

fn id_selector(id: &str) -> Option<Selector> {
    Selector::parse(&format!("[id=\"{}\"]", id.replace('"', "\\\""))).ok()
}

fn clear_children(tree: &mut Tree<Node>, parent: NodeId) {
    let Some(mut node) = tree.get_mut(parent) else {
        return;
    };
    while let Some(mut child) = node.first_child() {
        child.detach();
    }
}

// Parse `html` in a body context and append its top-level nodes to `parent`.
fn graft(tree: &mut Tree<Node>, parent: NodeId, html: &str) {
    let fragment = Html::parse_fragment(html);
    copy_children(tree, *fragment.root_element(), parent);
}

fn copy_children(tree: &mut Tree<Node>, from: NodeRef<'_, Node>, to: NodeId) {
    for child in from.children() {
        let Some(mut parent) = tree.get_mut(to) else {
            return;
        };
        let copied = parent.append(child.value().clone()).id();
        copy_children(tree, child, copied);
    }
}

fn serialize(document: &Html) -> String {
    let mut out = String::with_capacity(1024);
    for node in document.tree.root().children() {
        match node.value() {
            Node::Doctype(doctype) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(doctype.name());
                out.push_str(">\n");
            }
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(&comment.comment);
                out.push_str("-->");
            }
            _ => {
                if let Some(element) = ElementRef::wrap(node) {
                    out.push_str(&element.html());
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Gallery</title></head>
<body class="home">
<main id="gallery-root" data-note="a > b"><p class="intro">Welcome</p><div><div>nested</div></div></main>
<footer>&copy; <span id='footer-year'>2000</span></footer>
</body>
</html>"#;

    #[test]
    fn finds_existing_elements() {
        let page = HostPage::new(PAGE);
        assert!(page.has_element("gallery-root"));
        assert!(page.has_element("footer-year"));
        assert!(!page.has_element("missing"));
    }

    #[test]
    fn append_keeps_existing_content() {
        let mut page = HostPage::new(PAGE);
        assert!(page.append_to("gallery-root", "<section>new</section>"));
        let inner = page.inner_html("gallery-root").unwrap();
        assert!(inner.starts_with(r#"<p class="intro">Welcome</p>"#));
        assert!(inner.ends_with("<section>new</section>"));
    }

    #[test]
    fn replace_drops_existing_content() {
        let mut page = HostPage::new(PAGE);
        assert!(page.replace_content("gallery-root", "<div>gone</div>"));
        assert_eq!(page.inner_html("gallery-root").unwrap(), "<div>gone</div>");
        assert!(page.as_str().contains("<footer>"));
    }

    #[test]
    fn set_text_escapes() {
        let mut page = HostPage::new(PAGE);
        assert!(page.set_text("footer-year", "2026 <now>"));
        assert_eq!(page.inner_html("footer-year").unwrap(), "2026 &lt;now&gt;");
    }

    #[test]
    fn missing_element_is_left_alone() {
        let mut page = HostPage::new("<html><body><p>hi</p></body></html>");
        assert!(!page.append_to("gallery-root", "<b>x</b>"));
        assert_eq!(page.as_str(), "<html><body><p>hi</p></body></html>");
    }

    #[test]
    fn similar_attribute_names_do_not_match() {
        let src = r#"<div data-id="gallery-root">a</div><div id="gallery-root">b</div>"#;
        let mut page = HostPage::new(src);
        assert!(page.replace_content("gallery-root", "c"));
        assert_eq!(page.inner_html("gallery-root").as_deref(), Some("c"));
        assert!(page.as_str().contains(r#"<div data-id="gallery-root">a</div>"#));
    }

    #[test]
    fn unquoted_id() {
        let mut page = HostPage::new("<body><main id=gallery-root class=x></main></body>");
        assert!(page.append_to("gallery-root", "ok"));
        assert_eq!(page.inner_html("gallery-root").as_deref(), Some("ok"));
    }

    #[test]
    fn upper_case_id_attribute() {
        let mut page = HostPage::new(r#"<body><main ID="gallery-root"></main></body>"#);
        assert!(page.has_element("gallery-root"));
        assert!(page.append_to("gallery-root", "<section>x</section>"));
        assert_eq!(page.inner_html("gallery-root").as_deref(), Some("<section>x</section>"));
    }

    #[test]
    fn spaces_around_id_equals() {
        let mut page = HostPage::new(r#"<body><main id = "gallery-root"><p>Loading</p></main></body>"#);
        assert!(page.replace_content("gallery-root", "<b>done</b>"));
        assert_eq!(page.inner_html("gallery-root").as_deref(), Some("<b>done</b>"));
        assert!(!page.as_str().contains("Loading"));
    }

    #[test]
    fn commented_out_id_is_ignored() {
        let src = r#"<!-- old: <div id="gallery-root"></div> --><body><main id="gallery-root"></main></body>"#;
        let mut page = HostPage::new(src);
        assert!(page.append_to("gallery-root", "<section>x</section>"));
        assert!(page.as_str().starts_with(r#"<!-- old: <div id="gallery-root"></div> -->"#));

        let document = Html::parse_document(page.as_str());
        let main = document.select(&Selector::parse("main").unwrap()).next().unwrap();
        assert_eq!(main.inner_html(), "<section>x</section>");
    }

    #[test]
    fn doctype_survives_edits() {
        let mut page = HostPage::new(PAGE);
        assert!(page.set_text("footer-year", "2025"));
        assert!(page.as_str().starts_with("<!DOCTYPE html>"));
        assert!(page.as_str().contains(r#"data-note="a > b""#));
    }

    #[test]
    fn script_goes_before_body_end() {
        let mut page = HostPage::new(PAGE);
        assert!(page.attach_script("console.log(1 < 2 && true);\n"));
        let document = Html::parse_document(page.as_str());
        let last = document
            .select(&Selector::parse("body > *").unwrap())
            .last()
            .unwrap();
        assert_eq!(last.value().name(), "script");
        assert!(page.as_str().contains("console.log(1 < 2 && true);"));

        let mut bare = HostPage::new("<p>x</p>");
        assert!(bare.attach_script("1;\n"));
        assert!(bare.as_str().ends_with("<script>\n1;\n</script></body></html>"));
    }

    #[test]
    fn default_page_has_mount_points() {
        let page = HostPage::default();
        assert!(page.has_element("gallery-root"));
        assert!(page.has_element("footer-year"));
    }
}
