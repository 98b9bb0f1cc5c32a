//! Renderer: turns a [`Gallery`] into markup.
//!
//! Class names follow the Bootstrap grid/card utilities the host page's
//! stylesheet provides, plus the gallery's own `style-section`,
//! `featured-section` and `artwork-*` classes.

use crate::artwork::Artwork;
use crate::grouping::{Gallery, StyleGroup};
use crate::markup::{Element, Fragment};
use crate::styles::StyleRegistry;

/// Default cap on cards shown in the featured section
pub const FEATURED_MAX: usize = 5;

/// Message shown in place of the gallery when the data cannot be loaded
pub const LOAD_FAILURE_MESSAGE: &str = "Unable to load artwork at this time.";

/// Custom property the stylesheet reads for a section's background art
pub const SECTION_BG_PROPERTY: &str = "--section-bg-image";

const FEATURED_GRID_CLASS: &str = "row row-cols-1 row-cols-sm-2 row-cols-lg-3 row-cols-xl-4 g-4";
const STYLE_GRID_CLASS: &str = "row row-cols-1 row-cols-sm-2 row-cols-lg-3 g-4 artwork-grid";

/// Render a single artwork card
pub fn render_artwork_card(art: &Artwork) -> Element {
    let image = Element::new("div").class("ratio ratio-4x3").child(
        Element::new("img")
            .attr("src", art.image_src())
            .attr("alt", art.alt_text())
            .attr("loading", "lazy"),
    );

    let featured_badge = art.featured.then(|| {
        Element::new("span")
            .class("badge bg-warning text-dark ms-2")
            .text("Featured")
    });

    let heading = Element::new("div")
        .class("d-flex align-items-center justify-content-between mb-1")
        .child(Element::new("h3").class("h6 mb-0").text(art.display_title()))
        .child_opt(featured_badge);

    let meta = art
        .meta_line()
        .map(|m| Element::new("p").class("artwork-meta mb-2").text(m));

    let description = art
        .description()
        .map(|d| Element::new("p").class("artwork-description mb-0").text(d));

    let body = Element::new("div")
        .class("card-body d-flex flex-column")
        .child(heading)
        .child_opt(meta)
        .child_opt(description);

    Element::new("div").class("col").child(
        Element::new("article")
            .class("card artwork-card h-100")
            .child(image)
            .child(body),
    )
}

/// Render the featured section.
///
/// The badge counts every featured artwork while the grid shows at most
/// `max_cards` of them, in source order.
pub fn render_featured_section(featured: &[&Artwork], max_cards: usize) -> Element {
    let header = Element::new("div")
        .class("featured-section-header d-flex flex-wrap align-items-baseline justify-content-between gap-3 mb-3")
        .child(
            Element::new("div")
                .child(Element::new("h2").class("h3 mb-1").text("Featured Works"))
                .child(
                    Element::new("p")
                        .class("small text-muted mb-0")
                        .text("A selection of highlighted pieces from across all styles."),
                ),
        )
        .child(
            Element::new("span")
                .class("style-badge text-muted")
                .text(format!("{} total featured", featured.len())),
        );

    let grid = Element::new("div")
        .class(FEATURED_GRID_CLASS)
        .children(featured.iter().take(max_cards).map(|a| render_artwork_card(a)));

    Element::new("section")
        .class("featured-section")
        .child(Element::new("div").class("container").child(header).child(grid))
}

/// "1 piece", "2 pieces", "0 pieces"
pub fn piece_count(n: usize) -> String {
    if n == 1 {
        "1 piece".to_string()
    } else {
        format!("{} pieces", n)
    }
}

/// Render one style section
pub fn render_style_section(group: &StyleGroup<'_>, registry: &StyleRegistry) -> Element {
    let info = registry.resolve(&group.key);

    let description = (!info.description.is_empty()).then(|| {
        Element::new("p")
            .class("small text-muted mb-0")
            .text(info.description.as_str())
    });

    let header = Element::new("div").class("style-section-header").child(
        Element::new("div")
            .class("d-flex align-items-baseline justify-content-between gap-3")
            .child(
                Element::new("div")
                    .child(Element::new("h2").class("h3 mb-1").text(info.label.as_str()))
                    .child_opt(description),
            )
            .child(
                Element::new("span")
                    .class("style-badge text-muted d-none d-md-inline")
                    .text(piece_count(group.len())),
            ),
    );

    let grid = Element::new("div")
        .class(STYLE_GRID_CLASS)
        .children(group.artworks.iter().map(|a| render_artwork_card(a)));

    let mut section = Element::new("section")
        .class("style-section")
        .attr("data-style", group.key.as_str());

    if let Some(bg) = group.background {
        section.add_class("style-section-has-bg");
        section.set_attr("style", background_style(bg.image_src()));
    }

    section.child(Element::new("div").class("container").child(header).child(grid))
}

/// `--section-bg-image: url("<image>")`, with the path written as a CSS string
pub fn background_style(image: &str) -> String {
    let mut style = format!("{}: url(", SECTION_BG_PROPERTY);
    let _ = cssparser::serialize_string(image, &mut style);
    style.push(')');
    style
}

/// Render the whole gallery: the featured section (when any artwork is
/// featured) followed by one section per style in key order.
pub fn render_gallery(gallery: &Gallery<'_>, registry: &StyleRegistry, featured_max: usize) -> Fragment {
    let mut fragment = Fragment::new();
    if !gallery.featured.is_empty() {
        fragment.push(render_featured_section(&gallery.featured, featured_max));
    }
    for group in &gallery.groups {
        fragment.push(render_style_section(group, registry));
    }
    fragment
}

/// Fragment that replaces the gallery root's content after a load failure
pub fn render_load_failure() -> Fragment {
    let mut fragment = Fragment::new();
    fragment.push(
        Element::new("div")
            .class("container py-5 text-center text-muted")
            .text(LOAD_FAILURE_MESSAGE),
    );
    fragment
}
