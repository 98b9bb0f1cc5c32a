//! Artgallery
//!
//! Renders a static art gallery page: loads a JSON list of artworks, groups
//! them by style and mounts the resulting sections into a host HTML page,
//! together with a small scroll observer that marks the dominant style
//! section on `<body>`.
//!
//! # Pipeline
//!
//! - [`loader`] retrieves `data/artworks.json` relative to a base URL or directory
//! - [`grouping`] selects featured works, groups by style and orders each group
//! - [`render`] turns the grouped data into a [`markup::Fragment`]
//! - [`page`] grafts the fragment into the host page
//! - [`observer`] computes the `style-<key>` marker and emits its browser binding
//!
//! Everything between the load and the page edit is a pure function, so the
//! rendering can be tested without a browser or network.
//!
//! # Example
//!
//! ```no_run
//! use artgallery::{GalleryConfig, StyleRegistry};
//! use artgallery::page::HostPage;
//!
//! # async fn run() -> artgallery::Result<()> {
//! let config = GalleryConfig {
//!     base: "https://gallery.example.com/".to_string(),
//!     ..Default::default()
//! };
//! let site = artgallery::render_site(&config, &StyleRegistry::default(), HostPage::default()).await?;
//! println!("{}", site.page.as_str());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

pub mod artwork;
pub mod grouping;
pub mod loader;
pub mod markup;
pub mod observer;
pub mod page;
pub mod render;
pub mod styles;

pub use artwork::Artwork;
pub use grouping::Gallery;
pub use styles::{StyleInfo, StyleRegistry};

use chrono::Datelike;
use loader::{DataLoader, DataSource};
use page::HostPage;

/// Location of the artwork document relative to the site base
pub const DEFAULT_DATA_LOCATION: &str = "data/artworks.json";

/// Configuration for a gallery render
///
/// Defaults match the stock page layout: data at `data/artworks.json` next to
/// the page, five featured cards, a 0.4 visibility threshold and the
/// `gallery-root` / `footer-year` mount points.
///
/// # Examples
///
/// ```
/// let cfg = artgallery::GalleryConfig::default();
/// assert_eq!(cfg.featured_max, 5);
/// assert_eq!(cfg.root_id, "gallery-root");
/// ```
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Site base: an http(s) URL or a local directory
    pub base: String,
    /// Artwork document path relative to `base`
    pub data_location: String,
    /// Cards shown in the featured section
    pub featured_max: usize,
    /// Visible fraction at which a style section becomes active
    pub observer_threshold: f64,
    /// Whether to embed the scroll observer script in the page
    pub emit_observer_script: bool,
    /// Id of the element the gallery is mounted into
    pub root_id: String,
    /// Id of the element that receives the current year
    pub footer_year_id: String,
    /// Year written to the footer; the current local year when `None`
    pub footer_year: Option<i32>,
    /// User agent string to send with requests
    pub user_agent: String,
    /// Custom HTTP headers
    pub headers: HashMap<String, String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base: ".".to_string(),
            data_location: DEFAULT_DATA_LOCATION.to_string(),
            featured_max: render::FEATURED_MAX,
            observer_threshold: observer::DEFAULT_THRESHOLD,
            emit_observer_script: true,
            root_id: "gallery-root".to_string(),
            footer_year_id: "footer-year".to_string(),
            footer_year: None,
            user_agent: format!("artgallery/{}", env!("CARGO_PKG_VERSION")),
            headers: HashMap::new(),
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.observer_threshold) {
            return Err(Error::ConfigError(format!(
                "observer threshold must be within 0..=1, got {}",
                self.observer_threshold
            )));
        }
        if self.root_id.is_empty() {
            return Err(Error::ConfigError("root id must not be empty".into()));
        }
        if self.data_location.is_empty() {
            return Err(Error::ConfigError("data location must not be empty".into()));
        }
        Ok(())
    }

    fn year(&self) -> i32 {
        self.footer_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

/// What happened to the gallery root during a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Sections were appended to the root
    Rendered { sections: usize, artworks: usize },
    /// The data could not be loaded; the root shows the fallback message
    LoadFailed,
    /// The page has no gallery root; nothing was loaded
    NoRoot,
}

/// A finished page and how it was produced
#[derive(Debug, Clone)]
pub struct SiteRender {
    pub page: HostPage,
    pub outcome: RenderOutcome,
}

/// Group, render and append `artworks` to the page's gallery root.
///
/// The observer script is attached when at least one style section exists.
pub fn mount_gallery(
    page: &mut HostPage,
    artworks: &[Artwork],
    config: &GalleryConfig,
    registry: &StyleRegistry,
) -> RenderOutcome {
    let gallery = Gallery::build(artworks);
    let fragment = render::render_gallery(&gallery, registry, config.featured_max);

    if !page.append_to(&config.root_id, &fragment.to_html()) {
        return RenderOutcome::NoRoot;
    }

    let style_sections = gallery.groups.len();
    if config.emit_observer_script && style_sections > 0 {
        page.attach_script(&observer::observer_script(config.observer_threshold));
    }

    log::info!(
        "Rendered {} artworks in {} style sections ({} featured)",
        gallery.artwork_count(),
        style_sections,
        gallery.featured.len()
    );

    RenderOutcome::Rendered {
        sections: fragment.nodes.len(),
        artworks: gallery.artwork_count(),
    }
}

/// Render the gallery into `page`.
///
/// Sets the footer year, then loads the artworks and mounts them. A load
/// failure is logged and replaces the root's content with the fallback
/// message; every other error is returned, including a root that cannot
/// be written.
pub async fn render_site(config: &GalleryConfig, registry: &StyleRegistry, mut page: HostPage) -> Result<SiteRender> {
    config.validate()?;

    if !page.set_text(&config.footer_year_id, &config.year().to_string()) {
        log::debug!("No #{} element; footer year skipped", config.footer_year_id);
    }

    if !page.has_element(&config.root_id) {
        log::warn!("No #{} element in host page; gallery skipped", config.root_id);
        return Ok(SiteRender {
            page,
            outcome: RenderOutcome::NoRoot,
        });
    }

    let source = DataSource::resolve(&config.base, &config.data_location)?;
    let loader = DataLoader::new(config)?;

    let outcome = match loader.load(&source).await {
        Ok(artworks) => match mount_gallery(&mut page, &artworks, config, registry) {
            RenderOutcome::NoRoot => {
                return Err(Error::PageError(format!(
                    "Could not write the gallery into #{}",
                    config.root_id
                )))
            }
            outcome => outcome,
        },
        Err(e) if e.is_load_error() => {
            log::error!("{}", e);
            if !page.replace_content(&config.root_id, &render::render_load_failure().to_html()) {
                return Err(Error::PageError(format!(
                    "Could not write the load failure message into #{}",
                    config.root_id
                )));
            }
            RenderOutcome::LoadFailed
        }
        Err(e) => return Err(e),
    };

    Ok(SiteRender { page, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GalleryConfig::default();
        assert_eq!(config.data_location, "data/artworks.json");
        assert_eq!(config.featured_max, 5);
        assert!((config.observer_threshold - 0.4).abs() < f64::EPSILON);
        assert!(config.emit_observer_script);
        assert!(config.user_agent.starts_with("artgallery/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        let config = GalleryConfig {
            observer_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn mount_appends_sections_and_script() {
        let artworks = loader::parse_artworks(
            r#"[{"title": "A", "style": "oil", "featured": true}, {"title": "B", "style": "oil"}]"#,
        )
        .unwrap();
        let mut page = HostPage::default();
        let outcome = mount_gallery(&mut page, &artworks, &GalleryConfig::default(), &StyleRegistry::default());
        assert_eq!(outcome, RenderOutcome::Rendered { sections: 2, artworks: 2 });
        assert!(page.as_str().contains("threshold: 0.4"));
    }

    #[test]
    fn mount_without_artworks_skips_script() {
        let mut page = HostPage::default();
        let outcome = mount_gallery(&mut page, &[], &GalleryConfig::default(), &StyleRegistry::default());
        assert_eq!(outcome, RenderOutcome::Rendered { sections: 0, artworks: 0 });
        assert!(!page.as_str().contains("<script>"));
    }

    #[tokio::test]
    async fn page_without_root_is_untouched_apart_from_year() {
        let config = GalleryConfig {
            footer_year: Some(2031),
            base: "/nonexistent/artgallery".into(),
            ..Default::default()
        };
        let page = HostPage::new(r#"<html><body><span id="footer-year"></span></body></html>"#);
        let site = render_site(&config, &StyleRegistry::default(), page).await.unwrap();
        assert_eq!(site.outcome, RenderOutcome::NoRoot);
        assert_eq!(site.page.inner_html("footer-year").as_deref(), Some("2031"));
    }

    #[tokio::test]
    async fn missing_data_file_renders_fallback() {
        let config = GalleryConfig {
            base: "/nonexistent/artgallery".into(),
            ..Default::default()
        };
        let site = render_site(&config, &StyleRegistry::default(), HostPage::default()).await.unwrap();
        assert_eq!(site.outcome, RenderOutcome::LoadFailed);
        assert_eq!(
            site.page.inner_html("gallery-root").unwrap(),
            r#"<div class="container py-5 text-center text-muted">Unable to load artwork at this time.</div>"#
        );
    }

    #[tokio::test]
    async fn fallback_replaces_root_with_spaced_id() {
        let config = GalleryConfig {
            base: "/nonexistent/artgallery".into(),
            ..Default::default()
        };
        let page = HostPage::new(r#"<html><body><main id = "gallery-root"><p>Loading</p></main></body></html>"#);
        let site = render_site(&config, &StyleRegistry::default(), page).await.unwrap();
        assert_eq!(site.outcome, RenderOutcome::LoadFailed);
        assert!(!site.page.as_str().contains("<p>Loading</p>"));
        assert_eq!(
            site.page.inner_html("gallery-root").unwrap(),
            render::render_load_failure().to_html()
        );
    }

    #[test]
    fn mount_into_upper_case_id_root() {
        let artworks = loader::parse_artworks(r#"[{"title": "A", "style": "oil"}]"#).unwrap();
        let mut page = HostPage::new(r#"<html><body><main ID="gallery-root"></main></body></html>"#);
        let outcome = mount_gallery(&mut page, &artworks, &GalleryConfig::default(), &StyleRegistry::default());
        assert_eq!(outcome, RenderOutcome::Rendered { sections: 1, artworks: 1 });
        let inner = page.inner_html("gallery-root").unwrap();
        assert!(inner.starts_with(r#"<section class="style-section" data-style="oil">"#));
    }
}
