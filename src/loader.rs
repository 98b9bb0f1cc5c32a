//! Data loader: retrieves the artwork collection over HTTP or from disk.
//!
//! The retrieval is the only await point in a page render. There is no retry
//! and no partial result; any failure surfaces as [`Error::LoadError`].

use crate::artwork::Artwork;
use crate::{Error, GalleryConfig, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Where the artwork document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(Url),
    File(PathBuf),
}

impl DataSource {
    /// Resolve `relative` against `base`.
    ///
    /// An `http`/`https` base is joined as a URL; anything else is treated as a
    /// directory on the local filesystem.
    pub fn resolve(base: &str, relative: &str) -> Result<Self> {
        if let Ok(base_url) = Url::parse(base) {
            if matches!(base_url.scheme(), "http" | "https") {
                // Url::join drops the last segment unless the base ends with '/'
                let base_url = if base_url.path().ends_with('/') {
                    base_url
                } else {
                    Url::parse(&format!("{}/", base_url.as_str()))
                        .map_err(|e| Error::ConfigError(format!("Invalid base URL {}: {}", base, e)))?
                };
                let joined = base_url.join(relative).map_err(|e| {
                    Error::ConfigError(format!("Cannot resolve {} against {}: {}", relative, base, e))
                })?;
                return Ok(DataSource::Url(joined));
            }
        }
        Ok(DataSource::File(PathBuf::from(base).join(relative)))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(u) => write!(f, "{}", u),
            DataSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Parse an artwork document. The top level must be a JSON array.
pub fn parse_artworks(text: &str) -> Result<Vec<Artwork>> {
    serde_json::from_str(text).map_err(|e| Error::LoadError(format!("Malformed artwork JSON: {}", e)))
}

/// Fetches artwork documents with a preconfigured HTTP client
pub struct DataLoader {
    client: Client,
}

impl DataLoader {
    pub fn new(config: &GalleryConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::ConfigError(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::ConfigError(format!("Invalid header value for {}: {}", name, e)))?;
            headers.insert(name, value);
        }
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::ConfigError(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Retrieve and parse the artwork collection, in source order
    pub async fn load(&self, source: &DataSource) -> Result<Vec<Artwork>> {
        log::debug!("Loading artworks from {}", source);
        let text = match source {
            DataSource::Url(url) => self.fetch(url).await?,
            DataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| Error::LoadError(format!("Failed to read {}: {}", path.display(), e)))?,
        };
        let artworks = parse_artworks(&text)?;
        log::debug!("Loaded {} artworks from {}", artworks.len(), source);
        Ok(artworks)
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::LoadError(format!("Failed to fetch {}: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::LoadError(format!("Could not load {}: HTTP status {}", url, status)));
        }

        resp.text()
            .await
            .map_err(|e| Error::LoadError(format!("Failed to read response body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_against_http_base() {
        let src = DataSource::resolve("http://example.com/gallery", "data/artworks.json").unwrap();
        assert_eq!(
            src,
            DataSource::Url(Url::parse("http://example.com/gallery/data/artworks.json").unwrap())
        );

        let src = DataSource::resolve("https://example.com/", "data/artworks.json").unwrap();
        assert_eq!(src.to_string(), "https://example.com/data/artworks.json");
    }

    #[test]
    fn resolve_against_directory() {
        let src = DataSource::resolve("site", "data/artworks.json").unwrap();
        assert_eq!(src, DataSource::File(PathBuf::from("site/data/artworks.json")));
    }

    #[test]
    fn parse_rejects_non_array() {
        let err = parse_artworks(r#"{"title": "A"}"#).unwrap_err();
        assert!(err.is_load_error());
        let err = parse_artworks("not json").unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn parse_keeps_source_order() {
        let arts = parse_artworks(r#"[{"title": "B"}, {"title": "A"}, {}]"#).unwrap();
        let titles: Vec<_> = arts.iter().map(|a| a.display_title()).collect();
        assert_eq!(titles, vec!["B", "A", "Untitled"]);
    }

    #[test]
    fn invalid_header_is_config_error() {
        let mut cfg = GalleryConfig::default();
        cfg.headers.insert("bad header".into(), "x".into());
        assert!(matches!(DataLoader::new(&cfg), Err(Error::ConfigError(_))));
    }

    #[tokio::test]
    async fn missing_file_is_load_error() {
        let loader = DataLoader::new(&GalleryConfig::default()).unwrap();
        let src = DataSource::File(PathBuf::from("/nonexistent/artgallery/data.json"));
        let err = loader.load(&src).await.unwrap_err();
        assert!(err.is_load_error());
    }
}
