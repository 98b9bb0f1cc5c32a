//! The artwork record as supplied by the gallery data file.
//!
//! Records are read-only to this crate. No schema is enforced: unknown fields
//! are ignored and a field holding an unexpected JSON type reads as absent, so
//! a sloppy record degrades gracefully instead of failing the whole load.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Style key used for artworks without a (non-empty) `style` field
pub const FALLBACK_STYLE: &str = "other";

/// Separator between the year, medium and size parts of a card's meta line
pub const META_SEPARATOR: &str = " • ";

/// A single artwork entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Artwork {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub medium: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub size: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub featured: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub background: bool,
}

impl Artwork {
    /// Title to display; "Untitled" when missing
    pub fn display_title(&self) -> &str {
        non_empty(&self.title).unwrap_or("Untitled")
    }

    /// Alt text for the card image; "Artwork" when there is no title
    pub fn alt_text(&self) -> &str {
        non_empty(&self.title).unwrap_or("Artwork")
    }

    /// Title used as the ordering key inside a style group
    pub fn sort_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Resolved style key (the literal field, or `"other"`)
    pub fn style_key(&self) -> &str {
        non_empty(&self.style).unwrap_or(FALLBACK_STYLE)
    }

    pub fn image_src(&self) -> &str {
        self.image.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    /// Year, medium and size joined by [`META_SEPARATOR`], skipping empty parts.
    /// Returns `None` when every part is missing.
    pub fn meta_line(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.year, &self.medium, &self.size]
            .into_iter()
            .filter_map(non_empty)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(META_SEPARATOR))
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// Strings pass through, numbers keep their textual form, anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// Only a literal `true` sets a flag.
fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Artwork {
        serde_json::from_str(json).expect("valid artwork json")
    }

    #[test]
    fn defaults_for_empty_record() {
        let art = parse("{}");
        assert_eq!(art.display_title(), "Untitled");
        assert_eq!(art.alt_text(), "Artwork");
        assert_eq!(art.style_key(), "other");
        assert_eq!(art.image_src(), "");
        assert!(!art.featured);
        assert!(!art.background);
        assert!(art.meta_line().is_none());
    }

    #[test]
    fn empty_style_falls_back_to_other() {
        let art = parse(r#"{"style": ""}"#);
        assert_eq!(art.style_key(), "other");
    }

    #[test]
    fn numeric_year_is_kept_as_text() {
        let art = parse(r#"{"year": 2021, "medium": "Oil on canvas"}"#);
        assert_eq!(art.meta_line().as_deref(), Some("2021 • Oil on canvas"));
    }

    #[test]
    fn meta_line_skips_missing_parts() {
        let art = parse(r#"{"year": "1999", "medium": "", "size": "30 x 40 cm"}"#);
        assert_eq!(art.meta_line().as_deref(), Some("1999 • 30 x 40 cm"));
    }

    #[test]
    fn only_literal_true_counts_as_flag() {
        let art = parse(r#"{"featured": "yes", "background": 1}"#);
        assert!(!art.featured);
        assert!(!art.background);

        let art = parse(r#"{"featured": true, "background": true}"#);
        assert!(art.featured);
        assert!(art.background);
    }

    #[test]
    fn unexpected_types_read_as_absent() {
        let art = parse(r#"{"title": ["a"], "image": null, "extra": {"x": 1}}"#);
        assert!(art.title.is_none());
        assert!(art.image.is_none());
    }
}
