//! Grouping and ordering of the artwork collection.
//!
//! Every function here is pure and borrows from the loaded collection; nothing
//! is cloned or mutated.

use crate::artwork::Artwork;
use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Artworks flagged `featured: true`, in source order
pub fn select_featured(artworks: &[Artwork]) -> Vec<&Artwork> {
    artworks.iter().filter(|a| a.featured).collect()
}

/// Partition by resolved style key. Buckets keep insertion order; the map
/// iterates keys in ascending order.
pub fn group_by_style(artworks: &[Artwork]) -> BTreeMap<String, Vec<&Artwork>> {
    let mut groups: BTreeMap<String, Vec<&Artwork>> = BTreeMap::new();
    for art in artworks {
        groups.entry(art.style_key().to_string()).or_default().push(art);
    }
    groups
}

/// Title comparison under the root Unicode collation at secondary strength:
/// case is ignored, accents are not.
pub struct TitleCollator {
    collator: Option<Collator>,
}

impl TitleCollator {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                log::warn!("Unicode collation unavailable ({:?}); ordering titles by lowercase", e);
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

impl Default for TitleCollator {
    fn default() -> Self {
        Self::new()
    }
}

fn display_order(collator: &TitleCollator, a: &Artwork, b: &Artwork) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| collator.compare(a.sort_title(), b.sort_title()))
}

/// Featured first, then title in collation order. Stable.
pub fn order_within_group<'a>(group: &[&'a Artwork]) -> Vec<&'a Artwork> {
    order_within_group_with(&TitleCollator::new(), group)
}

pub fn order_within_group_with<'a>(collator: &TitleCollator, group: &[&'a Artwork]) -> Vec<&'a Artwork> {
    let mut ordered = group.to_vec();
    ordered.sort_by(|a, b| display_order(collator, a, b));
    ordered
}

/// First artwork in the group's original order that is marked as background
/// and has an image.
pub fn pick_background<'a>(group: &[&'a Artwork]) -> Option<&'a Artwork> {
    group
        .iter()
        .copied()
        .find(|a| a.background && !a.image_src().is_empty())
}

/// One style section's worth of data
#[derive(Debug, Clone)]
pub struct StyleGroup<'a> {
    pub key: String,
    /// Display order
    pub artworks: Vec<&'a Artwork>,
    pub background: Option<&'a Artwork>,
}

impl StyleGroup<'_> {
    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }
}

/// The collection arranged for rendering
#[derive(Debug, Clone)]
pub struct Gallery<'a> {
    /// Every featured artwork in source order (not capped)
    pub featured: Vec<&'a Artwork>,
    /// Style groups by ascending key
    pub groups: Vec<StyleGroup<'a>>,
}

impl<'a> Gallery<'a> {
    pub fn build(artworks: &'a [Artwork]) -> Self {
        let featured = select_featured(artworks);
        let collator = TitleCollator::new();
        let groups = group_by_style(artworks)
            .into_iter()
            .map(|(key, members)| StyleGroup {
                artworks: order_within_group_with(&collator, &members),
                background: pick_background(&members),
                key,
            })
            .collect();
        Self { featured, groups }
    }

    pub fn style_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn artwork_count(&self) -> usize {
        self.groups.iter().map(StyleGroup::len).sum()
    }
}
