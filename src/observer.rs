//! Scroll observer: tracks which style section dominates the viewport and
//! keeps the page-level marker class in sync.
//!
//! The marker is owned by the caller (a body `class` attribute, a signal, a
//! plain `String`) and rewritten through [`compute_marker`]. The observer
//! itself only remembers which sections are currently past the visibility
//! threshold.

use std::collections::HashSet;

/// Fraction of a section that must be visible for it to become active
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Prefix of the page-level marker classes
pub const MARKER_PREFIX: &str = "style-";

/// Drop every `style-*` class from `previous` and append `style-<key>` when
/// `active_key` is non-empty. Other classes keep their order.
pub fn compute_marker(previous: &str, active_key: Option<&str>) -> String {
    let mut classes: Vec<String> = previous
        .split_whitespace()
        .filter(|c| !c.starts_with(MARKER_PREFIX))
        .map(str::to_string)
        .collect();
    if let Some(key) = active_key.filter(|k| !k.is_empty()) {
        classes.push(format!("{}{}", MARKER_PREFIX, key));
    }
    classes.join(" ")
}

/// Visibility report for one observed section
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    /// `data-style` of the section, if it has one
    pub style_key: Option<String>,
    /// Visible fraction of the section, 0.0..=1.0
    pub visible_fraction: f64,
}

impl IntersectionEntry {
    pub fn new(style_key: &str, visible_fraction: f64) -> Self {
        Self {
            style_key: Some(style_key.to_string()),
            visible_fraction,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollObserver {
    threshold: f64,
    sections: Vec<String>,
    active: HashSet<String>,
}

impl ScrollObserver {
    /// Start observing `sections`.
    ///
    /// Returns `None` when there is nothing to observe or the environment
    /// cannot report intersections; callers treat that as a no-op.
    pub fn new<I, S>(sections: I, threshold: f64, supported: bool) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !supported {
            log::debug!("Intersection observing unavailable; scroll marker disabled");
            return None;
        }
        let sections: Vec<String> = sections.into_iter().map(Into::into).collect();
        if sections.is_empty() {
            return None;
        }
        Some(Self {
            threshold,
            sections,
            active: HashSet::new(),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains(key)
    }

    /// Process one batch of entries in order. Every section that crosses into
    /// the active state rewrites `marker`; the last one wins. Returns whether
    /// the marker was rewritten.
    pub fn handle(&mut self, entries: &[IntersectionEntry], marker: &mut String) -> bool {
        let mut changed = false;
        for entry in entries {
            let key = entry.style_key.as_deref().unwrap_or("");
            if !key.is_empty() && !self.sections.iter().any(|s| s == key) {
                continue;
            }
            if entry.visible_fraction >= self.threshold {
                if self.active.insert(key.to_string()) {
                    *marker = compute_marker(marker.as_str(), entry.style_key.as_deref());
                    changed = true;
                }
            } else {
                self.active.remove(key);
            }
        }
        changed
    }
}

const OBSERVER_SCRIPT: &str = include_str!("observer.js");

/// Browser-side binding of the marker rule, with `threshold` baked in
pub fn observer_script(threshold: f64) -> String {
    OBSERVER_SCRIPT.replace("__THRESHOLD__", &threshold.to_string())
}
