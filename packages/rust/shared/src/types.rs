//! Core domain types for breadcrumb trails.

use serde::{Deserialize, Serialize};

use crate::error::AutocrumbError;

// ---------------------------------------------------------------------------
// Crumb
// ---------------------------------------------------------------------------

/// One (label, URL) pair in a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    label: String,
    url: String,
}

impl Crumb {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Human-readable text shown for this crumb.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Absolute URL this crumb links to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Return a copy of this crumb with a different label.
    pub fn relabeled(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: self.url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Trail
// ---------------------------------------------------------------------------

/// An ordered breadcrumb trail.
///
/// The first crumb is always the home crumb and the last one is the current
/// page, so a trail is never empty. It serializes as a plain array of crumbs;
/// deserializing an empty array fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Crumb>", try_from = "Vec<Crumb>")]
pub struct Trail(Vec<Crumb>);

impl TryFrom<Vec<Crumb>> for Trail {
    type Error = AutocrumbError;

    fn try_from(crumbs: Vec<Crumb>) -> Result<Self, Self::Error> {
        if crumbs.is_empty() {
            return Err(AutocrumbError::validation(
                "a breadcrumb trail needs at least a home crumb",
            ));
        }
        Ok(Self(crumbs))
    }
}

impl From<Trail> for Vec<Crumb> {
    fn from(trail: Trail) -> Self {
        trail.0
    }
}

impl Trail {
    /// Start a trail from its home crumb.
    pub fn new(home: Crumb) -> Self {
        Self(vec![home])
    }

    pub fn push(&mut self, crumb: Crumb) {
        self.0.push(crumb);
    }

    /// Replace the label of the current-page crumb.
    pub fn relabel_last(&mut self, label: impl Into<String>) {
        if let Some(last) = self.0.last_mut() {
            *last = last.relabeled(label);
        }
    }

    /// Number of crumbs, always at least one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Crumb at a zero-based position.
    pub fn get(&self, index: usize) -> Option<&Crumb> {
        self.0.get(index)
    }

    pub fn home(&self) -> &Crumb {
        &self.0[0]
    }

    pub fn current(&self) -> &Crumb {
        &self.0[self.0.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Crumb> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Crumb] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Trail {
    type Item = &'a Crumb;
    type IntoIter = std::slice::Iter<'a, Crumb>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for Trail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, crumb) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            f.write_str(&crumb.label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trail {
        let mut trail = Trail::new(Crumb::new("Home", "https://example.com/"));
        trail.push(Crumb::new("Blog", "https://example.com/blog"));
        trail
    }

    #[test]
    fn relabel_last_keeps_url() {
        let mut trail = sample();
        trail.relabel_last("Articles");
        assert_eq!(trail.current().label(), "Articles");
        assert_eq!(trail.current().url(), "https://example.com/blog");
        assert_eq!(trail.home().label(), "Home");
    }

    #[test]
    fn display_joins_labels() {
        assert_eq!(sample().to_string(), "Home > Blog");
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_value(sample()).expect("serialize trail");
        assert_eq!(json[1]["label"], "Blog");
        assert_eq!(json[0]["url"], "https://example.com/");
        assert_eq!(json.as_array().map(Vec::len), Some(2));

        let back: Trail = serde_json::from_value(json).expect("deserialize trail");
        assert_eq!(back, sample());
    }

    #[test]
    fn empty_array_is_not_a_trail() {
        let err = serde_json::from_str::<Trail>("[]").unwrap_err();
        assert!(err.to_string().contains("at least a home crumb"), "{err}");
        assert!(Trail::try_from(Vec::new()).is_err());
    }
}
