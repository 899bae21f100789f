//! Writing a trail into marked elements of a document.
//!
//! Markup contract (attribute names are configurable, defaults shown):
//! - `fj-breadcrumb="auto"` marks the root; without it nothing happens.
//! - `fj-breadcrumb-home` on the root overrides the home label.
//! - `fj-breadcrumb="level-N"` (1-based) marks where crumb N goes.
//! - `fj-breadcrumb-label` on a level element overrides the computed label.
//! - `fj-breadcrumb-text` marks the exact descendant whose text is set.
//!
//! Level elements that point at a crumb that does not exist are removed.

use tracing::debug;

use autocrumb_dom::{Document, ElementExt, NodeId};
use autocrumb_shared::{BreadcrumbOptions, Crumb, Trail};

/// Value of the marker attribute on the root element.
pub const ROOT_MARKER: &str = "auto";

/// Prefix of the marker attribute on level elements.
pub const LEVEL_PREFIX: &str = "level-";

/// What a populate pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Whether a root element was present.
    pub root_found: bool,
    /// Level elements that received a crumb.
    pub filled: usize,
    /// Level elements removed for an invalid or out-of-range level.
    pub removed: usize,
}

/// Zero-based crumb index encoded in a level marker.
///
/// The suffix after `level-` is read like `parseInt(.., 10)`: leading
/// whitespace and a sign are allowed, digits are taken up to the first
/// non-digit. Markers without digits, or with a level below 1, yield `None`.
pub fn parse_level(marker: &str) -> Option<usize> {
    let rest = marker.strip_prefix(LEVEL_PREFIX)?.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // Values too large for `usize` are out of range for any trail anyway.
    let level: usize = rest[..digits_len].parse().ok()?;
    if negative || level == 0 {
        return None;
    }
    Some(level - 1)
}

/// First element in the document marked as the breadcrumb root.
pub fn find_root(doc: &Document, options: &BreadcrumbOptions) -> Option<NodeId> {
    doc.find_first(doc.root(), |el| {
        el.get_attr(&options.attribute) == Some(ROOT_MARKER)
    })
}

/// Home label for a root: its non-empty home attribute, else the configured one.
pub fn home_label<'a>(doc: &'a Document, root: NodeId, options: &'a BreadcrumbOptions) -> &'a str {
    doc.attr(root, &options.home_attribute)
        .filter(|label| !label.is_empty())
        .unwrap_or(options.home_label.as_str())
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// A level element, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrumbSlot {
    /// The level element is itself an HTML `<a>`.
    Link(NodeId),
    /// Any other element; its link and text parts are looked up inside it.
    Container(NodeId),
}

impl CrumbSlot {
    pub fn classify(doc: &Document, id: NodeId) -> Self {
        match doc.element(id) {
            Some(el) if el.is_html("a") => Self::Link(id),
            _ => Self::Container(id),
        }
    }

    pub fn node(self) -> NodeId {
        match self {
            Self::Link(id) | Self::Container(id) => id,
        }
    }

    /// Write `crumb`'s URL and `label` into this slot.
    pub fn fill(self, doc: &mut Document, crumb: &Crumb, label: &str, text_attribute: &str) {
        match self {
            Self::Link(link) => {
                doc.set_attr(link, "href", crumb.url());
                let text = doc.find_first(link, |el| el.has_attr(text_attribute));
                if let Some(text) = text {
                    doc.set_text_content(text, label);
                } else if !doc.has_child_nodes(link) || doc.text_content(link).trim().is_empty() {
                    doc.set_text_content(link, label);
                }
            }
            Self::Container(container) => {
                let link = doc.find_first(container, |el| el.is_html("a"));
                let text = doc.find_first(container, |el| el.has_attr(text_attribute));

                if let Some(link) = link {
                    doc.set_attr(link, "href", crumb.url());
                }
                let target = text.or(link).unwrap_or(container);
                doc.set_text_content(target, label);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Populate
// ---------------------------------------------------------------------------

/// Fill every level element under `root` from `trail`.
///
/// Level elements are collected before any mutation, so an element detached by
/// an earlier write is still visited. Elements sharing a level are each filled.
pub fn populate(
    doc: &mut Document,
    root: NodeId,
    trail: &Trail,
    options: &BreadcrumbOptions,
) -> PopulateReport {
    let mut report = PopulateReport {
        root_found: true,
        ..PopulateReport::default()
    };

    let levels = doc.find_all(root, |el| {
        el.get_attr(&options.attribute)
            .is_some_and(|marker| marker.starts_with(LEVEL_PREFIX))
    });

    for id in levels {
        let marker = doc.attr(id, &options.attribute).unwrap_or_default();
        let Some(crumb) = parse_level(marker).and_then(|index| trail.get(index)) else {
            debug!(marker, crumbs = trail.len(), "removing breadcrumb level without a crumb");
            doc.remove(id);
            report.removed += 1;
            continue;
        };

        let label = doc
            .attr(id, &options.label_attribute)
            .filter(|label| !label.is_empty())
            .unwrap_or(crumb.label())
            .to_string();

        let slot = CrumbSlot::classify(doc, id);
        debug!(marker, ?slot, label = %label, url = crumb.url(), "filling breadcrumb level");
        slot.fill(doc, crumb, &label, &options.text_attribute);
        report.filled += 1;
    }

    report
}
