//! Crumb list construction from a page location.

use tracing::trace;
use url::Url;

use autocrumb_shared::{BreadcrumbOptions, Crumb, Trail};

use crate::label::{decode_segment, format_label};
use crate::title::resolve_title;

/// Label of the first crumb when nothing else is configured.
pub const DEFAULT_HOME_LABEL: &str = "Home";

/// Non-empty `/`-delimited components of a path.
///
/// Leading, trailing and repeated slashes produce no segments.
pub fn path_segments(pathname: &str) -> Vec<&str> {
    pathname.split('/').filter(|s| !s.is_empty()).collect()
}

/// Build the trail for `origin` + `pathname`.
///
/// The home crumb links to `origin/`; crumb `i` links to the first `i`
/// segments joined under the origin. The last crumb takes its label from the
/// resolved page title when that is non-empty.
pub fn build_trail(
    origin: &str,
    pathname: &str,
    home_label: &str,
    title: &str,
    title_separator: &str,
) -> Trail {
    let segments = path_segments(pathname);
    let mut trail = Trail::new(Crumb::new(home_label, format!("{origin}/")));

    for (i, segment) in segments.iter().enumerate() {
        let url = format!("{origin}/{}", segments[..=i].join("/"));
        let label = format_label(&decode_segment(segment));
        trail.push(Crumb::new(label, url));
    }

    let page_title = resolve_title(title, title_separator);
    if !page_title.is_empty() {
        trail.relabel_last(page_title);
    }

    trace!(crumbs = trail.len(), %trail, "built trail");
    trail
}

/// Builds trails from parsed URLs with configured labels.
#[derive(Debug, Clone)]
pub struct TrailBuilder {
    home_label: String,
    title_separator: String,
}

impl Default for TrailBuilder {
    fn default() -> Self {
        Self::from(&BreadcrumbOptions::default())
    }
}

impl From<&BreadcrumbOptions> for TrailBuilder {
    fn from(options: &BreadcrumbOptions) -> Self {
        Self {
            home_label: options.home_label.clone(),
            title_separator: options.title_separator.clone(),
        }
    }
}

impl TrailBuilder {
    /// Override the home label. An empty label falls back to the default.
    pub fn home_label(mut self, label: impl Into<String>) -> Self {
        self.home_label = label.into();
        self
    }

    /// Build the trail for `url`, using `title` for the current-page crumb.
    ///
    /// The origin is the URL's ASCII serialization, so opaque origins (such as
    /// `file:` URLs) yield `"null"`, matching `location.origin`.
    pub fn build(&self, url: &Url, title: &str) -> Trail {
        let origin = url.origin().ascii_serialization();
        let home_label = if self.home_label.is_empty() {
            DEFAULT_HOME_LABEL
        } else {
            self.home_label.as_str()
        };
        build_trail(&origin, url.path(), home_label, title, &self.title_separator)
    }
}
