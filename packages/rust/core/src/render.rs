//! Single-document rendering: HTML in, populated HTML out.

use tracing::{debug, instrument};
use url::Url;

use autocrumb_dom::Page;
use autocrumb_shared::BreadcrumbOptions;

use crate::init::{Generated, generate};

/// Result of rendering one document.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Serialized document after population. When the document has no
    /// breadcrumb root this is the input, byte for byte.
    pub html: String,
    pub generated: Generated,
}

impl RenderOutput {
    /// Whether the document contained a breadcrumb root.
    pub fn touched(&self) -> bool {
        self.generated.trail.is_some()
    }
}

/// Populate the breadcrumb in `html` as it would appear at `url`.
#[instrument(skip_all, fields(url = %url))]
pub fn render_html(html: &str, url: &Url, options: &BreadcrumbOptions) -> RenderOutput {
    let mut page = Page::complete(url.clone(), html);
    let (doc, page_url) = page.parts_mut();
    let generated = generate(doc, page_url, options);

    let html = if generated.trail.is_some() {
        page.document().to_html()
    } else {
        // Re-serializing would normalize markup we never touched.
        html.to_string()
    };

    debug!(
        filled = generated.report.filled,
        removed = generated.report.removed,
        "render complete"
    );

    RenderOutput { html, generated }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse("https://example.com")
            .and_then(|u| u.join(path))
            .expect("url")
    }

    #[test]
    fn renders_breadcrumb() {
        let html = r#"<!DOCTYPE html><html><head><title>My First Post - Site</title></head><body><ol fj-breadcrumb="auto"><li fj-breadcrumb="level-1"><a></a></li><li fj-breadcrumb="level-2"><a></a></li><li fj-breadcrumb="level-3"><span fj-breadcrumb-text></span></li></ol></body></html>"#;
        let out = render_html(html, &url("/blog/my-first-post"), &BreadcrumbOptions::default());

        assert!(out.touched());
        assert_eq!(
            out.html,
            r#"<!DOCTYPE html><html><head><title>My First Post - Site</title></head><body><ol fj-breadcrumb="auto"><li fj-breadcrumb="level-1"><a href="https://example.com/">Home</a></li><li fj-breadcrumb="level-2"><a href="https://example.com/blog">Blog</a></li><li fj-breadcrumb="level-3"><span fj-breadcrumb-text="">My First Post</span></li></ol></body></html>"#
        );
    }

    #[test]
    fn svg_markup_is_preserved() {
        let html = r##"<!DOCTYPE html><html><head></head><body><nav fj-breadcrumb="auto"><svg viewBox="0 0 16 16"><use xlink:href="#icon-home"></use></svg><a fj-breadcrumb="level-1"></a></nav></body></html>"##;
        let out = render_html(html, &url("/"), &BreadcrumbOptions::default());
        assert!(out.touched());
        assert_eq!(
            out.html,
            r##"<!DOCTYPE html><html><head></head><body><nav fj-breadcrumb="auto"><svg viewBox="0 0 16 16"><use xlink:href="#icon-home"></use></svg><a fj-breadcrumb="level-1" href="https://example.com/">Home</a></nav></body></html>"##
        );
    }

    #[test]
    fn untouched_documents_keep_their_bytes() {
        let html = "<p>no breadcrumb here";
        let out = render_html(html, &url("/x"), &BreadcrumbOptions::default());
        assert!(!out.touched());
        assert_eq!(out.html, html);
    }
}
