//! HTML parsing via `scraper`.

use scraper::Html;
use tracing::{debug, instrument};

use crate::node::Document;

/// Parse a complete HTML document.
///
/// Parsing never fails: like a browser, the tree builder recovers from any
/// malformed input and always produces `html`/`head`/`body`.
#[instrument(skip(html), fields(len = html.len()))]
pub fn parse_document(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    if !parsed.errors.is_empty() {
        debug!(errors = parsed.errors.len(), "recovered from HTML parse errors");
    }
    Document::from_html(parsed)
}

/// Parse an HTML fragment in a `<body>` context.
pub fn parse_fragment(html: &str) -> Document {
    Document::from_html(Html::parse_fragment(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ElementExt;

    #[test]
    fn parse_document_builds_full_tree() {
        let doc = parse_document(
            "<!DOCTYPE html><html><head><title>Docs - Site</title></head>\
             <body><nav id=\"x\"><a href=\"/\">Home</a></nav></body></html>",
        );
        assert!(!doc.is_fragment());
        assert_eq!(doc.title(), "Docs - Site");

        let link = doc.find_first(doc.root(), |el| el.is_html("a")).expect("link");
        assert_eq!(doc.attr(link, "href"), Some("/"));
        assert_eq!(doc.text_content(link), "Home");
    }

    #[test]
    fn fragment_root_is_the_wrapper() {
        let doc = parse_fragment("<ol><li>1</li><li>2</li><li>3</li></ol>");
        assert!(doc.is_fragment());
        let ol = doc.find_first(doc.root(), |el| el.is_html("ol")).expect("ol");
        assert_eq!(doc.text_content(ol), "123");
        assert!(doc.find_first(doc.root(), |el| el.is_html("html")).is_none());
    }

    #[test]
    fn malformed_markup_is_recovered() {
        let doc = parse_document("<div><p>unclosed<div>next");
        assert!(doc.find_first(doc.root(), |el| el.is_html("body")).is_some());
        assert_eq!(doc.text_content(doc.root()), "unclosednext");
    }

    #[test]
    fn uppercase_attribute_names_are_normalized() {
        let doc = parse_fragment("<div FJ-Breadcrumb=\"auto\"></div>");
        let div = doc.find_first(doc.root(), |el| el.is_html("div")).expect("div");
        assert_eq!(doc.attr(div, "fj-breadcrumb"), Some("auto"));
        assert_eq!(doc.attr(div, "FJ-BREADCRUMB"), Some("auto"));
    }
}
