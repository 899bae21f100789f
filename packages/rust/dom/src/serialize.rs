//! HTML serialization of a [`Document`] through html5ever.

use scraper::ElementRef;

use crate::node::Document;

impl Document {
    /// Serialize the whole document, or a fragment's top-level nodes.
    pub fn to_html(&self) -> String {
        if self.is_fragment() {
            self.html
                .tree
                .get(self.root())
                .and_then(ElementRef::wrap)
                .map(|wrapper| wrapper.inner_html())
                .unwrap_or_default()
        } else {
            self.html.html()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::ElementExt;
    use crate::parse::{parse_document, parse_fragment};

    #[test]
    fn document_serializes_back() {
        let html = "<!DOCTYPE html><html><head><title>T</title></head>\
                    <body><p class=\"x\">Hi<br>there</p><!-- c --></body></html>";
        assert_eq!(parse_document(html).to_html(), html);
    }

    #[test]
    fn namespaced_attributes_survive() {
        let html = r##"<nav><svg viewBox="0 0 8 8"><use xlink:href="#icon-home"></use></svg></nav>"##;
        assert_eq!(parse_fragment(html).to_html(), html);
    }

    #[test]
    fn attribute_order_is_kept() {
        let html = r#"<a title="t" class="c" data-x="1"></a>"#;
        assert_eq!(parse_fragment(html).to_html(), html);
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut doc = parse_fragment("<a></a>");
        let a = doc.find_first(doc.root(), |el| el.is_html("a")).expect("a");
        doc.set_attr(a, "title", "\"quoted\" & <raw>");
        doc.set_text_content(a, "1 < 2 & 3 > 2");
        assert_eq!(
            doc.to_html(),
            "<a title=\"&quot;quoted&quot; &amp; <raw>\">1 &lt; 2 &amp; 3 &gt; 2</a>"
        );
    }

    #[test]
    fn raw_text_is_verbatim() {
        let html = "<div><script>if (a < b && c) {}</script></div>";
        assert_eq!(parse_fragment(html).to_html(), html);
    }

    #[test]
    fn detached_nodes_are_not_serialized() {
        let mut doc = parse_fragment("<ol><li>keep</li><li>drop</li></ol>");
        let items = doc.find_all(doc.root(), |el| el.is_html("li"));
        doc.remove(items[1]);
        assert_eq!(doc.to_html(), "<ol><li>keep</li></ol>");
    }
}
