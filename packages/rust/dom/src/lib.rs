//! Mutable HTML document model for autocrumb.
//!
//! Markup is parsed with `scraper` (html5ever) into a [`Document`] that
//! supports the handful of DOM operations the breadcrumb generator needs:
//! attribute/text queries, `textContent` writes, node removal and
//! serialization back to HTML. [`Page`] adds the URL and the DOM-ready
//! lifecycle.

mod node;
mod page;
mod parse;
mod serialize;

pub use node::{Document, ElementExt, NodeId};
pub use page::{DomReadyCallback, Page, ReadyState};
pub use parse::{parse_document, parse_fragment};
pub use scraper::node::Element;
