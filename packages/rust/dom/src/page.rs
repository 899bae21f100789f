//! A loaded page: document, location and the DOM-ready lifecycle.
//!
//! While a page is [`ReadyState::Loading`] its markup is buffered and the
//! document is empty. [`Page::finish_parsing`] builds the tree, moves the page to
//! [`ReadyState::Interactive`] and fires every DOM-ready callback exactly once.

use std::fmt;

use tracing::debug;
use url::Url;

use crate::node::Document;
use crate::parse::parse_document;

/// Mirrors `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// One-shot callback run once the document is parsed.
pub type DomReadyCallback = Box<dyn FnOnce(&mut Document, &Url)>;

pub struct Page {
    url: Url,
    document: Document,
    ready_state: ReadyState,
    pending_markup: String,
    dom_ready: Vec<DomReadyCallback>,
    installed: bool,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.url.as_str())
            .field("ready_state", &self.ready_state)
            .field("pending_callbacks", &self.dom_ready.len())
            .field("installed", &self.installed)
            .finish()
    }
}

impl Page {
    /// A page whose markup is still arriving.
    pub fn loading(url: Url) -> Self {
        Self {
            url,
            document: Document::new(),
            ready_state: ReadyState::Loading,
            pending_markup: String::new(),
            dom_ready: Vec::new(),
            installed: false,
        }
    }

    /// A fully parsed page.
    pub fn complete(url: Url, html: &str) -> Self {
        Self {
            url,
            document: parse_document(html),
            ready_state: ReadyState::Complete,
            pending_markup: String::new(),
            dom_ready: Vec::new(),
            installed: false,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Split-borrow the document mutably alongside the URL.
    pub fn parts_mut(&mut self) -> (&mut Document, &Url) {
        (&mut self.document, &self.url)
    }

    /// Claim the page for a one-shot installer.
    ///
    /// Returns `true` on the first call only.
    pub fn mark_installed(&mut self) -> bool {
        !std::mem::replace(&mut self.installed, true)
    }

    /// Feed more markup to a loading page. Ignored once parsing has finished.
    pub fn write(&mut self, chunk: &str) {
        if self.ready_state == ReadyState::Loading {
            self.pending_markup.push_str(chunk);
        } else {
            debug!(url = %self.url, "write after parsing finished, ignored");
        }
    }

    /// Register a DOM-ready callback.
    ///
    /// While loading, the callback is queued for [`Page::finish_parsing`].
    /// Otherwise the DOM is already available and it runs immediately.
    pub fn on_dom_ready(&mut self, callback: DomReadyCallback) {
        if self.ready_state == ReadyState::Loading {
            self.dom_ready.push(callback);
        } else {
            callback(&mut self.document, &self.url);
        }
    }

    /// Finish parsing buffered markup and fire DOM-ready callbacks.
    ///
    /// Only the first call has any effect.
    pub fn finish_parsing(&mut self) {
        if self.ready_state != ReadyState::Loading {
            return;
        }

        let markup = std::mem::take(&mut self.pending_markup);
        self.document = parse_document(&markup);
        self.ready_state = ReadyState::Interactive;

        let callbacks = std::mem::take(&mut self.dom_ready);
        debug!(url = %self.url, callbacks = callbacks.len(), "DOM ready");
        for callback in callbacks {
            callback(&mut self.document, &self.url);
        }
    }

    /// Mark subresources as loaded. Finishes parsing first if needed.
    pub fn finish_loading(&mut self) {
        self.finish_parsing();
        self.ready_state = ReadyState::Complete;
    }
}
