//! One-shot installation of the breadcrumb generator on a page.
//!
//! On a page that is still loading the generator waits for DOM-ready; on a
//! parsed page it runs right away. Either way it runs at most once per page.

use tracing::{debug, info};
use url::Url;

use autocrumb_dom::{Document, Page, ReadyState};
use autocrumb_shared::{BreadcrumbOptions, Trail};

use crate::populate::{PopulateReport, find_root, home_label, populate};
use crate::trail::TrailBuilder;

/// Result of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The trail written into the page; `None` when the page has no root.
    pub trail: Option<Trail>,
    pub report: PopulateReport,
}

/// How [`install`] scheduled the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The DOM was ready; the generator already ran.
    Ran(Generated),
    /// The page is loading; the generator runs when parsing finishes.
    Deferred,
    /// An earlier call already installed the generator on this page.
    AlreadyInstalled,
}

/// Run the generator against a parsed document at `url`.
///
/// Never fails: a document without a root element is left untouched.
pub fn generate(doc: &mut Document, url: &Url, options: &BreadcrumbOptions) -> Generated {
    let Some(root) = find_root(doc, options) else {
        debug!(%url, attribute = %options.attribute, "no breadcrumb root, nothing to do");
        return Generated {
            trail: None,
            report: PopulateReport::default(),
        };
    };

    let trail = TrailBuilder::from(options)
        .home_label(home_label(doc, root, options))
        .build(url, &doc.title());
    let report = populate(doc, root, &trail, options);

    Generated {
        trail: Some(trail),
        report,
    }
}

/// Install the generator on `page`. Repeat calls are no-ops.
pub fn install(page: &mut Page, options: &BreadcrumbOptions) -> InstallOutcome {
    if !page.mark_installed() {
        debug!(url = %page.url(), "breadcrumb generator already installed");
        return InstallOutcome::AlreadyInstalled;
    }

    if page.ready_state() == ReadyState::Loading {
        let options = options.clone();
        page.on_dom_ready(Box::new(move |doc, url| {
            let generated = generate(doc, url, &options);
            info!(
                %url,
                filled = generated.report.filled,
                removed = generated.report.removed,
                "breadcrumb generated on DOM ready"
            );
        }));
        return InstallOutcome::Deferred;
    }

    let (doc, url) = page.parts_mut();
    InstallOutcome::Ran(generate(doc, url, options))
}
