//! Breadcrumb generation for autocrumb.
//!
//! A page URL becomes a [`Trail`](autocrumb_shared::Trail) of crumbs, which is
//! written into elements marked with the breadcrumb attributes:
//! - [`label`] / [`title`] turn slugs and `<title>`s into labels
//! - [`trail`] builds the crumb list
//! - [`populate`] fills level elements
//! - [`init`] runs the generator once per page, honoring DOM-ready
//! - [`render`] / [`site`] apply it to files and whole site directories

pub mod init;
pub mod label;
pub mod populate;
pub mod render;
pub mod site;
pub mod title;
pub mod trail;

pub use init::{Generated, InstallOutcome, generate, install};
pub use populate::{CrumbSlot, PopulateReport};
pub use render::{RenderOutput, render_html};
pub use site::{ProgressReporter, SilentProgress, SiteJob, SiteSummary, render_site};
pub use trail::{TrailBuilder, build_trail};
