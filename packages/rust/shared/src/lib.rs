//! Shared types, error model, and configuration for autocrumb.
//!
//! This crate is the foundation depended on by all other autocrumb crates.
//! It provides:
//! - [`AutocrumbError`] - the unified error type
//! - Domain types ([`Crumb`], [`Trail`])
//! - Configuration ([`AppConfig`], [`BreadcrumbOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BreadcrumbConfig, BreadcrumbOptions, SiteConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, validate_config,
};
pub use error::{AutocrumbError, Result};
pub use types::{Crumb, Trail};
