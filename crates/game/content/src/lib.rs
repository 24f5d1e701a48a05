//! Data-driven combat content and configuration loaders.
//!
//! This crate houses static combat content and provides loaders for
//! RON/TOML data files:
//! - Action catalogue (data-driven via RON)
//! - Enemy templates (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//!
//! Content reaches the core through [`ContentRegistry`], which implements
//! the core's `ContentOracle`; it never lives in a global table.

pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::ContentRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult, builtin_registry};
