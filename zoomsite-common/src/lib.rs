//! # Zoomsite Common Library
//!
//! Shared code for the zoomsite navigation engine:
//! - Content repository data model (SiteStructure, Section)
//! - Event types (NavEvent enum) and the EventBus
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod content;
pub mod error;
pub mod events;

pub use content::{Category, SiteStructure};
pub use error::{Error, Result};
