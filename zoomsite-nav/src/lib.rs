//! # Zoomsite Navigation Engine (zoomsite-nav)
//!
//! View navigation controller for the zoomable single-page site.
//!
//! **Purpose:** Decide which logical view is on screen (home grid or a
//! detail panel), keep the breadcrumb path in sync via broadcast
//! notifications, and sequence panel transitions with supersession of
//! in-flight transitions.
//!
//! **Architecture:** Single controller owning the view state; an EventBus
//! (tokio::broadcast) carries navigation-changed and back-request
//! notifications; a generation-token transition sequencer guards against
//! stale timer callbacks.

pub mod breadcrumb;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod preview;
pub mod render;
pub mod transition;
pub mod view;

pub use controller::{Interaction, NavigationController};
pub use error::{Error, Result};
pub use view::{NavigationPath, ViewState};
