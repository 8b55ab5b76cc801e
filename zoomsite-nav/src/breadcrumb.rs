//! Breadcrumb display
//!
//! Pure projection of the navigation path to a text trail and a
//! visibility flag. No independent state: every redraw is computed from
//! the latest navigation-changed notification. Payloads arriving over the
//! embed boundary are untyped JSON; a malformed payload is logged and
//! ignored, never a panic.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, warn};
use zoomsite_common::events::NavEvent;

use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct BreadcrumbState {
    trail: String,
    visible: bool,
}

/// Redraws the text trail from navigation-changed notifications
#[derive(Debug, Default)]
pub struct BreadcrumbDisplay {
    state: Mutex<BreadcrumbState>,
}

impl BreadcrumbDisplay {
    /// New display: empty trail, hidden
    pub fn new() -> Self {
        Self::default()
    }

    /// Current trail text (empty at home)
    pub fn trail(&self) -> String {
        self.state.lock().expect("breadcrumb lock poisoned").trail.clone()
    }

    /// Whether the trail is shown (hidden when the path is empty)
    pub fn is_visible(&self) -> bool {
        self.state.lock().expect("breadcrumb lock poisoned").visible
    }

    /// Recompute the projection from a path
    pub fn update(&self, path: &[String]) {
        let mut state = self.state.lock().expect("breadcrumb lock poisoned");
        state.trail = path.join(" > ");
        state.visible = !path.is_empty();
        debug!(trail = %state.trail, visible = state.visible, "breadcrumbs redrawn");
    }

    /// Apply a typed navigation event; non-navigation events are ignored
    pub fn apply_event(&self, event: &NavEvent) {
        if let NavEvent::NavigationChanged { path, .. } = event {
            self.update(path);
        }
    }

    /// Apply an untyped JSON payload from the embed boundary
    ///
    /// The payload must be an object with a `path` array of strings
    /// (`reset` is optional). Anything else is a malformed notification:
    /// logged, rejected, and the current projection left untouched.
    pub fn apply_json(&self, raw: &str) -> Result<()> {
        match parse_path_payload(raw) {
            Ok(path) => {
                self.update(&path);
                Ok(())
            }
            Err(e) => {
                warn!("ignoring malformed navigation payload: {e}");
                Err(e)
            }
        }
    }

    /// Subscribe this display to a navigation event stream
    ///
    /// Runs until the bus closes. Lagged receivers skip to the newest
    /// notification, which is safe here: the display is a pure projection
    /// of the latest path.
    pub async fn run(self: Arc<Self>, mut rx: broadcast::Receiver<NavEvent>) {
        loop {
            match rx.recv().await {
                Ok(event) => self.apply_event(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "breadcrumb display lagged behind the event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

/// Validate an embed payload into a path, without touching any state
fn parse_path_payload(raw: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| Error::MalformedNotification(format!("not valid JSON: {e}")))?;

    let path_value = value
        .get("path")
        .ok_or_else(|| Error::MalformedNotification("missing 'path' field".to_string()))?;
    let entries = path_value
        .as_array()
        .ok_or_else(|| Error::MalformedNotification("'path' is not an array".to_string()))?;

    let mut path = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.as_str() {
            Some(label) => path.push(label.to_string()),
            None => {
                return Err(Error::MalformedNotification(
                    "'path' entry is not a string".to_string(),
                ))
            }
        }
    }
    Ok(path)
}
