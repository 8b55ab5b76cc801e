//! Event system for the zoomsite navigation engine
//!
//! # Architecture
//!
//! Navigation uses hybrid communication:
//! - **EventBus** (tokio::broadcast): one-to-many notification broadcasting
//! - **Shared state**: the controller owns the view state; everything else
//!   treats it as read-only and reacts to bus notifications
//!
//! Delivery order to listeners is unspecified; no listener may rely on it
//! for correctness. Events serialize to JSON for the embed boundary, where
//! payload shape is not statically enforced.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::content::Category;

/// Where a back request originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackSource {
    /// Escape key pressed
    EscapeKey,
    /// Logo / home link activated
    HomeLink,
    /// In-panel back button
    BackButton,
}

/// Navigation event types
///
/// Events are broadcast via [`EventBus`]; any number of listeners
/// (breadcrumb display, analytics, the interaction driver) may subscribe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NavEvent {
    /// The current view changed
    ///
    /// Triggers:
    /// - Breadcrumb display: redraw the trail
    /// - Analytics: record navigation depth
    NavigationChanged {
        /// Breadcrumb labels, outermost first (0-2 entries)
        path: Vec<String>,
        /// True when this change came from a reset (Escape / home link)
        reset: bool,
        /// When navigation changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A back action was requested somewhere on the page
    ///
    /// Triggers:
    /// - Navigation controller: translate into go_back() or reset()
    BackRequested {
        /// Origin of the request
        source: BackSource,
        /// When the request was made
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A detail panel finished its reveal transition
    ///
    /// Triggers:
    /// - Driver/tests: observe settled visibility
    TransitionSettled {
        /// Category of the settled panel (None for the home grid)
        category: Option<Category>,
        /// Section id of the settled panel (None for the home grid)
        section_id: Option<String>,
        /// When the transition settled
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl NavEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            NavEvent::NavigationChanged { .. } => "NavigationChanged",
            NavEvent::BackRequested { .. } => "BackRequested",
            NavEvent::TransitionSettled { .. } => "TransitionSettled",
        }
    }
}

/// Central event distribution bus for navigation events
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NavEvent>,
    capacity: usize,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(&self, event: NavEvent) -> Result<usize, broadcast::error::SendError<NavEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring whether anyone is listening
    pub fn emit_lossy(&self, event: NavEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eventbus_new() {
        let bus = EventBus::new(100);
        assert_eq!(bus.capacity(), 100);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_eventbus_subscribe() {
        let bus = EventBus::new(100);
        let _rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        let _rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[test]
    fn test_eventbus_emit_no_subscribers() {
        let bus = EventBus::new(100);
        let event = NavEvent::NavigationChanged {
            path: vec![],
            reset: true,
            timestamp: chrono::Utc::now(),
        };

        // Should return error when no subscribers
        assert!(bus.emit(event).is_err());
    }

    #[tokio::test]
    async fn test_eventbus_emit_with_subscriber() {
        let bus = EventBus::new(100);
        let mut rx = bus.subscribe();

        let event = NavEvent::NavigationChanged {
            path: vec!["Bespoke Roster".to_string(), "Maestro".to_string()],
            reset: false,
            timestamp: chrono::Utc::now(),
        };

        assert!(bus.emit(event).is_ok());

        let received = rx.recv().await.unwrap();
        match received {
            NavEvent::NavigationChanged { path, reset, .. } => {
                assert_eq!(path, vec!["Bespoke Roster", "Maestro"]);
                assert!(!reset);
            }
            _ => panic!("Wrong event type received"),
        }
    }

    #[test]
    fn test_eventbus_emit_lossy() {
        let bus = EventBus::new(100);

        // Should not panic even without subscribers
        bus.emit_lossy(NavEvent::BackRequested {
            source: BackSource::EscapeKey,
            timestamp: chrono::Utc::now(),
        });
    }

    #[test]
    fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(NavEvent::BackRequested {
            source: BackSource::HomeLink,
            timestamp: chrono::Utc::now(),
        })
        .expect("emit should succeed");

        let r1 = rx1.try_recv().expect("rx1 should receive");
        let r2 = rx2.try_recv().expect("rx2 should receive");
        assert_eq!(r1.event_type(), "BackRequested");
        assert_eq!(r2.event_type(), "BackRequested");
    }

    #[test]
    fn test_event_json_shape() {
        let event = NavEvent::NavigationChanged {
            path: vec!["Search Catalogues".to_string()],
            reset: false,
            timestamp: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"NavigationChanged\""));
        assert!(json.contains("\"path\":[\"Search Catalogues\"]"));

        let parsed: NavEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type(), "NavigationChanged");
    }
}
