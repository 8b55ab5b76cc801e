//! Transition sequencing between the home grid and detail panels
//!
//! Sequences the visual handoff without flicker or double-visible panels:
//! fade the outgoing target, wait a settle delay, swap which target is in
//! layout, wait one scheduling tick, reveal the incoming target.
//!
//! # Supersession
//!
//! Transitions are cancellable: every request increments a generation
//! counter, and each async step re-checks its token before applying
//! effects. A request that arrives mid-transition supersedes the in-flight
//! one; the superseded task's remaining steps become no-ops, so no stale
//! timer ever clobbers a newer state. At most one transition is in flight.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// The two visual containers the sequencer manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelTarget {
    /// Home grid of categories
    Grid,
    /// Detail panel container
    Panel,
}

/// Visual state of one target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelVisibility {
    /// Whether the target occupies layout (`display` in the page)
    pub in_layout: bool,
    /// Opacity, 0.0 to 1.0
    pub opacity: f32,
}

impl PanelVisibility {
    /// Visually settled: in layout and fully opaque
    pub fn settled_visible(&self) -> bool {
        self.in_layout && self.opacity >= 1.0
    }

    fn hidden() -> Self {
        Self { in_layout: false, opacity: 0.0 }
    }

    fn visible() -> Self {
        Self { in_layout: true, opacity: 1.0 }
    }
}

/// In-memory stand-in for the page's panel containers
///
/// Holds per-target visibility plus the markup currently mounted in the
/// detail panel. All mutation goes through the sequencer or the
/// controller; observers only read.
#[derive(Debug)]
pub struct PanelStage {
    inner: Mutex<StageState>,
}

#[derive(Debug)]
struct StageState {
    targets: HashMap<PanelTarget, PanelVisibility>,
    panel_markup: String,
    inline_error: Option<String>,
}

impl PanelStage {
    /// New stage with the home grid settled visible and the panel hidden
    pub fn new() -> Self {
        let mut targets = HashMap::new();
        targets.insert(PanelTarget::Grid, PanelVisibility::visible());
        targets.insert(PanelTarget::Panel, PanelVisibility::hidden());
        Self {
            inner: Mutex::new(StageState {
                targets,
                panel_markup: String::new(),
                inline_error: None,
            }),
        }
    }

    /// Visibility of one target
    pub fn visibility(&self, target: PanelTarget) -> PanelVisibility {
        let inner = self.inner.lock().expect("stage lock poisoned");
        inner.targets[&target]
    }

    /// Markup currently mounted in the detail panel
    pub fn panel_markup(&self) -> String {
        let inner = self.inner.lock().expect("stage lock poisoned");
        inner.panel_markup.clone()
    }

    /// Mount markup into the detail panel container
    pub fn set_panel_markup(&self, markup: String) {
        let mut inner = self.inner.lock().expect("stage lock poisoned");
        inner.panel_markup = markup;
    }

    /// Show a dismissible inline error panel over the current view
    ///
    /// Used for recoverable failures that do not change the view state
    /// (e.g. a request for a section the repository does not have).
    pub fn show_inline_error(&self, markup: String) {
        let mut inner = self.inner.lock().expect("stage lock poisoned");
        inner.inline_error = Some(markup);
    }

    /// Dismiss the inline error panel, if shown
    pub fn dismiss_inline_error(&self) {
        let mut inner = self.inner.lock().expect("stage lock poisoned");
        inner.inline_error = None;
    }

    /// Currently shown inline error markup, if any
    pub fn inline_error(&self) -> Option<String> {
        let inner = self.inner.lock().expect("stage lock poisoned");
        inner.inline_error.clone()
    }

    /// Targets currently settled visible
    pub fn settled_targets(&self) -> Vec<PanelTarget> {
        let inner = self.inner.lock().expect("stage lock poisoned");
        inner
            .targets
            .iter()
            .filter(|(_, v)| v.settled_visible())
            .map(|(t, _)| *t)
            .collect()
    }

    fn set_opacity(&self, target: PanelTarget, opacity: f32) {
        let mut inner = self.inner.lock().expect("stage lock poisoned");
        if let Some(v) = inner.targets.get_mut(&target) {
            v.opacity = opacity;
        }
    }

    fn set_in_layout(&self, target: PanelTarget, in_layout: bool) {
        let mut inner = self.inner.lock().expect("stage lock poisoned");
        if let Some(v) = inner.targets.get_mut(&target) {
            v.in_layout = in_layout;
        }
    }
}

impl Default for PanelStage {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The incoming target settled visible
    Settled,
    /// A newer request arrived; remaining steps were abandoned
    Superseded,
}

/// Handle to an in-flight transition, awaitable from tests and drivers
#[derive(Debug)]
pub struct TransitionHandle {
    task: JoinHandle<TransitionOutcome>,
}

impl TransitionHandle {
    /// Wait for the transition to settle or be superseded
    pub async fn join(self) -> TransitionOutcome {
        // A superseded task can also be dropped at shutdown
        self.task.await.unwrap_or(TransitionOutcome::Superseded)
    }

    /// Broadcast a settled notification for this transition
    ///
    /// Wraps the handle so that when (and only when) the transition
    /// settles, `TransitionSettled` is emitted on the bus. Superseded
    /// transitions emit nothing.
    pub fn with_notification(
        self,
        bus: zoomsite_common::events::EventBus,
        category: Option<zoomsite_common::content::Category>,
        section_id: Option<String>,
    ) -> TransitionHandle {
        let task = tokio::spawn(async move {
            let outcome = self.join().await;
            if outcome == TransitionOutcome::Settled {
                bus.emit_lossy(zoomsite_common::events::NavEvent::TransitionSettled {
                    category,
                    section_id,
                    timestamp: chrono::Utc::now(),
                });
            }
            outcome
        });
        TransitionHandle { task }
    }
}

/// Sequences panel handoffs over a shared [`PanelStage`]
pub struct TransitionSequencer {
    stage: Arc<PanelStage>,
    generation: Arc<AtomicU64>,
    settle: Duration,
}

impl TransitionSequencer {
    pub fn new(stage: Arc<PanelStage>, settle: Duration) -> Self {
        Self {
            stage,
            generation: Arc::new(AtomicU64::new(0)),
            settle,
        }
    }

    /// The stage this sequencer mutates
    pub fn stage(&self) -> &Arc<PanelStage> {
        &self.stage
    }

    /// Start a transition revealing `show` and hiding `hide`
    ///
    /// Supersedes any in-flight transition. Returns immediately; await the
    /// handle to observe settlement.
    pub fn transition(&self, show: PanelTarget, hide: PanelTarget) -> TransitionHandle {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let stage = Arc::clone(&self.stage);
        let settle = self.settle;

        let task = tokio::spawn(async move {
            let stale = || generation.load(Ordering::SeqCst) != token;

            if stale() {
                return TransitionOutcome::Superseded;
            }

            // Fade the outgoing target and let it settle
            stage.set_opacity(hide, 0.0);
            tokio::time::sleep(settle).await;
            if stale() {
                debug!(token, ?show, "transition superseded during settle delay");
                return TransitionOutcome::Superseded;
            }

            // Swap which target occupies layout; incoming starts transparent
            stage.set_in_layout(hide, false);
            stage.set_in_layout(show, true);
            stage.set_opacity(show, 0.0);

            // One scheduling tick before the reveal, so the layout swap is
            // observable as its own step
            tokio::task::yield_now().await;
            if stale() {
                debug!(token, ?show, "transition superseded before reveal");
                return TransitionOutcome::Superseded;
            }

            stage.set_opacity(show, 1.0);
            debug!(token, ?show, ?hide, "transition settled");
            TransitionOutcome::Settled
        });

        TransitionHandle { task }
    }
}
