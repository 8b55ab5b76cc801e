//! Navigation controller
//!
//! Single source of truth for "what is showing" and sole authority for
//! state transitions. All other components treat the view state as
//! read-only and react to bus notifications.
//!
//! # Failure semantics
//!
//! Lookups are resolve-then-commit: an unresolvable section id never
//! leaves the controller in a partially-mutated state, and emits no
//! navigation-changed notification. Renderer failures happen after the
//! section resolved, so the commit stands and a generic error panel is
//! mounted instead of the panel content.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use zoomsite_common::content::{Category, SiteStructure};
use zoomsite_common::events::{BackSource, EventBus, NavEvent};

use crate::debounce::Debouncer;
use crate::error::{Error, Result};
use crate::preview::PreviewController;
use crate::render::{self, RendererMap};
use crate::transition::{PanelStage, PanelTarget, TransitionHandle, TransitionSequencer};
use crate::view::{NavigationPath, ViewState};

/// Current view plus its derived breadcrumb path
///
/// Kept under one lock so the pair is always mutated atomically.
#[derive(Debug, Clone)]
struct ViewModel {
    state: ViewState,
    path: NavigationPath,
}

impl ViewModel {
    fn home() -> Self {
        Self { state: ViewState::Home, path: NavigationPath::home() }
    }
}

/// Owns the view model and performs all navigation operations
pub struct NavigationController {
    site: Arc<SiteStructure>,
    bus: EventBus,
    sequencer: TransitionSequencer,
    renderers: RendererMap,
    model: Mutex<ViewModel>,
}

impl NavigationController {
    /// New controller starting at `Home` with the default renderers
    ///
    /// The content repository is constructor-injected and read-only; the
    /// controller never writes to it.
    pub fn new(
        site: Arc<SiteStructure>,
        bus: EventBus,
        sequencer: TransitionSequencer,
    ) -> Self {
        Self::with_renderers(site, bus, sequencer, render::default_renderers())
    }

    /// New controller with a custom renderer set
    pub fn with_renderers(
        site: Arc<SiteStructure>,
        bus: EventBus,
        sequencer: TransitionSequencer,
        renderers: RendererMap,
    ) -> Self {
        Self {
            site,
            bus,
            sequencer,
            renderers,
            model: Mutex::new(ViewModel::home()),
        }
    }

    /// The stage the controller's transitions play out on
    pub fn stage(&self) -> &Arc<PanelStage> {
        self.sequencer.stage()
    }

    /// Snapshot of the current view state
    pub fn view_state(&self) -> ViewState {
        self.model.lock().expect("view model lock poisoned").state.clone()
    }

    /// Snapshot of the current breadcrumb path
    pub fn path(&self) -> NavigationPath {
        self.model.lock().expect("view model lock poisoned").path.clone()
    }

    /// Enter the detail view for `section_id` within `category`
    ///
    /// Allowed from `Home` and from any `Detail` view; switching sections
    /// without returning home overwrites the previous section and
    /// supersedes its transition. Catalogue detail paths carry the
    /// category label only (see [`NavigationPath::for_detail`]).
    pub fn enter_detail(&self, section_id: &str, category: Category) -> Result<TransitionHandle> {
        // Resolve before any mutation
        let section = match self.site.section(category, section_id) {
            Ok(section) => section,
            Err(e) => {
                warn!(%category, section_id, "section not found: {e}");
                self.stage().show_inline_error(render::not_available_panel(section_id));
                return Err(e.into());
            }
        };

        let markup = match self.renderers.get(&category) {
            Some(renderer) => match renderer.render(section) {
                Ok(markup) => markup,
                Err(e) => {
                    warn!(%category, section_id, "panel renderer failed: {e}");
                    render::error_panel()
                }
            },
            None => {
                let e = Error::Render(format!("no renderer for category '{category}'"));
                warn!(section_id, "{e}");
                render::error_panel()
            }
        };

        let path = NavigationPath::for_detail(&self.site, category, section);
        {
            let mut model = self.model.lock().expect("view model lock poisoned");
            model.state = ViewState::Detail {
                category,
                section_id: section.id.clone(),
                section_title: section.title.clone(),
            };
            model.path = path.clone();
        }
        self.stage().dismiss_inline_error();

        info!(%category, section_id, breadcrumb = %path.breadcrumb(), "entered detail view");
        self.bus.emit_lossy(NavEvent::NavigationChanged {
            path: path.into(),
            reset: false,
            timestamp: chrono::Utc::now(),
        });

        self.stage().set_panel_markup(markup);
        let handle = self.sequencer.transition(PanelTarget::Panel, PanelTarget::Grid);
        Ok(handle.with_notification(self.bus.clone(), Some(category), Some(section_id.to_string())))
    }

    /// Return from a detail view to `Home`
    ///
    /// One level of back-stack only: any back action from a detail view
    /// goes straight home. No-op (returns `None`) when already home.
    pub fn go_back(&self) -> Option<TransitionHandle> {
        {
            let mut model = self.model.lock().expect("view model lock poisoned");
            if model.state.is_home() {
                debug!("back requested at home: no-op");
                return None;
            }
            *model = ViewModel::home();
        }
        self.stage().dismiss_inline_error();

        info!("returned to home");
        self.bus.emit_lossy(NavEvent::NavigationChanged {
            path: vec![],
            reset: false,
            timestamp: chrono::Utc::now(),
        });

        let handle = self.sequencer.transition(PanelTarget::Grid, PanelTarget::Panel);
        Some(handle.with_notification(self.bus.clone(), None, None))
    }

    /// Force `Home` regardless of the current state
    ///
    /// Idempotent: used for Escape and the logo/home link. Always emits a
    /// navigation-changed notification with `reset: true`; the grid
    /// transition only runs when there was a panel to leave.
    pub fn reset(&self) -> Option<TransitionHandle> {
        let was_detail = {
            let mut model = self.model.lock().expect("view model lock poisoned");
            let was_detail = !model.state.is_home();
            *model = ViewModel::home();
            was_detail
        };
        self.stage().dismiss_inline_error();

        debug!(was_detail, "view reset to home");
        self.bus.emit_lossy(NavEvent::NavigationChanged {
            path: vec![],
            reset: true,
            timestamp: chrono::Utc::now(),
        });

        if was_detail {
            let handle = self.sequencer.transition(PanelTarget::Grid, PanelTarget::Panel);
            Some(handle.with_notification(self.bus.clone(), None, None))
        } else {
            None
        }
    }

    /// Spawn the listener translating back-request notifications
    ///
    /// Escape and the home link force a reset; an in-panel back button
    /// pops one level. Runs until the bus closes.
    pub fn spawn_back_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let mut rx = controller.bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(NavEvent::BackRequested { source, .. }) => {
                        debug!(?source, "back request received");
                        match source {
                            BackSource::EscapeKey | BackSource::HomeLink => {
                                controller.reset();
                            }
                            BackSource::BackButton => {
                                controller.go_back();
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "back listener lagged behind the event bus");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

/// One logical user gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Click/tap on a section item
    Activate { category: Category, section_id: String },
    /// In-panel back button
    Back,
    /// Escape key
    Escape,
    /// Logo / home link
    Home,
    /// Pointer entered a section item
    HoverEnter { category: Category, section_id: String },
    /// Pointer left a section item
    HoverLeave,
    /// Viewport resized
    Resize,
}

/// Single dispatch table mapping interactions to operations
///
/// Replaces the original site's scattered per-element listeners: every
/// gesture funnels through one place, so the mapping from interaction to
/// controller operation is written exactly once.
pub struct Dispatcher {
    controller: Arc<NavigationController>,
    preview: PreviewController,
    resize: Debouncer,
}

impl Dispatcher {
    pub fn new(
        controller: Arc<NavigationController>,
        preview: PreviewController,
        resize_debounce: Debouncer,
    ) -> Self {
        Self { controller, preview, resize: resize_debounce }
    }

    pub fn controller(&self) -> &Arc<NavigationController> {
        &self.controller
    }

    pub fn preview(&self) -> &PreviewController {
        &self.preview
    }

    /// Route one gesture to its operation
    ///
    /// Returns the transition handle when the gesture started one.
    /// Recoverable failures (unknown section) surface on the stage and
    /// come back as errors; they never change the view state.
    pub fn dispatch(&self, interaction: Interaction) -> Result<Option<TransitionHandle>> {
        match interaction {
            Interaction::Activate { category, section_id } => {
                // An activation commits: any pending hover preview is stale
                self.preview.hover_leave();
                self.controller.enter_detail(&section_id, category).map(Some)
            }
            Interaction::Back => Ok(self.controller.go_back()),
            Interaction::Escape | Interaction::Home => Ok(self.controller.reset()),
            Interaction::HoverEnter { category, section_id } => {
                self.preview.hover_enter(category, &section_id);
                Ok(None)
            }
            Interaction::HoverLeave => {
                self.preview.hover_leave();
                Ok(None)
            }
            Interaction::Resize => {
                self.resize.call(|| {
                    debug!("recomputing layout after resize burst");
                });
                Ok(None)
            }
        }
    }
}
