//! Hover preview overlay
//!
//! Pointer-over on a grid item shows a short content snippet and, for
//! sections with artwork, a background image overlay. Entry is debounced
//! so skimming the pointer across the grid never flashes previews; exit
//! hides the overlay immediately but delays clearing the image until the
//! fade has had time to play out.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};
use zoomsite_common::content::{Category, SiteStructure};

use crate::debounce::Debouncer;

/// Character budget for a preview snippet (before the ellipsis)
const SNIPPET_MAX_CHARS: usize = 200;

/// The snippet currently offered by the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePreview {
    pub category: Category,
    pub section_id: String,
    pub snippet: String,
}

#[derive(Debug, Default)]
struct PreviewState {
    active: Option<ActivePreview>,
    overlay_image: Option<String>,
    overlay_visible: bool,
}

/// Debounced hover preview, read-only over the content repository
pub struct PreviewController {
    site: Arc<SiteStructure>,
    show: Debouncer,
    clear: Debouncer,
    state: Arc<Mutex<PreviewState>>,
}

impl PreviewController {
    /// `show_debounce` gates preview entry; `clear_delay` is how long a
    /// hidden overlay image lingers before it is dropped.
    pub fn new(site: Arc<SiteStructure>, show_debounce: Duration, clear_delay: Duration) -> Self {
        Self {
            site,
            show: Debouncer::new(show_debounce),
            clear: Debouncer::new(clear_delay),
            state: Arc::new(Mutex::new(PreviewState::default())),
        }
    }

    /// Pointer entered a grid item
    ///
    /// The preview only appears if the pointer is still there when the
    /// quiet period elapses. An id that no longer resolves is logged and
    /// ignored; hover is advisory and must never surface an error.
    pub fn hover_enter(&self, category: Category, section_id: &str) {
        self.clear.cancel();

        let site = Arc::clone(&self.site);
        let state = Arc::clone(&self.state);
        let section_id = section_id.to_string();
        self.show.call(move || {
            let section = match site.section(category, &section_id) {
                Ok(section) => section,
                Err(e) => {
                    warn!(%category, section_id, "hover preview skipped: {e}");
                    return;
                }
            };

            let snippet = snippet_of(&section.description);
            let image = section
                .logo_path
                .as_deref()
                .or_else(|| section.image())
                .map(str::to_string);

            debug!(%category, section_id, "showing hover preview");
            let mut state = state.lock().expect("preview lock poisoned");
            state.active = Some(ActivePreview { category, section_id, snippet });
            state.overlay_image = image;
            state.overlay_visible = true;
        });
    }

    /// Pointer left the grid item
    ///
    /// Cancels any preview still waiting on its quiet period, hides the
    /// overlay at once, and schedules the image clear so a re-entry within
    /// the delay keeps the artwork warm.
    pub fn hover_leave(&self) {
        self.show.cancel();

        {
            let mut state = self.state.lock().expect("preview lock poisoned");
            state.active = None;
            state.overlay_visible = false;
        }

        let state = Arc::clone(&self.state);
        self.clear.call(move || {
            let mut state = state.lock().expect("preview lock poisoned");
            if !state.overlay_visible {
                state.overlay_image = None;
            }
        });
    }

    /// Snapshot of the active preview, if one is showing
    pub fn active(&self) -> Option<ActivePreview> {
        self.state.lock().expect("preview lock poisoned").active.clone()
    }

    /// Whether the overlay is currently visible
    pub fn overlay_visible(&self) -> bool {
        self.state.lock().expect("preview lock poisoned").overlay_visible
    }

    /// The overlay's image path, which may outlive visibility briefly
    pub fn overlay_image(&self) -> Option<String> {
        self.state.lock().expect("preview lock poisoned").overlay_image.clone()
    }
}

/// Truncate a description to the snippet budget on a char boundary
fn snippet_of(description: &str) -> String {
    if description.chars().count() <= SNIPPET_MAX_CHARS {
        return description.to_string();
    }
    let truncated: String = description.chars().take(SNIPPET_MAX_CHARS).collect();
    format!("{}...", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use zoomsite_common::content::{CategoryContent, Media, Section, SocialLinks};

    fn sample_site() -> Arc<SiteStructure> {
        let mut roster = BTreeMap::new();
        roster.insert(
            "composer1".to_string(),
            Section {
                id: "composer1".to_string(),
                title: "Maestro".to_string(),
                description: "Grammy Award winning producer.".to_string(),
                media: vec![Media::Image { path: "/assets/maestro.png".to_string() }],
                social: SocialLinks::default(),
                logo_path: None,
            },
        );

        Arc::new(SiteStructure {
            catalogue: CategoryContent {
                title: "Search Catalogues".to_string(),
                sections: BTreeMap::new(),
            },
            roster: CategoryContent { title: "Bespoke Roster".to_string(), sections: roster },
            filmtv: CategoryContent { title: "FTV".to_string(), sections: BTreeMap::new() },
        })
    }

    fn preview() -> PreviewController {
        PreviewController::new(
            sample_site(),
            Duration::from_millis(100),
            Duration::from_millis(300),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_preview_appears_after_quiet_period() {
        let preview = preview();

        preview.hover_enter(Category::Roster, "composer1");
        assert!(preview.active().is_none());

        tokio::time::sleep(Duration::from_millis(150)).await;
        let active = preview.active().expect("preview shown");
        assert_eq!(active.section_id, "composer1");
        assert_eq!(active.snippet, "Grammy Award winning producer.");
        assert!(preview.overlay_visible());
        assert_eq!(preview.overlay_image().as_deref(), Some("/assets/maestro.png"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_skim_shows_nothing() {
        let preview = preview();

        // Leave before the quiet period elapses
        preview.hover_enter(Category::Roster, "composer1");
        tokio::time::sleep(Duration::from_millis(50)).await;
        preview.hover_leave();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(preview.active().is_none());
        assert!(!preview.overlay_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_leave_hides_immediately_and_clears_image_later() {
        let preview = preview();

        preview.hover_enter(Category::Roster, "composer1");
        tokio::time::sleep(Duration::from_millis(150)).await;

        preview.hover_leave();
        assert!(!preview.overlay_visible());
        assert!(preview.overlay_image().is_some());

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(preview.overlay_image().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reentry_within_clear_delay_keeps_image() {
        let preview = preview();

        preview.hover_enter(Category::Roster, "composer1");
        tokio::time::sleep(Duration::from_millis(150)).await;
        preview.hover_leave();

        // Back on the item before the clear fires
        tokio::time::sleep(Duration::from_millis(100)).await;
        preview.hover_enter(Category::Roster, "composer1");
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(preview.overlay_visible());
        assert!(preview.overlay_image().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_section_is_ignored() {
        let preview = preview();

        preview.hover_enter(Category::Roster, "does-not-exist");
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(preview.active().is_none());
        assert!(!preview.overlay_visible());
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let short = "A short bio.";
        assert_eq!(snippet_of(short), short);

        let long = "é".repeat(250);
        let snippet = snippet_of(&long);
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS + 3);
    }
}
