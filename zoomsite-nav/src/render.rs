//! Panel renderers
//!
//! Given a section record, a renderer produces the markup for its detail
//! panel. Renderers are pure and supplied per category; the controller
//! treats them as replaceable collaborators. A renderer failure is
//! recoverable: the controller falls back to [`error_panel`].

use std::collections::HashMap;
use std::fmt::Write;

use zoomsite_common::content::{Category, Media, Section, VideoProvider};

use crate::error::Result;

/// Produces detail-panel markup for one section
pub trait PanelRenderer: Send + Sync {
    fn render(&self, section: &Section) -> Result<String>;
}

/// Renderer set keyed by category
pub type RendererMap = HashMap<Category, Box<dyn PanelRenderer>>;

/// The default per-category renderers
pub fn default_renderers() -> RendererMap {
    let mut renderers: RendererMap = HashMap::new();
    renderers.insert(Category::Catalogue, Box::new(CataloguePanel));
    renderers.insert(Category::Roster, Box::new(ComposerPanel));
    renderers.insert(Category::FilmTv, Box::new(FilmTvPanel));
    renderers
}

/// Catalogue label panel: logo header, description, playlist embed
pub struct CataloguePanel;

impl PanelRenderer for CataloguePanel {
    fn render(&self, section: &Section) -> Result<String> {
        let mut out = String::new();
        out.push_str("<div class=\"catalogue-content\">\n");
        out.push_str("  <div class=\"catalogue-header\">\n");
        if let Some(logo) = &section.logo_path {
            let _ = writeln!(
                out,
                "    <img src=\"{logo}\" alt=\"{}\" class=\"catalogue-logo\">",
                section.title
            );
        }
        let _ = writeln!(out, "    <h2>{}</h2>", section.title);
        out.push_str("  </div>\n");
        let _ = writeln!(
            out,
            "  <div class=\"catalogue-description\"><p>{}</p></div>",
            section.description
        );
        if let Some(embed) = section.playlist_embed() {
            let _ = writeln!(out, "  <div class=\"catalogue-playlist\">{embed}</div>");
        }
        out.push_str("</div>\n");
        Ok(out)
    }
}

/// Composer panel: bio paragraphs, social links, video grid
pub struct ComposerPanel;

impl PanelRenderer for ComposerPanel {
    fn render(&self, section: &Section) -> Result<String> {
        let mut out = String::new();
        out.push_str("<div class=\"composer-content\">\n");
        let _ = writeln!(out, "  <h1>{}</h1>", section.title);

        if !section.social.is_empty() {
            out.push_str("  <div class=\"social-links\">\n");
            for (platform, url) in [
                ("instagram", &section.social.instagram),
                ("spotify", &section.social.spotify),
                ("tiktok", &section.social.tiktok),
            ] {
                if let Some(url) = url {
                    let _ = writeln!(
                        out,
                        "    <a href=\"{url}\" class=\"social-link {platform}\" target=\"_blank\">{platform}</a>"
                    );
                }
            }
            out.push_str("  </div>\n");
        }

        if let Some(image) = section.image() {
            let _ = writeln!(out, "  <img src=\"{image}\" alt=\"{}\">", section.title);
        }

        out.push_str("  <div class=\"bio-section\">\n");
        for paragraph in section.description.split("\n\n").filter(|p| !p.is_empty()) {
            let _ = writeln!(out, "    <p>{paragraph}</p>");
        }
        out.push_str("  </div>\n");

        let videos: Vec<&Media> = section.videos().collect();
        if !videos.is_empty() {
            out.push_str("  <div class=\"video-grid\">\n");
            for media in videos {
                if let Media::Video { provider, id, title, thumbnail } = media {
                    let embed_url = match provider {
                        VideoProvider::Youtube => {
                            format!("https://www.youtube.com/embed/{id}")
                        }
                        VideoProvider::Vimeo => {
                            format!("https://player.vimeo.com/video/{id}")
                        }
                    };
                    let _ = writeln!(
                        out,
                        "    <div class=\"video-card\" data-embed=\"{embed_url}\">\n      <img src=\"{thumbnail}\" alt=\"{title}\">\n      <h3>{title}</h3>\n    </div>"
                    );
                }
            }
            out.push_str("  </div>\n");
        }

        out.push_str("</div>\n");
        Ok(out)
    }
}

/// Film & TV topic panel: description only
pub struct FilmTvPanel;

impl PanelRenderer for FilmTvPanel {
    fn render(&self, section: &Section) -> Result<String> {
        let mut out = String::new();
        out.push_str("<div class=\"ftv-content\">\n");
        let _ = writeln!(out, "  <h2>{}</h2>", section.title);
        let _ = writeln!(
            out,
            "  <div class=\"main-description\"><p>{}</p></div>",
            section.description
        );
        out.push_str("</div>\n");
        Ok(out)
    }
}

/// Generic error panel shown when a renderer fails
pub fn error_panel() -> String {
    concat!(
        "<div class=\"error-message\">\n",
        "  <h2>Error Loading Content</h2>\n",
        "  <p>Please try again later.</p>\n",
        "</div>\n"
    )
    .to_string()
}

/// Inline panel shown when a requested section is not in the repository
pub fn not_available_panel(section_id: &str) -> String {
    format!(
        "<div class=\"error-message\">\n  <h2>Content Not Available</h2>\n  <p>The section \"{section_id}\" could not be found.</p>\n</div>\n"
    )
}
