//! Content repository data model
//!
//! Read-only nested mapping of category → section id → display data,
//! loaded once at startup and immutable for the lifetime of the engine.
//! The navigation engine consumes this structure; it never writes to it.
//!
//! Lookups go through [`SiteStructure::section`] which reports missing
//! categories and ids as [`Error::NotFound`] instead of panicking.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level content groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Publishing catalogues (labels)
    Catalogue,
    /// Composer roster
    Roster,
    /// Film & TV services
    FilmTv,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 3] = [Category::Catalogue, Category::Roster, Category::FilmTv];

    /// Stable key used in content files and interaction commands
    pub fn key(&self) -> &'static str {
        match self {
            Category::Catalogue => "catalogue",
            Category::Roster => "roster",
            Category::FilmTv => "filmtv",
        }
    }

    /// Parse a category key (case-insensitive)
    pub fn parse(key: &str) -> Result<Self> {
        match key.to_ascii_lowercase().as_str() {
            "catalogue" => Ok(Category::Catalogue),
            "roster" => Ok(Category::Roster),
            "filmtv" => Ok(Category::FilmTv),
            other => Err(Error::InvalidInput(format!("unknown category: {other}"))),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Video hosting provider for embedded players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
}

/// A media reference attached to a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Media {
    /// Portrait or logo image path
    Image { path: String },
    /// Embeddable video with thumbnail
    Video {
        provider: VideoProvider,
        id: String,
        title: String,
        thumbnail: String,
    },
    /// Pre-built playlist embed markup (e.g. a Disco playlist iframe)
    PlaylistEmbed { markup: String },
}

/// Social profile links shown on composer panels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub spotify: Option<String>,
    #[serde(default)]
    pub tiktok: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.instagram.is_none() && self.spotify.is_none() && self.tiktok.is_none()
    }
}

/// One content entry: a catalogue label, a composer, or a film/TV topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique key within its category (e.g. "pop", "composer1")
    pub id: String,

    /// Display title
    pub title: String,

    /// Free text: catalogue description, composer bio, or topic content
    #[serde(default)]
    pub description: String,

    /// Media references in display order
    #[serde(default)]
    pub media: Vec<Media>,

    /// Social links (composer panels)
    #[serde(default)]
    pub social: SocialLinks,

    /// Logo art used for hover/background effects (catalogue panels)
    #[serde(default)]
    pub logo_path: Option<String>,
}

impl Section {
    /// First image media, if any
    pub fn image(&self) -> Option<&str> {
        self.media.iter().find_map(|m| match m {
            Media::Image { path } => Some(path.as_str()),
            _ => None,
        })
    }

    /// All video media, in display order
    pub fn videos(&self) -> impl Iterator<Item = &Media> {
        self.media.iter().filter(|m| matches!(m, Media::Video { .. }))
    }

    /// First playlist embed, if any
    pub fn playlist_embed(&self) -> Option<&str> {
        self.media.iter().find_map(|m| match m {
            Media::PlaylistEmbed { markup } => Some(markup.as_str()),
            _ => None,
        })
    }
}

/// One category's display label and its sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryContent {
    /// Category display label (breadcrumb root, e.g. "Bespoke Roster")
    pub title: String,

    /// Sections keyed by id; BTreeMap keeps display order stable
    pub sections: BTreeMap<String, Section>,
}

/// The read-only content repository: category → sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStructure {
    pub catalogue: CategoryContent,
    pub roster: CategoryContent,
    pub filmtv: CategoryContent,
}

impl SiteStructure {
    /// Parse a content repository from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a content repository from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Content for one category
    pub fn category(&self, category: Category) -> &CategoryContent {
        match category {
            Category::Catalogue => &self.catalogue,
            Category::Roster => &self.roster,
            Category::FilmTv => &self.filmtv,
        }
    }

    /// Display label for one category
    pub fn category_label(&self, category: Category) -> &str {
        &self.category(category).title
    }

    /// Resolve a section, reporting missing ids as NotFound
    pub fn section(&self, category: Category, section_id: &str) -> Result<&Section> {
        self.category(category).sections.get(section_id).ok_or_else(|| {
            Error::NotFound(format!("section '{section_id}' in category '{category}'"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_structure() -> SiteStructure {
        let mut catalogue = BTreeMap::new();
        catalogue.insert(
            "pop".to_string(),
            Section {
                id: "pop".to_string(),
                title: "Pop".to_string(),
                description: "Pop catalogue".to_string(),
                media: vec![Media::PlaylistEmbed {
                    markup: "<iframe src=\"https://example.com/p/pop\"></iframe>".to_string(),
                }],
                social: SocialLinks::default(),
                logo_path: Some("/assets/pop.png".to_string()),
            },
        );

        let mut roster = BTreeMap::new();
        roster.insert(
            "composer1".to_string(),
            Section {
                id: "composer1".to_string(),
                title: "Maestro".to_string(),
                description: "Grammy Award winning producer.".to_string(),
                media: vec![
                    Media::Image { path: "/assets/maestro.png".to_string() },
                    Media::Video {
                        provider: VideoProvider::Youtube,
                        id: "6p8GnWgK5Cs".to_string(),
                        title: "Qatar Airways".to_string(),
                        thumbnail: "https://img.youtube.com/vi/6p8GnWgK5Cs/maxresdefault.jpg"
                            .to_string(),
                    },
                ],
                social: SocialLinks {
                    instagram: Some("https://instagram.com/maestro".to_string()),
                    ..Default::default()
                },
                logo_path: None,
            },
        );

        let mut filmtv = BTreeMap::new();
        filmtv.insert(
            "overview".to_string(),
            Section {
                id: "overview".to_string(),
                title: "FTV Overview".to_string(),
                description: "Overview of our Film & TV services".to_string(),
                media: vec![],
                social: SocialLinks::default(),
                logo_path: None,
            },
        );

        SiteStructure {
            catalogue: CategoryContent { title: "Search Catalogues".to_string(), sections: catalogue },
            roster: CategoryContent { title: "Bespoke Roster".to_string(), sections: roster },
            filmtv: CategoryContent { title: "FTV".to_string(), sections: filmtv },
        }
    }

    #[test]
    fn test_section_lookup() {
        let site = sample_structure();

        let section = site.section(Category::Roster, "composer1").unwrap();
        assert_eq!(section.title, "Maestro");
        assert_eq!(section.image(), Some("/assets/maestro.png"));
        assert_eq!(section.videos().count(), 1);
    }

    #[test]
    fn test_missing_section_is_not_found() {
        let site = sample_structure();

        let err = site.section(Category::Roster, "does-not-exist").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_category_labels() {
        let site = sample_structure();

        assert_eq!(site.category_label(Category::Catalogue), "Search Catalogues");
        assert_eq!(site.category_label(Category::Roster), "Bespoke Roster");
        assert_eq!(site.category_label(Category::FilmTv), "FTV");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("catalogue").unwrap(), Category::Catalogue);
        assert_eq!(Category::parse("FilmTV").unwrap(), Category::FilmTv);
        assert!(Category::parse("blog").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let site = sample_structure();
        let json = serde_json::to_string(&site).unwrap();
        let parsed = SiteStructure::from_json(&json).unwrap();
        assert_eq!(parsed, site);
    }

    #[test]
    fn test_media_tagging() {
        let json = r#"{"kind":"video","provider":"vimeo","id":"969887901","title":"Disney","thumbnail":"https://i.vimeocdn.com/video/969887901_640.jpg"}"#;
        let media: Media = serde_json::from_str(json).unwrap();
        assert!(matches!(media, Media::Video { provider: VideoProvider::Vimeo, .. }));
    }
}
