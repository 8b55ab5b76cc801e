//! View model: current view and breadcrumb path
//!
//! `ViewState` is the single source of truth for "what is showing";
//! `NavigationPath` is always derived from it, never set independently.

use zoomsite_common::content::{Category, Section, SiteStructure};

/// Ordered breadcrumb labels, outermost first
///
/// At most two entries deep in this domain: empty at home,
/// `[category_label]` for catalogue detail views, and
/// `[category_label, section_title]` for roster and film/TV detail views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationPath(Vec<String>);

impl NavigationPath {
    /// The empty path shown at home
    pub fn home() -> Self {
        Self(Vec::new())
    }

    /// Path for a detail view of `section` within `category`
    ///
    /// Catalogue detail views deliberately suppress the leaf title and
    /// show the category label alone. The original site did this
    /// consistently across every revision; it is documented behavior,
    /// not a bug.
    pub fn for_detail(site: &SiteStructure, category: Category, section: &Section) -> Self {
        let label = site.category_label(category).to_string();
        match category {
            Category::Catalogue => Self(vec![label]),
            Category::Roster | Category::FilmTv => Self(vec![label, section.title.clone()]),
        }
    }

    /// Breadcrumb labels, outermost first
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Breadcrumb text: `" > "`-joined labels, empty at home
    pub fn breadcrumb(&self) -> String {
        self.0.join(" > ")
    }
}

impl From<NavigationPath> for Vec<String> {
    fn from(path: NavigationPath) -> Self {
        path.0
    }
}

/// The currently active view
///
/// Exactly one state is active at a time. Created as `Home` at controller
/// construction; mutated only through controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Grid of categories visible, no panel
    Home,
    /// Detail panel for one section
    Detail {
        category: Category,
        section_id: String,
        section_title: String,
    },
}

impl ViewState {
    pub fn is_home(&self) -> bool {
        matches!(self, ViewState::Home)
    }

    /// Category of the current detail view, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            ViewState::Home => None,
            ViewState::Detail { category, .. } => Some(*category),
        }
    }

    /// Section id of the current detail view, if any
    pub fn section_id(&self) -> Option<&str> {
        match self {
            ViewState::Home => None,
            ViewState::Detail { section_id, .. } => Some(section_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use zoomsite_common::content::{CategoryContent, SocialLinks};

    fn site_with(category_titles: [&str; 3]) -> SiteStructure {
        let section = |id: &str, title: &str| Section {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            media: vec![],
            social: SocialLinks::default(),
            logo_path: None,
        };
        let content = |title: &str, id: &str, sec_title: &str| CategoryContent {
            title: title.to_string(),
            sections: BTreeMap::from([(id.to_string(), section(id, sec_title))]),
        };

        SiteStructure {
            catalogue: content(category_titles[0], "pop", "Pop"),
            roster: content(category_titles[1], "composer1", "Maestro"),
            filmtv: content(category_titles[2], "overview", "FTV Overview"),
        }
    }

    #[test]
    fn test_home_path_is_empty() {
        let path = NavigationPath::home();
        assert!(path.is_empty());
        assert_eq!(path.breadcrumb(), "");
    }

    #[test]
    fn test_catalogue_path_suppresses_leaf_title() {
        let site = site_with(["Search Catalogues", "Bespoke Roster", "FTV"]);
        let section = site.section(Category::Catalogue, "pop").unwrap();

        let path = NavigationPath::for_detail(&site, Category::Catalogue, section);
        assert_eq!(path.labels(), ["Search Catalogues"]);
        assert_eq!(path.breadcrumb(), "Search Catalogues");
    }

    #[test]
    fn test_roster_path_is_two_levels() {
        let site = site_with(["Search Catalogues", "Bespoke Roster", "FTV"]);
        let section = site.section(Category::Roster, "composer1").unwrap();

        let path = NavigationPath::for_detail(&site, Category::Roster, section);
        assert_eq!(path.labels(), ["Bespoke Roster", "Maestro"]);
        assert_eq!(path.breadcrumb(), "Bespoke Roster > Maestro");
    }

    #[test]
    fn test_path_never_exceeds_two_entries() {
        let site = site_with(["A", "B", "C"]);
        for category in Category::ALL {
            let content = site.category(category);
            for section in content.sections.values() {
                let path = NavigationPath::for_detail(&site, category, section);
                assert!(path.len() <= 2);
            }
        }
    }

    #[test]
    fn test_view_state_accessors() {
        let home = ViewState::Home;
        assert!(home.is_home());
        assert_eq!(home.category(), None);
        assert_eq!(home.section_id(), None);

        let detail = ViewState::Detail {
            category: Category::FilmTv,
            section_id: "overview".to_string(),
            section_title: "FTV Overview".to_string(),
        };
        assert!(!detail.is_home());
        assert_eq!(detail.category(), Some(Category::FilmTv));
        assert_eq!(detail.section_id(), Some("overview"));
    }
}
